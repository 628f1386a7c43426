use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while reading the CLDR data distribution.
///
/// Every variant is fatal for the run: nothing is generated from a partially
/// loaded dataset.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to list locales in {path}: {source}")]
    Enumerate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{path} is not valid UTF-8: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: std::string::FromUtf8Error,
    },
}

/// Result type for loader operations.
pub type Result<T> = std::result::Result<T, LoadError>;
