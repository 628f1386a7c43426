use std::path::PathBuf;

use thiserror::Error;

/// Errors emitted while writing generated modules.
#[derive(Debug, Error)]
pub enum WriteError {
    #[error("unsafe module path: {0}")]
    UnsafePath(#[from] cldr_codegen_core::Error),
    #[error("io error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl WriteError {
    pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.into();
        move |source| Self::Io { path, source }
    }
}
