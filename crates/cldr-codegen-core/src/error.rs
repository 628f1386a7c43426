use thiserror::Error;

/// Core error type shared across cldr-codegen crates.
#[derive(Debug, Error)]
pub enum Error {
    /// A module descriptor would escape the output root.
    #[error("invalid module path: {0}")]
    InvalidModulePath(String),
    /// A locale code cannot be turned into a module name.
    #[error("invalid locale code: {0}")]
    InvalidLocaleCode(String),
}

/// Convenience alias for results returned by cldr-codegen crates.
pub type Result<T> = std::result::Result<T, Error>;
