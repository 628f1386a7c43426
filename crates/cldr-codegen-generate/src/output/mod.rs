//! Writing generated modules to disk.

pub mod formatter;
pub mod writer;

/// Tracing target of the per-module progress lines. Front ends keep it
/// enabled regardless of the configured verbosity.
pub const PROGRESS_TARGET: &str = "cldr_codegen::progress";

pub use formatter::{CommandFormatter, Formatter, NoFormatter};
pub use writer::{ensure_directories, write_modules};
