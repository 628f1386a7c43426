//! Generation engines and output writing for cldr-codegen.
//!
//! An engine turns raw CLDR JSON into generated source modules in a single
//! call; the writer places those modules under an output root and hands each
//! file to a best-effort formatter.

pub mod elm;
pub mod engine;
pub mod errors;
pub mod model;
pub mod output;
pub mod process;

pub use elm::ElmEngine;
pub use engine::{GenerationEngine, run_engine};
pub use errors::WriteError;
pub use model::{GenerationMode, GenerationRequest, WriteReport};
pub use output::{
    CommandFormatter, Formatter, NoFormatter, PROGRESS_TARGET, ensure_directories, write_modules,
};
pub use process::ProcessEngine;

pub use cldr_codegen_core::{GeneratedModule, GenerationFailure};
