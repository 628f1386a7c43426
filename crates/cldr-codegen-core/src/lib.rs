//! Core contracts shared by the cldr-codegen crates.
//!
//! This crate defines the in-memory locale dataset handed to generation
//! engines, the generated module descriptors they return, and the path
//! validation every writer applies before touching the filesystem.

pub mod dataset;
pub mod error;
pub mod module;
pub mod validation;

pub use dataset::{DocumentKind, LocaleDataset, LocaleDocuments, NumberFormats, SupplementalData};
pub use error::{Error, Result};
pub use module::{GeneratedModule, GenerationFailure};
pub use validation::{validate_module, validate_modules, validate_path_component};
