//! Locale data loading from an unpacked CLDR JSON distribution.

pub mod errors;
pub mod layout;
pub mod loader;

pub use errors::LoadError;
pub use layout::DataLayout;
pub use loader::{
    list_dataset_locales, list_locale_codes, load_dataset, load_number_formats,
    load_supplemental, read_document,
};

pub use cldr_codegen_core::{LocaleDataset, NumberFormats, SupplementalData};
