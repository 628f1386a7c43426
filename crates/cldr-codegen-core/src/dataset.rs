use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Per-locale CLDR documents read by the loader.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DocumentKind {
    Numbers,
    Currencies,
    Delimiters,
    ListPatterns,
}

impl DocumentKind {
    /// Every per-locale document a full generation run requires.
    pub const ALL: [DocumentKind; 4] = [
        DocumentKind::Delimiters,
        DocumentKind::ListPatterns,
        DocumentKind::Numbers,
        DocumentKind::Currencies,
    ];

    /// File name of the document inside a locale directory.
    pub fn file_name(self) -> &'static str {
        match self {
            Self::Numbers => "numbers.json",
            Self::Currencies => "currencies.json",
            Self::Delimiters => "delimiters.json",
            Self::ListPatterns => "listPatterns.json",
        }
    }

    /// Key used for the document on the worker wire format.
    pub fn key(self) -> &'static str {
        match self {
            Self::Numbers => "numbers",
            Self::Currencies => "currencies",
            Self::Delimiters => "delimiters",
            Self::ListPatterns => "listPatterns",
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_name())
    }
}

/// Raw JSON text of every per-locale document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocaleDocuments {
    pub numbers: String,
    pub currencies: String,
    pub delimiters: String,
    pub list_patterns: String,
}

impl LocaleDocuments {
    pub fn get(&self, kind: DocumentKind) -> &str {
        match kind {
            DocumentKind::Numbers => &self.numbers,
            DocumentKind::Currencies => &self.currencies,
            DocumentKind::Delimiters => &self.delimiters,
            DocumentKind::ListPatterns => &self.list_patterns,
        }
    }

    pub fn set(&mut self, kind: DocumentKind, text: String) {
        match kind {
            DocumentKind::Numbers => self.numbers = text,
            DocumentKind::Currencies => self.currencies = text,
            DocumentKind::Delimiters => self.delimiters = text,
            DocumentKind::ListPatterns => self.list_patterns = text,
        }
    }
}

/// Locale code to raw documents, ordered by locale code.
pub type LocaleDataset = BTreeMap<String, LocaleDocuments>;

/// Locale code to raw `numbers.json` text, used by numbers-only generation.
pub type NumberFormats = BTreeMap<String, String>;

/// Shared, locale-independent documents loaded once per run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplementalData {
    /// `plurals.json`
    pub cardinals: String,
    /// `ordinals.json`
    pub ordinals: String,
    /// `numberingSystems.json`
    pub numbering_systems: String,
}
