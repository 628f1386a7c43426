use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use cldr_codegen_core::{LocaleDataset, NumberFormats, SupplementalData};

/// Which slice of CLDR a run generates from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerationMode {
    /// Every per-locale document plus all supplemental data.
    #[default]
    Full,
    /// Number formats and plural rules only.
    Numbers,
}

impl GenerationMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Full => "full",
            Self::Numbers => "numbers",
        }
    }

    /// Output root used when none is configured.
    pub fn default_output_root(self) -> PathBuf {
        match self {
            Self::Full => PathBuf::from("src"),
            Self::Numbers => PathBuf::from("generated").join("Translation"),
        }
    }
}

impl fmt::Display for GenerationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GenerationMode {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "full" => Ok(Self::Full),
            "numbers" => Ok(Self::Numbers),
            other => Err(format!("unknown generation mode '{other}' (expected full or numbers)")),
        }
    }
}

/// Everything an engine receives for one run.
#[derive(Debug, Clone)]
pub enum GenerationRequest {
    Full {
        dataset: LocaleDataset,
        supplemental: SupplementalData,
    },
    NumbersOnly {
        number_formats: NumberFormats,
        cardinals: String,
        ordinals: String,
    },
}

impl GenerationRequest {
    pub fn mode(&self) -> GenerationMode {
        match self {
            Self::Full { .. } => GenerationMode::Full,
            Self::NumbersOnly { .. } => GenerationMode::Numbers,
        }
    }

    pub fn locale_count(&self) -> usize {
        match self {
            Self::Full { dataset, .. } => dataset.len(),
            Self::NumbersOnly { number_formats, .. } => number_formats.len(),
        }
    }
}

/// Summary of a write pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriteReport {
    /// Written files, in write order.
    pub written: Vec<PathBuf>,
    /// Directories that did not exist before the pass.
    pub created_dirs: Vec<PathBuf>,
    pub bytes_written: u64,
}
