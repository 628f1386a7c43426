use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// One output file produced by a generation engine.
///
/// `directory` and `filename` are untrusted relative components; callers must
/// run them through [`crate::validate_module`] before joining them onto an
/// output root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedModule {
    #[serde(default)]
    pub directory: Vec<String>,
    #[serde(alias = "name")]
    pub filename: String,
    pub content: String,
}

impl GeneratedModule {
    pub fn new(
        directory: impl IntoIterator<Item = impl Into<String>>,
        filename: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            directory: directory.into_iter().map(Into::into).collect(),
            filename: filename.into(),
            content: content.into(),
        }
    }

    /// Path of the module relative to the output root.
    pub fn relative_path(&self) -> PathBuf {
        let mut path: PathBuf = self.directory.iter().collect();
        path.push(&self.filename);
        path
    }
}

/// Opaque multi-line diagnostic reported by an engine that rejected its input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationFailure {
    pub diagnostic: String,
}

impl GenerationFailure {
    pub fn new(diagnostic: impl Into<String>) -> Self {
        Self {
            diagnostic: diagnostic.into(),
        }
    }

    /// Diagnostic split into printable lines.
    ///
    /// Splits on real newlines and on the two-character escape `\n`, which
    /// some workers emit instead.
    pub fn lines(&self) -> Vec<&str> {
        self.diagnostic
            .lines()
            .flat_map(|line| line.split("\\n"))
            .collect()
    }
}

impl fmt::Display for GenerationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.diagnostic)
    }
}

impl std::error::Error for GenerationFailure {}
