use std::path::PathBuf;

use cldr_codegen_core::DocumentKind;

/// Where the CLDR JSON packages live on disk.
///
/// Paths are resolved against `data_root`, never against the process working
/// directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataLayout {
    pub data_root: PathBuf,
    /// Per-locale number documents (`numbers.json`, `currencies.json`).
    pub numbers_dir: PathBuf,
    /// Per-locale misc documents (`delimiters.json`, `listPatterns.json`).
    pub misc_dir: PathBuf,
    /// Shared supplemental documents.
    pub supplemental_dir: PathBuf,
}

impl Default for DataLayout {
    fn default() -> Self {
        Self::new(PathBuf::from("."))
    }
}

impl DataLayout {
    pub fn new(data_root: impl Into<PathBuf>) -> Self {
        Self {
            data_root: data_root.into(),
            numbers_dir: PathBuf::from("cldr-numbers-full").join("main"),
            misc_dir: PathBuf::from("cldr-misc-full").join("main"),
            supplemental_dir: PathBuf::from("cldr-core").join("supplemental"),
        }
    }

    pub fn numbers_root(&self) -> PathBuf {
        self.data_root.join(&self.numbers_dir)
    }

    pub fn misc_root(&self) -> PathBuf {
        self.data_root.join(&self.misc_dir)
    }

    pub fn supplemental_root(&self) -> PathBuf {
        self.data_root.join(&self.supplemental_dir)
    }

    /// Path of a per-locale document.
    pub fn document_path(&self, locale: &str, kind: DocumentKind) -> PathBuf {
        let package = match kind {
            DocumentKind::Numbers | DocumentKind::Currencies => self.numbers_root(),
            DocumentKind::Delimiters | DocumentKind::ListPatterns => self.misc_root(),
        };
        package.join(locale).join(kind.file_name())
    }

    pub fn plurals_path(&self) -> PathBuf {
        self.supplemental_root().join("plurals.json")
    }

    pub fn ordinals_path(&self) -> PathBuf {
        self.supplemental_root().join("ordinals.json")
    }

    pub fn numbering_systems_path(&self) -> PathBuf {
        self.supplemental_root().join("numberingSystems.json")
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;

    #[test]
    fn document_paths_follow_package_layout() {
        let layout = DataLayout::new("/data");
        assert_eq!(
            layout.document_path("fr", DocumentKind::Delimiters),
            Path::new("/data/cldr-misc-full/main/fr/delimiters.json")
        );
        assert_eq!(
            layout.document_path("fr", DocumentKind::Currencies),
            Path::new("/data/cldr-numbers-full/main/fr/currencies.json")
        );
        assert_eq!(
            layout.numbering_systems_path(),
            Path::new("/data/cldr-core/supplemental/numberingSystems.json")
        );
    }
}
