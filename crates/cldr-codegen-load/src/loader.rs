use std::collections::BTreeSet;
use std::path::Path;

use tracing::{debug, info};

use cldr_codegen_core::{
    DocumentKind, LocaleDataset, LocaleDocuments, NumberFormats, SupplementalData,
};

use crate::errors::{LoadError, Result};
use crate::layout::DataLayout;

/// List the locale codes available under `dir`.
///
/// Every immediate subdirectory is a locale; plain files and other entries are
/// skipped. Codes are returned sorted and are not validated.
pub fn list_locale_codes(dir: &Path) -> Result<Vec<String>> {
    let enumerate_err = |source| LoadError::Enumerate {
        path: dir.to_path_buf(),
        source,
    };

    let mut codes = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(enumerate_err)? {
        let entry = entry.map_err(enumerate_err)?;
        // Follows symlinks, so a linked locale directory still counts.
        let is_dir = std::fs::metadata(entry.path())
            .map(|meta| meta.is_dir())
            .unwrap_or(false);
        if !is_dir {
            debug!(path = %entry.path().display(), "skipping non-directory entry");
            continue;
        }
        codes.push(entry.file_name().to_string_lossy().into_owned());
    }

    codes.sort();
    Ok(codes)
}

/// Read a document as bytes and decode it as UTF-8 text.
pub fn read_document(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    String::from_utf8(bytes).map_err(|source| LoadError::Decode {
        path: path.to_path_buf(),
        source,
    })
}

/// Locale codes of full mode: every locale found in either the numbers or
/// the misc package, sorted.
pub fn list_dataset_locales(layout: &DataLayout) -> Result<Vec<String>> {
    let mut codes = BTreeSet::new();
    for root in [layout.numbers_root(), layout.misc_root()] {
        let listed = list_locale_codes(&root)?;
        info!(
            event = "locales_listed",
            locales = listed.len(),
            root = %root.display()
        );
        codes.extend(listed);
    }
    Ok(codes.into_iter().collect())
}

/// Load every per-locale document for every locale of
/// [`list_dataset_locales`].
///
/// A locale present in only one package fails with [`LoadError::Read`] on the
/// first document it lacks.
pub fn load_dataset(layout: &DataLayout) -> Result<LocaleDataset> {
    let codes = list_dataset_locales(layout)?;

    let mut dataset = LocaleDataset::new();
    for code in codes {
        let mut documents = LocaleDocuments::default();
        for kind in DocumentKind::ALL {
            let text = read_document(&layout.document_path(&code, kind))?;
            documents.set(kind, text);
        }
        dataset.insert(code, documents);
    }

    info!(event = "dataset_loaded", locales = dataset.len());
    Ok(dataset)
}

/// Load `numbers.json` for every locale in the numbers package.
pub fn load_number_formats(layout: &DataLayout) -> Result<NumberFormats> {
    let root = layout.numbers_root();
    let codes = list_locale_codes(&root)?;
    info!(
        event = "locales_listed",
        locales = codes.len(),
        root = %root.display()
    );

    let mut formats = NumberFormats::new();
    for code in codes {
        let text = read_document(&layout.document_path(&code, DocumentKind::Numbers))?;
        formats.insert(code, text);
    }

    info!(event = "number_formats_loaded", locales = formats.len());
    Ok(formats)
}

/// Load the shared supplemental documents.
pub fn load_supplemental(layout: &DataLayout) -> Result<SupplementalData> {
    let supplemental = SupplementalData {
        cardinals: read_document(&layout.plurals_path())?,
        ordinals: read_document(&layout.ordinals_path())?,
        numbering_systems: read_document(&layout.numbering_systems_path())?,
    };
    info!(event = "supplemental_loaded");
    Ok(supplemental)
}
