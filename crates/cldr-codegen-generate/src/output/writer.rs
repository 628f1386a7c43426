use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::info;

use cldr_codegen_core::{GeneratedModule, validate_modules};

use crate::errors::WriteError;
use crate::model::WriteReport;
use crate::output::PROGRESS_TARGET;
use crate::output::formatter::Formatter;

/// Create each missing directory of `base/segments...`, outermost first.
///
/// `base` must already exist. Existing directories are left alone; the
/// returned list holds only the directories this call created.
pub fn ensure_directories(base: &Path, segments: &[String]) -> Result<Vec<PathBuf>, WriteError> {
    let mut created = Vec::new();
    let mut current = base.to_path_buf();

    for segment in segments {
        current.push(segment);
        if current.is_dir() {
            continue;
        }
        match fs::create_dir(&current) {
            Ok(()) => created.push(current.clone()),
            Err(err) if err.kind() == ErrorKind::AlreadyExists && current.is_dir() => {}
            Err(err) => return Err(WriteError::io(&current)(err)),
        }
    }

    Ok(created)
}

/// Write `modules` under `root` in the order given.
///
/// Every module path is validated before the first write, so an unsafe
/// descriptor leaves the output tree untouched. Existing files are
/// overwritten. Each written file is handed to `formatter`.
pub fn write_modules(
    root: &Path,
    modules: &[GeneratedModule],
    formatter: &dyn Formatter,
) -> Result<WriteReport, WriteError> {
    validate_modules(modules)?;

    let mut report = WriteReport::default();
    if !root.is_dir() {
        fs::create_dir_all(root).map_err(WriteError::io(root))?;
        report.created_dirs.push(root.to_path_buf());
    }

    for module in modules {
        report
            .created_dirs
            .extend(ensure_directories(root, &module.directory)?);

        let path = root.join(module.relative_path());
        fs::write(&path, &module.content).map_err(WriteError::io(&path))?;

        info!(
            target: PROGRESS_TARGET,
            event = "module_written",
            path = %path.display(),
            bytes = module.content.len(),
            "Generated: {}",
            module.relative_path().display()
        );

        formatter.schedule(&path);
        report.bytes_written += module.content.len() as u64;
        report.written.push(path);
    }

    Ok(report)
}
