use std::path::{Component, Path};

use crate::error::{Error, Result};
use crate::module::GeneratedModule;

/// Validate a single directory segment or file name.
///
/// This rejects:
/// - empty components, `.` and `..`
/// - anything containing `/`, `\` or NUL
/// - components that parse as a root or drive prefix
pub fn validate_path_component(component: &str) -> Result<()> {
    if component.is_empty() {
        return Err(Error::InvalidModulePath("empty path component".to_string()));
    }

    if component == "." || component == ".." {
        return Err(Error::InvalidModulePath(format!(
            "relative path component: {component}"
        )));
    }

    if component.contains(['/', '\\', '\0']) {
        return Err(Error::InvalidModulePath(format!(
            "path component contains a separator: {component:?}"
        )));
    }

    let mut components = Path::new(component).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => Ok(()),
        _ => Err(Error::InvalidModulePath(format!(
            "path component is not a plain name: {component:?}"
        ))),
    }
}

/// Validate every directory segment and the file name of a module.
pub fn validate_module(module: &GeneratedModule) -> Result<()> {
    for segment in &module.directory {
        validate_path_component(segment)?;
    }
    validate_path_component(&module.filename)
}

/// Validate a batch of modules, failing on the first unsafe one.
pub fn validate_modules(modules: &[GeneratedModule]) -> Result<()> {
    modules.iter().try_for_each(validate_module)
}
