use std::path::Path;
use std::process::{Command, Stdio};

/// Post-processing applied to each written file.
///
/// Formatting is cosmetic: implementations must never block the write loop or
/// report failure.
pub trait Formatter {
    fn schedule(&self, path: &Path);
}

/// Leaves written files untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoFormatter;

impl Formatter for NoFormatter {
    fn schedule(&self, _path: &Path) {}
}

/// Runs an external formatter on each file as a detached background task.
///
/// The child is reaped on its own thread and nobody observes its outcome, so
/// the process may exit while formatters are still running.
#[derive(Debug, Clone)]
pub struct CommandFormatter {
    program: String,
    args: Vec<String>,
}

impl CommandFormatter {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// `elm-format --yes`
    pub fn elm_format() -> Self {
        Self::new("elm-format", vec!["--yes".to_string()])
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

impl Formatter for CommandFormatter {
    fn schedule(&self, path: &Path) {
        let spawned = Command::new(&self.program)
            .args(&self.args)
            .arg(path)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn();

        if let Ok(mut child) = spawned {
            std::thread::spawn(move || {
                let _ = child.wait();
            });
        }
    }
}
