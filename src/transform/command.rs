//! Transformation through an external XSLT processor.

use std::path::Path;
use std::process::Command;

use crate::config::TransformSettings;
use crate::transform::{TransformEngine, TransformError};

const STYLESHEET_PLACEHOLDER: &str = "{stylesheet}";
const SOURCE_PLACEHOLDER: &str = "{source}";

/// Runs a processor such as `xsltproc` on temporary copies of both inputs.
///
/// `{stylesheet}` and `{source}` in the argument list are replaced with the
/// paths of those copies. Standard output is the result; a non-zero exit
/// fails with standard error as the message.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandEngine {
    program: String,
    args: Vec<String>,
}

impl CommandEngine {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    pub fn from_settings(settings: &TransformSettings) -> Self {
        Self::new(settings.program.clone(), settings.args.clone())
    }

    fn expand_args(&self, stylesheet: &Path, source: &Path) -> Vec<String> {
        let stylesheet = stylesheet.to_string_lossy();
        let source = source.to_string_lossy();
        self.args
            .iter()
            .map(|arg| {
                arg.replace(STYLESHEET_PLACEHOLDER, &stylesheet)
                    .replace(SOURCE_PLACEHOLDER, &source)
            })
            .collect()
    }
}

impl TransformEngine for CommandEngine {
    fn transform(&self, stylesheet: &str, source: &str) -> Result<String, TransformError> {
        let dir = tempfile::tempdir()?;
        let stylesheet_path = dir.path().join("stylesheet.xsl");
        let source_path = dir.path().join("source.xml");
        std::fs::write(&stylesheet_path, stylesheet)?;
        std::fs::write(&source_path, source)?;

        let args = self.expand_args(&stylesheet_path, &source_path);
        log::debug!("Running {} {:?}", self.program, args);

        let output = Command::new(&self.program)
            .args(&args)
            .output()
            .map_err(|source| TransformError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(TransformError::Failed(stderr));
        }

        String::from_utf8(output.stdout).map_err(|_| TransformError::InvalidOutput)
    }
}
