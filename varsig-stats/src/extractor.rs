//! Seam for the external mutational-signature extraction tool.

use std::fs;
use std::path::Path;
use std::process::Command;

use log::info;
use serde::{Deserialize, Serialize};

use crate::errors::ExtractorError;

/// Anything that turns a directory of VCF files into a signature catalog.
pub trait SignatureExtractor {
    fn extract(&self, input_dir: &Path, output_dir: &Path) -> Result<(), ExtractorError>;
}

///
/// Runs an external program as `program [args..] <input_dir> <output_dir>`.
///
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandExtractor {
    pub command: String,
    #[serde(default)]
    pub args: Vec<String>,
}

impl CommandExtractor {
    pub fn new(command: impl Into<String>) -> Self {
        CommandExtractor {
            command: command.into(),
            args: Vec::new(),
        }
    }
}

impl SignatureExtractor for CommandExtractor {
    fn extract(&self, input_dir: &Path, output_dir: &Path) -> Result<(), ExtractorError> {
        fs::create_dir_all(output_dir)?;

        info!(
            "Running {} on {} -> {}",
            self.command,
            input_dir.display(),
            output_dir.display()
        );

        let status = Command::new(&self.command)
            .args(&self.args)
            .arg(input_dir)
            .arg(output_dir)
            .status()
            .map_err(|source| ExtractorError::Spawn {
                program: self.command.clone(),
                source,
            })?;

        if status.success() {
            Ok(())
        } else {
            Err(ExtractorError::Failed {
                program: self.command.clone(),
                status: status.to_string(),
            })
        }
    }
}
