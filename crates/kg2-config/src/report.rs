//! Report output configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

fn default_output_path() -> PathBuf {
    PathBuf::from("rtx-kg2-gateway-database-details.md")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ReportConfig {
    /// Markdown file overwritten on every report run.
    #[serde(default = "default_output_path")]
    pub output_path: PathBuf,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            output_path: default_output_path(),
        }
    }
}

impl ReportConfig {
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.output_path.file_name().is_none() {
            return Err(ConfigError::invalid(
                "report.output_path",
                format!("'{}' does not name a file", self.output_path.display()),
            ));
        }
        Ok(())
    }
}
