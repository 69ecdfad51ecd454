//! Dataset source and local cache location.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

const DEFAULT_DATASET_NAME: &str = "kg2c_lite_2.8.4.full.with-metanames.dataset.duckdb";

fn default_source_url() -> String {
    format!(
        "https://github.com/CU-DBMI/rtx-kg2-gateway/releases/download/v0.0.1/{DEFAULT_DATASET_NAME}.tar.gz"
    )
}

fn default_target_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_dataset_name() -> String {
    DEFAULT_DATASET_NAME.to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatasetConfig {
    /// Archive location (`.tar.gz` containing the dataset directory).
    #[serde(default = "default_source_url")]
    pub source_url: String,

    /// Local cache root; created if absent.
    #[serde(default = "default_target_dir")]
    pub target_dir: PathBuf,

    /// Name of the dataset directory inside the archive and under `target_dir`.
    #[serde(default = "default_dataset_name")]
    pub dataset_name: String,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            source_url: default_source_url(),
            target_dir: default_target_dir(),
            dataset_name: default_dataset_name(),
        }
    }
}

impl DatasetConfig {
    /// `<target_dir>/<dataset_name>`.
    #[must_use]
    pub fn dataset_dir(&self) -> PathBuf {
        self.target_dir.join(&self.dataset_name)
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if !(self.source_url.starts_with("http://") || self.source_url.starts_with("https://")) {
            return Err(ConfigError::invalid(
                "dataset.source_url",
                format!("expected an http(s) URL, got '{}'", self.source_url),
            ));
        }
        if self.dataset_name.trim().is_empty() {
            return Err(ConfigError::invalid("dataset.dataset_name", "must not be empty"));
        }
        if self.dataset_name.contains(['/', '\\']) || self.dataset_name == ".." {
            return Err(ConfigError::invalid(
                "dataset.dataset_name",
                "must be a single directory name",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dataset_dir_joins_target_and_name() {
        let config = DatasetConfig {
            target_dir: PathBuf::from("/tmp/kg"),
            dataset_name: "graph".to_string(),
            ..DatasetConfig::default()
        };
        assert_eq!(config.dataset_dir(), PathBuf::from("/tmp/kg/graph"));
    }

    #[test]
    fn default_url_names_the_dataset_archive() {
        let config = DatasetConfig::default();
        assert!(
            config
                .source_url
                .ends_with(&format!("{}.tar.gz", config.dataset_name))
        );
    }

    #[test]
    fn rejects_non_http_url() {
        let config = DatasetConfig {
            source_url: "ftp://example.org/kg.tar.gz".to_string(),
            ..DatasetConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { ref field, .. }) if field == "dataset.source_url"
        ));
    }

    #[test]
    fn rejects_nested_dataset_name() {
        let config = DatasetConfig {
            dataset_name: "a/b".to_string(),
            ..DatasetConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
