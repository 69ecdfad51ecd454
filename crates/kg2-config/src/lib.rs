//! # kg2-config
//!
//! Layered configuration loading for the RTX-KG2 gateway using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`KG2_*` prefix, `__` as separator)
//! 2. Project-level `.kg2/config.toml`
//! 3. User-level `~/.config/kg2/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `KG2_DATASET__TARGET_DIR` -> `dataset.target_dir`,
//! `KG2_LOOKUPS__NODE_ID` -> `lookups.node_id`, and so on.
//!
//! # Usage
//!
//! ```no_run
//! use kg2_config::Kg2Config;
//!
//! let config = Kg2Config::load_with_dotenv().expect("config");
//! println!("dataset lives in {}", config.dataset.dataset_dir().display());
//! ```

mod dataset;
mod error;
mod lookups;
mod queries;
mod report;

pub use dataset::DatasetConfig;
pub use error::ConfigError;
pub use lookups::{LookupConfig, SqlLiteral};
pub use queries::{NamedQuery, QuerySet, render_template};
pub use report::ReportConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Kg2Config {
    #[serde(default)]
    pub dataset: DatasetConfig,
    #[serde(default)]
    pub lookups: LookupConfig,
    #[serde(default)]
    pub queries: QuerySet,
    #[serde(default)]
    pub report: ReportConfig,
}

impl Kg2Config {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy`; use [`Self::load_with_dotenv`] for `.env` support.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Figment`] if a source cannot be parsed, or a
    /// validation error if the merged values are unusable.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_figment(Self::figment())
    }

    /// Load configuration with `.env` file support.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Load configuration with an extra TOML file layered above the project file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingFile`] if `path` does not exist, otherwise
    /// the same as [`Self::load`].
    pub fn load_with_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::MissingFile(path.to_path_buf()));
        }
        let figment = Self::base_figment()
            .merge(Toml::file(path))
            .merge(Self::env_provider());
        Self::from_figment(figment)
    }

    /// Extract and validate a config from an arbitrary figment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] on extraction or validation failure.
    pub fn from_figment(figment: Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment directly or add providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        Self::base_figment().merge(Self::env_provider())
    }

    /// Defaults, then the user-global file, then the project-local file.
    fn base_figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        let local_path = PathBuf::from(".kg2/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment
    }

    fn env_provider() -> Env {
        Env::prefixed("KG2_").split("__")
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("kg2").join("config.toml"))
    }

    /// Check the merged configuration for values nothing downstream can use.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.dataset.validate()?;
        self.lookups.validate()?;
        self.queries.validate(&self.lookups)?;
        self.report.validate()
    }
}
