//! Configuration error types.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// Figment extraction or merge error.
    #[error("Configuration error: {0}")]
    Figment(#[from] figment::Error),

    /// An explicitly requested config file does not exist.
    #[error("Configuration file not found: {}", .0.display())]
    MissingFile(PathBuf),

    /// A configuration field has an invalid value.
    #[error("Invalid configuration value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },

    /// A query template references a placeholder with no binding.
    #[error("Query '{query}' references unknown placeholder '{{{placeholder}}}'")]
    UnboundPlaceholder { query: String, placeholder: String },

    /// A named query is not defined.
    #[error("Unknown query: {0}")]
    UnknownQuery(String),
}

impl ConfigError {
    pub(crate) fn invalid(field: &str, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}
