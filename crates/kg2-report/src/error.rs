//! Report rendering and writing error types.

use std::path::PathBuf;

use kg2_schema::SchemaError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    /// An example record does not match the schema inferred for it.
    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Writing the report file failed.
    #[error("Failed to write report {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
