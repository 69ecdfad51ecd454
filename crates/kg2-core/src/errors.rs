//! Cross-cutting error types.
//!
//! Domain-specific errors (`FetchError`, `GraphError`, ...) live in their
//! respective crates and converge in `kg2-cli` through `anyhow`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    /// The catalog reported a table type outside the known set.
    #[error("Unknown table type: {0}")]
    UnknownTableType(String),

    /// A value did not have the shape a caller required.
    #[error("Unexpected value for '{field}': expected {expected}, found {found}")]
    UnexpectedValue {
        field: String,
        expected: &'static str,
        found: &'static str,
    },
}
