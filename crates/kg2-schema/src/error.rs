//! Schema inference and validation error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SchemaError {
    /// The example does not conform to the schema inferred for it.
    #[error("Example does not match its schema: {errors:?}")]
    Mismatch {
        /// Individual error messages from the validator.
        errors: Vec<String>,
    },

    /// The schema itself could not be compiled.
    #[error("Schema compilation error: {0}")]
    Compile(String),
}
