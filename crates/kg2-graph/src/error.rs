//! Graph access error types.

use std::path::PathBuf;

use kg2_config::ConfigError;
use kg2_core::CoreError;

/// Errors from opening or querying a graph dataset.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    /// The dataset directory does not exist.
    #[error("Dataset directory not found: {}", .0.display())]
    MissingDataset(PathBuf),

    /// The dataset directory has no engine file.
    #[error("Not a graph dataset (missing {}): {}", crate::schemas::DATABASE_FILE, .0.display())]
    NotADatabase(PathBuf),

    /// The engine refused to open the dataset.
    #[error("Failed to open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: duckdb::Error,
    },

    /// The query text did not parse or bind against the dataset schema.
    #[error("Query failed to compile: {source}\n{sql}")]
    Query {
        sql: String,
        #[source]
        source: duckdb::Error,
    },

    /// A node or relationship references a table missing from the catalog.
    #[error("Unknown {expected} table: {name}")]
    UnknownTable { name: String, expected: &'static str },

    /// A relationship endpoint names no inserted node.
    #[error("Unknown node: {0}")]
    UnknownNode(String),

    /// A line of a JSON Lines export did not parse.
    #[error("Failed to import {}, line {line}: {source}", path.display())]
    Import {
        path: PathBuf,
        line: usize,
        #[source]
        source: std::io::Error,
    },

    /// `DuckDB` operation failed.
    #[error("DuckDB error: {0}")]
    DuckDb(#[from] duckdb::Error),

    #[error(transparent)]
    Core(#[from] CoreError),

    /// I/O error creating dataset directories.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors from the fixed query sequence.
#[derive(Debug, thiserror::Error)]
pub enum DriverError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Graph(#[from] GraphError),

    /// A point lookup that must match one record matched none.
    #[error("Query '{query}' matched no records")]
    NotFound { query: String },
}
