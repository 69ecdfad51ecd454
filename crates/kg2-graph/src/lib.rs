//! # kg2-graph
//!
//! Read-only access to an extracted graph dataset.
//!
//! A dataset directory holds a single `DuckDB` file (see [`schemas`]) with
//! every node in `kg_nodes`, every relationship in `kg_edges`, and the list of
//! node tables, relationship tables and relationship groups in `kg_catalog`.
//!
//! - [`GraphDatabase`]: open a dataset and run queries as tables, streams or
//!   point lookups
//! - [`QueryDriver`]: the fixed inspection sequence over a dataset
//! - [`GraphWriter`]: build a dataset (fixtures, local conversions)

mod convert;
pub mod driver;
pub mod error;
pub mod import;
mod result;
pub mod schemas;
pub mod writer;

pub use driver::{DriverOutput, QueryDriver};
pub use error::{DriverError, GraphError};
pub use import::{ImportStats, import_jsonl};
pub use result::{PreparedQuery, QueryResult, RecordStream};
pub use writer::{EdgeRow, GraphWriter, NodeRow, rel_member_name};

use std::path::{Path, PathBuf};

use duckdb::{AccessMode, Config, Connection};
use kg2_core::{CoreError, EntityRecord, TableDescriptor, TableListing, TableType};

/// An open, read-only graph dataset.
pub struct GraphDatabase {
    conn: Connection,
    path: PathBuf,
}

impl GraphDatabase {
    /// Open the dataset in `dataset_dir` read-only.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::MissingDataset`] if the directory is absent,
    /// [`GraphError::NotADatabase`] if it holds no engine file, and
    /// [`GraphError::Open`] if the engine rejects the file.
    pub fn open(dataset_dir: &Path) -> Result<Self, GraphError> {
        if !dataset_dir.is_dir() {
            return Err(GraphError::MissingDataset(dataset_dir.to_path_buf()));
        }
        let path = dataset_dir.join(schemas::DATABASE_FILE);
        if !path.is_file() {
            return Err(GraphError::NotADatabase(dataset_dir.to_path_buf()));
        }

        let config = Config::default().access_mode(AccessMode::ReadOnly)?;
        let conn = Connection::open_with_flags(&path, config).map_err(|source| {
            GraphError::Open {
                path: path.clone(),
                source,
            }
        })?;
        tracing::debug!(path = %path.display(), "opened graph dataset");
        Ok(Self { conn, path })
    }

    /// Path of the engine file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Compile `sql` without running it.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::Query`] if the text does not parse or bind.
    pub fn prepare(&self, sql: &str) -> Result<PreparedQuery<'_>, GraphError> {
        let stmt = self.conn.prepare(sql).map_err(|source| GraphError::Query {
            sql: sql.to_string(),
            source,
        })?;
        Ok(PreparedQuery {
            sql: sql.to_string(),
            stmt,
        })
    }

    /// Run `sql` and materialize the full result.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::Query`] for invalid text or a failed execution.
    pub fn execute(&self, sql: &str) -> Result<QueryResult, GraphError> {
        tracing::debug!(sql, "executing query");
        let result = self.prepare(sql)?.collect()?;
        tracing::debug!(rows = result.len(), "query complete");
        Ok(result)
    }

    /// Run `sql` and return its first record, or `None` if it matched nothing.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::Query`] for invalid text or a failed execution.
    pub fn fetch_one(&self, sql: &str) -> Result<Option<EntityRecord>, GraphError> {
        let mut prepared = self.prepare(sql)?;
        let mut stream = prepared.stream()?;
        stream.next_record()
    }

    /// Run a catalog query returning `name` and `type` columns.
    ///
    /// Row order is whatever the query produces.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::Query`] if the query fails and
    /// [`GraphError::Core`] if a row lacks a textual `name` or `type`.
    pub fn show_tables(&self, sql: &str) -> Result<TableListing, GraphError> {
        let result = self.execute(sql)?;
        let column = |name: &str| {
            result
                .columns
                .iter()
                .position(|c| c == name)
                .ok_or_else(|| CoreError::UnexpectedValue {
                    field: name.to_string(),
                    expected: "column",
                    found: "nothing",
                })
        };
        let name_idx = column("name")?;
        let type_idx = column("type")?;

        let mut tables = Vec::with_capacity(result.len());
        for row in &result.rows {
            let text = |idx: usize, field: &str| {
                row[idx].as_str().ok_or_else(|| CoreError::UnexpectedValue {
                    field: field.to_string(),
                    expected: "string",
                    found: row[idx].kind(),
                })
            };
            let name = text(name_idx, "name")?;
            let table_type: TableType = text(type_idx, "type")?.parse()?;
            tables.push(TableDescriptor::new(name, table_type));
        }
        Ok(TableListing::new(tables))
    }
}
