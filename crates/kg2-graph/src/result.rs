//! Tabular and streaming query results.

use std::iter::FusedIterator;

use kg2_core::{EntityRecord, Value};
use serde::Serialize;

use crate::GraphError;
use crate::convert::from_duckdb;

/// A fully materialized result: column names and row values.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct QueryResult {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

impl QueryResult {
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Value of `column` in row `row`, if both exist.
    #[must_use]
    pub fn cell(&self, row: usize, column: &str) -> Option<&Value> {
        let index = self.columns.iter().position(|c| c == column)?;
        self.rows.get(row)?.get(index)
    }

    /// Rows as records; internal columns are routed aside.
    #[must_use]
    pub fn records(&self) -> Vec<EntityRecord> {
        self.rows
            .iter()
            .map(|row| {
                EntityRecord::from_columns(
                    self.columns.iter().map(String::as_str).zip(row.iter().cloned()),
                )
            })
            .collect()
    }
}

/// A compiled query bound to its connection.
///
/// Each call to [`PreparedQuery::stream`] re-executes the statement and
/// yields a fresh, single-pass cursor.
pub struct PreparedQuery<'conn> {
    pub(crate) sql: String,
    pub(crate) stmt: duckdb::Statement<'conn>,
}

impl PreparedQuery<'_> {
    /// Execute and return a lazy cursor over the result rows.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::Query`] if execution fails.
    pub fn stream(&mut self) -> Result<RecordStream<'_>, GraphError> {
        let rows = self.stmt.query([]).map_err(|source| GraphError::Query {
            sql: self.sql.clone(),
            source,
        })?;
        let columns = rows
            .as_ref()
            .map(duckdb::Statement::column_names)
            .unwrap_or_default();
        Ok(RecordStream {
            rows,
            columns,
            exhausted: false,
        })
    }

    /// Execute and materialize every row.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::Query`] if execution fails, or
    /// [`GraphError::DuckDb`] if a row cannot be read.
    pub fn collect(&mut self) -> Result<QueryResult, GraphError> {
        let mut stream = self.stream()?;
        let mut rows = Vec::new();
        while let Some(values) = stream.next_values()? {
            rows.push(values);
        }
        Ok(QueryResult {
            columns: stream.columns,
            rows,
        })
    }
}

/// Single-pass cursor over query results.
///
/// Once it reports the end (or an error) it stays exhausted; rows are never
/// replayed.
pub struct RecordStream<'stmt> {
    rows: duckdb::Rows<'stmt>,
    columns: Vec<String>,
    exhausted: bool,
}

impl RecordStream<'_> {
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    #[must_use]
    pub const fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// Next row as raw values in column order.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::DuckDb`] if the engine fails mid-stream.
    pub fn next_values(&mut self) -> Result<Option<Vec<Value>>, GraphError> {
        if self.exhausted {
            return Ok(None);
        }
        let width = self.columns.len();
        let row = match self.rows.next() {
            Ok(Some(row)) => row,
            Ok(None) => {
                self.exhausted = true;
                return Ok(None);
            }
            Err(e) => {
                self.exhausted = true;
                return Err(e.into());
            }
        };

        let mut values = Vec::with_capacity(width);
        for i in 0..width {
            match row.get::<_, duckdb::types::Value>(i) {
                Ok(value) => values.push(from_duckdb(value)),
                Err(e) => {
                    self.exhausted = true;
                    return Err(e.into());
                }
            }
        }
        Ok(Some(values))
    }

    /// Next row as a record.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::DuckDb`] if the engine fails mid-stream.
    pub fn next_record(&mut self) -> Result<Option<EntityRecord>, GraphError> {
        Ok(self.next_values()?.map(|values| {
            EntityRecord::from_columns(self.columns.iter().map(String::as_str).zip(values))
        }))
    }
}

impl Iterator for RecordStream<'_> {
    type Item = Result<EntityRecord, GraphError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_record().transpose()
    }
}

impl FusedIterator for RecordStream<'_> {}
