//! # kg2-report
//!
//! Markdown document describing a graph dataset: its table types, the names
//! of the tables of each type, and an example record with its inferred JSON
//! Schema per type.

mod error;
mod render;

pub use error::ReportError;
pub use render::{render_entity_example, render_names_table, render_record_example};

use std::io::Write;
use std::path::Path;

use kg2_core::{EntityRecord, TableListing, TableType};

/// Fixed document header.
pub const PREAMBLE: &str = "# RTX-KG2-gateway Database Schema Details

Please see below for details on the graph database associated with RTX-KG2 created as part of this project.

## Table types

Tables below are provided as either NODE or REL_GROUP tables.
REL_GROUPS are collections of relationship tables, one per pair of NODE types they connect.
REL_GROUPS are shown by name below and can be referenced in queries instead of the many NODE type pairs they group.

";

/// Everything a report is built from.
#[derive(Debug, Clone, Copy)]
pub struct ReportInput<'a> {
    pub example_node: &'a EntityRecord,
    pub example_rel: &'a EntityRecord,
    pub tables: &'a TableListing,
}

/// Render the full document.
///
/// One section per table type, in the order types first appear in the
/// listing. `NODE` sections show the node example; every other type shows
/// the relationship example.
///
/// # Errors
///
/// Returns [`ReportError::Schema`] if an example fails its inferred schema.
pub fn render_report(input: &ReportInput<'_>) -> Result<String, ReportError> {
    let sections = input
        .tables
        .types()
        .into_iter()
        .map(|table_type| render_section(input, table_type))
        .collect::<Result<Vec<_>, _>>()?;

    let mut document = String::from(PREAMBLE);
    document.push_str(&sections.join("\n\n"));
    document.push('\n');
    Ok(document)
}

fn render_section(input: &ReportInput<'_>, table_type: TableType) -> Result<String, ReportError> {
    let example = if table_type == TableType::Node {
        input.example_node
    } else {
        input.example_rel
    };
    Ok(format!(
        "### {table_type} Tables

#### Example {table_type} Data and JSON Schema

{example}

#### {table_type} Names

{names}",
        example = render_record_example(example)?,
        names = render_names_table(input.tables.of_type(table_type)),
    ))
}

/// Write `document` to `path` atomically.
///
/// The text goes to a temporary file in the destination directory that then
/// replaces `path`; an interrupted write leaves any previous report intact.
///
/// # Errors
///
/// Returns [`ReportError::Write`] if the file cannot be written or moved
/// into place.
pub fn write_report(path: &Path, document: &str) -> Result<(), ReportError> {
    let write_err = |source| ReportError::Write {
        path: path.to_path_buf(),
        source,
    };
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(write_err)?;
    tmp.write_all(document.as_bytes()).map_err(write_err)?;
    tmp.as_file().sync_all().map_err(write_err)?;
    tmp.persist(path).map_err(|e| write_err(e.error))?;

    tracing::info!(path = %path.display(), bytes = document.len(), "report written");
    Ok(())
}
