//! Building a graph dataset directory.
//!
//! Used to produce fixture datasets and local conversions in the layout
//! [`crate::GraphDatabase`] reads. Lists go in as string-serialized literals
//! with a `::VARCHAR[]` cast, the same way embeddings are written elsewhere.

use std::path::Path;

use duckdb::{Connection, params};
use kg2_core::TableType;

use crate::{GraphError, schemas};

/// One node to insert. `label` must be a registered node table.
#[derive(Debug, Clone, Default)]
pub struct NodeRow {
    pub label: String,
    pub id: String,
    pub name: Option<String>,
    pub category: Option<String>,
    pub all_categories: Vec<String>,
    pub iri: Option<String>,
    pub description: Option<String>,
    pub equivalent_curies: Vec<String>,
    pub publications: Vec<String>,
}

/// One relationship to insert.
///
/// `label` names a relationship group, one of its member tables, or a
/// standalone relationship table. Grouped rows are stored under the group
/// name with the member table kept aside in `_table`; a bare group label
/// resolves its member from the endpoint node tables.
#[derive(Debug, Clone, Default)]
pub struct EdgeRow {
    pub label: String,
    pub src: String,
    pub dst: String,
    pub id: i64,
    pub predicate: Option<String>,
    pub primary_knowledge_source: Option<String>,
    pub domain_range_exclusion: Option<bool>,
    pub qualified_object_aspect: Option<String>,
    pub qualified_object_direction: Option<String>,
    pub qualified_predicate: Option<String>,
    pub knowledge_level: Option<String>,
    pub agent_type: Option<String>,
    pub publications: Vec<String>,
}

/// Format strings as a `DuckDB` list literal: `['a', 'b']`.
fn list_to_sql(items: &[String]) -> String {
    let mut s = String::with_capacity(items.iter().map(|i| i.len() + 4).sum::<usize>() + 2);
    s.push('[');
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            s.push_str(", ");
        }
        s.push('\'');
        for ch in item.chars() {
            if matches!(ch, '\'' | '\\') {
                s.push('\\');
            }
            s.push(ch);
        }
        s.push('\'');
    }
    s.push(']');
    s
}

/// Name of the member table of `group` connecting `from` to `to`.
#[must_use]
pub fn rel_member_name(group: &str, from: &str, to: &str) -> String {
    format!("{group}_{from}_{to}")
}

/// One `kg_catalog` row.
#[derive(Debug, Clone, PartialEq, Eq)]
struct CatalogEntry {
    table_type: TableType,
    rel_group: Option<String>,
}

/// Read-write handle on a dataset being built.
pub struct GraphWriter {
    conn: Connection,
}

impl GraphWriter {
    /// Create (or reopen) the dataset in `dataset_dir`, creating all tables.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::Io`] if the directory cannot be created and
    /// [`GraphError::DuckDb`] if the file cannot be opened or initialized.
    pub fn create(dataset_dir: &Path) -> Result<Self, GraphError> {
        std::fs::create_dir_all(dataset_dir)?;
        let conn = Connection::open(dataset_dir.join(schemas::DATABASE_FILE))?;
        conn.execute_batch(schemas::CREATE_CATALOG)?;
        conn.execute_batch(schemas::CREATE_NODES)?;
        conn.execute_batch(schemas::CREATE_EDGES)?;
        conn.execute_batch(schemas::CREATE_INDEXES)?;
        Ok(Self { conn })
    }

    fn register(
        &self,
        name: &str,
        table_type: TableType,
        rel_group: Option<&str>,
    ) -> Result<(), GraphError> {
        self.conn.execute(
            "INSERT OR REPLACE INTO kg_catalog (name, type, rel_group) VALUES (?, ?, ?)",
            params![name, table_type.as_str(), rel_group],
        )?;
        Ok(())
    }

    fn catalog_entry(&self, name: &str) -> Result<Option<CatalogEntry>, GraphError> {
        let mut stmt = self
            .conn
            .prepare("SELECT type, rel_group FROM kg_catalog WHERE name = ?")?;
        let found = stmt
            .query_map(params![name], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, Option<String>>(1)?))
            })?
            .next()
            .transpose()?;
        let Some((raw_type, rel_group)) = found else {
            return Ok(None);
        };
        Ok(Some(CatalogEntry {
            table_type: raw_type.parse::<TableType>()?,
            rel_group,
        }))
    }

    fn registered_type(&self, name: &str) -> Result<Option<TableType>, GraphError> {
        Ok(self.catalog_entry(name)?.map(|entry| entry.table_type))
    }

    fn node_label(&self, id: &str) -> Result<Option<String>, GraphError> {
        let mut stmt = self.conn.prepare("SELECT _label FROM kg_nodes WHERE id = ?")?;
        let found = stmt
            .query_map(params![id], |row| row.get::<_, String>(0))?
            .next()
            .transpose()?;
        Ok(found)
    }

    /// Register a node table.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::DuckDb`] if the catalog write fails.
    pub fn add_node_table(&self, label: &str) -> Result<(), GraphError> {
        self.register(label, TableType::Node, None)
    }

    /// Register a standalone relationship table.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::DuckDb`] if the catalog write fails.
    pub fn add_rel_table(&self, name: &str) -> Result<(), GraphError> {
        self.register(name, TableType::Rel, None)
    }

    /// Register a relationship group and one member table per endpoint pair,
    /// named `{group}_{from}_{to}`. Returns the member names.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::DuckDb`] if a catalog write fails.
    pub fn add_rel_group(
        &self,
        group: &str,
        pairs: &[(&str, &str)],
    ) -> Result<Vec<String>, GraphError> {
        self.register(group, TableType::RelGroup, None)?;
        pairs
            .iter()
            .map(|(from, to)| self.add_rel_member(group, from, to))
            .collect()
    }

    /// Register one member table of `group`, registering the group too.
    /// Registering an existing member again is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::DuckDb`] if a catalog write fails.
    pub fn add_rel_member(&self, group: &str, from: &str, to: &str) -> Result<String, GraphError> {
        if self.registered_type(group)? != Some(TableType::RelGroup) {
            self.register(group, TableType::RelGroup, None)?;
        }
        let member = rel_member_name(group, from, to);
        self.register(&member, TableType::Rel, Some(group))?;
        Ok(member)
    }

    /// `(_label, _table)` for an edge.
    fn edge_tables(&self, edge: &EdgeRow) -> Result<(String, String), GraphError> {
        match self.catalog_entry(&edge.label)? {
            Some(CatalogEntry {
                table_type: TableType::Rel,
                rel_group: Some(group),
            }) => Ok((group, edge.label.clone())),
            Some(CatalogEntry {
                table_type: TableType::Rel,
                rel_group: None,
            }) => Ok((edge.label.clone(), edge.label.clone())),
            Some(CatalogEntry {
                table_type: TableType::RelGroup,
                ..
            }) => {
                let from = self
                    .node_label(&edge.src)?
                    .ok_or_else(|| GraphError::UnknownNode(edge.src.clone()))?;
                let to = self
                    .node_label(&edge.dst)?
                    .ok_or_else(|| GraphError::UnknownNode(edge.dst.clone()))?;
                let member = rel_member_name(&edge.label, &from, &to);
                match self.catalog_entry(&member)? {
                    Some(CatalogEntry {
                        table_type: TableType::Rel,
                        rel_group: Some(group),
                    }) if group == edge.label => Ok((group, member)),
                    _ => Err(GraphError::UnknownTable {
                        name: member,
                        expected: "relationship group member",
                    }),
                }
            }
            _ => Err(GraphError::UnknownTable {
                name: edge.label.clone(),
                expected: "relationship",
            }),
        }
    }

    /// Insert one node, assigning its offset within the node table.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::UnknownTable`] if `label` is not a node table and
    /// [`GraphError::DuckDb`] if the insert fails (e.g. duplicate id).
    pub fn insert_node(&self, node: &NodeRow) -> Result<(), GraphError> {
        if self.registered_type(&node.label)? != Some(TableType::Node) {
            return Err(GraphError::UnknownTable {
                name: node.label.clone(),
                expected: "node",
            });
        }
        let offset: i64 = self.conn.query_row(
            "SELECT count(*) FROM kg_nodes WHERE _label = ?",
            params![node.label],
            |row| row.get(0),
        )?;

        self.conn.execute(
            "INSERT INTO kg_nodes (
                _offset, _label, id, name, category, all_categories,
                iri, description, equivalent_curies, publications
            ) VALUES (?, ?, ?, ?, ?, ?::VARCHAR[], ?, ?, ?::VARCHAR[], ?::VARCHAR[])",
            params![
                offset,
                node.label,
                node.id,
                node.name,
                node.category,
                list_to_sql(&node.all_categories),
                node.iri,
                node.description,
                list_to_sql(&node.equivalent_curies),
                list_to_sql(&node.publications),
            ],
        )?;
        Ok(())
    }

    /// Insert one relationship, assigning its offset within its table.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::UnknownTable`] if `label` is not a relationship
    /// table or group (or a group with no member for the endpoint tables),
    /// [`GraphError::UnknownNode`] if a group edge's endpoint was never
    /// inserted, and [`GraphError::DuckDb`] if the insert fails.
    pub fn insert_edge(&self, edge: &EdgeRow) -> Result<(), GraphError> {
        let (label, table) = self.edge_tables(edge)?;
        let offset: i64 = self.conn.query_row(
            "SELECT count(*) FROM kg_edges WHERE _table = ?",
            params![table],
            |row| row.get(0),
        )?;

        self.conn.execute(
            "INSERT INTO kg_edges (
                _offset, _label, _table, _src, _dst, id, predicate,
                primary_knowledge_source, domain_range_exclusion,
                qualified_object_aspect, qualified_object_direction,
                qualified_predicate, knowledge_level, agent_type, publications
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?::VARCHAR[])",
            params![
                offset,
                label,
                table,
                edge.src,
                edge.dst,
                edge.id,
                edge.predicate,
                edge.primary_knowledge_source,
                edge.domain_range_exclusion,
                edge.qualified_object_aspect,
                edge.qualified_object_direction,
                edge.qualified_predicate,
                edge.knowledge_level,
                edge.agent_type,
                list_to_sql(&edge.publications),
            ],
        )?;
        Ok(())
    }

    /// Flush everything to the dataset file and release it.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::DuckDb`] if the checkpoint fails.
    pub fn finish(self) -> Result<(), GraphError> {
        self.conn.execute_batch("CHECKPOINT")?;
        Ok(())
    }
}
