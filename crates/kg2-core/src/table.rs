//! Database object names and their categories.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::CoreError;

/// Category of a database object, as reported by catalog introspection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TableType {
    /// Node table; one per entity category.
    Node,
    /// Relationship table between one pair of node tables.
    Rel,
    /// Named collection of relationship tables sharing a predicate.
    RelGroup,
}

impl TableType {
    pub const ALL: [Self; 3] = [Self::Node, Self::Rel, Self::RelGroup];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Node => "NODE",
            Self::Rel => "REL",
            Self::RelGroup => "REL_GROUP",
        }
    }
}

impl fmt::Display for TableType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TableType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| CoreError::UnknownTableType(s.to_string()))
    }
}

/// A `(name, type)` pair from the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableDescriptor {
    pub name: String,
    #[serde(rename = "type")]
    pub table_type: TableType,
}

impl TableDescriptor {
    #[must_use]
    pub fn new(name: impl Into<String>, table_type: TableType) -> Self {
        Self {
            name: name.into(),
            table_type,
        }
    }
}

/// Ordered catalog listing, as returned by the introspection query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TableListing {
    tables: Vec<TableDescriptor>,
}

impl TableListing {
    #[must_use]
    pub const fn new(tables: Vec<TableDescriptor>) -> Self {
        Self { tables }
    }

    #[must_use]
    pub fn tables(&self) -> &[TableDescriptor] {
        &self.tables
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Distinct table types in first-seen order.
    #[must_use]
    pub fn types(&self) -> Vec<TableType> {
        let mut seen = Vec::new();
        for table in &self.tables {
            if !seen.contains(&table.table_type) {
                seen.push(table.table_type);
            }
        }
        seen
    }

    /// Tables of one type, listing order preserved.
    pub fn of_type(&self, table_type: TableType) -> impl Iterator<Item = &TableDescriptor> {
        self.tables
            .iter()
            .filter(move |t| t.table_type == table_type)
    }
}

impl FromIterator<TableDescriptor> for TableListing {
    fn from_iter<T: IntoIterator<Item = TableDescriptor>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("NODE", TableType::Node)]
    #[case("REL", TableType::Rel)]
    #[case("REL_GROUP", TableType::RelGroup)]
    fn table_type_parses_catalog_names(#[case] raw: &str, #[case] expected: TableType) {
        assert_eq!(raw.parse::<TableType>().unwrap(), expected);
        assert_eq!(expected.to_string(), raw);
    }

    #[test]
    fn unknown_table_type_is_rejected() {
        let err = "RDF_GRAPH".parse::<TableType>().unwrap_err();
        assert!(matches!(err, CoreError::UnknownTableType(ref t) if t == "RDF_GRAPH"));
    }

    #[test]
    fn descriptor_serializes_type_key() {
        let json = serde_json::to_value(TableDescriptor::new("treats", TableType::RelGroup)).unwrap();
        assert_eq!(json, serde_json::json!({"name": "treats", "type": "REL_GROUP"}));
    }

    #[test]
    fn types_keep_first_seen_order() {
        let listing: TableListing = [
            TableDescriptor::new("Disease", TableType::Node),
            TableDescriptor::new("Gene", TableType::Node),
            TableDescriptor::new("treats", TableType::RelGroup),
        ]
        .into_iter()
        .collect();

        assert_eq!(listing.types(), vec![TableType::Node, TableType::RelGroup]);
        let nodes: Vec<&str> = listing
            .of_type(TableType::Node)
            .map(|t| t.name.as_str())
            .collect();
        assert_eq!(nodes, vec!["Disease", "Gene"]);
    }
}
