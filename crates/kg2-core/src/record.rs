//! Entity records and the internal-field convention.
//!
//! The graph dataset stores bookkeeping columns (`_offset`, `_label`, `_src`,
//! `_dst`) next to the entity's own properties. Those columns start with
//! [`INTERNAL_MARKER`] and never reach reports or CLI output.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::Value;

/// Leading character of internal bookkeeping field names.
pub const INTERNAL_MARKER: char = '_';

/// Flat field-name → value mapping.
pub type Record = BTreeMap<String, Value>;

/// Whether a field name is internal bookkeeping.
#[must_use]
pub fn is_internal_field(name: &str) -> bool {
    name.starts_with(INTERNAL_MARKER)
}

/// Return a copy of `record` without internal bookkeeping fields.
#[must_use]
pub fn filter_entity_metadata(record: &Record) -> Record {
    record
        .iter()
        .filter(|(key, _)| !is_internal_field(key))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

/// One node or relationship returned by a query.
///
/// Visible and internal fields are separated when the record is built, so
/// consumers only ever see [`EntityRecord::fields`] unless they ask for the
/// bookkeeping explicitly.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntityRecord {
    fields: Record,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    internal: Record,
}

impl EntityRecord {
    /// Build a record from `(column, value)` pairs, routing internal columns aside.
    ///
    /// A repeated column name keeps the last value.
    pub fn from_columns<I, K>(columns: I) -> Self
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        let mut record = Self::default();
        for (name, value) in columns {
            let name = name.into();
            if is_internal_field(&name) {
                record.internal.insert(name, value);
            } else {
                record.fields.insert(name, value);
            }
        }
        record
    }

    /// User-visible fields.
    #[must_use]
    pub const fn fields(&self) -> &Record {
        &self.fields
    }

    /// Internal bookkeeping fields.
    #[must_use]
    pub const fn internal(&self) -> &Record {
        &self.internal
    }

    #[must_use]
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Table label from the `_label` bookkeeping column, if present.
    #[must_use]
    pub fn label(&self) -> Option<&str> {
        self.internal.get("_label").and_then(Value::as_str)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Visible fields as a JSON object.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::Value::Object(
            self.fields
                .iter()
                .map(|(k, v)| (k.clone(), v.to_json()))
                .collect(),
        )
    }
}

impl From<Record> for EntityRecord {
    fn from(record: Record) -> Self {
        Self::from_columns(record)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    fn node_record() -> Record {
        Record::from([
            ("_offset".to_string(), Value::Int(0)),
            ("_label".to_string(), Value::from("Disease")),
            ("id".to_string(), Value::from("MONDO:0008608")),
            ("name".to_string(), Value::from("Down syndrome")),
            (
                "all_categories".to_string(),
                Value::from(vec!["biolink:Disease", "biolink:NamedThing"]),
            ),
        ])
    }

    #[test]
    fn filter_drops_exactly_internal_fields() {
        let filtered = filter_entity_metadata(&node_record());
        let keys: Vec<&str> = filtered.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["all_categories", "id", "name"]);
        assert_eq!(filtered["name"], Value::from("Down syndrome"));
    }

    #[test]
    fn filter_is_idempotent() {
        let once = filter_entity_metadata(&node_record());
        let twice = filter_entity_metadata(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn filter_of_empty_is_empty() {
        assert!(filter_entity_metadata(&Record::new()).is_empty());
    }

    #[rstest]
    #[case("_id", true)]
    #[case("_label", true)]
    #[case("__weird", true)]
    #[case("id", false)]
    #[case("node_id", false)]
    #[case("", false)]
    fn internal_field_detection(#[case] name: &str, #[case] internal: bool) {
        assert_eq!(is_internal_field(name), internal);
    }

    #[test]
    fn construction_splits_internal_fields() {
        let record = EntityRecord::from_columns(node_record());
        assert_eq!(record.fields(), &filter_entity_metadata(&node_record()));
        assert_eq!(record.internal().len(), 2);
        assert_eq!(record.label(), Some("Disease"));
        assert!(record.get("_label").is_none());
    }

    #[test]
    fn json_view_has_visible_fields_only() {
        let record = EntityRecord::from_columns(node_record());
        let json = record.to_json();
        assert_eq!(json["id"], "MONDO:0008608");
        assert!(json.get("_offset").is_none());
    }
}
