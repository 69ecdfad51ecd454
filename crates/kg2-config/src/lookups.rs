//! Literal constants bound into the fixed query templates.

use serde::{Deserialize, Serialize};

use crate::ConfigError;

fn default_node_id() -> String {
    "UMLS:C2459634".to_string()
}

fn default_rel_label() -> String {
    "treats".to_string()
}

const fn default_rel_id() -> i64 {
    19_799_062
}

fn default_entity_label() -> String {
    "Disease".to_string()
}

fn default_entity_name() -> String {
    "Down syndrome".to_string()
}

fn default_neighbor_label() -> String {
    "Gene".to_string()
}

const fn default_hop_limit() -> i64 {
    1
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LookupConfig {
    /// Identifier of the example node.
    #[serde(default = "default_node_id")]
    pub node_id: String,

    /// Relationship group of the example relationship.
    #[serde(default = "default_rel_label")]
    pub rel_label: String,

    /// Identifier of the example relationship.
    #[serde(default = "default_rel_id")]
    pub rel_id: i64,

    /// Node table searched by name.
    #[serde(default = "default_entity_label")]
    pub entity_label: String,

    /// Exact name matched in `entity_label`.
    #[serde(default = "default_entity_name")]
    pub entity_name: String,

    /// Node table reached by the one-hop query.
    #[serde(default = "default_neighbor_label")]
    pub neighbor_label: String,

    /// Row limit of the one-hop query.
    #[serde(default = "default_hop_limit")]
    pub hop_limit: i64,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            node_id: default_node_id(),
            rel_label: default_rel_label(),
            rel_id: default_rel_id(),
            entity_label: default_entity_label(),
            entity_name: default_entity_name(),
            neighbor_label: default_neighbor_label(),
            hop_limit: default_hop_limit(),
        }
    }
}

/// A value spliced into query text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SqlLiteral {
    Text(String),
    Int(i64),
}

impl SqlLiteral {
    /// Render as a SQL literal; text is single-quoted with quotes doubled.
    #[must_use]
    pub fn to_sql(&self) -> String {
        match self {
            Self::Text(text) => format!("'{}'", text.replace('\'', "''")),
            Self::Int(value) => value.to_string(),
        }
    }
}

impl LookupConfig {
    /// Placeholder name → literal, for template rendering.
    #[must_use]
    pub fn bindings(&self) -> Vec<(&'static str, SqlLiteral)> {
        vec![
            ("node_id", SqlLiteral::Text(self.node_id.clone())),
            ("rel_label", SqlLiteral::Text(self.rel_label.clone())),
            ("rel_id", SqlLiteral::Int(self.rel_id)),
            ("entity_label", SqlLiteral::Text(self.entity_label.clone())),
            ("entity_name", SqlLiteral::Text(self.entity_name.clone())),
            ("neighbor_label", SqlLiteral::Text(self.neighbor_label.clone())),
            ("hop_limit", SqlLiteral::Int(self.hop_limit)),
        ]
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.hop_limit < 1 {
            return Err(ConfigError::invalid(
                "lookups.hop_limit",
                format!("must be at least 1, got {}", self.hop_limit),
            ));
        }
        for (field, value) in [
            ("lookups.node_id", &self.node_id),
            ("lookups.rel_label", &self.rel_label),
            ("lookups.entity_label", &self.entity_label),
            ("lookups.entity_name", &self.entity_name),
            ("lookups.neighbor_label", &self.neighbor_label),
        ] {
            if value.is_empty() {
                return Err(ConfigError::invalid(field, "must not be empty"));
            }
        }
        Ok(())
    }
}
