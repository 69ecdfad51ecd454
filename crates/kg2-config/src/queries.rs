//! Named query templates.
//!
//! Templates are plain SQL against the dataset layout (`kg_catalog`,
//! `kg_nodes`, `kg_edges`) with `{placeholder}` markers bound from
//! [`LookupConfig`]. Only `{identifier}` sequences are placeholders; any other
//! brace text passes through untouched.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{ConfigError, LookupConfig};

const SHOW_TABLES: &str = "\
SELECT name, type
FROM kg_catalog
WHERE type IN ('REL_GROUP', 'NODE')
ORDER BY type, name ASC";

const EXAMPLE_NODE: &str = "\
SELECT *
FROM kg_nodes
WHERE id = {node_id}
LIMIT 1";

const EXAMPLE_NODE_FIELDS: &str = "\
SELECT id, name, category, all_categories
FROM kg_nodes
WHERE id = {node_id}
LIMIT 1";

const EXAMPLE_REL: &str = "\
SELECT *
FROM kg_edges
WHERE _label = {rel_label} AND id = {rel_id}
LIMIT 1";

const EXAMPLE_REL_FIELDS: &str = "\
SELECT
    domain_range_exclusion,
    id,
    predicate,
    primary_knowledge_source,
    qualified_object_aspect,
    qualified_object_direction,
    qualified_predicate
FROM kg_edges
WHERE _label = {rel_label} AND id = {rel_id}
LIMIT 1";

const DISEASE_LOOKUP: &str = "\
SELECT
    d.id AS \"d.id\",
    d.name AS \"d.name\",
    d.category AS \"d.category\",
    d.all_categories AS \"d.all_categories\"
FROM kg_nodes d
WHERE d._label = {entity_label} AND d.name = {entity_name}
ORDER BY d.id";

const DISEASE_GENE_HOP: &str = "\
SELECT
    d.id AS \"d.id\",
    d.name AS \"d.name\",
    d.category AS \"d.category\",
    d.all_categories AS \"d.all_categories\",
    r.predicate AS \"r.predicate\",
    g.id AS \"g.id\",
    g.name AS \"g.name\",
    g.category AS \"g.category\",
    g.all_categories AS \"g.all_categories\"
FROM kg_nodes d
JOIN kg_edges r ON r._src = d.id OR r._dst = d.id
JOIN kg_nodes g ON g.id = CASE WHEN r._src = d.id THEN r._dst ELSE r._src END
WHERE d._label = {entity_label}
  AND d.name = {entity_name}
  AND g._label = {neighbor_label}
ORDER BY g.id, r.id
LIMIT {hop_limit}";

fn show_tables() -> String {
    SHOW_TABLES.to_string()
}
fn example_node() -> String {
    EXAMPLE_NODE.to_string()
}
fn example_node_fields() -> String {
    EXAMPLE_NODE_FIELDS.to_string()
}
fn example_rel() -> String {
    EXAMPLE_REL.to_string()
}
fn example_rel_fields() -> String {
    EXAMPLE_REL_FIELDS.to_string()
}
fn disease_lookup() -> String {
    DISEASE_LOOKUP.to_string()
}
fn disease_gene_hop() -> String {
    DISEASE_GENE_HOP.to_string()
}

/// A query template with its name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NamedQuery<'a> {
    pub name: &'a str,
    pub template: &'a str,
}

/// The fixed query sequence plus any user-defined extras.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct QuerySet {
    /// Catalog introspection: `NODE` and `REL_GROUP` objects by type, then name.
    #[serde(default = "show_tables")]
    pub show_tables: String,
    /// Full record of the example node.
    #[serde(default = "example_node")]
    pub example_node: String,
    /// Scalar projection of the example node.
    #[serde(default = "example_node_fields")]
    pub example_node_fields: String,
    /// Full record of the example relationship.
    #[serde(default = "example_rel")]
    pub example_rel: String,
    /// Scalar projection of the example relationship.
    #[serde(default = "example_rel_fields")]
    pub example_rel_fields: String,
    /// Named-entity lookup within one node table.
    #[serde(default = "disease_lookup")]
    pub disease_lookup: String,
    /// Named entity joined one hop to a neighbour table.
    #[serde(default = "disease_gene_hop")]
    pub disease_gene_hop: String,
    /// Additional named queries, runnable by name from the CLI.
    #[serde(default)]
    pub extra: BTreeMap<String, String>,
}

impl Default for QuerySet {
    fn default() -> Self {
        Self {
            show_tables: show_tables(),
            example_node: example_node(),
            example_node_fields: example_node_fields(),
            example_rel: example_rel(),
            example_rel_fields: example_rel_fields(),
            disease_lookup: disease_lookup(),
            disease_gene_hop: disease_gene_hop(),
            extra: BTreeMap::new(),
        }
    }
}

impl QuerySet {
    /// The fixed sequence, in issue order.
    #[must_use]
    pub fn ordered(&self) -> Vec<NamedQuery<'_>> {
        vec![
            NamedQuery { name: "show_tables", template: &self.show_tables },
            NamedQuery { name: "example_node", template: &self.example_node },
            NamedQuery { name: "example_node_fields", template: &self.example_node_fields },
            NamedQuery { name: "example_rel", template: &self.example_rel },
            NamedQuery { name: "example_rel_fields", template: &self.example_rel_fields },
            NamedQuery { name: "disease_lookup", template: &self.disease_lookup },
            NamedQuery { name: "disease_gene_hop", template: &self.disease_gene_hop },
        ]
    }

    /// Every query name, fixed sequence first.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.ordered()
            .into_iter()
            .map(|q| q.name)
            .chain(self.extra.keys().map(String::as_str))
            .collect()
    }

    /// Look up a template by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.ordered()
            .into_iter()
            .find(|q| q.name == name)
            .map(|q| q.template)
            .or_else(|| self.extra.get(name).map(String::as_str))
    }

    /// Render a named query with its placeholders bound.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownQuery`] for an undefined name and
    /// [`ConfigError::UnboundPlaceholder`] for an unknown placeholder.
    pub fn render(&self, name: &str, lookups: &LookupConfig) -> Result<String, ConfigError> {
        let template = self
            .get(name)
            .ok_or_else(|| ConfigError::UnknownQuery(name.to_string()))?;
        render_template(name, template, lookups)
    }

    pub(crate) fn validate(&self, lookups: &LookupConfig) -> Result<(), ConfigError> {
        for query in self.ordered() {
            if query.template.trim().is_empty() {
                return Err(ConfigError::invalid(
                    &format!("queries.{}", query.name),
                    "must not be empty",
                ));
            }
            render_template(query.name, query.template, lookups)?;
        }
        for (name, template) in &self.extra {
            render_template(name, template, lookups)?;
        }
        Ok(())
    }
}

/// Substitute `{placeholder}` markers in `template` with bound literals.
///
/// # Errors
///
/// Returns [`ConfigError::UnboundPlaceholder`] when a marker names no binding.
pub fn render_template(
    name: &str,
    template: &str,
    lookups: &LookupConfig,
) -> Result<String, ConfigError> {
    let bindings = lookups.bindings();
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let Some(close) = after.find('}') else {
            out.push_str(&rest[open..]);
            return Ok(out);
        };

        let candidate = &after[..close];
        if is_placeholder(candidate) {
            let literal = bindings
                .iter()
                .find(|(key, _)| *key == candidate)
                .map(|(_, literal)| literal.to_sql())
                .ok_or_else(|| ConfigError::UnboundPlaceholder {
                    query: name.to_string(),
                    placeholder: candidate.to_string(),
                })?;
            out.push_str(&literal);
            rest = &after[close + 1..];
        } else {
            out.push('{');
            rest = after;
        }
    }

    out.push_str(rest);
    Ok(out)
}

fn is_placeholder(candidate: &str) -> bool {
    let mut chars = candidate.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_lowercase() || c == '_')
        && chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
}
