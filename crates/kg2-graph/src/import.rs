//! Loading KG2 JSON Lines exports into a dataset.
//!
//! One node object per line in the nodes file and one edge object per line
//! in the edges file. Node tables are named after the node's `category` and
//! relationship groups after the edge's `predicate`, both without their CURIE
//! prefix (`biolink:Disease` becomes `Disease`). Member tables are
//! registered as endpoint pairs are first seen.

use std::collections::{BTreeSet, HashMap};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{EdgeRow, GraphError, GraphWriter, NodeRow};

/// Table for nodes without a category.
pub const DEFAULT_NODE_TABLE: &str = "NamedThing";

/// Group for edges without a predicate.
pub const DEFAULT_REL_GROUP: &str = "related_to";

#[derive(Debug, Deserialize)]
struct NodeLine {
    id: String,
    name: Option<String>,
    category: Option<String>,
    #[serde(default)]
    all_categories: Vec<String>,
    iri: Option<String>,
    description: Option<String>,
    #[serde(default)]
    equivalent_curies: Vec<String>,
    #[serde(default)]
    publications: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct EdgeLine {
    id: i64,
    subject: String,
    object: String,
    predicate: Option<String>,
    primary_knowledge_source: Option<String>,
    domain_range_exclusion: Option<bool>,
    qualified_object_aspect: Option<String>,
    qualified_object_direction: Option<String>,
    qualified_predicate: Option<String>,
    knowledge_level: Option<String>,
    agent_type: Option<String>,
    #[serde(default)]
    publications: Vec<String>,
}

/// Counts from one import.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportStats {
    pub nodes: usize,
    pub edges: usize,
    pub node_tables: usize,
    pub rel_groups: usize,
    pub rel_tables: usize,
}

/// `biolink:Disease` → `Disease`; text without a prefix is returned as is.
#[must_use]
pub fn table_name(curie: &str) -> &str {
    curie.rsplit_once(':').map_or(curie, |(_, local)| local)
}

fn read_lines<T>(path: &Path) -> Result<Vec<T>, GraphError>
where
    T: for<'de> Deserialize<'de>,
{
    serde_jsonlines::json_lines::<T, _>(path)?
        .enumerate()
        .map(|(index, line)| {
            line.map_err(|source| GraphError::Import {
                path: path.to_path_buf(),
                line: index + 1,
                source,
            })
        })
        .collect()
}

/// Load `nodes` then `edges` into `writer`.
///
/// # Errors
///
/// Returns [`GraphError::Import`] for a malformed line,
/// [`GraphError::UnknownNode`] for an edge whose endpoint is not in the
/// nodes file, and [`GraphError::DuckDb`] if an insert fails.
pub fn import_jsonl(
    writer: &GraphWriter,
    nodes: &Path,
    edges: &Path,
) -> Result<ImportStats, GraphError> {
    let mut stats = ImportStats::default();
    let mut node_tables = BTreeSet::new();
    let mut labels: HashMap<String, String> = HashMap::new();

    for line in read_lines::<NodeLine>(nodes)? {
        let label = line
            .category
            .as_deref()
            .map_or(DEFAULT_NODE_TABLE, table_name)
            .to_string();
        if node_tables.insert(label.clone()) {
            writer.add_node_table(&label)?;
        }
        writer.insert_node(&NodeRow {
            label: label.clone(),
            id: line.id.clone(),
            name: line.name,
            category: line.category,
            all_categories: line.all_categories,
            iri: line.iri,
            description: line.description,
            equivalent_curies: line.equivalent_curies,
            publications: line.publications,
        })?;
        labels.insert(line.id, label);
        stats.nodes += 1;
    }
    tracing::info!(nodes = stats.nodes, tables = node_tables.len(), "nodes imported");

    let mut groups = BTreeSet::new();
    let mut members = BTreeSet::new();
    for line in read_lines::<EdgeLine>(edges)? {
        let group = line
            .predicate
            .as_deref()
            .map_or(DEFAULT_REL_GROUP, table_name)
            .to_string();
        let from = labels
            .get(&line.subject)
            .ok_or_else(|| GraphError::UnknownNode(line.subject.clone()))?;
        let to = labels
            .get(&line.object)
            .ok_or_else(|| GraphError::UnknownNode(line.object.clone()))?;

        let member = crate::rel_member_name(&group, from, to);
        if !members.contains(&member) {
            writer.add_rel_member(&group, from, to)?;
            members.insert(member.clone());
        }
        groups.insert(group);

        writer.insert_edge(&EdgeRow {
            label: member,
            src: line.subject,
            dst: line.object,
            id: line.id,
            predicate: line.predicate,
            primary_knowledge_source: line.primary_knowledge_source,
            domain_range_exclusion: line.domain_range_exclusion,
            qualified_object_aspect: line.qualified_object_aspect,
            qualified_object_direction: line.qualified_object_direction,
            qualified_predicate: line.qualified_predicate,
            knowledge_level: line.knowledge_level,
            agent_type: line.agent_type,
            publications: line.publications,
        })?;
        stats.edges += 1;
    }
    tracing::info!(edges = stats.edges, groups = groups.len(), "edges imported");

    stats.node_tables = node_tables.len();
    stats.rel_groups = groups.len();
    stats.rel_tables = members.len();
    Ok(stats)
}
