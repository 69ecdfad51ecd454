//! `DuckDB` table DDL for the graph dataset layout.
//!
//! A dataset directory holds one [`DATABASE_FILE`]. Every node lives in
//! `kg_nodes` and every relationship in `kg_edges`; `_label` names the node
//! table or relationship group a row belongs to, and `_table` names the
//! concrete relationship table inside that group. `kg_catalog` lists the
//! database objects the way catalog introspection reports them.

/// Engine file inside a dataset directory.
pub const DATABASE_FILE: &str = "graph.duckdb";

/// Database objects and their category. `rel_group` is set on `REL` tables
/// that belong to a group.
pub const CREATE_CATALOG: &str = "
CREATE TABLE IF NOT EXISTS kg_catalog (
    name VARCHAR PRIMARY KEY,
    type VARCHAR NOT NULL CHECK (type IN ('NODE', 'REL', 'REL_GROUP')),
    rel_group VARCHAR
);
";

/// All nodes. `_offset` is the row position within the node's table.
pub const CREATE_NODES: &str = "
CREATE TABLE IF NOT EXISTS kg_nodes (
    _offset BIGINT NOT NULL,
    _label VARCHAR NOT NULL,
    id VARCHAR PRIMARY KEY,
    name VARCHAR,
    category VARCHAR,
    all_categories VARCHAR[],
    iri VARCHAR,
    description VARCHAR,
    equivalent_curies VARCHAR[],
    publications VARCHAR[]
);
";

/// All relationships. `_src` and `_dst` reference `kg_nodes.id`; `_offset`
/// is the row position within `_table`.
pub const CREATE_EDGES: &str = "
CREATE TABLE IF NOT EXISTS kg_edges (
    _offset BIGINT NOT NULL,
    _label VARCHAR NOT NULL,
    _table VARCHAR NOT NULL,
    _src VARCHAR NOT NULL,
    _dst VARCHAR NOT NULL,
    id BIGINT NOT NULL,
    predicate VARCHAR,
    primary_knowledge_source VARCHAR,
    domain_range_exclusion BOOLEAN,
    qualified_object_aspect VARCHAR,
    qualified_object_direction VARCHAR,
    qualified_predicate VARCHAR,
    knowledge_level VARCHAR,
    agent_type VARCHAR,
    publications VARCHAR[]
);
";

pub const CREATE_INDEXES: &str = "
CREATE INDEX IF NOT EXISTS idx_nodes_label_name ON kg_nodes(_label, name);
CREATE INDEX IF NOT EXISTS idx_edges_src ON kg_edges(_src);
CREATE INDEX IF NOT EXISTS idx_edges_dst ON kg_edges(_dst);
CREATE INDEX IF NOT EXISTS idx_edges_label_id ON kg_edges(_label, id);
";
