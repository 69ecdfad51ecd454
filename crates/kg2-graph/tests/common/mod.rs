//! Synthetic dataset shared by the integration tests.

use std::path::Path;

use kg2_graph::{EdgeRow, GraphWriter, NodeRow};

pub const DOWN_SYNDROME: &str = "MONDO:0008608";

fn node(label: &str, id: &str, name: &str, category: &str) -> NodeRow {
    NodeRow {
        label: label.into(),
        id: id.into(),
        name: Some(name.into()),
        category: Some(category.into()),
        all_categories: vec![category.into(), "biolink:NamedThing".into()],
        iri: Some(format!("http://example.org/{id}")),
        description: None,
        equivalent_curies: vec![id.into()],
        publications: Vec::new(),
    }
}

fn edge(src: &str, dst: &str, id: i64, predicate: &str) -> EdgeRow {
    EdgeRow {
        label: "treats".into(),
        src: src.into(),
        dst: dst.into(),
        id,
        predicate: Some(predicate.into()),
        primary_knowledge_source: Some("infores:semmeddb".into()),
        domain_range_exclusion: Some(false),
        knowledge_level: Some("knowledge_assertion".into()),
        agent_type: Some("text_mining_agent".into()),
        ..EdgeRow::default()
    }
}

/// Catalog deliberately registered out of order and with a standalone
/// relationship table the listing must leave out.
pub fn build(dataset_dir: &Path) {
    let writer = GraphWriter::create(dataset_dir).unwrap();
    writer.add_rel_table("standalone_rel").unwrap();
    writer.add_node_table("Gene").unwrap();
    writer
        .add_rel_group(
            "treats",
            &[("Drug", "Disease"), ("Gene", "Disease"), ("Disease", "Gene")],
        )
        .unwrap();
    writer.add_node_table("Drug").unwrap();
    writer.add_node_table("Disease").unwrap();

    for row in [
        node("Drug", "UMLS:C2459634", "somatostatin analog", "biolink:Drug"),
        node("Disease", DOWN_SYNDROME, "Down syndrome", "biolink:Disease"),
        node("Disease", "MONDO:0005148", "type 2 diabetes", "biolink:Disease"),
        node("Gene", "NCBIGene:7157", "TP53", "biolink:Gene"),
        node("Gene", "NCBIGene:54", "ACP5", "biolink:Gene"),
    ] {
        writer.insert_node(&row).unwrap();
    }

    for row in [
        edge("UMLS:C2459634", DOWN_SYNDROME, 19_799_062, "biolink:treats"),
        edge("NCBIGene:7157", DOWN_SYNDROME, 2, "biolink:gene_associated_with_condition"),
        edge(DOWN_SYNDROME, "NCBIGene:54", 3, "biolink:condition_associated_with_gene"),
    ] {
        writer.insert_edge(&row).unwrap();
    }
    writer.finish().unwrap();
}
