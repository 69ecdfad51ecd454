//! JSON Lines exports loaded into a dataset and read back.

use std::path::{Path, PathBuf};

use kg2_config::{LookupConfig, QuerySet};
use kg2_core::{TableDescriptor, TableType, Value};
use kg2_graph::{GraphDatabase, GraphError, GraphWriter, QueryDriver, import_jsonl};
use pretty_assertions::assert_eq;

const NODES: &str = r#"{"id":"MONDO:0008608","name":"Down syndrome","category":"biolink:Disease","all_categories":["biolink:Disease","biolink:NamedThing"]}
{"id":"NCBIGene:54","name":"ACP5","category":"biolink:Gene","all_categories":["biolink:Gene","biolink:NamedThing"]}
{"id":"UMLS:C2459634","name":"somatostatin analog","category":"biolink:Drug"}
"#;

const EDGES: &str = r#"{"id":19799062,"subject":"UMLS:C2459634","object":"MONDO:0008608","predicate":"biolink:treats","primary_knowledge_source":"infores:semmeddb","domain_range_exclusion":false}
{"id":2,"subject":"NCBIGene:54","object":"MONDO:0008608","predicate":"biolink:gene_associated_with_condition"}
{"id":3,"subject":"NCBIGene:54","object":"MONDO:0008608","predicate":"biolink:treats"}
"#;

fn write_export(dir: &Path, nodes: &str, edges: &str) -> (PathBuf, PathBuf) {
    let nodes_path = dir.join("nodes.jsonl");
    let edges_path = dir.join("edges.jsonl");
    std::fs::write(&nodes_path, nodes).unwrap();
    std::fs::write(&edges_path, edges).unwrap();
    (nodes_path, edges_path)
}

#[test]
fn export_becomes_queryable_dataset() {
    let dir = tempfile::tempdir().unwrap();
    let (nodes, edges) = write_export(dir.path(), NODES, EDGES);
    let dataset = dir.path().join("kg");

    let writer = GraphWriter::create(&dataset).unwrap();
    let stats = import_jsonl(&writer, &nodes, &edges).unwrap();
    writer.finish().unwrap();

    assert_eq!(stats.nodes, 3);
    assert_eq!(stats.edges, 3);
    assert_eq!(stats.node_tables, 3);
    assert_eq!(stats.rel_groups, 2);
    assert_eq!(stats.rel_tables, 3);

    let db = GraphDatabase::open(&dataset).unwrap();
    let queries = QuerySet::default();
    let lookups = LookupConfig::default();
    let driver = QueryDriver::new(&db, &queries, &lookups);

    assert_eq!(
        driver.show_tables().unwrap().tables(),
        &[
            TableDescriptor::new("Disease", TableType::Node),
            TableDescriptor::new("Drug", TableType::Node),
            TableDescriptor::new("Gene", TableType::Node),
            TableDescriptor::new("gene_associated_with_condition", TableType::RelGroup),
            TableDescriptor::new("treats", TableType::RelGroup),
        ]
    );

    let rel = driver.example_rel().unwrap();
    assert_eq!(rel.get("predicate"), Some(&Value::from("biolink:treats")));
    assert_eq!(rel.internal().get("_table"), Some(&Value::from("treats_Drug_Disease")));

    let node = driver.example_node().unwrap();
    assert_eq!(node.get("all_categories"), Some(&Value::List(Vec::new())));
}

#[test]
fn malformed_line_reports_its_number() {
    let dir = tempfile::tempdir().unwrap();
    let (nodes, edges) = write_export(
        dir.path(),
        "{\"id\":\"X:1\",\"category\":\"biolink:Gene\"}\n{\"name\":\"no id\"}\n",
        "",
    );
    let writer = GraphWriter::create(&dir.path().join("kg")).unwrap();

    let err = import_jsonl(&writer, &nodes, &edges).unwrap_err();
    assert!(matches!(err, GraphError::Import { line: 2, .. }), "{err}");
}

#[test]
fn edge_to_missing_node_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let (nodes, edges) = write_export(
        dir.path(),
        "{\"id\":\"X:1\",\"category\":\"biolink:Gene\"}\n",
        "{\"id\":1,\"subject\":\"X:1\",\"object\":\"X:404\",\"predicate\":\"biolink:related_to\"}\n",
    );
    let writer = GraphWriter::create(&dir.path().join("kg")).unwrap();

    let err = import_jsonl(&writer, &nodes, &edges).unwrap_err();
    assert!(matches!(err, GraphError::UnknownNode(ref id) if id == "X:404"), "{err}");
}

#[test]
fn missing_export_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let writer = GraphWriter::create(&dir.path().join("kg")).unwrap();
    let err = import_jsonl(
        &writer,
        &dir.path().join("absent.jsonl"),
        &dir.path().join("edges.jsonl"),
    )
    .unwrap_err();
    assert!(matches!(err, GraphError::Io(_)), "{err}");
}
