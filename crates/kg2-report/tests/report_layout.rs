//! Report structure: one section per table type, valid example JSON blocks.

use kg2_core::{EntityRecord, TableDescriptor, TableListing, TableType, Value};
use kg2_report::{PREAMBLE, ReportInput, render_report};
use pretty_assertions::assert_eq;

fn example_node() -> EntityRecord {
    EntityRecord::from_columns([
        ("_offset", Value::Int(0)),
        ("_label", Value::from("Drug")),
        ("id", Value::from("UMLS:C2459634")),
        ("name", Value::from("somatostatin analog")),
        ("all_categories", Value::from(vec!["biolink:Drug"])),
    ])
}

fn example_rel() -> EntityRecord {
    EntityRecord::from_columns([
        ("_src", Value::from("UMLS:C2459634")),
        ("_dst", Value::from("MONDO:0008608")),
        ("id", Value::Int(19_799_062)),
        ("predicate", Value::from("biolink:treats")),
        ("qualified_predicate", Value::Null),
    ])
}

fn listing() -> TableListing {
    [
        TableDescriptor::new("Disease", TableType::Node),
        TableDescriptor::new("Gene", TableType::Node),
        TableDescriptor::new("treats", TableType::RelGroup),
    ]
    .into_iter()
    .collect()
}

/// Every fenced JSON block in the document, parsed.
fn json_blocks(document: &str) -> Vec<serde_json::Value> {
    document
        .split("```json\n")
        .skip(1)
        .map(|rest| {
            let end = rest.find("\n```").expect("closing fence");
            serde_json::from_str(&rest[..end]).expect("block is valid JSON")
        })
        .collect()
}

fn render() -> String {
    let node = example_node();
    let rel = example_rel();
    let tables = listing();
    render_report(&ReportInput {
        example_node: &node,
        example_rel: &rel,
        tables: &tables,
    })
    .unwrap()
}

#[test]
fn one_section_per_type_in_listing_order() {
    let document = render();
    assert!(document.starts_with(PREAMBLE));

    let headings: Vec<&str> = document
        .lines()
        .filter(|line| line.starts_with("### "))
        .collect();
    assert_eq!(headings, vec!["### NODE Tables", "### REL_GROUP Tables"]);

    let node_at = document.find("#### Example NODE Data and JSON Schema").unwrap();
    let node_names_at = document.find("#### NODE Names").unwrap();
    let rel_at = document.find("### REL_GROUP Tables").unwrap();
    assert!(node_at < node_names_at && node_names_at < rel_at);
}

#[test]
fn example_blocks_hold_exactly_the_visible_fields() {
    let blocks = json_blocks(&render());
    // Node example, node schema, relationship example, relationship schema.
    assert_eq!(blocks.len(), 4);

    assert_eq!(blocks[0], example_node().to_json());
    assert_eq!(blocks[2], example_rel().to_json());
    for example in [&blocks[0], &blocks[2]] {
        let object = example.as_object().unwrap();
        assert!(object.keys().all(|k| !k.starts_with('_')));
    }

    assert_eq!(
        blocks[3]["properties"]["qualified_predicate"],
        serde_json::json!({ "type": "null" })
    );
    assert_eq!(blocks[1]["$schema"], "http://json-schema.org/schema#");
}

#[test]
fn names_tables_list_each_type_separately() {
    let document = render();
    let start = document.find("#### NODE Names").unwrap();
    let end = document.find("### REL_GROUP").unwrap();
    let node_section = &document[start..end];
    assert!(node_section.contains("| Disease | NODE |"));
    assert!(node_section.contains("| Gene    | NODE |"));
    assert!(!node_section.contains("treats"));

    let rel_section = &document[document.find("#### REL_GROUP Names").unwrap()..];
    assert!(rel_section.contains("| treats | REL_GROUP |"));
    assert!(!rel_section.contains("Disease"));
}
