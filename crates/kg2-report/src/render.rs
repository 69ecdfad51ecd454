//! Markdown and HTML fragments.

use std::fmt::Write;

use kg2_core::{EntityRecord, TableDescriptor};
use serde_json::Value;

use crate::ReportError;

/// Two-column HTML table: the example record and its schema, each in a
/// fenced `json` block.
///
/// # Errors
///
/// Returns [`ReportError::Json`] if either value fails to serialize.
pub fn render_entity_example(example: &Value, schema: &Value) -> Result<String, ReportError> {
    let example = serde_json::to_string_pretty(example)?;
    let schema = serde_json::to_string_pretty(schema)?;
    Ok(format!(
        "<table>
<tr>
<th>Example data</th>
<th>Example data JSON schema</th>
</tr>
<tr>
<td>

```json
{example}
```

</td>
<td>

```json
{schema}
```

</td>
</tr>
</table>"
    ))
}

/// Example block for one record: its visible fields and their inferred schema.
///
/// # Errors
///
/// Returns [`ReportError::Schema`] if the record fails its own schema.
pub fn render_record_example(record: &EntityRecord) -> Result<String, ReportError> {
    let example = record.to_json();
    let schema = kg2_schema::infer_schema(&example);
    kg2_schema::check_example(&schema, &example)?;
    render_entity_example(&example, &schema)
}

/// Markdown pipe table with left-aligned `name` and `type` columns.
pub fn render_names_table<'a, I>(rows: I) -> String
where
    I: IntoIterator<Item = &'a TableDescriptor>,
{
    let rows: Vec<(&str, &str)> = rows
        .into_iter()
        .map(|t| (t.name.as_str(), t.table_type.as_str()))
        .collect();
    let name_w = rows
        .iter()
        .map(|(name, _)| name.chars().count())
        .fold("name".len(), usize::max);
    let type_w = rows
        .iter()
        .map(|(_, table_type)| table_type.chars().count())
        .fold("type".len(), usize::max);

    let mut out = String::new();
    let _ = writeln!(out, "| {:<name_w$} | {:<type_w$} |", "name", "type");
    let _ = writeln!(
        out,
        "|:{}|:{}|",
        "-".repeat(name_w + 1),
        "-".repeat(type_w + 1)
    );
    for (name, table_type) in &rows {
        let _ = writeln!(out, "| {name:<name_w$} | {table_type:<type_w$} |");
    }
    out.truncate(out.trim_end().len());
    out
}

#[cfg(test)]
mod tests {
    use kg2_core::TableType;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;

    use super::*;

    #[test]
    fn names_table_pads_to_widest_cell() {
        let tables = [
            TableDescriptor::new("Disease", TableType::Node),
            TableDescriptor::new("Gene", TableType::Node),
        ];
        assert_eq!(
            render_names_table(&tables),
            "\
| name    | type |
|:--------|:-----|
| Disease | NODE |
| Gene    | NODE |"
        );
    }

    #[rstest]
    #[case(&[("Gene", TableType::Node)], "| Gene | NODE |")]
    #[case(&[("treats", TableType::RelGroup)], "| treats | REL_GROUP |")]
    #[case(
        &[("gene_associated_with_condition", TableType::RelGroup)],
        "| gene_associated_with_condition | REL_GROUP |"
    )]
    #[case(&[("ab", TableType::Rel)], "| ab   | REL  |")]
    fn names_table_widths_follow_widest_of_header_and_cells(
        #[case] rows: &[(&str, TableType)],
        #[case] expected_row: &str,
    ) {
        let tables: Vec<TableDescriptor> = rows
            .iter()
            .map(|(name, table_type)| TableDescriptor::new(*name, *table_type))
            .collect();
        let rendered = render_names_table(&tables);
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[2], expected_row);
        assert_eq!(lines[0].len(), expected_row.len());
        assert_eq!(lines[1].len(), expected_row.len());
    }

    #[test]
    fn names_table_without_rows_keeps_header() {
        assert_eq!(
            render_names_table(std::iter::empty()),
            "| name | type |\n|:-----|:-----|"
        );
    }

    #[test]
    fn entity_example_embeds_pretty_json() {
        let html = render_entity_example(&json!({ "id": "X:1" }), &json!({ "type": "object" }))
            .unwrap();
        assert!(html.starts_with("<table>\n"));
        assert!(html.contains("```json\n{\n  \"id\": \"X:1\"\n}\n```"));
        assert!(html.contains("```json\n{\n  \"type\": \"object\"\n}\n```"));
        assert!(html.ends_with("</table>"));
    }

    #[test]
    fn record_example_shows_only_visible_fields() {
        let record = EntityRecord::from_columns([
            ("_offset", 3_i64.into()),
            ("id", "X:1".into()),
            ("name", "thing".into()),
        ]);
        let html = render_record_example(&record).unwrap();
        assert!(!html.contains("_offset"));
        assert!(html.contains("\"required\": [\n    \"id\",\n    \"name\"\n  ]"));
    }
}
