use std::path::Path;

use kg2_config::Kg2Config;
use kg2_core::TableListing;
use kg2_fetch::DatasetStatus;
use serde::Serialize;
use serde_json::Value;

use crate::cli::{GlobalFlags, OutputFormat, ReportArgs};
use crate::output::{output, output_section, records_json};
use crate::pipeline;

/// Every step's result with internal fields removed.
#[derive(Debug, Serialize)]
struct DemoView<'a> {
    dataset: &'a DatasetStatus,
    tables: &'a TableListing,
    example_node: Value,
    example_node_fields: Value,
    example_rel: Value,
    example_rel_fields: Value,
    disease_lookup: Vec<Value>,
    disease_gene_hop: Vec<Value>,
    report: &'a Path,
}

/// Handle `kg2 demo`.
pub async fn handle(
    args: &ReportArgs,
    config: &Kg2Config,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let path = args.output.as_ref().unwrap_or(&config.report.output_path);
    let outcome = pipeline::run(config, path).await?;
    let results = &outcome.results;

    let view = DemoView {
        dataset: &outcome.dataset,
        tables: &results.tables,
        example_node: results.example_node.to_json(),
        example_node_fields: results.example_node_fields.to_json(),
        example_rel: results.example_rel.to_json(),
        example_rel_fields: results.example_rel_fields.to_json(),
        disease_lookup: records_json(&results.disease),
        disease_gene_hop: records_json(&results.disease_gene),
        report: &outcome.report,
    };

    if flags.format != OutputFormat::Table {
        return output(&view, flags.format);
    }

    let format = flags.format;
    output_section("dataset", view.dataset, format)?;
    output_section("tables", view.tables, format)?;
    output_section("example node", &view.example_node, format)?;
    output_section("example node fields", &view.example_node_fields, format)?;
    output_section("example relationship", &view.example_rel, format)?;
    output_section("example relationship fields", &view.example_rel_fields, format)?;
    output_section(
        &format!("{} lookup", config.lookups.entity_label),
        &view.disease_lookup,
        format,
    )?;
    output_section(
        &format!(
            "{} to {} (one hop)",
            config.lookups.entity_label, config.lookups.neighbor_label
        ),
        &view.disease_gene_hop,
        format,
    )?;
    output_section("report", &view.report, format)
}
