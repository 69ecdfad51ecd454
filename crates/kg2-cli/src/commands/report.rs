use std::path::Path;

use kg2_config::Kg2Config;
use kg2_fetch::DatasetStatus;
use serde::Serialize;

use crate::cli::{GlobalFlags, ReportArgs};
use crate::output::output;
use crate::pipeline;

#[derive(Debug, Serialize)]
struct ReportSummary<'a> {
    dataset: &'a DatasetStatus,
    report: &'a Path,
    tables: usize,
    sections: usize,
}

/// Handle `kg2 report`.
pub async fn handle(
    args: &ReportArgs,
    config: &Kg2Config,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let path = args.output.as_ref().unwrap_or(&config.report.output_path);
    let outcome = pipeline::run(config, path).await?;

    output(
        &ReportSummary {
            dataset: &outcome.dataset,
            report: &outcome.report,
            tables: outcome.results.tables.len(),
            sections: outcome.results.tables.types().len(),
        },
        flags.format,
    )
}
