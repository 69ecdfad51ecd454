use kg2_config::Kg2Config;
use kg2_graph::QueryDriver;

use crate::cli::GlobalFlags;
use crate::output::output;
use crate::pipeline;

/// Handle `kg2 tables`.
pub async fn handle(config: &Kg2Config, flags: &GlobalFlags) -> anyhow::Result<()> {
    let status = pipeline::prepare_dataset(config).await?;
    let db = pipeline::open_dataset(status.dataset_dir())?;
    let tables = QueryDriver::new(&db, &config.queries, &config.lookups).show_tables()?;
    output(&tables, flags.format)
}
