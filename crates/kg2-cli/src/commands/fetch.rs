use kg2_config::Kg2Config;

use crate::cli::GlobalFlags;
use crate::output::output;
use crate::pipeline;

/// Handle `kg2 fetch`.
pub async fn handle(config: &Kg2Config, flags: &GlobalFlags) -> anyhow::Result<()> {
    let status = pipeline::prepare_dataset(config).await?;
    output(&status, flags.format)
}
