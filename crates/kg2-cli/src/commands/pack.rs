use kg2_config::Kg2Config;

use crate::cli::{GlobalFlags, PackArgs};
use crate::output::output;
use crate::pipeline;

/// Handle `kg2 pack`.
pub fn handle(args: &PackArgs, config: &Kg2Config, flags: &GlobalFlags) -> anyhow::Result<()> {
    let outcome = pipeline::pack(
        &args.nodes,
        &args.edges,
        &args.out_dir,
        &config.dataset.dataset_name,
    )?;
    output(&outcome, flags.format)
}
