use kg2_config::Kg2Config;

use crate::cli::{Commands, GlobalFlags};
use crate::commands;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(
    command: Commands,
    config: &Kg2Config,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match command {
        Commands::Fetch => commands::fetch::handle(config, flags).await,
        Commands::Tables => commands::tables::handle(config, flags).await,
        Commands::Query(args) => commands::query::handle(&args, config, flags).await,
        Commands::Report(args) => commands::report::handle(&args, config, flags).await,
        Commands::Demo(args) => commands::demo::handle(&args, config, flags).await,
        Commands::Pack(args) => commands::pack::handle(&args, config, flags),
    }
}
