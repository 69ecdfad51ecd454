use anyhow::Context;
use kg2_config::Kg2Config;

use crate::cli::GlobalFlags;

/// Load `.env`, then layered configuration, then apply command-line overrides.
pub fn load_config(flags: &GlobalFlags) -> anyhow::Result<Kg2Config> {
    let cwd = std::env::current_dir().context("failed to determine current directory")?;
    let env_path = cwd.join(".env");
    if env_path.exists() {
        dotenvy::from_path(&env_path)
            .with_context(|| format!("failed to load dotenv file at {}", env_path.display()))?;
    }

    let mut config = match &flags.config {
        Some(path) => Kg2Config::load_with_file(path)
            .with_context(|| format!("failed to load config file {}", path.display()))?,
        None => Kg2Config::load().context("failed to load configuration")?,
    };

    if let Some(target_dir) = &flags.target_dir {
        config.dataset.target_dir.clone_from(target_dir);
    }
    tracing::debug!(dataset_dir = %config.dataset.dataset_dir().display(), "configuration loaded");
    Ok(config)
}
