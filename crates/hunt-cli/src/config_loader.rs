//! Configuration loading for CLI commands

use anyhow::{Context, Result};
use hunt_core::config::{CliConfigOverrides, LayeredConfig};
use hunt_core::layout::CONFIG_FILE;

use crate::cli::Cli;

/// Overrides carried by the global flags
pub fn overrides_from(cli: &Cli) -> CliConfigOverrides {
    CliConfigOverrides {
        data_dir: cli.data_dir.clone(),
        country_codes: cli.country_codes.clone(),
        search_limit: cli.limit,
        unsplash_access_key: None,
    }
}

/// Load layered configuration: defaults, `hunt.toml`, `HUNT_*`, flags
///
/// The config file lives in the data directory, so env and flags are applied
/// first to find it. File values never override them.
pub fn load_config(overrides: CliConfigOverrides) -> Result<LayeredConfig> {
    let mut config = LayeredConfig::with_defaults().load_from_env();
    config.update_from_cli(overrides);

    let config_path = config.data_dir.value.join(CONFIG_FILE);
    let config = config
        .load_from_optional_file(&config_path)
        .with_context(|| format!("Failed to load {}", config_path.display()))?;

    tracing::debug!("Using data directory {}", config.data_dir.value.display());
    Ok(config)
}
