//! Command implementations.

pub mod build;
pub mod check;

use std::path::Path;

use color_eyre::eyre::{Result, WrapErr};
use vitae_core::Config;

/// Resolve the configuration and apply command-line overrides.
pub fn load_config(
    config_path: Option<&Path>,
    content: Option<&Path>,
    output: Option<&Path>,
) -> Result<Config> {
    let mut config = Config::resolve(config_path).wrap_err("Failed to load configuration")?;

    if let Some(root) = content {
        tracing::info!(root = %root.display(), "Overriding content root from CLI");
        config.content.root = root.to_path_buf();
    }

    if let Some(path) = output {
        tracing::info!(path = %path.display(), "Overriding output path from CLI");
        config.output.path = path.to_path_buf();
    }

    tracing::debug!(?config, "Loaded configuration");
    Ok(config)
}
