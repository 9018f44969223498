use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use super::{get_config_path, Config};

/// Write the built-in default config so it can be edited.
///
/// Refuses to replace an existing file unless `force` is set.
/// Returns the path that was written.
pub fn write_default_config(path: Option<PathBuf>, force: bool) -> Result<PathBuf> {
    let config_path = match path {
        Some(p) => p,
        None => get_config_path()?,
    };

    if config_path.exists() && !force {
        anyhow::bail!(
            "Config already exists at {}. Pass --force to overwrite it",
            config_path.display()
        );
    }

    write_config(&config_path, &Config::default())?;
    Ok(config_path)
}

fn write_config(config_path: &Path, config: &Config) -> Result<()> {
    let yaml = serde_saphyr::to_string(config)
        .map_err(|e| anyhow::anyhow!("Failed to serialize config: {}", e))?;

    // Create parent directories
    if let Some(parent) = config_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    crate::output::write_atomic(config_path, yaml.as_bytes())
        .with_context(|| format!("Failed to write config to {}", config_path.display()))
}
