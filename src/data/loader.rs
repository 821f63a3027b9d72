use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use bevy::log::info;

use super::GridPlaneConfig;

pub fn load_grid_config_from_str(json: &str) -> Result<GridPlaneConfig> {
    serde_json::from_str(json).context("failed parsing grid config JSON")
}

pub fn load_grid_config_from_path(path: impl AsRef<Path>) -> Result<GridPlaneConfig> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed reading grid config file: {}", path.display()))?;

    let config: GridPlaneConfig = serde_json::from_str(&raw)
        .with_context(|| format!("failed parsing grid config file as JSON: {}", path.display()))?;

    info!(
        "loaded {}x{} grid config from {}",
        config.rows,
        config.columns,
        path.display()
    );
    Ok(config)
}
