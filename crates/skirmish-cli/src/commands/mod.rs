//! CLI command implementations

pub mod clips;
pub mod presets;
pub mod simulate;

use anyhow::{Context, Result};
use skirmish_game::GameConfig;
use std::path::Path;

/// Load the config file if one was given, otherwise the defaults
pub fn load_config(path: Option<&Path>) -> Result<GameConfig> {
    match path {
        Some(path) => GameConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display())),
        None => Ok(GameConfig::default()),
    }
}
