use std::{env, fs};

use super::EngineConfig;
use crate::error::{MatchError, Result};

pub const ENGINE_CONFIG_PATH_ENV: &str = "BB_ENGINE_CONFIG_PATH";

/// Replaces `config` with the JSON file named by `BB_ENGINE_CONFIG_PATH`, if set.
///
/// Returns whether a file was applied. An unset or blank variable is not an error.
pub fn apply_config_from_env(config: &mut EngineConfig) -> Result<bool> {
    let Ok(path) = env::var(ENGINE_CONFIG_PATH_ENV) else {
        return Ok(false);
    };
    let path = path.trim();
    if path.is_empty() {
        return Ok(false);
    }

    let content = fs::read_to_string(path)?;
    let loaded = EngineConfig::from_json(&content)?;
    loaded.validate().map_err(|e| {
        MatchError::InvalidConfig(format!("{ENGINE_CONFIG_PATH_ENV}='{path}': {e}"))
    })?;

    tracing::debug!(path, "engine config loaded from environment");
    *config = loaded;
    Ok(true)
}
