// SPDX-FileCopyrightText: 2026 TimeMesh contributors
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;
use std::path::PathBuf;

use tokio::fs;

use timemesh_core::{APP_NAME, Config as CoreConfig};

const TIMEMESH_CONFIG_ENV: &str = "TIMEMESH_CONFIG";

/// Resolve and parse the configuration file.
///
/// Resolution order: explicit `--config` path, the `TIMEMESH_CONFIG`
/// environment variable, then the default location. A missing default
/// file is not an error; the core falls back to its own defaults.
pub async fn parse_config(path: Option<PathBuf>) -> Result<CoreConfig, Box<dyn Error>> {
    let path = if let Some(path) = path {
        Some(path)
    } else if let Ok(env_path) = std::env::var(TIMEMESH_CONFIG_ENV) {
        Some(PathBuf::from(env_path))
    } else {
        let default = get_config_dir()?.join(format!("{APP_NAME}/config.toml"));
        default.exists().then_some(default)
    };

    let Some(path) = path else {
        return Ok(CoreConfig::default());
    };

    let content = fs::read_to_string(&path)
        .await
        .map_err(|e| format!("Failed to read config file at {}: {}", path.display(), e))?;
    let raw: ConfigRaw =
        toml::from_str(&content).map_err(|e| format!("Failed to parse config: {e}"))?;
    Ok(raw.core)
}

#[derive(Debug, Default, serde::Deserialize)]
struct ConfigRaw {
    #[serde(default)]
    core: CoreConfig,
}

fn get_config_dir() -> Result<PathBuf, Box<dyn Error>> {
    #[cfg(unix)]
    let config_dir = xdg::BaseDirectories::new().get_config_home();
    #[cfg(windows)]
    let config_dir = dirs::config_dir();
    config_dir.ok_or("User-specific config directory not found".into())
}
