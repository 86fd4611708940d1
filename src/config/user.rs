use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{Result, StencilError};

/// User-level configuration loaded from `~/.config/stencil/config.toml`.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct UserConfig {
    /// Template root used when `--templates` is not passed.
    #[serde(default)]
    pub templates: Option<PathBuf>,
    /// Directory the generated project lands in when `--parent` is not
    /// passed. Defaults to the current directory.
    #[serde(default)]
    pub parent_dir: Option<PathBuf>,
}

/// Get the path to the user config file.
fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("stencil").join("config.toml"))
}

/// Load user configuration from the XDG config directory.
///
/// Returns `Ok(None)` if the config file does not exist.
/// Returns `Err` if the file exists but cannot be read or parsed.
pub fn load_user_config() -> Result<Option<UserConfig>> {
    let path = match config_path() {
        Some(p) => p,
        None => return Ok(None),
    };

    if !path.exists() {
        return Ok(None);
    }

    let content = std::fs::read_to_string(&path).map_err(|e| StencilError::Io {
        context: format!("reading user config {}", path.display()),
        source: e,
    })?;

    let config: UserConfig =
        toml::from_str(&content).map_err(|e| StencilError::ConfigParse { source: e })?;

    Ok(Some(config))
}
