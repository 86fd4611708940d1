use std::path::{Path, PathBuf};

use crate::config::UserConfig;
use crate::error::{Result, StencilError};

/// Marker file at the template root that names the template-set version.
/// Never materialized into generated projects.
pub const VERSION_FILE: &str = "VERSION";

/// Resolve the template root: explicit flag -> user config -> platform
/// data directory.
///
/// Only resolves the path; readability is checked when the tree is
/// enumerated, so `check` and `new` report the same error for a bad root.
pub fn resolve_template_root(
    explicit: Option<&Path>,
    config: Option<&UserConfig>,
) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }

    if let Some(path) = config.and_then(|c| c.templates.as_deref()) {
        return Ok(path.to_path_buf());
    }

    match dirs::data_dir() {
        Some(base) => Ok(base.join("stencil").join("templates")),
        None => Err(StencilError::TemplateTreeUnreadable {
            path: PathBuf::from("<data dir>/stencil/templates"),
            reason: "no platform data directory available".to_string(),
        }),
    }
}

/// Read the template-set version from the root's VERSION file.
///
/// The version is the first line, trimmed. A missing or empty file falls
/// back to this binary's own version so stamps never come out blank.
pub fn resolve_template_version(template_root: &Path) -> String {
    let path = template_root.join(VERSION_FILE);
    match std::fs::read_to_string(&path) {
        Ok(content) => {
            let version = content.lines().next().unwrap_or("").trim();
            if version.is_empty() {
                env!("CARGO_PKG_VERSION").to_string()
            } else {
                version.to_string()
            }
        }
        Err(_) => env!("CARGO_PKG_VERSION").to_string(),
    }
}
