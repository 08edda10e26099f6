use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Error, Result};
use crate::core::paths;
use crate::utils::io;

/// Root configuration structure for treeswap.json
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TreeswapConfig {
    #[serde(default)]
    pub defaults: Defaults,
}

/// All configurable defaults that can be overridden via treeswap.json
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Defaults {
    /// Directory names that are neither descended into nor renamed.
    #[serde(default)]
    pub skip_dirs: Vec<String>,

    /// Emit a single JSON envelope instead of per-entry lines.
    #[serde(default)]
    pub json: bool,
}

// =============================================================================
// Loading functions
// =============================================================================

/// Load the global treeswap.json, falling back to defaults on any error.
pub fn load_config() -> TreeswapConfig {
    paths::treeswap_json()
        .ok()
        .filter(|path| path.exists())
        .and_then(|path| load_config_from(&path).ok())
        .unwrap_or_default()
}

/// Load config from an explicit path. Missing files and bad JSON are errors.
pub fn load_config_from(path: &Path) -> Result<TreeswapConfig> {
    let content = io::read_file(path, &format!("read {}", path.display()))?;

    serde_json::from_str(&content)
        .map_err(|e| Error::config_invalid_json(path.display().to_string(), e))
}
