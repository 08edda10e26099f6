use crate::error::{Error, Result};
use std::env;
use std::path::PathBuf;

/// Base treeswap config directory (universal ~/.config/treeswap/ on all platforms)
pub fn treeswap() -> Result<PathBuf> {
    #[cfg(windows)]
    {
        let appdata = env::var("APPDATA").map_err(|_| {
            Error::internal_unexpected(
                "APPDATA environment variable not set on Windows".to_string(),
            )
        })?;
        Ok(PathBuf::from(appdata).join("treeswap"))
    }

    #[cfg(not(windows))]
    {
        let home = env::var("HOME").map_err(|_| {
            Error::internal_unexpected(
                "HOME environment variable not set on Unix-like system".to_string(),
            )
        })?;
        Ok(PathBuf::from(home).join(".config").join("treeswap"))
    }
}

/// Global treeswap.json config file path
pub fn treeswap_json() -> Result<PathBuf> {
    Ok(treeswap()?.join("treeswap.json"))
}
