//! Configuration and cache directory paths
//!
//! Uses XDG directories via `dirs` crate.
//!
//! Platform-specific locations:
//! - Linux: `~/.config/redux-hooks/`, `~/.cache/redux-hooks/`
//! - macOS: `~/Library/Application Support/redux-hooks/`, `~/Library/Caches/redux-hooks/`
//! - Windows: `%APPDATA%\redux-hooks\`, `%LOCALAPPDATA%\redux-hooks\`

use anyhow::{Context, Result};
use std::path::PathBuf;

const APP_NAME: &str = "redux-hooks";

/// Name of the config file, looked up in the working directory first
pub const CONFIG_FILE: &str = "redux-hooks.toml";

/// Get the application config directory, creating it if needed
pub fn config_dir() -> Result<PathBuf> {
    let base = dirs::config_dir().context("Could not determine config directory")?;
    let dir = base.join(APP_NAME);
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create config directory {}", dir.display()))?;
    Ok(dir)
}

/// Get the application cache directory, creating it if needed
pub fn cache_dir() -> Result<PathBuf> {
    let base = dirs::cache_dir().context("Could not determine cache directory")?;
    let dir = base.join(APP_NAME);
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create cache directory {}", dir.display()))?;
    Ok(dir)
}

/// Get path to the config file inside the config directory
pub fn app_config_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_path_ends_with_file_name() {
        // Environments without a home directory cannot resolve it at all
        if let Ok(path) = app_config_path() {
            assert!(path.ends_with(CONFIG_FILE));
            assert!(path.parent().is_some_and(|dir| dir.ends_with(APP_NAME)));
        }
    }
}
