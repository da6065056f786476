//! Application configuration
//!
//! Configuration loaded from redux-hooks.toml.

use redux_hooks::FailurePolicy;
use serde::{Deserialize, Serialize};

use crate::paths;

/// How the store reacts to a page whose selector panics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotifyFailures {
    #[default]
    Propagate,
    Isolate,
}

impl From<NotifyFailures> for FailurePolicy {
    fn from(setting: NotifyFailures) -> Self {
        match setting {
            NotifyFailures::Propagate => FailurePolicy::Propagate,
            NotifyFailures::Isolate => FailurePolicy::Isolate,
        }
    }
}

/// Application configuration loaded from redux-hooks.toml
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct AppConfig {
    /// Name the profile starts with
    #[serde(default)]
    pub initial_name: String,

    /// Age the profile starts with
    #[serde(default)]
    pub initial_age: u32,

    /// How long the loading fallback is shown before the first page mounts
    #[serde(default = "default_loading_ms")]
    pub loading_ms: u64,

    /// Input poll interval of the render loop
    #[serde(default = "default_tick_rate_ms")]
    pub tick_rate_ms: u64,

    #[serde(default)]
    pub failure_policy: NotifyFailures,
}

fn default_loading_ms() -> u64 {
    300
}

fn default_tick_rate_ms() -> u64 {
    100
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            initial_name: String::new(),
            initial_age: 0,
            loading_ms: default_loading_ms(),
            tick_rate_ms: default_tick_rate_ms(),
            failure_policy: NotifyFailures::default(),
        }
    }
}

impl AppConfig {
    /// Load config from CWD first, then the config directory, or use defaults
    pub fn load() -> Self {
        if let Some(content) = load_config_file() {
            match toml::from_str(&content) {
                Ok(config) => {
                    log::info!("Loaded app config from file");
                    return config;
                }
                Err(e) => {
                    log::warn!("Failed to parse config file: {}", e);
                }
            }
        }

        log::debug!("Using default app config");
        Self::default()
    }
}

/// Read the config file content, if one exists
fn load_config_file() -> Option<String> {
    if let Ok(content) = std::fs::read_to_string(paths::CONFIG_FILE) {
        log::debug!("Loaded config from {}", paths::CONFIG_FILE);
        return Some(content);
    }

    match paths::app_config_path() {
        Ok(path) => match std::fs::read_to_string(&path) {
            Ok(content) => {
                log::debug!("Loaded config from {}", path.display());
                Some(content)
            }
            Err(_) => None,
        },
        Err(e) => {
            log::debug!("No config directory available: {:#}", e);
            None
        }
    }
}
