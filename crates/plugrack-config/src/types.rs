//! Configuration types

use serde::{Deserialize, Serialize};
use std::fmt;

/// Host configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct HostConfig {
    /// Logging configuration
    pub logging: LoggingConfig,

    /// Registration policy
    pub registration: RegistrationConfig,

    /// Per-module toggles
    pub modules: Vec<ModuleConfig>,
}

impl HostConfig {
    /// Check whether a plugin module should be registered
    ///
    /// Modules without an entry are enabled.
    pub fn is_module_enabled(&self, name: &str) -> bool {
        self.modules
            .iter()
            .find(|m| m.name == name)
            .map_or(true, |m| m.enabled)
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Log format
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human readable lines
    #[default]
    Text,
    /// One JSON object per event
    Json,
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogFormat::Text => write!(f, "text"),
            LogFormat::Json => write!(f, "json"),
        }
    }
}

/// Registration policy
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RegistrationConfig {
    /// Abort on the first failed registration instead of skipping it
    pub strict: bool,
}

impl Default for RegistrationConfig {
    fn default() -> Self {
        Self {
            strict: default_true(),
        }
    }
}

/// Toggle for one plugin module
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ModuleConfig {
    /// Module name
    pub name: String,

    /// Whether the module registers its plugins
    #[serde(default = "default_true")]
    pub enabled: bool,
}

// Default functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}
