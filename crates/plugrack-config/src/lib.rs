//! # plugrack Configuration
//!
//! Host configuration with support for:
//! - Multiple formats (YAML, TOML, JSON)
//! - Environment variable expansion
//! - Validation
//! - Default values

#![forbid(unsafe_code)]
#![warn(
    missing_docs,
    missing_debug_implementations,
    rust_2018_idioms,
    unreachable_pub
)]

pub mod error;
pub mod loader;
pub mod types;
pub mod validator;

pub use error::{ConfigError, Result};
pub use loader::{expand_env_vars, load_config, load_from_file, load_from_str};
pub use types::{HostConfig, LogFormat, LoggingConfig, ModuleConfig, RegistrationConfig};
pub use validator::validate_config;

use std::path::Path;

/// Configuration format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// YAML format
    Yaml,
    /// TOML format
    Toml,
    /// JSON format
    Json,
}

impl ConfigFormat {
    /// Detect format from file extension
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|s| s.to_str())
            .ok_or_else(|| ConfigError::UnsupportedFormat(path.display().to_string()))?;

        match ext {
            "yaml" | "yml" => Ok(ConfigFormat::Yaml),
            "toml" => Ok(ConfigFormat::Toml),
            "json" => Ok(ConfigFormat::Json),
            _ => Err(ConfigError::UnsupportedFormat(ext.to_string())),
        }
    }
}
