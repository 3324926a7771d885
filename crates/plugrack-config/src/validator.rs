//! Configuration validation

use crate::error::{ConfigError, Result};
use crate::HostConfig;
use std::collections::HashSet;

/// Accepted log levels
pub const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate configuration
pub fn validate_config(config: &HostConfig) -> Result<()> {
    // Validate logging
    validate_logging(config)?;

    // Validate modules
    validate_modules(config)?;

    Ok(())
}

fn validate_logging(config: &HostConfig) -> Result<()> {
    let level = config.logging.level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        return Err(ConfigError::validation(format!(
            "Invalid log level: {} (must be one of {})",
            config.logging.level,
            LOG_LEVELS.join(", ")
        )));
    }

    Ok(())
}

fn validate_modules(config: &HostConfig) -> Result<()> {
    let mut seen = HashSet::new();

    for module in &config.modules {
        if module.name.is_empty() {
            return Err(ConfigError::validation("module name cannot be empty"));
        }

        if !seen.insert(module.name.as_str()) {
            return Err(ConfigError::validation(format!(
                "Duplicate module entry: {}",
                module.name
            )));
        }

        if !module.enabled {
            tracing::debug!(module = %module.name, "Module disabled by configuration");
        }
    }

    if !config.registration.strict {
        tracing::warn!("Non-strict registration: failing plugins will be skipped");
    }

    Ok(())
}
