//! Plugin error types

use std::fmt;

/// Error reported by a plugin, most commonly by its factory
#[derive(Debug, thiserror::Error)]
pub enum PluginError {
    /// Instantiation failed
    #[error("Initialization failed: {0}")]
    InitError(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Runtime error
    #[error("Runtime error: {0}")]
    RuntimeError(String),

    /// I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type for plugin operations
pub type Result<T> = std::result::Result<T, PluginError>;

impl PluginError {
    /// Create a new initialization error
    pub fn init(msg: impl fmt::Display) -> Self {
        Self::InitError(msg.to_string())
    }

    /// Create a new configuration error
    pub fn config(msg: impl fmt::Display) -> Self {
        Self::ConfigError(msg.to_string())
    }

    /// Create a new runtime error
    pub fn runtime(msg: impl fmt::Display) -> Self {
        Self::RuntimeError(msg.to_string())
    }
}
