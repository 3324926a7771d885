//! Registry error types

use plugrack_api::PluginError;
use std::fmt;

/// Registry error type
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// Caller or plugin author mistake: empty or duplicate name, malformed
    /// capability token, factory producing a different type
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The plugin's factory failed while the registry instantiated it during registration
    #[error("Instantiating plugin '{plugin}' failed: {source}")]
    Factory {
        /// Plugin name
        plugin: String,
        /// Error returned by the factory
        #[source]
        source: PluginError,
    },
}

/// Result type for registry operations
pub type Result<T> = std::result::Result<T, RegistryError>;

impl RegistryError {
    /// Create a new invalid argument error
    pub fn invalid_argument(msg: impl fmt::Display) -> Self {
        Self::InvalidArgument(msg.to_string())
    }

    /// Create a new factory error
    pub fn factory(plugin: impl Into<String>, source: PluginError) -> Self {
        Self::Factory {
            plugin: plugin.into(),
            source,
        }
    }

    /// Check if this is an invalid argument error
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }

    /// Check if this is a factory error
    pub fn is_factory(&self) -> bool {
        matches!(self, Self::Factory { .. })
    }
}
