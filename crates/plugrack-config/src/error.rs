//! Configuration errors

use std::path::PathBuf;
use thiserror::Error;

/// Result type for configuration operations
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("Failed to read config file {path}: {source}")]
    Io {
        /// File that failed
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Config content is not valid for its format
    #[error("Failed to parse {format}: {message}")]
    Parse {
        /// Format being parsed
        format: &'static str,
        /// Parser message
        message: String,
    },

    /// Config parsed but holds invalid values
    #[error("Invalid configuration: {0}")]
    Validation(String),

    /// Referenced environment variable is unset and has no default
    #[error("Environment variable '{0}' not set and no default provided")]
    MissingEnvVar(String),

    /// File extension does not name a known format
    #[error("Unsupported config format: {0}")]
    UnsupportedFormat(String),
}

impl ConfigError {
    /// Create a parse error
    pub fn parse(format: &'static str, message: impl Into<String>) -> Self {
        Self::Parse {
            format,
            message: message.into(),
        }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = ConfigError::parse("YAML", "unexpected end of stream");
        assert_eq!(
            err.to_string(),
            "Failed to parse YAML: unexpected end of stream"
        );

        let err = ConfigError::validation("module name cannot be empty");
        assert!(err.to_string().contains("module name cannot be empty"));

        let err = ConfigError::MissingEnvVar("HOME_DIR".to_string());
        assert!(err.to_string().contains("HOME_DIR"));
    }

    #[test]
    fn test_io_error_keeps_source() {
        use std::error::Error as _;

        let err = ConfigError::Io {
            path: PathBuf::from("/missing.yaml"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        };

        assert!(err.to_string().contains("/missing.yaml"));
        assert!(err.source().is_some());
    }
}
