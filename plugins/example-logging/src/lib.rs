//! # Example Logging Plugin
//!
//! Demonstrates how to build a log sink plugin and expose it through a
//! capability.
//!
//! ## Example
//!
//! ```rust
//! use example_logging::LogSink;
//! use plugrack_registry::Registry;
//!
//! # fn main() -> plugrack_registry::Result<()> {
//! let registry = Registry::new();
//! example_logging::register(&registry)?;
//!
//! let sinks = registry.plugins_with::<dyn LogSink>();
//! assert_eq!(sinks[0].name, "stderr-sink");
//! # Ok(())
//! # }
//! ```

use plugrack_api::prelude::*;
use plugrack_registry::Registry;
use serde::{Deserialize, Serialize};
use std::io::Write;
use tracing::debug;

/// Plugins that accept log records
pub trait LogSink {
    /// Write one record
    fn write_record(&self, record: &LogRecord) -> plugrack_api::Result<()>;
}

/// A single log record
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LogRecord {
    /// Severity
    pub level: String,

    /// Emitting component
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,

    /// Message text
    pub message: String,
}

impl LogRecord {
    /// Create a record without a target
    pub fn new(level: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level: level.into(),
            target: None,
            message: message.into(),
        }
    }

    /// Set the emitting component
    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }
}

/// Stderr Sink Plugin
///
/// Writes each record to standard error as one line of JSON.
#[derive(Debug, Default)]
pub struct StderrSinkPlugin;

impl StderrSinkPlugin {
    /// Registered name
    pub const NAME: &'static str = "stderr-sink";

    /// Render a record as it is written
    pub fn format_record(record: &LogRecord) -> plugrack_api::Result<String> {
        serde_json::to_string(record)
            .map_err(|e| PluginError::runtime(format!("Failed to encode log record: {e}")))
    }
}

impl Plugin for StderrSinkPlugin {
    fn plugin_info(&self) -> PluginInfo {
        PluginInfo::new(Self::NAME, || Ok(Box::new(StderrSinkPlugin))).with_priority(-10)
    }

    fn capabilities(caps: &mut Capabilities<Self>) {
        caps.provide::<dyn LogSink>(|p| p);
    }
}

impl LogSink for StderrSinkPlugin {
    fn write_record(&self, record: &LogRecord) -> plugrack_api::Result<()> {
        let line = Self::format_record(record)?;
        let mut stderr = std::io::stderr().lock();
        writeln!(stderr, "{line}")?;
        Ok(())
    }
}

/// Register every plugin in this module
pub fn register(registry: &Registry) -> plugrack_registry::Result<()> {
    registry.register(StderrSinkPlugin)?;

    debug!(module = "example-logging", "Log sink plugins registered");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register() {
        let registry = Registry::new();
        register(&registry).unwrap();

        assert_eq!(registry.plugin_names(), vec!["stderr-sink"]);
        assert_eq!(registry.plugin_by_name("stderr-sink").unwrap().priority, -10);

        let sinks = registry
            .plugins_implementing(Some(&TypeRef::interface::<dyn LogSink>()))
            .unwrap();
        assert_eq!(sinks.len(), 1);
    }

    #[test]
    fn test_format_record() {
        let record = LogRecord::new("info", "plugin ready");
        let line = StderrSinkPlugin::format_record(&record).unwrap();
        assert_eq!(line, r#"{"level":"info","message":"plugin ready"}"#);

        let record = record.with_target("host");
        let line = StderrSinkPlugin::format_record(&record).unwrap();
        let parsed: LogRecord = serde_json::from_str(&line).unwrap();
        assert_eq!(parsed, record);
    }

    #[test]
    fn test_write_record() {
        let record = LogRecord::new("warn", "written to stderr");
        assert!(StderrSinkPlugin.write_record(&record).is_ok());
    }
}
