//! Mock implementations for testing

use crate::plugin::{Plugin, PluginInfo};
#[cfg(test)]
use crate::plugin::PluginType;
use crate::PluginError;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Mock plugin for testing
///
/// Its factory returns an empty `MockPlugin` and counts the calls.
#[derive(Debug, Clone, Default)]
pub struct MockPlugin {
    name: String,
    priority: i32,
    factory_calls: Arc<AtomicUsize>,
}

impl MockPlugin {
    /// Create a new mock plugin
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Set the priority reported by the descriptor
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Get number of factory calls
    pub fn factory_call_count(&self) -> usize {
        self.factory_calls.load(Ordering::SeqCst)
    }
}

impl Plugin for MockPlugin {
    fn plugin_info(&self) -> PluginInfo {
        let calls = Arc::clone(&self.factory_calls);
        PluginInfo::new(self.name.clone(), move || {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok(Box::new(MockPlugin::default()))
        })
        .with_priority(self.priority)
    }
}

/// Mock plugin whose factory always fails
#[derive(Debug, Clone)]
pub struct FailingPlugin {
    name: String,
    message: String,
}

impl FailingPlugin {
    /// Create a plugin failing with an initialization error carrying `message`
    pub fn new(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            message: message.into(),
        }
    }
}

impl Plugin for FailingPlugin {
    fn plugin_info(&self) -> PluginInfo {
        let message = self.message.clone();
        PluginInfo::new(self.name.clone(), move || Err(PluginError::init(&message)))
    }
}

/// Mock plugin whose factory returns a [`MockPlugin`] instead of itself
#[derive(Debug, Clone)]
pub struct MismatchedPlugin {
    name: String,
}

impl MismatchedPlugin {
    /// Create a new mismatched plugin
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Plugin for MismatchedPlugin {
    fn plugin_info(&self) -> PluginInfo {
        PluginInfo::new(self.name.clone(), || Ok(Box::new(MockPlugin::default())))
    }
}
