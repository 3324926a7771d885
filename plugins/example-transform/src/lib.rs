//! # Example Transform Plugins
//!
//! Demonstrates how to declare a capability and register plugins that
//! provide it.
//!
//! ## Plugins
//!
//! - `uppercase` (priority 10)
//! - `reverse` (priority 20)
//!
//! ## Example
//!
//! ```rust
//! use example_transform::TextTransform;
//! use plugrack_registry::Registry;
//!
//! # fn main() -> plugrack_registry::Result<()> {
//! let registry = Registry::new();
//! example_transform::register(&registry)?;
//!
//! let transforms = registry.plugins_with::<dyn TextTransform>();
//! assert_eq!(transforms[0].name, "uppercase");
//! # Ok(())
//! # }
//! ```

use plugrack_api::prelude::*;
use plugrack_registry::Registry;
use tracing::debug;

/// Plugins that rewrite a piece of text
pub trait TextTransform {
    /// Transform the input
    fn transform(&self, input: &str) -> String;
}

/// Uppercase Plugin
#[derive(Debug, Default)]
pub struct UppercasePlugin;

impl UppercasePlugin {
    /// Registered name
    pub const NAME: &'static str = "uppercase";
}

impl Plugin for UppercasePlugin {
    fn plugin_info(&self) -> PluginInfo {
        PluginInfo::new(Self::NAME, || Ok(Box::new(UppercasePlugin))).with_priority(10)
    }

    fn capabilities(caps: &mut Capabilities<Self>) {
        caps.provide::<dyn TextTransform>(|p| p);
    }
}

impl TextTransform for UppercasePlugin {
    fn transform(&self, input: &str) -> String {
        input.to_uppercase()
    }
}

/// Reverse Plugin
///
/// Reverses text by `char`, so multi-byte characters stay intact.
#[derive(Debug, Default)]
pub struct ReversePlugin;

impl ReversePlugin {
    /// Registered name
    pub const NAME: &'static str = "reverse";
}

impl Plugin for ReversePlugin {
    fn plugin_info(&self) -> PluginInfo {
        PluginInfo::new(Self::NAME, || Ok(Box::new(ReversePlugin))).with_priority(20)
    }

    fn capabilities(caps: &mut Capabilities<Self>) {
        caps.provide::<dyn TextTransform>(|p| p);
    }
}

impl TextTransform for ReversePlugin {
    fn transform(&self, input: &str) -> String {
        input.chars().rev().collect()
    }
}

/// Register every plugin in this module
pub fn register(registry: &Registry) -> plugrack_registry::Result<()> {
    registry.register(UppercasePlugin)?;
    registry.register(ReversePlugin)?;

    debug!(module = "example-transform", "Transform plugins registered");

    Ok(())
}
