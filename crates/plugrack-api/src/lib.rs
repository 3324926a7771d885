//! # plugrack Plugin API
//!
//! The SDK for writing plugins that register with a plugrack registry.
//!
//! A plugin is a type implementing [`Plugin`]: it describes itself with a
//! name, a priority and a factory, and declares the traits it implements so
//! hosts can find it by capability.
//!
//! ## Example
//!
//! ```rust
//! use plugrack_api::prelude::*;
//!
//! pub trait Greeter {
//!     fn greet(&self, who: &str) -> String;
//! }
//!
//! #[derive(Debug, Default)]
//! struct HelloPlugin;
//!
//! impl Plugin for HelloPlugin {
//!     fn plugin_info(&self) -> PluginInfo {
//!         PluginInfo::new("hello", || Ok(Box::new(HelloPlugin))).with_priority(10)
//!     }
//!
//!     fn capabilities(caps: &mut Capabilities<Self>) {
//!         caps.provide::<dyn Greeter>(|p| p);
//!     }
//! }
//!
//! impl Greeter for HelloPlugin {
//!     fn greet(&self, who: &str) -> String {
//!         format!("hello, {who}")
//!     }
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(
    missing_docs,
    missing_debug_implementations,
    rust_2018_idioms,
    unreachable_pub
)]

pub mod capability;
pub mod error;
pub mod plugin;

#[cfg(feature = "testing")]
pub mod testing;

// Re-export commonly used types
pub use capability::{Capabilities, CapabilitySet, TypeDescriptor, TypeKind, TypeRef};
pub use error::{PluginError, Result};
pub use plugin::{Plugin, PluginFactory, PluginInfo, PluginType};

/// Prelude module with commonly used types
pub mod prelude {
    pub use crate::capability::{Capabilities, TypeDescriptor, TypeRef};
    pub use crate::error::PluginError;
    pub use crate::plugin::{Plugin, PluginInfo, PluginType};
}
