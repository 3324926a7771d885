//! # plugrack Registry
//!
//! A registry of statically linked plugins.
//!
//! ## Features
//!
//! - **Validated registration**: unique non-empty names, factories checked to
//!   reproduce the registering type
//! - **Canonical order**: every listing is sorted by `(priority, name)`
//! - **Capability queries**: find the plugins implementing a trait chosen at
//!   query time
//! - **Thread safety**: one reader/writer lock, concurrent queries
//!
//! ## Example
//!
//! ```rust
//! use plugrack_api::prelude::*;
//! use plugrack_registry::Registry;
//!
//! pub trait Greeter {
//!     fn greet(&self) -> String;
//! }
//!
//! #[derive(Debug)]
//! struct Hello;
//!
//! impl Plugin for Hello {
//!     fn plugin_info(&self) -> PluginInfo {
//!         PluginInfo::new("hello", || Ok(Box::new(Hello)))
//!     }
//!
//!     fn capabilities(caps: &mut Capabilities<Self>) {
//!         caps.provide::<dyn Greeter>(|p| p);
//!     }
//! }
//!
//! impl Greeter for Hello {
//!     fn greet(&self) -> String {
//!         "hello".to_string()
//!     }
//! }
//!
//! # fn main() -> plugrack_registry::Result<()> {
//! let registry = Registry::new();
//! registry.register(Hello)?;
//!
//! let greeters = registry.plugins_implementing(Some(&TypeRef::interface::<dyn Greeter>()))?;
//! assert_eq!(greeters[0].name, "hello");
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(
    missing_docs,
    missing_debug_implementations,
    rust_2018_idioms,
    unreachable_pub
)]

pub mod error;
pub mod global;
pub mod registry;
pub mod resolver;

pub use error::{RegistryError, Result};
pub use global::global;
pub use registry::Registry;
pub use resolver::{must_resolve_capability, resolve_capability};

// Re-export plugin API types for convenience
pub use plugrack_api::{
    Capabilities, CapabilitySet, Plugin, PluginError, PluginInfo, PluginType, TypeDescriptor,
    TypeKind, TypeRef,
};

/// Prelude module with commonly used types
pub mod prelude {
    pub use crate::error::{RegistryError, Result};
    pub use crate::registry::Registry;
    pub use plugrack_api::prelude::*;
}
