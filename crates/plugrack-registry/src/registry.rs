//! Plugin registry
//!
//! Stores validated plugin descriptors sorted by `(priority, name)` and
//! answers lookup, enumeration and capability queries.

use crate::error::{RegistryError, Result};
use crate::resolver::resolve_capability;
use parking_lot::RwLock;
use plugrack_api::{Capabilities, CapabilitySet, Plugin, PluginInfo, PluginType, TypeDescriptor};
use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// A plugin accepted by the registry
struct RegisteredPlugin {
    /// Descriptor reported by the plugin at registration
    info: PluginInfo,

    /// Concrete type of the registering value
    plugin_type: TypeDescriptor,

    /// Capabilities declared by the plugin type
    capabilities: CapabilitySet,
}

#[derive(Default)]
struct Entries {
    /// Canonical store, sorted by `(priority, name)`
    plugins: Vec<Arc<RegisteredPlugin>>,

    by_name: HashMap<String, Arc<RegisteredPlugin>>,
}

/// Registry of statically linked plugins
///
/// Cloning is cheap; clones share the same plugins. Registration is
/// serialized by a write lock held for the whole validation, so a factory
/// must not register into the registry that is probing it.
#[derive(Clone, Default)]
pub struct Registry {
    entries: Arc<RwLock<Entries>>,
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("plugins", &self.plugin_names())
            .finish()
    }
}

impl Registry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a plugin
    ///
    /// The plugin's factory is invoked once to check that it produces values
    /// of the plugin's own type; that instance is dropped afterwards.
    pub fn register<P: Plugin>(&self, plugin: P) -> Result<()> {
        let info = plugin.plugin_info();
        let name = info.name.clone();
        let priority = info.priority;

        match self.insert::<P>(info) {
            Ok(()) => {
                info!(plugin = %name, priority, "Plugin registered");
                Ok(())
            }
            Err(err) => {
                warn!(plugin = %name, error = %err, "Plugin registration rejected");
                Err(err)
            }
        }
    }

    /// Register a plugin, panicking on failure
    ///
    /// Meant for startup code with no way to recover from a misconfigured
    /// plugin. The panic payload is the [`RegistryError`].
    ///
    /// ```rust
    /// use plugrack_api::prelude::*;
    /// use plugrack_registry::Registry;
    ///
    /// #[derive(Debug)]
    /// struct Noop;
    ///
    /// impl Plugin for Noop {
    ///     fn plugin_info(&self) -> PluginInfo {
    ///         PluginInfo::new("noop", || Ok(Box::new(Noop)))
    ///     }
    /// }
    ///
    /// let registry = Registry::new();
    /// registry.must_register(Noop);
    /// assert_eq!(registry.plugin_names(), vec!["noop"]);
    /// ```
    pub fn must_register<P: Plugin>(&self, plugin: P) {
        if let Err(err) = self.register(plugin) {
            error!(error = %err, "Fatal plugin registration failure");
            std::panic::panic_any(err);
        }
    }

    fn insert<P: Plugin>(&self, info: PluginInfo) -> Result<()> {
        let mut entries = self.entries.write();

        if info.name.is_empty() {
            return Err(RegistryError::invalid_argument("plugin name missing"));
        }

        let plugin_type = TypeDescriptor::concrete::<P>();

        let instance = info
            .instantiate()
            .map_err(|e| RegistryError::factory(&info.name, e))?;

        let instance_type = instance.concrete_type();
        if instance_type != plugin_type {
            return Err(RegistryError::invalid_argument(format!(
                "instantiating plugin '{}' returned type {instance_type}, want {plugin_type}",
                info.name
            )));
        }

        if entries.by_name.contains_key(&info.name) {
            return Err(RegistryError::invalid_argument(format!(
                "plugin '{}' already registered",
                info.name
            )));
        }

        let mut capabilities = Capabilities::<P>::new();
        capabilities.provide::<dyn Plugin>(|p| p);
        P::capabilities(&mut capabilities);

        let registered = Arc::new(RegisteredPlugin {
            info,
            plugin_type,
            capabilities: capabilities.into_set(),
        });

        entries
            .by_name
            .insert(registered.info.name.clone(), Arc::clone(&registered));
        entries.plugins.push(registered);

        // Stable, and names are unique, so the order never depends on
        // insertion history
        entries.plugins.sort_by(|a, b| {
            a.info
                .priority
                .cmp(&b.info.priority)
                .then_with(|| a.info.name.cmp(&b.info.name))
        });

        Ok(())
    }

    /// Get all registered plugin names, sorted by `(priority, name)`
    pub fn plugin_names(&self) -> Vec<String> {
        let entries = self.entries.read();
        entries
            .plugins
            .iter()
            .map(|rp| rp.info.name.clone())
            .collect()
    }

    /// Get all registered plugin descriptors, sorted by `(priority, name)`
    pub fn plugins(&self) -> Vec<PluginInfo> {
        let entries = self.entries.read();
        entries.plugins.iter().map(|rp| rp.info.clone()).collect()
    }

    /// Get a plugin descriptor by name
    pub fn plugin_by_name(&self, name: &str) -> Option<PluginInfo> {
        let entries = self.entries.read();
        entries.by_name.get(name).map(|rp| rp.info.clone())
    }

    /// Get all plugins implementing a capability, sorted by `(priority, name)`
    ///
    /// The token is resolved with [`resolve_capability`]: pass a
    /// [`TypeRef`](plugrack_api::TypeRef) or an interface
    /// [`TypeDescriptor`]. An invalid token is an error; a valid capability
    /// nothing implements yields an empty list.
    pub fn plugins_implementing(&self, token: Option<&dyn Any>) -> Result<Vec<PluginInfo>> {
        let capability = resolve_capability(token)?;
        Ok(self.matching(&capability))
    }

    /// Get all plugins implementing the trait `T`, given as `dyn Trait`
    pub fn plugins_with<T: ?Sized + 'static>(&self) -> Vec<PluginInfo> {
        self.matching(&TypeDescriptor::interface::<T>())
    }

    fn matching(&self, capability: &TypeDescriptor) -> Vec<PluginInfo> {
        let entries = self.entries.read();

        let result: Vec<PluginInfo> = entries
            .plugins
            .iter()
            .filter(|rp| rp.capabilities.contains(capability))
            .map(|rp| rp.info.clone())
            .collect();

        debug!(capability = %capability, matches = result.len(), "Capability query");

        result
    }

    /// Get the capabilities declared by a plugin
    pub fn capabilities_of(&self, name: &str) -> Option<CapabilitySet> {
        let entries = self.entries.read();
        entries.by_name.get(name).map(|rp| rp.capabilities.clone())
    }

    /// Get the concrete type a plugin registered with
    pub fn plugin_type_of(&self, name: &str) -> Option<TypeDescriptor> {
        let entries = self.entries.read();
        entries.by_name.get(name).map(|rp| rp.plugin_type)
    }

    /// Check if a plugin is registered
    pub fn contains(&self, name: &str) -> bool {
        self.entries.read().by_name.contains_key(name)
    }

    /// Get plugin count
    pub fn len(&self) -> usize {
        self.entries.read().plugins.len()
    }

    /// Check if no plugin is registered
    pub fn is_empty(&self) -> bool {
        self.entries.read().plugins.is_empty()
    }
}
