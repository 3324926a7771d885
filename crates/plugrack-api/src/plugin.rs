//! Core plugin trait and descriptor

use crate::capability::{Capabilities, TypeDescriptor};
use crate::error::Result;
use std::fmt;
use std::sync::Arc;

/// Function creating a fresh instance of a plugin
pub type PluginFactory = Arc<dyn Fn() -> Result<Box<dyn Plugin>> + Send + Sync>;

/// Core plugin trait that all plugins must implement
///
/// Most plugins implement additional traits for specific functionality and
/// announce them from [`Plugin::capabilities`].
pub trait Plugin: PluginType + Send + Sync + fmt::Debug + 'static {
    /// Describe the plugin
    ///
    /// Called on a plain, possibly uninitialized value of the plugin. The
    /// returned factory must produce values of the same concrete type.
    fn plugin_info(&self) -> PluginInfo;

    /// Declare the traits this plugin type implements
    ///
    /// Every plugin implicitly provides `dyn Plugin`.
    fn capabilities(caps: &mut Capabilities<Self>)
    where
        Self: Sized,
    {
        let _ = caps;
    }
}

/// Runtime type of a plugin value
///
/// Implemented for every plugin by a blanket impl, so no plugin can report a
/// type other than its own. Works through `dyn Plugin`.
///
/// ```compile_fail
/// use plugrack_api::prelude::*;
///
/// #[derive(Debug)]
/// struct Impostor;
///
/// impl Plugin for Impostor {
///     fn plugin_info(&self) -> PluginInfo {
///         PluginInfo::new("impostor", || Ok(Box::new(Impostor)))
///     }
/// }
///
/// impl PluginType for Impostor {
///     fn concrete_type(&self) -> TypeDescriptor {
///         TypeDescriptor::concrete::<String>()
///     }
/// }
/// ```
pub trait PluginType {
    /// Concrete type of this value
    fn concrete_type(&self) -> TypeDescriptor;
}

impl<T: Plugin> PluginType for T {
    fn concrete_type(&self) -> TypeDescriptor {
        TypeDescriptor::concrete::<T>()
    }
}

/// Plugin descriptor
#[derive(Clone)]
pub struct PluginInfo {
    /// Plugin name (must be unique and non-empty)
    pub name: String,

    /// Sorting priority; lower sorts first, ties are sorted by name
    pub priority: i32,

    /// Creates a new instance of the plugin
    pub factory: PluginFactory,
}

impl PluginInfo {
    /// Create a descriptor with the default priority of 0
    pub fn new<F>(name: impl Into<String>, factory: F) -> Self
    where
        F: Fn() -> Result<Box<dyn Plugin>> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            priority: 0,
            factory: Arc::new(factory),
        }
    }

    /// Set the sorting priority
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Invoke the factory
    pub fn instantiate(&self) -> Result<Box<dyn Plugin>> {
        (self.factory)()
    }
}

impl fmt::Debug for PluginInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PluginInfo")
            .field("name", &self.name)
            .field("priority", &self.priority)
            .field("factory", &"<fn>")
            .finish()
    }
}

impl PartialEq for PluginInfo {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.priority == other.priority
            && Arc::ptr_eq(&self.factory, &other.factory)
    }
}

impl Eq for PluginInfo {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PluginError;

    #[derive(Debug, Default)]
    struct Counter;

    impl Plugin for Counter {
        fn plugin_info(&self) -> PluginInfo {
            PluginInfo::new("counter", || Ok(Box::new(Counter))).with_priority(5)
        }
    }

    #[derive(Debug)]
    struct Broken;

    impl Plugin for Broken {
        fn plugin_info(&self) -> PluginInfo {
            PluginInfo::new("broken", || Err(PluginError::init("no backing store")))
        }
    }

    #[test]
    fn test_plugin_info_defaults() {
        let info = PluginInfo::new("plain", || Ok(Box::new(Counter)));
        assert_eq!(info.name, "plain");
        assert_eq!(info.priority, 0);
    }

    #[test]
    fn test_instantiate_reproduces_type() {
        let info = Counter.plugin_info();
        assert_eq!(info.priority, 5);

        let instance = info.instantiate().unwrap();
        assert_eq!(instance.concrete_type(), Counter.concrete_type());
        assert_eq!(instance.concrete_type(), TypeDescriptor::concrete::<Counter>());
    }

    #[test]
    fn test_instantiate_error() {
        let err = Broken.plugin_info().instantiate().unwrap_err();
        assert!(matches!(err, PluginError::InitError(_)));
    }

    #[test]
    fn test_concrete_type_through_trait_object() {
        let boxed: Box<dyn Plugin> = Box::new(Broken);
        assert_eq!(boxed.concrete_type(), TypeDescriptor::concrete::<Broken>());
        assert_ne!(boxed.concrete_type(), TypeDescriptor::concrete::<Counter>());
    }

    #[test]
    fn test_plugin_type_ignores_wrappers() {
        fn reported<P: Plugin>(plugin: &P) -> TypeDescriptor {
            plugin.concrete_type()
        }

        assert_eq!(reported(&Counter), TypeDescriptor::concrete::<Counter>());

        let boxed: Box<dyn Plugin> = Box::new(Counter);
        assert_eq!(boxed.concrete_type(), TypeDescriptor::concrete::<Counter>());
        assert_ne!(
            boxed.concrete_type(),
            TypeDescriptor::concrete::<Box<dyn Plugin>>()
        );
    }

    #[test]
    fn test_clones_compare_equal() {
        let info = Counter.plugin_info();
        let copy = info.clone();
        assert_eq!(info, copy);

        // A second call builds a distinct factory
        assert_ne!(info, Counter.plugin_info());
    }

    #[test]
    fn test_debug_hides_factory() {
        let rendered = format!("{:?}", Counter.plugin_info());
        assert!(rendered.contains("counter"));
        assert!(rendered.contains("<fn>"));
    }
}
