//! Type descriptors and capability tables
//!
//! A capability is a trait a plugin type implements, named at query time by
//! its `dyn Trait` type. Plugin types declare their capabilities through
//! [`Capabilities`]; each declaration carries a cast function, so the compiler
//! rejects a plugin claiming a trait it does not implement.

use std::any::{type_name, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::mem::size_of;

/// Whether a type descriptor names a trait or a concrete type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    /// A trait object type (`dyn Trait`)
    Interface,

    /// Any other type
    Concrete,
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeKind::Interface => write!(f, "interface"),
            TypeKind::Concrete => write!(f, "concrete"),
        }
    }
}

/// Runtime identity of a type
///
/// Two descriptors are equal when they refer to the same [`TypeId`]. The
/// kind is not part of equality.
#[derive(Clone, Copy)]
pub struct TypeDescriptor {
    id: TypeId,
    name: &'static str,
    kind: TypeKind,
}

impl TypeDescriptor {
    /// Describe a trait object type, e.g. `TypeDescriptor::interface::<dyn Plugin>()`
    ///
    /// The kind is taken from `T` itself: anything other than a `dyn Trait`
    /// type is described as [`TypeKind::Concrete`].
    ///
    /// ```rust
    /// use plugrack_api::{Plugin, TypeDescriptor};
    ///
    /// assert!(TypeDescriptor::interface::<dyn Plugin>().is_interface());
    /// assert!(!TypeDescriptor::interface::<String>().is_interface());
    /// ```
    pub fn interface<T: ?Sized + 'static>() -> Self {
        let kind = if is_trait_object::<T>() {
            TypeKind::Interface
        } else {
            TypeKind::Concrete
        };

        Self {
            id: TypeId::of::<T>(),
            name: type_name::<T>(),
            kind,
        }
    }

    /// Describe a concrete type
    pub fn concrete<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: type_name::<T>(),
            kind: TypeKind::Concrete,
        }
    }

    /// Type identifier
    pub fn id(&self) -> TypeId {
        self.id
    }

    /// Fully qualified type name
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Kind of the described type
    pub fn kind(&self) -> TypeKind {
        self.kind
    }

    /// Check if this descriptor names a trait
    pub fn is_interface(&self) -> bool {
        self.kind == TypeKind::Interface
    }
}

/// Pointers to `dyn Trait` carry vtable metadata, and the type name of a
/// trait object always starts with `dyn `. Slices and `str` are wide too
/// but fail the name check.
fn is_trait_object<T: ?Sized + 'static>() -> bool {
    size_of::<*const T>() != size_of::<*const ()>() && type_name::<T>().starts_with("dyn ")
}

impl PartialEq for TypeDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeDescriptor {}

impl Hash for TypeDescriptor {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeDescriptor")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .finish()
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Reference to a type without a value of it
///
/// This is the usual way to name a capability when querying a registry:
///
/// ```rust
/// use plugrack_api::{Plugin, TypeRef};
///
/// let token = TypeRef::interface::<dyn Plugin>();
/// assert!(token.pointee().is_interface());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeRef {
    pointee: TypeDescriptor,
}

impl TypeRef {
    /// Reference to a trait object type
    pub fn interface<T: ?Sized + 'static>() -> Self {
        Self {
            pointee: TypeDescriptor::interface::<T>(),
        }
    }

    /// Reference to a concrete type
    pub fn concrete<T: ?Sized + 'static>() -> Self {
        Self {
            pointee: TypeDescriptor::concrete::<T>(),
        }
    }

    /// The referenced type
    pub fn pointee(&self) -> TypeDescriptor {
        self.pointee
    }
}

/// Capability declarations of the plugin type `P`
pub struct Capabilities<P: ?Sized> {
    provided: Vec<TypeDescriptor>,
    _plugin: PhantomData<fn(&P)>,
}

impl<P: ?Sized + 'static> Capabilities<P> {
    /// Create an empty declaration table
    pub fn new() -> Self {
        Self {
            provided: Vec::new(),
            _plugin: PhantomData,
        }
    }

    /// Declare that `P` implements the trait `T`
    ///
    /// The cast is never called; it only has to type-check, which is what
    /// proves the implementation exists. `|p| p` is all it takes:
    ///
    /// ```rust
    /// use plugrack_api::{Capabilities, TypeDescriptor};
    ///
    /// trait Greeter {
    ///     fn greet(&self) -> String;
    /// }
    ///
    /// struct English;
    ///
    /// impl Greeter for English {
    ///     fn greet(&self) -> String {
    ///         "hello".to_string()
    ///     }
    /// }
    ///
    /// let mut caps = Capabilities::<English>::new();
    /// caps.provide::<dyn Greeter>(|p| p);
    /// assert!(caps.provides(&TypeDescriptor::interface::<dyn Greeter>()));
    /// ```
    pub fn provide<T: ?Sized + 'static>(&mut self, cast: fn(&P) -> &T) -> &mut Self {
        let _ = cast;
        let capability = TypeDescriptor::interface::<T>();
        if !self.provided.contains(&capability) {
            self.provided.push(capability);
        }
        self
    }

    /// Check if a capability has been declared
    pub fn provides(&self, capability: &TypeDescriptor) -> bool {
        self.provided.contains(capability)
    }

    /// Erase the plugin type
    pub fn into_set(self) -> CapabilitySet {
        CapabilitySet {
            provided: self.provided,
        }
    }
}

impl<P: ?Sized + 'static> Default for Capabilities<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: ?Sized> fmt::Debug for Capabilities<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Capabilities")
            .field("provided", &self.provided)
            .finish()
    }
}

/// Capabilities of a plugin type, in declaration order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapabilitySet {
    provided: Vec<TypeDescriptor>,
}

impl CapabilitySet {
    /// Check if the set contains a capability
    pub fn contains(&self, capability: &TypeDescriptor) -> bool {
        self.provided.contains(capability)
    }

    /// Iterate over the declared capabilities
    pub fn iter(&self) -> impl Iterator<Item = &TypeDescriptor> {
        self.provided.iter()
    }

    /// Number of capabilities
    pub fn len(&self) -> usize {
        self.provided.len()
    }

    /// Check if no capability is declared
    pub fn is_empty(&self) -> bool {
        self.provided.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    trait Speak {}

    trait Fly {}

    struct Parrot;

    impl Speak for Parrot {}

    impl Fly for Parrot {}

    #[test]
    fn test_descriptor_kind() {
        let iface = TypeDescriptor::interface::<dyn Speak>();
        assert!(iface.is_interface());
        assert_eq!(iface.kind(), TypeKind::Interface);

        let concrete = TypeDescriptor::concrete::<Parrot>();
        assert!(!concrete.is_interface());
        assert_eq!(concrete.kind().to_string(), "concrete");
        assert!(concrete.name().ends_with("Parrot"));
    }

    #[test]
    fn test_interface_kind_comes_from_type() {
        assert!(TypeDescriptor::interface::<dyn Speak + Send>().is_interface());
        assert!(TypeDescriptor::interface::<dyn std::fmt::Debug>().is_interface());

        for descriptor in [
            TypeDescriptor::interface::<String>(),
            TypeDescriptor::interface::<Parrot>(),
            TypeDescriptor::interface::<str>(),
            TypeDescriptor::interface::<[u8]>(),
            TypeDescriptor::interface::<Box<dyn Speak>>(),
        ] {
            assert_eq!(descriptor.kind(), TypeKind::Concrete, "{descriptor}");
        }

        let token = TypeRef::interface::<Parrot>();
        assert!(!token.pointee().is_interface());
    }

    #[test]
    fn test_descriptor_equality_by_type() {
        assert_eq!(
            TypeDescriptor::interface::<dyn Speak>(),
            TypeDescriptor::interface::<dyn Speak>()
        );
        assert_ne!(
            TypeDescriptor::interface::<dyn Speak>(),
            TypeDescriptor::interface::<dyn Fly>()
        );
        assert_ne!(
            TypeDescriptor::concrete::<Parrot>(),
            TypeDescriptor::concrete::<String>()
        );
    }

    #[test]
    fn test_type_ref_pointee() {
        let token = TypeRef::interface::<dyn Speak>();
        assert_eq!(token.pointee(), TypeDescriptor::interface::<dyn Speak>());
        assert!(token.pointee().is_interface());

        let token = TypeRef::concrete::<Parrot>();
        assert!(!token.pointee().is_interface());
    }

    #[test]
    fn test_capabilities_collapse_duplicates() {
        let mut caps = Capabilities::<Parrot>::new();
        caps.provide::<dyn Speak>(|p| p)
            .provide::<dyn Fly>(|p| p)
            .provide::<dyn Speak>(|p| p);

        let set = caps.into_set();
        assert_eq!(set.len(), 2);
        assert!(set.contains(&TypeDescriptor::interface::<dyn Speak>()));
        assert!(set.contains(&TypeDescriptor::interface::<dyn Fly>()));
    }

    #[test]
    fn test_empty_capabilities() {
        let set = Capabilities::<Parrot>::default().into_set();
        assert!(set.is_empty());
        assert!(!set.contains(&TypeDescriptor::interface::<dyn Speak>()));
    }
}
