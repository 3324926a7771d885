//! Capability token resolution
//!
//! Turns the loosely typed token passed to
//! [`Registry::plugins_implementing`](crate::Registry::plugins_implementing)
//! into the descriptor of a trait. Two forms are accepted:
//!
//! - a [`TypeDescriptor`] of kind [`TypeKind::Interface`](plugrack_api::TypeKind::Interface),
//!   returned unchanged;
//! - a [`TypeRef`] pointing at a trait, unwrapped one level.
//!
//! Everything else is rejected with [`RegistryError::InvalidArgument`].

use crate::error::{RegistryError, Result};
use plugrack_api::{TypeDescriptor, TypeRef};
use std::any::Any;
use tracing::error;

/// Resolve a capability token into the descriptor of a trait
pub fn resolve_capability(token: Option<&dyn Any>) -> Result<TypeDescriptor> {
    let Some(token) = token else {
        return Err(RegistryError::invalid_argument(
            "pointer to interface type is required, got nothing",
        ));
    };

    if let Some(descriptor) = token.downcast_ref::<TypeDescriptor>() {
        if descriptor.is_interface() {
            return Ok(*descriptor);
        }

        return Err(RegistryError::invalid_argument(format!(
            "type must be an interface, got {descriptor} (kind {})",
            descriptor.kind()
        )));
    }

    if let Some(reference) = token.downcast_ref::<TypeRef>() {
        let pointee = reference.pointee();
        if pointee.is_interface() {
            return Ok(pointee);
        }

        return Err(RegistryError::invalid_argument(format!(
            "pointer to interface type is required, got reference to {pointee} (kind {})",
            pointee.kind()
        )));
    }

    Err(RegistryError::invalid_argument(format!(
        "pointer to interface type is required, got {}",
        value_kind(token)
    )))
}

/// Resolve a capability token, panicking on failure
///
/// The panic payload is the [`RegistryError`].
pub fn must_resolve_capability(token: Option<&dyn Any>) -> TypeDescriptor {
    match resolve_capability(token) {
        Ok(descriptor) => descriptor,
        Err(err) => {
            error!(error = %err, "Invalid capability token");
            std::panic::panic_any(err)
        }
    }
}

fn value_kind(token: &dyn Any) -> &'static str {
    if token.is::<&'static str>() || token.is::<String>() {
        "value (kind string)"
    } else if token.is::<bool>() {
        "value (kind bool)"
    } else if token.is::<i32>() || token.is::<i64>() || token.is::<u32>() || token.is::<u64>() {
        "value (kind integer)"
    } else {
        "value of an unsupported type"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plugrack_api::Plugin;
    use std::panic::{self, AssertUnwindSafe};

    trait Widget {}

    #[derive(Debug)]
    struct Knob;

    impl Widget for Knob {}

    #[test]
    fn test_resolve_nothing() {
        let err = resolve_capability(None).unwrap_err();
        assert!(err.is_invalid_argument());
        assert!(err.to_string().contains("got nothing"));
    }

    #[test]
    fn test_resolve_string() {
        let err = resolve_capability(Some(&"value")).unwrap_err();
        assert!(err.is_invalid_argument());
        assert!(err.to_string().contains("kind string"));

        let owned = String::from("value");
        let err = resolve_capability(Some(&owned)).unwrap_err();
        assert!(err.to_string().contains("kind string"));
    }

    #[test]
    fn test_resolve_interface_descriptor() {
        let want = TypeDescriptor::interface::<dyn Widget>();
        let got = resolve_capability(Some(&want)).unwrap();
        assert_eq!(got, want);
    }

    #[test]
    fn test_resolve_concrete_descriptor() {
        let err = resolve_capability(Some(&TypeDescriptor::concrete::<String>())).unwrap_err();
        assert!(err.is_invalid_argument());
        assert!(err.to_string().contains("type must be an interface"));
    }

    #[test]
    fn test_resolve_interface_reference() {
        let got = resolve_capability(Some(&TypeRef::interface::<dyn Widget>())).unwrap();
        assert_eq!(got, TypeDescriptor::interface::<dyn Widget>());

        let got = resolve_capability(Some(&TypeRef::interface::<dyn std::error::Error>())).unwrap();
        assert_eq!(got, TypeDescriptor::interface::<dyn std::error::Error>());
    }

    #[test]
    fn test_resolve_concrete_reference() {
        let err = resolve_capability(Some(&TypeRef::concrete::<Knob>())).unwrap_err();
        assert!(err.is_invalid_argument());
        assert!(err.to_string().contains("kind concrete"));
    }

    #[test]
    fn test_resolve_interface_constructor_with_concrete_type() {
        let err = resolve_capability(Some(&TypeDescriptor::interface::<String>())).unwrap_err();
        assert!(err.is_invalid_argument());
        assert!(err.to_string().contains("type must be an interface"));

        let err = resolve_capability(Some(&TypeRef::interface::<Knob>())).unwrap_err();
        assert!(err.is_invalid_argument());
        assert!(err.to_string().contains("kind concrete"));
    }

    #[test]
    fn test_resolve_plain_value() {
        let err = resolve_capability(Some(&Knob)).unwrap_err();
        assert!(err.is_invalid_argument());
        assert!(err.to_string().contains("unsupported type"));

        let boxed: Box<dyn Widget> = Box::new(Knob);
        let err = resolve_capability(Some(&boxed)).unwrap_err();
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn test_must_resolve_success() {
        let got = must_resolve_capability(Some(&TypeRef::interface::<dyn Plugin>()));
        assert_eq!(got, TypeDescriptor::interface::<dyn Plugin>());
    }

    #[test]
    fn test_must_resolve_panics_with_error() {
        for token in [None, Some(&Knob as &dyn Any)] {
            let payload = panic::catch_unwind(AssertUnwindSafe(|| must_resolve_capability(token)))
                .unwrap_err();
            let err = payload.downcast::<RegistryError>().unwrap();
            assert!(err.is_invalid_argument());
        }
    }
}
