//! Typed service keys.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::sync::Arc;

use crate::RegistryError;

/// Identifies an abstraction in the registry.
///
/// A key is a non-empty static name plus the service type `S` that providers
/// registered under it must supply. `S` may be unsized, so trait objects work:
///
/// ```rust
/// use precedence_registry::ServiceKey;
///
/// pub trait Greeter: Send + Sync {
///     fn greet(&self) -> String;
/// }
///
/// pub const GREETER: ServiceKey<dyn Greeter> = ServiceKey::new("IGreeter");
/// assert_eq!(GREETER.name(), "IGreeter");
/// ```
///
/// Equality and hashing only look at the name; the registry stores one entry
/// per name.
pub struct ServiceKey<S: ?Sized> {
    name: &'static str,
    _service: PhantomData<fn() -> Arc<S>>,
}

impl<S: ?Sized> ServiceKey<S> {
    /// Creates a key.
    ///
    /// # Panics
    ///
    /// Panics when `name` is empty or only whitespace. In a `const` item this
    /// is a compile error.
    pub const fn new(name: &'static str) -> Self {
        assert!(!is_blank(name), "service key name must not be empty");
        Self {
            name,
            _service: PhantomData,
        }
    }

    /// Fallible variant of [`ServiceKey::new`].
    pub fn try_new(name: &'static str) -> Result<Self, RegistryError> {
        if is_blank(name) {
            return Err(RegistryError::InvalidArgument {
                message: "service key name must not be empty".to_string(),
            });
        }
        Ok(Self {
            name,
            _service: PhantomData,
        })
    }

    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Name of the service type, used as a fallback provider tag.
    pub fn service_type(&self) -> &'static str {
        std::any::type_name::<S>()
    }
}

const fn is_blank(name: &str) -> bool {
    let bytes = name.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if !bytes[i].is_ascii_whitespace() {
            return false;
        }
        i += 1;
    }
    true
}

impl<S: ?Sized> Clone for ServiceKey<S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S: ?Sized> Copy for ServiceKey<S> {}

impl<S: ?Sized> PartialEq for ServiceKey<S> {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl<S: ?Sized> Eq for ServiceKey<S> {}

impl<S: ?Sized> Hash for ServiceKey<S> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl<S: ?Sized> fmt::Debug for ServiceKey<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceKey")
            .field("name", &self.name)
            .field("service", &std::any::type_name::<S>())
            .finish()
    }
}

impl<S: ?Sized> fmt::Display for ServiceKey<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}
