//! The default, explicitly constructed registry.
//!
//! There is no global instance: whoever builds a [`Registry`] owns it and passes
//! it to the code that registers or resolves services.
//!
//! # Examples
//!
//! ```
//! use precedence_registry::{Provider, Registry, RegistryApi, ServiceKey};
//!
//! const GREETING: ServiceKey<String> = ServiceKey::new("greeting");
//!
//! let mut registry = Registry::new();
//! registry.set(&GREETING, Provider::value("user", "Hello, World!".to_string()));
//!
//! // A library supplying a default politely does not override the user
//! assert!(!registry.set_if_absent(&GREETING, Provider::value("library", "hi".to_string())));
//!
//! let message = registry.resolve(&GREETING).unwrap();
//! assert_eq!(&*message, "Hello, World!");
//! ```

use crate::{RegistryApi, RegistryState};

/// Key-based service registry.
#[derive(Debug, Default)]
pub struct Registry {
    state: RegistryState,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RegistryApi for Registry {
    fn state(&self) -> &RegistryState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut RegistryState {
        &mut self.state
    }
}

// -------------------------------------------------------------------------------------------------
// Tests
// -------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Provider, RegistryError, ServiceKey};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    const NUMBER: ServiceKey<i32> = ServiceKey::new("number");
    const TEXT: ServiceKey<String> = ServiceKey::new("text");

    #[test]
    fn test_registry_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Registry>();
    }

    #[test]
    fn test_registries_are_isolated() {
        let mut first = Registry::new();
        let second = Registry::new();

        first.set(&NUMBER, Provider::value("answer", 42));

        assert!(first.contains(&NUMBER));
        assert!(!second.contains(&NUMBER));
        assert_eq!(
            second.resolve(&NUMBER).unwrap_err(),
            RegistryError::NotRegistered { key: "number" }
        );
    }

    #[test]
    fn test_overwrite_same_key() {
        let mut registry = Registry::new();
        registry.set(&NUMBER, Provider::value("ten", 10));
        registry.set(&NUMBER, Provider::value("twenty", 20));

        assert_eq!(*registry.resolve(&NUMBER).unwrap(), 20);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_unrelated_keys_do_not_interact() {
        let mut registry = Registry::new();
        registry.set(&TEXT, Provider::value("user", "mine".to_string()));
        registry.set(&NUMBER, Provider::value("library", 1));
        assert!(!registry.set_if_absent(&TEXT, Provider::value("library", "theirs".to_string())));
        assert!(!registry.set_if_absent(&NUMBER, Provider::value("other", 2)));

        assert_eq!(&*registry.resolve(&TEXT).unwrap(), "mine");
        assert_eq!(*registry.resolve(&NUMBER).unwrap(), 1);
    }

    #[test]
    fn test_lazy_replaced_before_resolution_never_runs() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();

        let mut registry = Registry::new();
        registry.set(
            &NUMBER,
            Provider::lazy("lazy", move || {
                counter.fetch_add(1, Ordering::SeqCst);
                Arc::new(1)
            }),
        );
        registry.set(&NUMBER, Provider::value("eager", 2));

        assert_eq!(*registry.resolve(&NUMBER).unwrap(), 2);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_shared_behind_mutex() {
        let registry = Arc::new(Mutex::new(Registry::new()));

        let writer = {
            let registry = registry.clone();
            std::thread::spawn(move || {
                registry
                    .lock()
                    .unwrap()
                    .set(&TEXT, Provider::value("thread", "from thread".to_string()));
            })
        };
        writer.join().unwrap();

        let text = registry.lock().unwrap().resolve(&TEXT).unwrap();
        assert_eq!(&*text, "from thread");
    }
}
