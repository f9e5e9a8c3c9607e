//! Core trait defining registry behavior.
//!
//! This module provides the `RegistryApi` trait with default implementations for
//! keyed registration, resolution, and tracing of services.
//!
//! The registry is key-based: each key name can have exactly one provider at a time.
//! `set` replaces whatever is there, `set_if_absent` only fills an empty slot.
//! Ordering therefore matters only between registrations of the same key.

use std::collections::HashMap;
use std::sync::Arc;

use crate::provider::ProviderEntry;
use crate::{Provider, RegistryError, RegistryEvent, ServiceKey};

/// Type alias for the user-supplied tracing callback.
pub type TraceCallback = dyn Fn(&RegistryEvent) + Send + Sync + 'static;

/// Storage and trace hook backing a registry.
///
/// Implementors of [`RegistryApi`] own one of these and hand it out through
/// `state` / `state_mut`.
#[derive(Default)]
pub struct RegistryState {
    entries: HashMap<&'static str, ProviderEntry>,
    trace: Option<Arc<TraceCallback>>,
}

impl RegistryState {
    pub fn new() -> Self {
        Self::default()
    }
}

impl std::fmt::Debug for RegistryState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegistryState")
            .field("entries", &self.entries)
            .field("traced", &self.trace.is_some())
            .finish()
    }
}

/// Core trait defining registry behavior.
///
/// Provides default implementations for all registry operations, requiring only
/// the two state accessors to be implemented.
///
/// Mutating operations take `&mut self`; a registry shared across threads must be
/// wrapped in a lock by its owner.
pub trait RegistryApi {
    /// Access the registry state.
    fn state(&self) -> &RegistryState;

    /// Mutable access to the registry state.
    fn state_mut(&mut self) -> &mut RegistryState;

    // -------------------------------------------------------------------------------------------------
    // Tracing
    // -------------------------------------------------------------------------------------------------

    /// Set a tracing callback for registry operations.
    ///
    /// The callback is invoked once for every registry operation, after the
    /// operation has taken effect. Replaces any previous callback.
    fn set_trace_callback(&mut self, callback: impl Fn(&RegistryEvent) + Send + Sync + 'static)
    where
        Self: Sized,
    {
        self.state_mut().trace = Some(Arc::new(callback));
    }

    /// Clear the tracing callback.
    ///
    /// Does not affect registered providers.
    fn clear_trace_callback(&mut self) {
        self.state_mut().trace = None;
    }

    /// Logs `event` and hands it to the trace callback, if any.
    fn emit_event(&self, event: &RegistryEvent) {
        tracing::debug!(target: "precedence_registry", %event, "registry event");
        if let Some(callback) = self.state().trace.as_ref() {
            callback(event);
        }
    }

    // -------------------------------------------------------------------------------------------------
    // Registration
    // -------------------------------------------------------------------------------------------------

    /// Install `provider` for `key`, replacing any existing entry.
    ///
    /// Returns the tag of the provider that was replaced, if there was one.
    /// When two parties both use `set` for the same key, the later call wins.
    fn set<S>(&mut self, key: &ServiceKey<S>, provider: Provider<S>) -> Option<String>
    where
        S: ?Sized + Send + Sync + 'static,
        Self: Sized,
    {
        let tag = provider.tag().to_string();
        let previous = self
            .state_mut()
            .entries
            .insert(key.name(), provider.into_entry())
            .map(|entry| entry.tag().to_string());

        if let Some(previous) = previous.as_deref() {
            tracing::trace!(key = key.name(), previous, replacement = %tag, "provider replaced");
        }

        self.emit_event(&RegistryEvent::Set {
            key: key.name(),
            tag,
            replaced: previous.is_some(),
        });

        previous
    }

    /// Install `provider` for `key` only when no entry exists yet.
    ///
    /// Returns `true` when the provider was installed, `false` when an existing
    /// entry was kept. This never overrides a deliberate choice made with `set`.
    fn set_if_absent<S>(&mut self, key: &ServiceKey<S>, provider: Provider<S>) -> bool
    where
        S: ?Sized + Send + Sync + 'static,
        Self: Sized,
    {
        let tag = provider.tag().to_string();
        let entries = &mut self.state_mut().entries;
        let installed = !entries.contains_key(key.name());
        if installed {
            entries.insert(key.name(), provider.into_entry());
        }

        self.emit_event(&RegistryEvent::SetIfAbsent {
            key: key.name(),
            tag,
            installed,
        });

        installed
    }

    // -------------------------------------------------------------------------------------------------
    // Resolution
    // -------------------------------------------------------------------------------------------------

    /// Resolve the instance currently provided for `key`.
    ///
    /// Lazy providers run their factory on first resolution; later calls get the
    /// cached instance.
    ///
    /// # Errors
    ///
    /// - `NotRegistered` when nothing was registered for `key`
    /// - `TypeMismatch` when the entry under that name holds another service type
    fn resolve<S>(&self, key: &ServiceKey<S>) -> Result<Arc<S>, RegistryError>
    where
        S: ?Sized + Send + Sync + 'static,
        Self: Sized,
    {
        self.resolve_tagged(key).map(|(instance, _)| instance)
    }

    /// Like [`RegistryApi::resolve`], also returning the winning provider's tag.
    fn resolve_tagged<S>(&self, key: &ServiceKey<S>) -> Result<(Arc<S>, String), RegistryError>
    where
        S: ?Sized + Send + Sync + 'static,
        Self: Sized,
    {
        let result = match self.state().entries.get(key.name()) {
            Some(entry) => entry
                .resolve(key)
                .map(|instance| (instance, entry.tag().to_string())),
            None => Err(RegistryError::NotRegistered { key: key.name() }),
        };

        self.emit_event(&RegistryEvent::Resolve {
            key: key.name(),
            found: result.is_ok(),
        });

        result
    }

    // -------------------------------------------------------------------------------------------------
    // Inspection and maintenance
    // -------------------------------------------------------------------------------------------------

    /// Check whether anything is registered for `key`.
    fn contains<S: ?Sized>(&self, key: &ServiceKey<S>) -> bool
    where
        Self: Sized,
    {
        let found = self.state().entries.contains_key(key.name());
        self.emit_event(&RegistryEvent::Contains {
            key: key.name(),
            found,
        });
        found
    }

    /// Tag of the provider currently registered for `key`.
    fn provider_tag<S: ?Sized>(&self, key: &ServiceKey<S>) -> Option<String>
    where
        Self: Sized,
    {
        self.state()
            .entries
            .get(key.name())
            .map(|entry| entry.tag().to_string())
    }

    /// Whether the provider for `key` has produced its instance.
    ///
    /// `None` when nothing is registered. Eager providers report `Some(true)`,
    /// lazy ones `Some(false)` until their first resolution.
    fn is_materialized<S: ?Sized>(&self, key: &ServiceKey<S>) -> Option<bool>
    where
        Self: Sized,
    {
        self.state()
            .entries
            .get(key.name())
            .map(|entry| entry.is_materialized())
    }

    /// Remove the entry for `key`. Returns whether there was one.
    fn remove<S: ?Sized>(&mut self, key: &ServiceKey<S>) -> bool
    where
        Self: Sized,
    {
        let found = self.state_mut().entries.remove(key.name()).is_some();
        self.emit_event(&RegistryEvent::Remove {
            key: key.name(),
            found,
        });
        found
    }

    fn len(&self) -> usize {
        self.state().entries.len()
    }

    fn is_empty(&self) -> bool {
        self.state().entries.is_empty()
    }

    /// Remove every entry.
    ///
    /// Already resolved `Arc<S>` handles stay valid. The trace callback is kept.
    fn clear(&mut self) {
        self.state_mut().entries.clear();
        self.emit_event(&RegistryEvent::Clear {});
    }
}

// -------------------------------------------------------------------------------------------------
// Tests
// -------------------------------------------------------------------------------------------------
