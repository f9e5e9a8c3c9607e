//! Providers and the type-erased entries the registry stores.

use std::any::Any;
use std::fmt;
use std::sync::{Arc, OnceLock};

use crate::{RegistryError, ServiceKey};

type ErasedInstance = Box<dyn Any + Send + Sync>;
type ErasedFactory = Box<dyn Fn() -> ErasedInstance + Send + Sync>;

/// Supplies the instance for a [`ServiceKey`].
///
/// A provider is either *eager* (an already built `Arc<S>`) or *lazy* (a factory
/// run on first resolution and memoized for the lifetime of the registry entry).
/// Every provider carries a human-readable tag so callers can report which
/// implementation won without inspecting types at runtime.
pub struct Provider<S: ?Sized + Send + Sync + 'static> {
    tag: String,
    source: Source<S>,
}

enum Source<S: ?Sized> {
    Eager(Arc<S>),
    Lazy(Box<dyn Fn() -> Arc<S> + Send + Sync>),
}

impl<S: ?Sized + Send + Sync + 'static> Provider<S> {
    /// Wraps an existing instance.
    ///
    /// An empty tag is replaced by the service type name.
    pub fn eager(tag: impl Into<String>, instance: Arc<S>) -> Self {
        Self {
            tag: normalize_tag::<S>(tag.into()),
            source: Source::Eager(instance),
        }
    }

    /// Defers construction to `factory`, which runs at most once per registry entry.
    pub fn lazy(
        tag: impl Into<String>,
        factory: impl Fn() -> Arc<S> + Send + Sync + 'static,
    ) -> Self {
        Self {
            tag: normalize_tag::<S>(tag.into()),
            source: Source::Lazy(Box::new(factory)),
        }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn is_lazy(&self) -> bool {
        matches!(self.source, Source::Lazy(_))
    }

    pub(crate) fn into_entry(self) -> ProviderEntry {
        let source = match self.source {
            Source::Eager(instance) => ErasedSource::Eager(Box::new(instance)),
            Source::Lazy(factory) => ErasedSource::Lazy {
                factory: Box::new(move || Box::new(factory()) as ErasedInstance),
                instance: OnceLock::new(),
            },
        };

        ProviderEntry {
            tag: self.tag,
            service_type: std::any::type_name::<S>(),
            source,
        }
    }
}

impl<S: Send + Sync + 'static> Provider<S> {
    /// Convenience for sized services: wraps `value` in an `Arc`.
    pub fn value(tag: impl Into<String>, value: S) -> Self {
        Self::eager(tag, Arc::new(value))
    }
}

impl<S: ?Sized + Send + Sync + 'static> fmt::Debug for Provider<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Provider")
            .field("tag", &self.tag)
            .field("lazy", &self.is_lazy())
            .finish()
    }
}

fn normalize_tag<S: ?Sized>(tag: String) -> String {
    if tag.trim().is_empty() {
        std::any::type_name::<S>().to_string()
    } else {
        tag
    }
}

/// A registered provider with its service type erased.
///
/// Each `Provider<S>` erases to an entry holding an `Arc<S>` behind `dyn Any`.
/// Lazy entries keep their factory and a `OnceLock` that memoizes the first
/// result.
pub(crate) struct ProviderEntry {
    tag: String,
    service_type: &'static str,
    source: ErasedSource,
}

enum ErasedSource {
    Eager(ErasedInstance),
    Lazy {
        factory: ErasedFactory,
        instance: OnceLock<ErasedInstance>,
    },
}

impl ProviderEntry {
    pub(crate) fn tag(&self) -> &str {
        &self.tag
    }

    /// Whether a lazy entry has already produced its instance. Eager entries
    /// always report `true`.
    pub(crate) fn is_materialized(&self) -> bool {
        match &self.source {
            ErasedSource::Eager(_) => true,
            ErasedSource::Lazy { instance, .. } => instance.get().is_some(),
        }
    }

    pub(crate) fn resolve<S: ?Sized + Send + Sync + 'static>(
        &self,
        key: &ServiceKey<S>,
    ) -> Result<Arc<S>, RegistryError> {
        let erased: &(dyn Any + Send + Sync) = match &self.source {
            ErasedSource::Eager(instance) => &**instance,
            ErasedSource::Lazy { factory, instance } => &**instance.get_or_init(|| factory()),
        };

        erased
            .downcast_ref::<Arc<S>>()
            .cloned()
            .ok_or(RegistryError::TypeMismatch {
                key: key.name(),
                expected: std::any::type_name::<S>(),
            })
    }
}

impl fmt::Debug for ProviderEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderEntry")
            .field("tag", &self.tag)
            .field("service_type", &self.service_type)
            .field("materialized", &self.is_materialized())
            .finish()
    }
}
