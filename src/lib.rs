//! # Precedence Registry
//!
//! An explicitly constructed service registry whose contract is registration
//! precedence: an unconditional [`RegistryApi::set`] always wins over a
//! conditional [`RegistryApi::set_if_absent`], whatever the call order.
//!
//! ## Quick Start
//!
//! ```rust
//! use precedence_registry::{Provider, Registry, RegistryApi, ServiceKey};
//! use std::sync::Arc;
//!
//! pub trait Foo: Send + Sync {
//!     fn name(&self) -> &'static str;
//! }
//!
//! struct UserImpl;
//! struct DefaultImpl;
//!
//! impl Foo for UserImpl {
//!     fn name(&self) -> &'static str { "user" }
//! }
//!
//! impl Foo for DefaultImpl {
//!     fn name(&self) -> &'static str { "default" }
//! }
//!
//! const FOO: ServiceKey<dyn Foo> = ServiceKey::new("IFoo");
//!
//! let mut registry = Registry::new();
//!
//! // The application makes a deliberate choice...
//! registry.set(&FOO, Provider::eager("UserImpl", Arc::new(UserImpl) as Arc<dyn Foo>));
//!
//! // ...and a library only fills the slot when it is empty.
//! let installed = registry.set_if_absent(
//!     &FOO,
//!     Provider::eager("DefaultImpl", Arc::new(DefaultImpl) as Arc<dyn Foo>),
//! );
//! assert!(!installed);
//!
//! assert_eq!(registry.resolve(&FOO).unwrap().name(), "user");
//! ```
//!
//! ## Features
//!
//! - **Explicit**: no global state, every registry is a value you own
//! - **Typed keys**: [`ServiceKey<S>`] ties a name to the service type, trait objects included
//! - **Lazy providers**: factories run once on first resolution
//! - **Tracing support**: per-registry callback plus `tracing` debug events
//!
//! ## Main Items
//!
//! - [`Registry`] / [`RegistryApi`] - the registry and its operations
//! - [`Provider`] - eager or lazy supplier with a human-readable tag
//! - [`migration`] - a migration runner whose version table naming is resolved from the registry

pub mod migration;
mod provider;
mod registry;
mod registry_error;
mod registry_event;
mod registry_trait;
mod service_key;

pub use provider::Provider;
pub use registry::Registry;
pub use registry_error::RegistryError;
pub use registry_event::RegistryEvent;
pub use registry_trait::{RegistryApi, RegistryState, TraceCallback};
pub use service_key::ServiceKey;
