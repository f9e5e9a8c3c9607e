//! Migration runner whose version bookkeeping table is named by a strategy
//! resolved from the registry.
//!
//! [`add_migration_runner`] plays the library side: it installs
//! [`DefaultVersionTableMetaData`] (table `VersionInfo`) under
//! [`VERSION_TABLE_META_DATA`]. An application that wants another table name
//! registers its own [`VersionTableMetaData`] with `set`, before or after that
//! call.
//!
//! ```rust
//! use precedence_registry::migration::{
//!     add_migration_runner, Catalog, MigrationRunner, RunnerOptions, VersionTableMetaData,
//!     VERSION_TABLE_META_DATA,
//! };
//! use precedence_registry::{Provider, Registry, RegistryApi};
//! use std::sync::Arc;
//!
//! struct CustomVersionMetaData;
//!
//! impl VersionTableMetaData for CustomVersionMetaData {
//!     fn table_name(&self) -> &str {
//!         "CustomVersionInfo"
//!     }
//! }
//!
//! let mut registry = Registry::new();
//! registry.set(
//!     &VERSION_TABLE_META_DATA,
//!     Provider::eager(
//!         "CustomVersionMetaData",
//!         Arc::new(CustomVersionMetaData) as Arc<dyn VersionTableMetaData>,
//!     ),
//! );
//! add_migration_runner(&mut registry, RunnerOptions::new());
//!
//! let runner = MigrationRunner::from_registry(&registry).unwrap();
//! let mut catalog = Catalog::new("demo");
//! runner.migrate_up(&mut catalog).unwrap();
//!
//! assert!(catalog.table_exists("CustomVersionInfo"));
//! assert!(!catalog.table_exists("VersionInfo"));
//! ```

mod catalog;
mod error;
mod runner;
mod version_table;

pub use catalog::Catalog;
pub use error::MigrationError;
pub use runner::{
    add_migration_runner, DefaultRegistration, Migration, MigrationRunner, MigrationStep,
    RunnerOptions, RUNNER_OPTIONS,
};
pub use version_table::{DefaultVersionTableMetaData, VersionTableMetaData, VERSION_TABLE_META_DATA};
