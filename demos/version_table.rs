//! Version table override example.
//!
//! The application wants its migration bookkeeping in `CustomVersionInfo`
//! instead of the runner's `VersionInfo`. The outcome depends on when the
//! application registers its strategy and on how the runner installs its
//! default, so every combination is run and the resulting tables printed.
//!
//! Run with: `RUST_LOG=info cargo run --example version_table`

use precedence_registry::migration::{
    add_migration_runner, Catalog, DefaultRegistration, Migration, MigrationError,
    MigrationRunner, RunnerOptions, VersionTableMetaData, VERSION_TABLE_META_DATA,
};
use precedence_registry::{Provider, Registry, RegistryApi};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

const DATABASE: &str = "Data Source=test1836.db";

struct CustomVersionMetaData;

impl VersionTableMetaData for CustomVersionMetaData {
    fn table_name(&self) -> &str {
        "CustomVersionInfo"
    }
}

fn create_log(catalog: &mut Catalog) -> Result<(), MigrationError> {
    catalog.create_table("Log", &["Id", "Text"])
}

fn drop_log(catalog: &mut Catalog) -> Result<(), MigrationError> {
    catalog.drop_table("Log")
}

const ADD_LOG_TABLE: Migration =
    Migration::new(20180430121800, "AddLogTable", create_log, drop_log);

fn register_custom(registry: &mut Registry) {
    registry.set(
        &VERSION_TABLE_META_DATA,
        Provider::eager(
            "CustomVersionMetaData",
            Arc::new(CustomVersionMetaData) as Arc<dyn VersionTableMetaData>,
        ),
    );
}

fn run(register_early: bool, mode: DefaultRegistration) -> Result<Catalog, MigrationError> {
    let mut registry = Registry::new();
    let options = RunnerOptions::new()
        .with_connection(DATABASE)
        .with_default_registration(mode)
        .with_migration(ADD_LOG_TABLE);

    if register_early {
        register_custom(&mut registry);
    }
    add_migration_runner(&mut registry, options);
    if !register_early {
        register_custom(&mut registry);
    }

    let runner = MigrationRunner::from_registry(&registry)?;
    let mut catalog = Catalog::new(runner.connection());
    runner.migrate_up(&mut catalog)?;
    Ok(catalog)
}

fn main() -> Result<(), MigrationError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== precedence-registry: Version Table Override ===");

    for mode in [DefaultRegistration::IfAbsent, DefaultRegistration::Overwrite] {
        for register_early in [true, false] {
            let catalog = run(register_early, mode)?;
            let when = if register_early { "before" } else { "after" };

            println!("\nRunner default via {mode:?}, application registers {when} setup");
            println!("   Default VersionInfo table: {}", catalog.table_exists("VersionInfo"));
            println!(
                "   Custom VersionInfo table: {}",
                catalog.table_exists("CustomVersionInfo")
            );
        }
    }

    Ok(())
}
