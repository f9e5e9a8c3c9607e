//! Integration tests for the version table override.
//!
//! The application names its bookkeeping table `CustomVersionInfo`; the runner's
//! built-in strategy names it `VersionInfo`. `register_early` toggles whether
//! the application registers before or after `add_migration_runner`.

use precedence_registry::migration::{
    add_migration_runner, Catalog, DefaultRegistration, Migration, MigrationError,
    MigrationRunner, RunnerOptions, VersionTableMetaData, VERSION_TABLE_META_DATA,
};
use precedence_registry::{Provider, Registry, RegistryApi};
use std::sync::Arc;

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

fn migrate(register_early: bool, mode: DefaultRegistration) -> Catalog {
    let mut registry = Registry::new();
    let options = RunnerOptions::new()
        .with_connection("Data Source=test1836.db")
        .with_default_registration(mode)
        .with_migration(ADD_LOG_TABLE);

    if register_early {
        register_custom(&mut registry);
    }
    add_migration_runner(&mut registry, options);
    if !register_early {
        register_custom(&mut registry);
    }

    let runner = MigrationRunner::from_registry(&registry).unwrap();
    let mut catalog = Catalog::new(runner.connection());
    runner.migrate_up(&mut catalog).unwrap();
    catalog
}

#[test]
fn test_custom_table_name_wins_when_registered_before_setup() {
    // Scenario C
    let mut registry = Registry::new();
    register_custom(&mut registry);
    let default_active = add_migration_runner(&mut registry, RunnerOptions::new());

    assert!(!default_active);
    let strategy = registry.resolve(&VERSION_TABLE_META_DATA).unwrap();
    assert_eq!(strategy.table_name(), "CustomVersionInfo");
}

#[test]
fn test_set_if_absent_setup_is_order_independent() {
    for register_early in [true, false] {
        let catalog = migrate(register_early, DefaultRegistration::IfAbsent);

        assert!(catalog.table_exists("CustomVersionInfo"), "register_early = {register_early}");
        assert!(!catalog.table_exists("VersionInfo"), "register_early = {register_early}");
        assert!(catalog.table_exists("Log"));
    }
}

#[test]
fn test_overwriting_setup_loses_early_registration() {
    let catalog = migrate(true, DefaultRegistration::Overwrite);
    assert!(catalog.table_exists("VersionInfo"));
    assert!(!catalog.table_exists("CustomVersionInfo"));
}

#[test]
fn test_overwriting_setup_keeps_late_registration() {
    let catalog = migrate(false, DefaultRegistration::Overwrite);
    assert!(catalog.table_exists("CustomVersionInfo"));
    assert!(!catalog.table_exists("VersionInfo"));
}

#[test]
fn test_version_row_recorded_in_custom_table() {
    let catalog = migrate(true, DefaultRegistration::IfAbsent);
    let rows = catalog.rows("CustomVersionInfo").unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0][0], "20180430121800");
    assert_eq!(rows[0][2], "AddLogTable");
    assert_eq!(
        catalog.columns("CustomVersionInfo").unwrap(),
        ["Version", "AppliedOn", "Description"]
    );
}

#[test]
fn test_strategy_tag_reports_winner() {
    let mut registry = Registry::new();
    add_migration_runner(&mut registry, RunnerOptions::new());
    assert_eq!(
        registry.provider_tag(&VERSION_TABLE_META_DATA).as_deref(),
        Some("DefaultVersionTableMetaData")
    );

    register_custom(&mut registry);
    assert_eq!(
        registry.provider_tag(&VERSION_TABLE_META_DATA).as_deref(),
        Some("CustomVersionMetaData")
    );
}
