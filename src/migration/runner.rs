//! Runner setup and execution.

use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use super::{
    Catalog, DefaultVersionTableMetaData, MigrationError, VersionTableMetaData,
    VERSION_TABLE_META_DATA,
};
use crate::{Provider, RegistryApi, ServiceKey};

/// A schema change step applied to the catalog.
pub type MigrationStep = fn(&mut Catalog) -> Result<(), MigrationError>;

/// One migration in the explicit list handed to the runner.
#[derive(Clone, Copy)]
pub struct Migration {
    pub version: i64,
    pub description: &'static str,
    pub up: MigrationStep,
    pub down: MigrationStep,
}

impl Migration {
    pub const fn new(
        version: i64,
        description: &'static str,
        up: MigrationStep,
        down: MigrationStep,
    ) -> Self {
        Self {
            version,
            description,
            up,
            down,
        }
    }
}

impl fmt::Debug for Migration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Migration")
            .field("version", &self.version)
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

/// How [`add_migration_runner`] installs the built-in version table strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DefaultRegistration {
    /// Only when the application has not registered one. Registration order
    /// between the application and the runner setup does not matter.
    #[default]
    IfAbsent,
    /// Unconditionally. Whoever registers last wins, so an application that
    /// registers before the runner setup silently loses its override.
    Overwrite,
}

/// Runner configuration.
#[derive(Debug, Clone)]
pub struct RunnerOptions {
    connection: String,
    migrations: Vec<Migration>,
    default_registration: DefaultRegistration,
}

impl Default for RunnerOptions {
    fn default() -> Self {
        Self {
            connection: "memory".to_string(),
            migrations: Vec::new(),
            default_registration: DefaultRegistration::default(),
        }
    }
}

impl RunnerOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_connection(mut self, connection: impl Into<String>) -> Self {
        self.connection = connection.into();
        self
    }

    pub fn with_migration(mut self, migration: Migration) -> Self {
        self.migrations.push(migration);
        self
    }

    pub fn with_migrations(mut self, migrations: impl IntoIterator<Item = Migration>) -> Self {
        self.migrations.extend(migrations);
        self
    }

    pub fn with_default_registration(mut self, mode: DefaultRegistration) -> Self {
        self.default_registration = mode;
        self
    }

    pub fn connection(&self) -> &str {
        &self.connection
    }

    pub fn migrations(&self) -> &[Migration] {
        &self.migrations
    }

    pub fn default_registration(&self) -> DefaultRegistration {
        self.default_registration
    }
}

/// Registry key for the runner configuration. Owned by the runner setup.
pub const RUNNER_OPTIONS: ServiceKey<RunnerOptions> = ServiceKey::new("MigrationRunnerOptions");

/// Registers the migration runner's services.
///
/// The built-in [`DefaultVersionTableMetaData`] is installed under
/// [`VERSION_TABLE_META_DATA`] according to the options' [`DefaultRegistration`].
/// Returns `true` when the built-in strategy is the active one afterwards.
pub fn add_migration_runner<R: RegistryApi>(registry: &mut R, options: RunnerOptions) -> bool {
    let default = Provider::eager(
        "DefaultVersionTableMetaData",
        Arc::new(DefaultVersionTableMetaData) as Arc<dyn VersionTableMetaData>,
    );

    let default_active = match options.default_registration {
        DefaultRegistration::IfAbsent => registry.set_if_absent(&VERSION_TABLE_META_DATA, default),
        DefaultRegistration::Overwrite => {
            if let Some(replaced) = registry.set(&VERSION_TABLE_META_DATA, default) {
                tracing::warn!(
                    replaced = %replaced,
                    "version table strategy overwritten by runner default"
                );
            }
            true
        }
    };

    if !default_active {
        tracing::info!(
            strategy = ?registry.provider_tag(&VERSION_TABLE_META_DATA),
            "keeping application version table strategy"
        );
    }

    registry.set(&RUNNER_OPTIONS, Provider::value("RunnerOptions", options));
    default_active
}

/// Applies migrations to a [`Catalog`], recording them in the version table.
pub struct MigrationRunner {
    version_table: Arc<dyn VersionTableMetaData>,
    options: Arc<RunnerOptions>,
    migrations: Vec<Migration>,
}

impl MigrationRunner {
    /// Resolves the runner's services.
    ///
    /// # Errors
    ///
    /// - `Registry` when `add_migration_runner` was not called
    /// - `DuplicateVersion` when two migrations share a version
    pub fn from_registry<R: RegistryApi>(registry: &R) -> Result<Self, MigrationError> {
        let (version_table, strategy) = registry.resolve_tagged(&VERSION_TABLE_META_DATA)?;
        let options = registry.resolve(&RUNNER_OPTIONS)?;

        let mut migrations = options.migrations.clone();
        migrations.sort_by_key(|m| m.version);
        if let Some(pair) = migrations.windows(2).find(|w| w[0].version == w[1].version) {
            return Err(MigrationError::DuplicateVersion {
                version: pair[0].version,
            });
        }

        tracing::debug!(
            strategy = %strategy,
            table = %version_table.qualified_table_name(),
            connection = options.connection(),
            "migration runner ready"
        );

        Ok(Self {
            version_table,
            options,
            migrations,
        })
    }

    pub fn version_table(&self) -> &dyn VersionTableMetaData {
        self.version_table.as_ref()
    }

    pub fn connection(&self) -> &str {
        self.options.connection()
    }

    /// Versions recorded in the version table, ascending. Empty when the table
    /// does not exist yet.
    ///
    /// # Errors
    ///
    /// - `CorruptVersionRow` when a version cell does not parse
    /// - `UniqueViolation` when a version appears twice
    pub fn applied_versions(&self, catalog: &Catalog) -> Result<Vec<i64>, MigrationError> {
        let table = self.version_table.qualified_table_name();
        if !catalog.table_exists(&table) {
            return Ok(Vec::new());
        }

        let mut versions = catalog
            .rows(&table)?
            .iter()
            .map(|row| parse_version(&table, row))
            .collect::<Result<Vec<_>, _>>()?;
        versions.sort_unstable();

        if let Some(pair) = versions.windows(2).find(|w| w[0] == w[1]) {
            return Err(MigrationError::UniqueViolation {
                index: self.version_table.unique_index_name().to_string(),
                version: pair[0],
            });
        }
        Ok(versions)
    }

    /// Creates the version table if needed and applies pending migrations in
    /// ascending version order. Returns the versions applied by this call.
    pub fn migrate_up(&self, catalog: &mut Catalog) -> Result<Vec<i64>, MigrationError> {
        let table = self.version_table.qualified_table_name();
        if !catalog.table_exists(&table) {
            tracing::info!(table = %table, "creating version table");
            catalog.create_table(&table, &self.version_table.columns())?;
        }

        let applied: BTreeSet<i64> = self.applied_versions(catalog)?.into_iter().collect();
        let mut newly_applied = Vec::new();

        for migration in self.migrations.iter().filter(|m| !applied.contains(&m.version)) {
            tracing::info!(
                version = migration.version,
                description = migration.description,
                "migrating up"
            );
            (migration.up)(catalog)?;
            catalog.insert_row(
                &table,
                vec![
                    migration.version.to_string(),
                    applied_on(),
                    migration.description.to_string(),
                ],
            )?;
            newly_applied.push(migration.version);
        }

        Ok(newly_applied)
    }

    /// Reverts every applied migration known to this runner, newest first.
    /// Returns the versions reverted.
    pub fn migrate_down(&self, catalog: &mut Catalog) -> Result<Vec<i64>, MigrationError> {
        let table = self.version_table.qualified_table_name();
        let applied: BTreeSet<i64> = self.applied_versions(catalog)?.into_iter().collect();
        let mut reverted = Vec::new();

        for migration in self
            .migrations
            .iter()
            .rev()
            .filter(|m| applied.contains(&m.version))
        {
            tracing::info!(
                version = migration.version,
                description = migration.description,
                "migrating down"
            );
            (migration.down)(catalog)?;
            let version = migration.version.to_string();
            catalog.delete_rows(&table, |row| row.first() == Some(&version))?;
            reverted.push(migration.version);
        }

        let known: BTreeSet<i64> = self.migrations.iter().map(|m| m.version).collect();
        for unknown in applied.difference(&known) {
            tracing::warn!(version = unknown, "applied version has no migration, left in place");
        }

        Ok(reverted)
    }
}

impl fmt::Debug for MigrationRunner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MigrationRunner")
            .field("version_table", &self.version_table.qualified_table_name())
            .field("connection", &self.options.connection())
            .field("migrations", &self.migrations)
            .finish()
    }
}

fn parse_version(table: &str, row: &[String]) -> Result<i64, MigrationError> {
    let value = row.first().map(String::as_str).unwrap_or_default();
    value.parse().map_err(|_| MigrationError::CorruptVersionRow {
        table: table.to_string(),
        value: value.to_string(),
    })
}

fn applied_on() -> String {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs().to_string())
        .unwrap_or_default()
}
