use thiserror::Error;

use crate::RegistryError;

/// Errors raised by the migration runner and the catalog.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MigrationError {
    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error("Table already exists: {table}")]
    TableExists { table: String },

    #[error("Table does not exist: {table}")]
    TableMissing { table: String },

    #[error("Row has {actual} values but table {table} has {expected} columns")]
    ColumnCount {
        table: String,
        expected: usize,
        actual: usize,
    },

    #[error("Duplicate migration version: {version}")]
    DuplicateVersion { version: i64 },

    #[error("Version {version} recorded twice, violating {index}")]
    UniqueViolation { index: String, version: i64 },

    #[error("Unreadable version {value:?} in table {table}")]
    CorruptVersionRow { table: String, value: String },
}
