//! In-memory table catalog the runner migrates.
//!
//! Stands in for a database connection: tables are named column lists with
//! string rows. Nothing is persisted and no SQL is executed.

use std::collections::BTreeMap;

use super::MigrationError;

#[derive(Debug, Clone, PartialEq, Eq)]
struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

/// A named set of tables.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    name: String,
    tables: BTreeMap<String, Table>,
}

impl Catalog {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tables: BTreeMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn create_table(&mut self, table: &str, columns: &[&str]) -> Result<(), MigrationError> {
        if self.tables.contains_key(table) {
            return Err(MigrationError::TableExists {
                table: table.to_string(),
            });
        }

        tracing::debug!(catalog = %self.name, table, "creating table");
        self.tables.insert(
            table.to_string(),
            Table {
                columns: columns.iter().map(|c| c.to_string()).collect(),
                rows: Vec::new(),
            },
        );
        Ok(())
    }

    pub fn drop_table(&mut self, table: &str) -> Result<(), MigrationError> {
        tracing::debug!(catalog = %self.name, table, "dropping table");
        self.tables
            .remove(table)
            .map(|_| ())
            .ok_or_else(|| missing(table))
    }

    pub fn table_exists(&self, table: &str) -> bool {
        self.tables.contains_key(table)
    }

    /// Table names in sorted order.
    pub fn table_names(&self) -> Vec<&str> {
        self.tables.keys().map(String::as_str).collect()
    }

    pub fn columns(&self, table: &str) -> Result<&[String], MigrationError> {
        self.table(table).map(|t| t.columns.as_slice())
    }

    pub fn insert_row(&mut self, table: &str, row: Vec<String>) -> Result<(), MigrationError> {
        let entry = self.tables.get_mut(table).ok_or_else(|| missing(table))?;
        if entry.columns.len() != row.len() {
            return Err(MigrationError::ColumnCount {
                table: table.to_string(),
                expected: entry.columns.len(),
                actual: row.len(),
            });
        }
        entry.rows.push(row);
        Ok(())
    }

    /// Deletes every row matching `predicate`, returning how many were removed.
    pub fn delete_rows(
        &mut self,
        table: &str,
        predicate: impl Fn(&[String]) -> bool,
    ) -> Result<usize, MigrationError> {
        let entry = self.tables.get_mut(table).ok_or_else(|| missing(table))?;
        let before = entry.rows.len();
        entry.rows.retain(|row| !predicate(row));
        Ok(before - entry.rows.len())
    }

    pub fn rows(&self, table: &str) -> Result<&[Vec<String>], MigrationError> {
        self.table(table).map(|t| t.rows.as_slice())
    }

    fn table(&self, table: &str) -> Result<&Table, MigrationError> {
        self.tables.get(table).ok_or_else(|| missing(table))
    }
}

fn missing(table: &str) -> MigrationError {
    MigrationError::TableMissing {
        table: table.to_string(),
    }
}
