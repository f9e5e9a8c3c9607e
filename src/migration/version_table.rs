//! Naming strategy for the version bookkeeping table.

use crate::ServiceKey;

/// Describes where the runner records applied migrations.
///
/// Applications override the defaults by registering their own implementation
/// under [`VERSION_TABLE_META_DATA`] with `set`.
pub trait VersionTableMetaData: Send + Sync {
    fn schema_name(&self) -> Option<&str> {
        None
    }

    fn table_name(&self) -> &str;

    fn column_name(&self) -> &str {
        "Version"
    }

    fn applied_on_column_name(&self) -> &str {
        "AppliedOn"
    }

    fn description_column_name(&self) -> &str {
        "Description"
    }

    /// Name of the uniqueness constraint on the version column.
    fn unique_index_name(&self) -> &str {
        "UC_Version"
    }

    /// Table name prefixed with the schema, when there is one.
    fn qualified_table_name(&self) -> String {
        match self.schema_name() {
            Some(schema) if !schema.is_empty() => format!("{schema}.{}", self.table_name()),
            _ => self.table_name().to_string(),
        }
    }

    /// Column layout of the version table, in row order.
    fn columns(&self) -> [&str; 3] {
        [
            self.column_name(),
            self.applied_on_column_name(),
            self.description_column_name(),
        ]
    }
}

/// Built-in strategy: a `VersionInfo` table in the default schema.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultVersionTableMetaData;

impl DefaultVersionTableMetaData {
    pub const TABLE_NAME: &'static str = "VersionInfo";
}

impl VersionTableMetaData for DefaultVersionTableMetaData {
    fn table_name(&self) -> &str {
        Self::TABLE_NAME
    }
}

/// Registry key under which the active strategy lives.
pub const VERSION_TABLE_META_DATA: ServiceKey<dyn VersionTableMetaData> =
    ServiceKey::new("IVersionTableMetaData");
