mod table_info;
pub use table_info::{ColumnInfo, ForeignKeyInfo, IndexInfo, TableInfo};

use crate::schema::{DefaultValue, FieldType};

use std::fmt::Debug;

/// Database-specific knowledge used while converting between database
/// metadata and schemas.
pub trait Migrator: Debug {
    /// Maps a raw database column type (e.g. `VARCHAR(255)`) to a logical
    /// field type.
    fn map_database_type(&self, db_type: &str) -> FieldType;

    /// Normalizes a default value as stored by the database into a canonical
    /// literal for a field of type `ty`.
    fn parse_default_value(&self, value: &DefaultValue, ty: FieldType) -> DefaultValue;

    /// Returns the generator function a normalized default denotes, if any.
    ///
    /// For example, a `CURRENT_TIMESTAMP` default on a datetime field denotes
    /// `now`.
    fn default_function_name(&self, value: &DefaultValue, ty: FieldType) -> Option<String>;

    /// Returns true if the named index only backs the primary key.
    fn is_primary_key_index(&self, index_name: &str) -> bool;
}

/// Reads table metadata from a connected database.
///
/// Calls are blocking.
pub trait Introspector: Debug {
    /// Lists the tables in the database.
    fn tables(&self) -> crate::Result<Vec<String>>;

    /// Describes a single table.
    fn table_info(&self, table: &str) -> crate::Result<TableInfo>;

    /// Returns true for tables owned by the database itself or by migration
    /// bookkeeping.
    fn is_system_table(&self, table: &str) -> bool;

    fn migrator(&self) -> &dyn Migrator;
}
