use crate::schema::DefaultValue;
use serde::{Deserialize, Serialize};

/// Metadata describing one database table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableInfo {
    pub name: String,

    /// Columns in table order.
    pub columns: Vec<ColumnInfo>,

    #[serde(default)]
    pub indexes: Vec<IndexInfo>,

    #[serde(default)]
    pub foreign_keys: Vec<ForeignKeyInfo>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnInfo {
    pub name: String,

    /// Raw database type.
    #[serde(rename = "type")]
    pub ty: String,

    #[serde(default)]
    pub nullable: bool,

    #[serde(default)]
    pub primary_key: bool,

    #[serde(default)]
    pub auto_increment: bool,

    #[serde(default)]
    pub unique: bool,

    /// Default value as stored by the database.
    #[serde(default)]
    pub default: Option<DefaultValue>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexInfo {
    pub name: String,
    pub columns: Vec<String>,

    #[serde(default)]
    pub unique: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForeignKeyInfo {
    /// Constraint name.
    #[serde(default)]
    pub name: String,

    /// Local column holding the key.
    pub column: String,

    pub referenced_table: String,
    pub referenced_column: String,

    #[serde(default)]
    pub on_delete: Option<String>,

    #[serde(default)]
    pub on_update: Option<String>,
}

impl TableInfo {
    /// Returns the primary key columns in table order.
    pub fn primary_key_columns(&self) -> impl Iterator<Item = &ColumnInfo> {
        self.columns.iter().filter(|column| column.primary_key)
    }
}
