use super::{Field, Index, Relation};
use crate::{err, Error, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// The in-memory model of one entity type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    /// Model name, e.g. `User`.
    pub name: String,

    /// Table backing the model. Defaults to the pluralized, snake_case model
    /// name.
    pub table_name: String,

    /// Fields in declaration order.
    pub fields: Vec<Field>,

    /// Relations keyed by relation name.
    #[serde(default)]
    pub relations: IndexMap<String, Relation>,

    #[serde(default)]
    pub indexes: Vec<Index>,

    /// Field names forming a composite primary key. Empty when the model uses
    /// a single-field primary key.
    #[serde(default)]
    pub composite_key: Vec<String>,
}

impl Schema {
    pub fn new(name: impl Into<String>) -> Schema {
        let name = name.into();
        let table_name = std_util::str::model_name_to_table_name(&name);

        Schema {
            name,
            table_name,
            fields: vec![],
            relations: IndexMap::new(),
            indexes: vec![],
            composite_key: vec![],
        }
    }

    pub fn set_table_name(&mut self, table_name: impl Into<String>) -> &mut Schema {
        self.table_name = table_name.into();
        self
    }

    pub fn add_field(&mut self, field: Field) -> &mut Schema {
        self.fields.push(field);
        self
    }

    /// Adds a relation, replacing any existing relation with the same name.
    pub fn add_relation(&mut self, name: impl Into<String>, relation: Relation) -> &mut Schema {
        self.relations.insert(name.into(), relation);
        self
    }

    pub fn add_index(&mut self, index: Index) -> &mut Schema {
        self.indexes.push(index);
        self
    }

    pub fn set_composite_key<I>(&mut self, fields: I) -> &mut Schema
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.composite_key = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    /// Returns the field named `name`.
    pub fn field(&self, name: &str) -> Result<&Field> {
        self.fields
            .iter()
            .find(|field| field.name == name)
            .ok_or_else(|| Error::not_found("field", name))
    }

    /// Returns the single-field primary key.
    ///
    /// Models keyed by a composite key have no such field.
    pub fn primary_key(&self) -> Result<&Field> {
        self.fields
            .iter()
            .find(|field| field.primary_key)
            .ok_or_else(|| Error::not_found("primary key of model", &self.name))
    }

    pub fn relation(&self, name: &str) -> Result<&Relation> {
        self.relations
            .get(name)
            .ok_or_else(|| Error::not_found("relation", name))
    }

    pub fn has_relation(&self, name: &str) -> bool {
        self.relations.contains_key(name)
    }

    pub fn field_by_column_name(&self, column_name: &str) -> Result<&Field> {
        self.fields
            .iter()
            .find(|field| field.column_name() == column_name)
            .ok_or_else(|| Error::not_found("field with column name", column_name))
    }

    pub fn field_name_for_column(&self, column_name: &str) -> Result<&str> {
        Ok(&self.field_by_column_name(column_name)?.name)
    }

    pub fn column_name_for_field(&self, field_name: &str) -> Result<Cow<'_, str>> {
        Ok(self.field(field_name)?.column_name())
    }

    /// Validates the schema, reporting the first violation found.
    pub fn validate(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(Error::invalid_schema("schema name cannot be empty"));
        }

        if self.table_name.is_empty() {
            return Err(Error::invalid_schema("table name cannot be empty"));
        }

        if self.fields.is_empty() {
            return Err(Error::invalid_schema("schema must have at least one field"));
        }

        let has_composite_key = !self.composite_key.is_empty();
        let mut has_single_key = false;

        for field in self.fields.iter().filter(|field| field.primary_key) {
            if has_single_key {
                return Err(Error::invalid_schema(
                    "schema can only have one single-field primary key",
                ));
            }

            if has_composite_key {
                return Err(Error::invalid_schema(
                    "schema cannot have both single and composite primary keys",
                ));
            }

            if field.nullable {
                return Err(Error::invalid_schema(format!(
                    "primary key field {} cannot be nullable",
                    field.name
                )));
            }

            has_single_key = true;
        }

        for name in &self.composite_key {
            if self.field(name).is_err() {
                return Err(Error::invalid_schema(format!(
                    "composite key field {name} not found"
                )));
            }
        }

        if !has_single_key && !has_composite_key {
            return Err(Error::invalid_schema(
                "schema must have a primary key (single field or composite)",
            ));
        }

        Ok(())
    }

    /// Translates field names to column names, failing on any unknown field.
    pub fn map_field_names_to_columns<S: AsRef<str>>(&self, names: &[S]) -> Result<Vec<String>> {
        names
            .iter()
            .map(|name| {
                let name = name.as_ref();
                self.column_name_for_field(name)
                    .map(Cow::into_owned)
                    .map_err(|e| e.context(err!("failed to map field {name}")))
            })
            .collect()
    }

    /// Translates column names to field names, failing on any unknown column.
    pub fn map_column_names_to_fields<S: AsRef<str>>(&self, names: &[S]) -> Result<Vec<String>> {
        names
            .iter()
            .map(|name| {
                let name = name.as_ref();
                self.field_name_for_column(name)
                    .map(str::to_string)
                    .map_err(|e| e.context(err!("failed to map column {name}")))
            })
            .collect()
    }

    /// Re-keys a field-keyed value map by column name.
    pub fn map_schema_data_to_columns<V>(
        &self,
        data: IndexMap<String, V>,
    ) -> Result<IndexMap<String, V>> {
        let mut mapped = IndexMap::with_capacity(data.len());

        for (name, value) in data {
            let column = self
                .column_name_for_field(&name)
                .map_err(|e| e.context(err!("failed to map field {name}")))?;
            mapped.insert(column.into_owned(), value);
        }

        Ok(mapped)
    }

    /// Re-keys a column-keyed value map by field name.
    ///
    /// Columns that do not belong to the schema are kept under their column
    /// name, so results of ad-hoc queries pass through untouched.
    pub fn map_column_data_to_schema<V>(&self, data: IndexMap<String, V>) -> IndexMap<String, V> {
        data.into_iter()
            .map(|(column, value)| match self.field_name_for_column(&column) {
                Ok(name) => (name.to_string(), value),
                Err(_) => (column, value),
            })
            .collect()
    }
}
