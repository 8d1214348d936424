use super::{DefaultValue, Field, FieldType};

/// Fluent construction of [`Field`] values.
///
/// ```
/// # use loam_core::schema::{FieldBuilder, FieldType};
/// let id = FieldBuilder::new("id").int().primary_key().auto_increment().build();
/// assert_eq!(id.ty, FieldType::INT);
/// assert!(id.primary_key && !id.nullable);
/// ```
#[derive(Debug, Clone)]
pub struct FieldBuilder {
    field: Field,
}

impl FieldBuilder {
    /// Starts a non-nullable `string` field.
    pub fn new(name: impl Into<String>) -> FieldBuilder {
        FieldBuilder {
            field: Field::new(name, FieldType::STRING),
        }
    }

    pub fn ty(mut self, ty: impl Into<FieldType>) -> FieldBuilder {
        self.field.ty = ty.into();
        self
    }

    pub fn string(self) -> FieldBuilder {
        self.ty(FieldType::STRING)
    }

    pub fn int(self) -> FieldBuilder {
        self.ty(FieldType::INT)
    }

    pub fn int64(self) -> FieldBuilder {
        self.ty(FieldType::INT64)
    }

    pub fn float(self) -> FieldBuilder {
        self.ty(FieldType::FLOAT)
    }

    pub fn bool(self) -> FieldBuilder {
        self.ty(FieldType::BOOL)
    }

    pub fn date_time(self) -> FieldBuilder {
        self.ty(FieldType::DATE_TIME)
    }

    pub fn json(self) -> FieldBuilder {
        self.ty(FieldType::JSON)
    }

    pub fn decimal(self) -> FieldBuilder {
        self.ty(FieldType::DECIMAL)
    }

    /// Turns the current type into an array of that type.
    pub fn array(mut self) -> FieldBuilder {
        self.field.ty = FieldType::Array(self.field.ty.scalar());
        self
    }

    /// Marks the field as the primary key. Primary keys are never nullable.
    pub fn primary_key(mut self) -> FieldBuilder {
        self.field.primary_key = true;
        self.field.nullable = false;
        self
    }

    pub fn auto_increment(mut self) -> FieldBuilder {
        self.field.auto_increment = true;
        self
    }

    pub fn nullable(mut self) -> FieldBuilder {
        self.field.nullable = true;
        self
    }

    pub fn unique(mut self) -> FieldBuilder {
        self.field.unique = true;
        self
    }

    pub fn index(mut self) -> FieldBuilder {
        self.field.index = true;
        self
    }

    pub fn default(mut self, value: impl Into<DefaultValue>) -> FieldBuilder {
        self.field.default = Some(value.into());
        self
    }

    /// Sets an explicit column name.
    pub fn map(mut self, column_name: impl Into<String>) -> FieldBuilder {
        self.field.map = Some(column_name.into());
        self
    }

    pub fn db_type(mut self, db_type: impl Into<String>) -> FieldBuilder {
        self.field.db_type = Some(db_type.into());
        self
    }

    pub fn db_attribute(mut self, attribute: impl Into<String>) -> FieldBuilder {
        self.field.db_attributes.push(attribute.into());
        self
    }

    pub fn build(mut self) -> Field {
        if self.field.primary_key {
            self.field.nullable = false;
        }
        self.field
    }
}
