use crate::{err, Error};
use serde::{Deserialize, Serialize};
use std::{borrow::Cow, fmt, str::FromStr};

/// A scalar or array-typed attribute of a [`Schema`](super::Schema).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    /// Field name, unique within the containing schema.
    pub name: String,

    /// Logical type.
    pub ty: FieldType,

    /// True if the field is the single-field primary key.
    #[serde(default)]
    pub primary_key: bool,

    /// True if the database generates the value on insert.
    #[serde(default)]
    pub auto_increment: bool,

    /// True if the field may hold null. Never set on a primary key.
    #[serde(default)]
    pub nullable: bool,

    #[serde(default)]
    pub unique: bool,

    /// True if the field is individually indexed.
    #[serde(default)]
    pub index: bool,

    /// Default value, as stored by the database.
    #[serde(default)]
    pub default: Option<DefaultValue>,

    /// Raw database type annotation, such as `@db.VarChar(255)`.
    #[serde(default)]
    pub db_type: Option<String>,

    /// Additional raw database attributes rendered after `db_type`.
    #[serde(default)]
    pub db_attributes: Vec<String>,

    /// Explicit column name, overriding the naming convention.
    #[serde(default)]
    pub map: Option<String>,
}

/// The logical type of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum FieldType {
    Scalar(ScalarType),
    Array(ScalarType),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarType {
    String,
    Int,
    Int64,
    Float,
    Bool,
    DateTime,
    Json,
    Decimal,
}

/// A column default value.
///
/// Raw defaults read from a database arrive as literals. A database-specific
/// migrator may later recognize a literal as a generator function (for
/// example `CURRENT_TIMESTAMP`), which is represented by [`Function`].
///
/// [`Function`]: DefaultValue::Function
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DefaultValue {
    String(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Null,
    /// Name of a generator function, rendered as a call: `now()`.
    Function(String),
}

impl Field {
    pub fn new(name: impl Into<String>, ty: FieldType) -> Field {
        Field {
            name: name.into(),
            ty,
            primary_key: false,
            auto_increment: false,
            nullable: false,
            unique: false,
            index: false,
            default: None,
            db_type: None,
            db_attributes: vec![],
            map: None,
        }
    }

    /// Returns the database column backing this field.
    ///
    /// This is the `map` override when set, otherwise the snake_case form of
    /// the field name.
    pub fn column_name(&self) -> Cow<'_, str> {
        match &self.map {
            Some(map) => Cow::Borrowed(map),
            None => Cow::Owned(std_util::str::snake_case(&self.name)),
        }
    }
}

impl FieldType {
    pub const STRING: FieldType = FieldType::Scalar(ScalarType::String);
    pub const INT: FieldType = FieldType::Scalar(ScalarType::Int);
    pub const INT64: FieldType = FieldType::Scalar(ScalarType::Int64);
    pub const FLOAT: FieldType = FieldType::Scalar(ScalarType::Float);
    pub const BOOL: FieldType = FieldType::Scalar(ScalarType::Bool);
    pub const DATE_TIME: FieldType = FieldType::Scalar(ScalarType::DateTime);
    pub const JSON: FieldType = FieldType::Scalar(ScalarType::Json);
    pub const DECIMAL: FieldType = FieldType::Scalar(ScalarType::Decimal);

    pub fn is_array(self) -> bool {
        matches!(self, FieldType::Array(_))
    }

    /// Returns the element type for arrays, or the type itself for scalars.
    pub fn scalar(self) -> ScalarType {
        match self {
            FieldType::Scalar(ty) | FieldType::Array(ty) => ty,
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldType::Scalar(ty) => fmt::Display::fmt(ty, f),
            FieldType::Array(ty) => write!(f, "{ty}[]"),
        }
    }
}

impl FromStr for FieldType {
    type Err = Error;

    fn from_str(s: &str) -> Result<FieldType, Error> {
        match s.strip_suffix("[]") {
            Some(element) => Ok(FieldType::Array(element.parse()?)),
            None => Ok(FieldType::Scalar(s.parse()?)),
        }
    }
}

impl From<FieldType> for String {
    fn from(ty: FieldType) -> String {
        ty.to_string()
    }
}

impl TryFrom<String> for FieldType {
    type Error = Error;

    fn try_from(s: String) -> Result<FieldType, Error> {
        s.parse()
    }
}

impl From<ScalarType> for FieldType {
    fn from(ty: ScalarType) -> FieldType {
        FieldType::Scalar(ty)
    }
}

impl ScalarType {
    pub fn as_str(self) -> &'static str {
        match self {
            ScalarType::String => "string",
            ScalarType::Int => "int",
            ScalarType::Int64 => "int64",
            ScalarType::Float => "float",
            ScalarType::Bool => "bool",
            ScalarType::DateTime => "datetime",
            ScalarType::Json => "json",
            ScalarType::Decimal => "decimal",
        }
    }
}

impl fmt::Display for ScalarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScalarType {
    type Err = Error;

    fn from_str(s: &str) -> Result<ScalarType, Error> {
        Ok(match s {
            "string" => ScalarType::String,
            "int" => ScalarType::Int,
            "int64" => ScalarType::Int64,
            "float" => ScalarType::Float,
            "bool" => ScalarType::Bool,
            "datetime" => ScalarType::DateTime,
            "json" => ScalarType::Json,
            "decimal" => ScalarType::Decimal,
            _ => return Err(err!("unknown field type `{s}`")),
        })
    }
}

impl From<&str> for DefaultValue {
    fn from(value: &str) -> DefaultValue {
        DefaultValue::String(value.to_string())
    }
}

impl From<String> for DefaultValue {
    fn from(value: String) -> DefaultValue {
        DefaultValue::String(value)
    }
}

impl From<i64> for DefaultValue {
    fn from(value: i64) -> DefaultValue {
        DefaultValue::Int(value)
    }
}

impl From<i32> for DefaultValue {
    fn from(value: i32) -> DefaultValue {
        DefaultValue::Int(value.into())
    }
}

impl From<f64> for DefaultValue {
    fn from(value: f64) -> DefaultValue {
        DefaultValue::Float(value)
    }
}

impl From<bool> for DefaultValue {
    fn from(value: bool) -> DefaultValue {
        DefaultValue::Bool(value)
    }
}
