use crate::{Attribute, BlockAttribute};
use std::fmt;

/// A `model` block.
#[derive(Debug, Clone, PartialEq)]
pub struct Model {
    pub name: String,
    pub fields: Vec<Field>,
    pub attributes: Vec<BlockAttribute>,
}

/// One line of a model block.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: String,

    /// Type token, e.g. `String`, `DateTime` or a model name.
    pub ty: String,

    /// Rendered with a trailing `?`.
    pub optional: bool,

    /// Rendered with a trailing `[]`.
    pub list: bool,

    pub attributes: Vec<Attribute>,
}

impl Model {
    pub fn new(name: impl Into<String>) -> Model {
        Model {
            name: name.into(),
            fields: vec![],
            attributes: vec![],
        }
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|field| field.name == name)
    }
}

impl Field {
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Field {
        Field {
            name: name.into(),
            ty: ty.into(),
            optional: false,
            list: false,
            attributes: vec![],
        }
    }

    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|attr| attr.name == name)
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "model {} {{", self.name)?;
        for field in &self.fields {
            writeln!(f, "  {field}")?;
        }
        for attr in &self.attributes {
            writeln!(f, "  {attr}")?;
        }
        f.write_str("}")
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name, self.ty)?;
        if self.list {
            f.write_str("[]")?;
        }
        if self.optional {
            f.write_str("?")?;
        }
        for attr in &self.attributes {
            write!(f, " {attr}")?;
        }
        Ok(())
    }
}
