use crate::Expr;
use std::fmt;

/// A `datasource` block.
#[derive(Debug, Clone, PartialEq)]
pub struct Datasource {
    pub name: String,
    pub properties: Vec<Property>,
}

/// A `generator` block.
#[derive(Debug, Clone, PartialEq)]
pub struct Generator {
    pub name: String,
    pub properties: Vec<Property>,
}

/// A `name = value` line inside a datasource or generator block.
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    pub name: String,
    pub value: Expr,
}

impl Datasource {
    pub fn new(name: impl Into<String>) -> Datasource {
        Datasource {
            name: name.into(),
            properties: vec![],
        }
    }

    pub fn property(mut self, name: impl Into<String>, value: Expr) -> Datasource {
        self.properties.push(Property::new(name, value));
        self
    }

    pub fn get(&self, name: &str) -> Option<&Expr> {
        find(&self.properties, name)
    }
}

impl Generator {
    pub fn new(name: impl Into<String>) -> Generator {
        Generator {
            name: name.into(),
            properties: vec![],
        }
    }

    pub fn property(mut self, name: impl Into<String>, value: Expr) -> Generator {
        self.properties.push(Property::new(name, value));
        self
    }

    pub fn get(&self, name: &str) -> Option<&Expr> {
        find(&self.properties, name)
    }

    /// Returns the `provider` property when it is a string literal.
    pub fn provider(&self) -> Option<&str> {
        self.get("provider").and_then(Expr::as_str)
    }
}

impl Property {
    pub fn new(name: impl Into<String>, value: Expr) -> Property {
        Property {
            name: name.into(),
            value,
        }
    }
}

fn find<'a>(properties: &'a [Property], name: &str) -> Option<&'a Expr> {
    properties
        .iter()
        .find(|property| property.name == name)
        .map(|property| &property.value)
}

fn fmt_block(
    f: &mut fmt::Formatter<'_>,
    keyword: &str,
    name: &str,
    properties: &[Property],
) -> fmt::Result {
    writeln!(f, "{keyword} {name} {{")?;
    for property in properties {
        writeln!(f, "  {property}")?;
    }
    f.write_str("}")
}

impl fmt::Display for Datasource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_block(f, "datasource", &self.name, &self.properties)
    }
}

impl fmt::Display for Generator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_block(f, "generator", &self.name, &self.properties)
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.name, self.value)
    }
}
