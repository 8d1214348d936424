use crate::Expr;
use std::fmt;

/// A field attribute: `@id`, `@default(now())`, `@db.VarChar(255)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    /// Name without the leading `@`. May be dotted, e.g. `db.VarChar`.
    pub name: String,
    pub args: Vec<Expr>,
}

/// A model-level attribute: `@@id([a, b])`, `@@map("users")`.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockAttribute {
    /// Name without the leading `@@`.
    pub name: String,
    pub args: Vec<Expr>,
}

impl Attribute {
    pub fn new(name: impl Into<String>) -> Attribute {
        Attribute {
            name: name.into(),
            args: vec![],
        }
    }

    pub fn with_args(name: impl Into<String>, args: Vec<Expr>) -> Attribute {
        Attribute {
            name: name.into(),
            args,
        }
    }
}

impl BlockAttribute {
    pub fn new(name: impl Into<String>, args: Vec<Expr>) -> BlockAttribute {
        BlockAttribute {
            name: name.into(),
            args,
        }
    }
}

fn fmt_attribute(
    f: &mut fmt::Formatter<'_>,
    prefix: &str,
    name: &str,
    args: &[Expr],
) -> fmt::Result {
    write!(f, "{prefix}{name}")?;
    if !args.is_empty() {
        f.write_str("(")?;
        crate::write_list(f, args)?;
        f.write_str(")")?;
    }
    Ok(())
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_attribute(f, "@", &self.name, &self.args)
    }
}

impl fmt::Display for BlockAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_attribute(f, "@@", &self.name, &self.args)
    }
}
