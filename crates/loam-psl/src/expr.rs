use std::fmt;

/// An argument or property value.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A bare identifier: `id`, `true`, `Cascade`.
    Ident(String),

    /// A string literal, rendered with double quotes.
    Str(String),

    /// A numeric literal, kept in its textual form.
    Number(String),

    /// A function call: `now()`, `env("DATABASE_URL")`.
    Call(String, Vec<Expr>),

    Array(Vec<Expr>),

    /// A named argument: `fields: [userId]`.
    Named(String, Box<Expr>),
}

impl Expr {
    pub fn ident(name: impl Into<String>) -> Expr {
        Expr::Ident(name.into())
    }

    pub fn string(value: impl Into<String>) -> Expr {
        Expr::Str(value.into())
    }

    pub fn number(value: impl fmt::Display) -> Expr {
        Expr::Number(value.to_string())
    }

    pub fn call(name: impl Into<String>, args: Vec<Expr>) -> Expr {
        Expr::Call(name.into(), args)
    }

    pub fn named(name: impl Into<String>, value: Expr) -> Expr {
        Expr::Named(name.into(), Box::new(value))
    }

    /// An array of identifiers.
    pub fn idents<I>(names: I) -> Expr
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        Expr::Array(names.into_iter().map(Expr::ident).collect())
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Expr::Str(value) => Some(value),
            _ => None,
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Ident(name) | Expr::Number(name) => f.write_str(name),
            Expr::Str(value) => {
                f.write_str("\"")?;
                for ch in value.chars() {
                    match ch {
                        '"' => f.write_str("\\\"")?,
                        '\\' => f.write_str("\\\\")?,
                        _ => write!(f, "{ch}")?,
                    }
                }
                f.write_str("\"")
            }
            Expr::Call(name, args) => {
                write!(f, "{name}(")?;
                crate::write_list(f, args)?;
                f.write_str(")")
            }
            Expr::Array(items) => {
                f.write_str("[")?;
                crate::write_list(f, items)?;
                f.write_str("]")
            }
            Expr::Named(name, value) => write!(f, "{name}: {value}"),
        }
    }
}
