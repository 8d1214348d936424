//! Structured representation of Prisma-compatible schema text.
//!
//! This crate holds the document model produced by the forward generator and
//! consumed from the schema parser, together with its text rendering. The
//! parser itself is supplied by the caller through the [`Parser`] trait.

mod attribute;
pub use attribute::{Attribute, BlockAttribute};

mod block;
pub use block::{Datasource, Generator, Property};

mod expr;
pub use expr::Expr;

mod file;
pub use file::SchemaFile;

mod model;
pub use model::{Field, Model};

mod parser;
pub use parser::{ParseErrors, ParsedFile, Parser};

/// Writes `items` separated by `", "`.
fn write_list<T: std::fmt::Display>(
    f: &mut std::fmt::Formatter<'_>,
    items: &[T],
) -> std::fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}
