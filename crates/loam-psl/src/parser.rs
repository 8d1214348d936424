use crate::{Datasource, Generator};
use loam_core::Schema;
use std::fmt;

/// Turns schema text into schemas.
pub trait Parser: fmt::Debug {
    fn parse(&self, source: &str) -> Result<ParsedFile, ParseErrors>;
}

/// Everything found in one schema text file.
#[derive(Debug, Clone, Default)]
pub struct ParsedFile {
    /// Models in file order.
    pub schemas: Vec<Schema>,
    pub datasource: Option<Datasource>,
    pub generator: Option<Generator>,
}

/// The problems reported by a failed parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseErrors(pub Vec<String>);

impl fmt::Display for ParseErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join("; "))
    }
}

impl std::error::Error for ParseErrors {}

impl From<ParseErrors> for loam_core::Error {
    fn from(errors: ParseErrors) -> loam_core::Error {
        loam_core::Error::parse(errors.0)
    }
}
