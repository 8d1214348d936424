use crate::{Datasource, Generator, Model};
use std::fmt;

/// The content of one schema text file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SchemaFile {
    pub datasource: Option<Datasource>,
    pub generator: Option<Generator>,
    pub models: Vec<Model>,
}

impl fmt::Display for SchemaFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(datasource) = &self.datasource {
            write!(f, "{datasource}\n\n")?;
        }

        if let Some(generator) = &self.generator {
            write!(f, "{generator}\n\n")?;
        }

        for (i, model) in self.models.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            writeln!(f, "{model}")?;
        }

        Ok(())
    }
}
