//! Conversion between schemas and schema text, and schema inference from
//! database metadata.

mod generator;
pub use generator::{Generator, AUTO_GENERATOR_PROVIDER};

mod reverse;
pub use reverse::{schema_from_table, schemas_from_tables_with_relations};
