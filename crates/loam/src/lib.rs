//! Schema reconciliation for the Loam ORM.
//!
//! Loam keeps three views of a data model in agreement: declarative schema
//! text, the in-memory [`Schema`] model, and the metadata of a live database.

mod pull;
pub use pull::{pull, PullReport};

pub use loam_codegen::{
    schema_from_table, schemas_from_tables_with_relations, Generator, AUTO_GENERATOR_PROVIDER,
};
pub use loam_core::{bail, driver, err, schema, Error, Introspector, Migrator, Result, Schema};
pub use loam_store::{PersistenceConfig, SchemaPersistence};
pub use std_util::str as naming;

/// Schema text document model and parser contract.
pub mod psl {
    pub use loam_psl::*;
}
