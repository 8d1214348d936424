//! Keeps schema text files in sync with in-memory schemas.

mod config;
pub use config::PersistenceConfig;

mod persistence;
pub use persistence::SchemaPersistence;
