//! Shared fakes for the integration tests.

#[macro_use]
mod macros;

pub use introspector::MockIntrospector;

mod migrator;
pub use migrator::MockMigrator;

mod parser;
pub use parser::LineParser;

pub use std_util::*;

/// Installs a test-friendly `tracing` subscriber, honoring `RUST_LOG`.
///
/// Safe to call from every test.
pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
