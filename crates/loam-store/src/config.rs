use std::path::PathBuf;
use tracing::Span;

/// Configuration for [`SchemaPersistence`](crate::SchemaPersistence).
#[derive(Debug, Clone)]
pub struct PersistenceConfig {
    /// A single schema file, or a directory of schema files.
    pub schema_path: PathBuf,

    /// Extension, without the dot, of schema files in directory mode.
    pub extension: String,

    /// Parent span for the events emitted while loading and writing files.
    pub span: Span,
}

impl PersistenceConfig {
    /// Create a new config for `schema_path` with default values
    pub fn new(schema_path: impl Into<PathBuf>) -> Self {
        Self {
            schema_path: schema_path.into(),
            extension: "prisma".to_string(),
            span: Span::none(),
        }
    }

    /// Set the schema file extension
    pub fn extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    /// Set the parent span for log events
    pub fn span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }
}
