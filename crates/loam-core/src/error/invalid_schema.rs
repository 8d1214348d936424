use super::Error;

/// Error when a schema definition is invalid.
///
/// This occurs when:
/// - The model or table name is empty
/// - The model has no fields
/// - The model does not have exactly one primary key mechanism
/// - A composite key names a field the model does not have
///
/// Schemas are validated on demand, so these errors surface from
/// [`Schema::validate`](crate::Schema::validate) rather than from mutation.
#[derive(Debug)]
pub(super) struct InvalidSchema {
    message: Box<str>,
}

impl std::error::Error for InvalidSchema {}

impl core::fmt::Display for InvalidSchema {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "invalid schema: {}", self.message)
    }
}

impl Error {
    /// Creates an invalid schema error.
    pub fn invalid_schema(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::InvalidSchema(InvalidSchema {
            message: message.into().into(),
        }))
    }

    /// Returns `true` if this error is an invalid schema error.
    pub fn is_invalid_schema(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::InvalidSchema(_))
    }
}
