use super::Error;

/// Error when a name-keyed lookup fails.
///
/// The error names both the kind of item that was looked up (field, column,
/// relation, model, ...) and the identifier that could not be resolved.
#[derive(Debug)]
pub(super) struct NotFound {
    what: &'static str,
    name: Box<str>,
}

impl std::error::Error for NotFound {}

impl core::fmt::Display for NotFound {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "{} {} not found", self.what, self.name)
    }
}

impl Error {
    /// Creates a not found error for the item `name` of kind `what`.
    ///
    /// ```
    /// # use loam_core::Error;
    /// let err = Error::not_found("field", "email");
    /// assert_eq!(err.to_string(), "field email not found");
    /// ```
    pub fn not_found(what: &'static str, name: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::NotFound(NotFound {
            what,
            name: name.into().into(),
        }))
    }

    /// Returns `true` if this error is a not found error.
    pub fn is_not_found(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::NotFound(_))
    }
}
