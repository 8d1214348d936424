use super::Error;

/// Error reported by the schema text parser.
///
/// The parser may report several problems at once. They are kept as a single
/// message, joined with `"; "`.
#[derive(Debug)]
pub(super) struct ParseError {
    message: Box<str>,
}

impl std::error::Error for ParseError {}

impl core::fmt::Display for ParseError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "parse error: {}", self.message)
    }
}

impl Error {
    /// Creates a parse error from the parser's messages.
    pub fn parse<I>(messages: I) -> Error
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let message = messages
            .into_iter()
            .map(|message| message.as_ref().to_string())
            .collect::<Vec<_>>()
            .join("; ");

        Error::from(super::ErrorKind::Parse(ParseError {
            message: message.into(),
        }))
    }

    /// Returns `true` if this error came from the schema text parser.
    pub fn is_parse(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::Parse(_))
    }
}
