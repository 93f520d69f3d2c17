use std::fmt;

/// Result type for apexlog-parser operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while tokenizing a log
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// An event line whose leading field has no `(<nanoseconds>)` part.
    /// Treated as an input format violation: the whole parse fails.
    MalformedTimestamp { line_number: usize, text: String },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::MalformedTimestamp { line_number, text } => {
                write!(
                    f,
                    "Malformed timestamp on line {}: '{}'",
                    line_number, text
                )
            }
        }
    }
}

impl std::error::Error for Error {}
