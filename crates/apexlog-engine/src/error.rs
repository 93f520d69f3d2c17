use std::fmt;

/// Result type for apexlog-engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while building a call tree
#[derive(Debug)]
pub enum Error {
    /// The log text could not be tokenized
    Parse(apexlog_parser::Error),

    /// Invalid parse options
    Config(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Parse(err) => write!(f, "Parse error: {}", err),
            Error::Config(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Parse(err) => Some(err),
            Error::Config(_) => None,
        }
    }
}

impl From<apexlog_parser::Error> for Error {
    fn from(err: apexlog_parser::Error) -> Self {
        Error::Parse(err)
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}
