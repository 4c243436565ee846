//! Error types for cachepack.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    // Path resolution errors
    #[error("Invalid glob pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    #[error("Glob traversal failed at {path}: {message}")]
    GlobTraversal { path: String, message: String },

    // Guard errors
    #[error("Expected {0} but value was undefined")]
    Undefined(String),

    // Infrastructure errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

/// Convert an optional value into a required one.
///
/// Call sites use this where absence is a programming error rather than a
/// recoverable condition.
pub fn assert_defined<T>(name: &str, value: Option<T>) -> Result<T> {
    value.ok_or_else(|| Error::Undefined(name.to_string()))
}
