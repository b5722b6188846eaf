//! Error types for booq operations.
//!
//! The addressing and rendering core is infallible: malformed paths come back
//! as `None` and out-of-range paths are clamped. These errors belong to the
//! surfaces around it (path parsing through `FromStr`, JSON I/O, the CLI).

use thiserror::Error;

/// Errors that can occur while loading documents or resolving user input.
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(String),

    #[error("Invalid path: {0:?}")]
    InvalidPath(String),

    #[error("No node at path: {0}")]
    PathNotFound(String),
}

#[cfg(feature = "serde")]
impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
