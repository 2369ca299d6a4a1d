//! Error types for configuration loading.

use std::path::PathBuf;

/// Result type alias for configuration operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading tile configuration.
///
/// Resolution itself never fails; only turning host input into
/// [`FormatSettings`](crate::FormatSettings) can.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Malformed JSON.
    #[error("Invalid configuration JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// File I/O error.
    #[error("Failed to read configuration '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A known property held a value of the wrong shape.
    #[error("Invalid value for '{object}.{key}': {message}")]
    InvalidValue {
        object: String,
        key: String,
        message: String,
    },
}

impl Error {
    /// Create an I/O error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a value error.
    pub fn invalid_value(
        object: impl Into<String>,
        key: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::InvalidValue {
            object: object.into(),
            key: key.into(),
            message: message.into(),
        }
    }
}
