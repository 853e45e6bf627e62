//! Error types for Lodestone.

use thiserror::Error;

/// Errors raised while loading and parsing game data files.
///
/// Malformed individual records are skipped with a warning rather than
/// surfaced here; these variants cover failures of the loading pass itself.
#[derive(Debug, Error)]
pub enum DataError {
    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A file that must parse as a whole failed to parse
    #[error("Failed to parse {path}: {message}")]
    Parse {
        /// Path of the offending file
        path: String,
        /// Parser error message
        message: String,
    },

    /// Data root directory does not exist
    #[error("Data directory not found: {0}")]
    MissingRoot(String),
}

/// Result type alias for data loading operations.
pub type DataResult<T> = Result<T, DataError>;
