//! Engine error types

use thiserror::Error;

/// Errors reported by preset load/save
///
/// The `Display` text is what the editor shows in its error overlay.
#[derive(Error, Debug)]
pub enum PresetError {
    /// File could not be read or written
    #[error("could not access {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// File is not a valid preset document
    #[error("could not parse preset: {0}")]
    Parse(#[from] serde_json::Error),

    /// Document parsed but holds values the engine cannot use
    #[error("invalid preset: {0}")]
    Invalid(String),
}

/// Result type for preset operations
pub type PresetResult<T> = Result<T, PresetError>;
