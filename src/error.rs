//! Error types for nbconf library.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for nbconf operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while extracting notebook configuration.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when writing the output artifact.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Neither an explicit path nor the host environment identified the notebook.
    #[error(
        "Could not determine the notebook path automatically. \
         Please provide the input path (nb_path, --input) and output path \
         (output_path, --output) explicitly."
    )]
    PathNotDeterminable,

    /// The notebook file is missing, unreadable, or malformed.
    #[error("Failed to read notebook {}: {reason}", path.display())]
    DocumentRead {
        /// Path of the notebook that failed to load
        path: PathBuf,
        /// What went wrong
        reason: String,
    },

    /// The notebook schema version is not supported.
    #[error("Unsupported notebook format: {major}.{minor} (expected 4.x)")]
    UnsupportedVersion {
        /// Major `nbformat` version
        major: u64,
        /// Minor `nbformat` version
        minor: u64,
    },

    /// Error during YAML serialization.
    #[error("Rendering error: {0}")]
    Render(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Build a [`Error::DocumentRead`] for the given path.
    pub fn document_read(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Error::DocumentRead {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}
