//! Notebook format detection and validation.

use crate::error::{Error, Result};
use std::fs;
use std::path::Path;

/// Notebook schema information.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotebookFormat {
    /// Major `nbformat` version (only 4 is supported)
    pub major: u64,
    /// Minor `nbformat` version
    pub minor: u64,
}

impl std::fmt::Display for NotebookFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "nbformat {}.{}", self.major, self.minor)
    }
}

/// The only notebook schema major version this crate reads.
pub const SUPPORTED_MAJOR: u64 = 4;

/// Detect the notebook format of a file on disk.
///
/// # Returns
/// * `Ok(NotebookFormat)` if the file is a v4 notebook
/// * `Err(Error::DocumentRead)` if the file is missing or not notebook JSON
/// * `Err(Error::UnsupportedVersion)` for any other schema version
pub fn detect_format_from_path<P: AsRef<Path>>(path: P) -> Result<NotebookFormat> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| Error::document_read(path, e))?;
    detect_format_from_str(&content).map_err(|e| match e {
        Error::DocumentRead { reason, .. } => Error::document_read(path, reason),
        other => other,
    })
}

/// Detect the notebook format from the raw JSON text.
pub fn detect_format_from_str(content: &str) -> Result<NotebookFormat> {
    let value: serde_json::Value =
        serde_json::from_str(content).map_err(|e| Error::document_read("<memory>", e))?;

    let major = value
        .get("nbformat")
        .and_then(|v| v.as_u64())
        .ok_or_else(|| Error::document_read("<memory>", "missing `nbformat` version"))?;
    let minor = value
        .get("nbformat_minor")
        .and_then(|v| v.as_u64())
        .unwrap_or(0);

    if major != SUPPORTED_MAJOR {
        return Err(Error::UnsupportedVersion { major, minor });
    }

    Ok(NotebookFormat { major, minor })
}

/// Check if a path carries the `.ipynb` extension (case-insensitive).
pub fn has_notebook_extension<P: AsRef<Path>>(path: P) -> bool {
    path.as_ref()
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("ipynb"))
}
