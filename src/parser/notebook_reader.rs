//! Notebook reader using the nbformat v4 schema.
//!
//! Notebooks at minor version 5 and later go through the strict v4 schema,
//! which requires cell ids. Earlier 4.x notebooks go through the legacy
//! schema, where ids are optional.

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use nbformat::{legacy, v4};
use serde_json::Value as Json;

use crate::detect::{detect_format_from_str, has_notebook_extension};
use crate::error::{Error, Result};
use crate::model::{Cell, CellKind, Notebook};

/// Reads `.ipynb` JSON into a [`Notebook`].
pub struct NotebookReader {
    content: String,
    origin: PathBuf,
}

impl NotebookReader {
    /// Open a notebook file.
    ///
    /// A missing or unreadable file is reported as [`Error::DocumentRead`].
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !has_notebook_extension(path) {
            log::warn!("{} has no .ipynb extension, reading it as a notebook anyway", path.display());
        }
        let content = fs::read_to_string(path).map_err(|e| Error::document_read(path, e))?;
        Ok(Self {
            content,
            origin: path.to_path_buf(),
        })
    }

    /// Read a notebook from a JSON string.
    pub fn from_json(content: &str) -> Self {
        Self {
            content: content.to_string(),
            origin: PathBuf::from("<memory>"),
        }
    }

    /// Read a notebook from a reader.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut content = String::new();
        reader
            .read_to_string(&mut content)
            .map_err(|e| Error::document_read("<reader>", e))?;
        Ok(Self {
            content,
            origin: PathBuf::from("<reader>"),
        })
    }

    /// Where the notebook was read from.
    pub fn origin(&self) -> &Path {
        &self.origin
    }

    /// Parse the notebook and return its cells.
    pub fn parse(&self) -> Result<Notebook> {
        let format = detect_format_from_str(&self.content).map_err(|e| self.with_origin(e))?;

        let mut value: Json = serde_json::from_str(&self.content)
            .map_err(|e| Error::document_read(&self.origin, e))?;
        normalize_sources(&mut value);

        let mut notebook = Notebook::new();
        if format.minor >= 5 {
            let parsed: v4::Notebook = serde_json::from_value(value)
                .map_err(|e| Error::document_read(&self.origin, e))?;
            for cell in &parsed.cells {
                let kind = match cell {
                    v4::Cell::Markdown { .. } => CellKind::Markdown,
                    v4::Cell::Code { .. } => CellKind::Code,
                    v4::Cell::Raw { .. } => CellKind::Raw,
                };
                notebook.add_cell(Cell::new(kind, &cell.source().join("")));
            }
        } else {
            let parsed: legacy::Notebook = serde_json::from_value(value)
                .map_err(|e| Error::document_read(&self.origin, e))?;
            for cell in &parsed.cells {
                let (kind, source) = match cell {
                    legacy::Cell::Markdown { source, .. } => (CellKind::Markdown, source),
                    legacy::Cell::Code { source, .. } => (CellKind::Code, source),
                    legacy::Cell::Raw { source, .. } => (CellKind::Raw, source),
                };
                notebook.add_cell(Cell::new(kind, &source.join("")));
            }
        }

        log::debug!(
            "read {} cells ({}) from {}",
            notebook.cell_count(),
            format,
            self.origin.display()
        );
        Ok(notebook)
    }

    fn with_origin(&self, err: Error) -> Error {
        match err {
            Error::DocumentRead { reason, .. } => Error::document_read(&self.origin, reason),
            other => other,
        }
    }
}

/// Turn single-string cell sources into the list-of-lines form.
///
/// The notebook format allows either; the schema types only accept lists.
fn normalize_sources(value: &mut Json) {
    let Some(cells) = value.get_mut("cells").and_then(Json::as_array_mut) else {
        return;
    };
    for cell in cells {
        if let Some(source) = cell.get_mut("source") {
            if let Some(text) = source.as_str() {
                let lines: Vec<Json> = text.split_inclusive('\n').map(Json::from).collect();
                *source = Json::Array(lines);
            }
        }
    }
}
