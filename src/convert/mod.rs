//! Exporting notebook configuration to YAML or TOML files.
//!
//! # Example
//!
//! ```no_run
//! use nbconf::convert::{export, ExportFormat, ExportOptions};
//! use std::path::Path;
//!
//! fn main() -> nbconf::Result<()> {
//!     let options = ExportOptions::new().with_format(ExportFormat::Toml);
//!     let artifact = export(Path::new("pipeline.ipynb"), None, &options)?;
//!     println!("TOML file saved to: {}", artifact.path.display());
//!     Ok(())
//! }
//! ```

mod writer;

pub use writer::write_atomic;

use crate::error::{Error, Result};
use crate::locate::default_output_path;
use crate::model::ConfigTree;
use crate::parser::{ExtractOptions, ExtractionStats, NotebookReader, SectionWalker};
use crate::render::{to_toml, to_yaml, TomlOptions};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Output format of an export.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ExportFormat {
    /// Block-style YAML
    #[default]
    Yaml,

    /// TOML with one table per section
    Toml,
}

impl ExportFormat {
    /// File extension, without the leading dot.
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Yaml => "yaml",
            ExportFormat::Toml => "toml",
        }
    }

    /// Human-readable format name.
    pub fn label(&self) -> &'static str {
        match self {
            ExportFormat::Yaml => "YAML",
            ExportFormat::Toml => "TOML",
        }
    }

    /// Serialize a tree in this format.
    pub fn render(&self, tree: &ConfigTree, toml_options: &TomlOptions) -> Result<String> {
        match self {
            ExportFormat::Yaml => to_yaml(tree),
            ExportFormat::Toml => Ok(to_toml(tree, toml_options)),
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "yaml" | "yml" => Ok(ExportFormat::Yaml),
            "toml" => Ok(ExportFormat::Toml),
            _ => Err(Error::Other(format!(
                "Unknown export format '{}'. Expected: yaml, toml",
                s
            ))),
        }
    }
}

/// Options for exporting.
#[derive(Debug, Clone, Default)]
pub struct ExportOptions {
    /// Output format
    pub format: ExportFormat,

    /// Notebook walking options
    pub extract: ExtractOptions,

    /// TOML rendering options
    pub toml: TomlOptions,
}

impl ExportOptions {
    /// Create new export options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set output format.
    pub fn with_format(mut self, format: ExportFormat) -> Self {
        self.format = format;
        self
    }

    /// Set extraction options.
    pub fn with_extract_options(mut self, options: ExtractOptions) -> Self {
        self.extract = options;
        self
    }

    /// Set TOML options.
    pub fn with_toml_options(mut self, options: TomlOptions) -> Self {
        self.toml = options;
        self
    }
}

/// A written export.
#[derive(Debug, Clone)]
pub struct OutputArtifact {
    /// Where the file was written
    pub path: PathBuf,

    /// Format of the content
    pub format: ExportFormat,

    /// Serialized content, exactly as written
    pub content: String,

    /// Statistics from the notebook walk
    pub stats: ExtractionStats,
}

/// Extract configuration from `input` and write it to `output`.
///
/// Without an output path the input path is reused with the format's
/// extension. The destination is either fully written or left untouched.
pub fn export(input: &Path, output: Option<&Path>, options: &ExportOptions) -> Result<OutputArtifact> {
    let notebook = NotebookReader::open(input)?.parse()?;
    let extraction = SectionWalker::new(options.extract.clone()).walk(&notebook);
    let content = options.format.render(&extraction.tree, &options.toml)?;

    let path = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| default_output_path(input, options.format));
    write_atomic(&path, content.as_bytes())?;

    log::info!(
        "wrote {} sections, {} keys to {}",
        extraction.tree.section_count(),
        extraction.tree.key_count(),
        path.display()
    );

    Ok(OutputArtifact {
        path,
        format: options.format,
        content,
        stats: extraction.stats,
    })
}
