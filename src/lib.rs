//! # nbconf
//!
//! Extract configuration from Jupyter notebooks and write it as YAML or TOML.
//!
//! Level-2 markdown headings (`## Name`) name configuration sections. Every
//! top-level `key = value` assignment in the code cells that follow a heading
//! becomes an entry of that section, with its value recovered as a typed
//! literal (string, number, boolean, `None`, list, tuple).
//!
//! ## Quick Start
//!
//! ```no_run
//! use nbconf::{extract_file, render};
//!
//! fn main() -> nbconf::Result<()> {
//!     let tree = extract_file("pipeline.ipynb")?;
//!     let yaml = render::to_yaml(&tree)?;
//!     println!("{}", yaml);
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Two output formats**: block-style YAML and hand-laid-out TOML
//! - **Order preserving**: sections and keys keep notebook order
//! - **Lenient values**: anything that is not a literal is kept as text
//! - **Notebook discovery**: kernel path and `%notebook` history lookup

pub mod convert;
pub mod detect;
pub mod error;
pub mod locate;
pub mod model;
pub mod parser;
pub mod render;

// Re-export commonly used types
pub use convert::{export, ExportFormat, ExportOptions, OutputArtifact};
pub use detect::{
    detect_format_from_path, detect_format_from_str, has_notebook_extension, NotebookFormat,
};
pub use error::{Error, Result};
pub use locate::{
    default_output_path, locate_notebook, HostEnvironment, LocateOptions, ProcessEnvironment,
};
pub use model::{Cell, CellKind, ConfigTree, Notebook, Section, Value};
pub use parser::{ExtractOptions, Extraction, ExtractionStats, NotebookReader, SectionWalker};
pub use render::{TomlOptions, DEFAULT_SPLIT_HEADER_KEY};

use std::io::Read;
use std::path::{Path, PathBuf};

/// Parse a notebook file into its cells.
///
/// # Example
///
/// ```no_run
/// use nbconf::parse_file;
///
/// let notebook = parse_file("pipeline.ipynb").unwrap();
/// println!("Cells: {}", notebook.cell_count());
/// ```
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Notebook> {
    NotebookReader::open(path)?.parse()
}

/// Parse a notebook from its JSON text.
pub fn parse_str(content: &str) -> Result<Notebook> {
    NotebookReader::from_json(content).parse()
}

/// Parse a notebook from a reader.
pub fn parse_reader<R: Read>(reader: R) -> Result<Notebook> {
    NotebookReader::from_reader(reader)?.parse()
}

/// Walk a parsed notebook with default options.
pub fn extract_config(notebook: &Notebook) -> ConfigTree {
    SectionWalker::default().walk(notebook).tree
}

/// Extract the configuration tree of a notebook file.
///
/// # Example
///
/// ```no_run
/// use nbconf::extract_file;
///
/// let tree = extract_file("pipeline.ipynb").unwrap();
/// for (section, entries) in tree.sections() {
///     println!("{}: {} keys", section, entries.len());
/// }
/// ```
pub fn extract_file<P: AsRef<Path>>(path: P) -> Result<ConfigTree> {
    Ok(extract_config(&parse_file(path)?))
}

/// Export the notebook's configuration to a YAML file.
///
/// Without `nb_path` the notebook is located through the host environment;
/// without `output_path` the notebook path is reused with a `.yaml` extension.
/// Prints `YAML file saved to: <path>` on success.
pub fn export_yaml(nb_path: Option<&Path>, output_path: Option<&Path>) -> Result<OutputArtifact> {
    export_announced(nb_path, output_path, ExportFormat::Yaml)
}

/// Export the notebook's configuration to a TOML file.
///
/// Without `nb_path` the notebook is located through the host environment;
/// without `output_path` the notebook path is reused with a `.toml` extension.
/// Prints `TOML file saved to: <path>` on success.
pub fn export_toml(nb_path: Option<&Path>, output_path: Option<&Path>) -> Result<OutputArtifact> {
    export_announced(nb_path, output_path, ExportFormat::Toml)
}

fn export_announced(
    nb_path: Option<&Path>,
    output_path: Option<&Path>,
    format: ExportFormat,
) -> Result<OutputArtifact> {
    let artifact = Nbconf::new().export(nb_path, output_path, format)?;
    println!("{} file saved to: {}", format.label(), artifact.path.display());
    Ok(artifact)
}

/// Builder for locating, extracting, and exporting notebook configuration.
///
/// # Example
///
/// ```no_run
/// use nbconf::{ExportFormat, Nbconf};
/// use std::path::Path;
///
/// let artifact = Nbconf::new()
///     .with_split_header_key("split_on")
///     .export(Some(Path::new("pipeline.ipynb")), None, ExportFormat::Toml)?;
/// println!("{}", artifact.path.display());
/// # Ok::<(), nbconf::Error>(())
/// ```
pub struct Nbconf {
    extract_options: ExtractOptions,
    toml_options: TomlOptions,
    locate_options: LocateOptions,
    host: Box<dyn HostEnvironment>,
}

impl Nbconf {
    /// Create a new builder that reads the process environment.
    pub fn new() -> Self {
        Self {
            extract_options: ExtractOptions::default(),
            toml_options: TomlOptions::default(),
            locate_options: LocateOptions::default(),
            host: Box::new(ProcessEnvironment::new()),
        }
    }

    /// Set extraction options.
    pub fn with_extract_options(mut self, options: ExtractOptions) -> Self {
        self.extract_options = options;
        self
    }

    /// Set the reserved TOML header-splitting key.
    pub fn with_split_header_key(mut self, key: impl Into<String>) -> Self {
        self.toml_options = self.toml_options.with_split_header_key(key);
        self
    }

    /// Set TOML options.
    pub fn with_toml_options(mut self, options: TomlOptions) -> Self {
        self.toml_options = options;
        self
    }

    /// Set locate options.
    pub fn with_locate_options(mut self, options: LocateOptions) -> Self {
        self.locate_options = options;
        self
    }

    /// Use a different host environment for notebook discovery.
    pub fn with_host(mut self, host: impl HostEnvironment + 'static) -> Self {
        self.host = Box::new(host);
        self
    }

    /// Resolve the notebook path.
    pub fn locate(&self, nb_path: Option<&Path>) -> Result<PathBuf> {
        locate_notebook(nb_path, self.host.as_ref(), &self.locate_options)
    }

    /// Locate and walk the notebook.
    pub fn extract(&self, nb_path: Option<&Path>) -> Result<Extraction> {
        let path = self.locate(nb_path)?;
        let notebook = parse_file(&path)?;
        Ok(SectionWalker::new(self.extract_options.clone()).walk(&notebook))
    }

    /// Locate the notebook and render its configuration without writing.
    pub fn render(&self, nb_path: Option<&Path>, format: ExportFormat) -> Result<String> {
        let extraction = self.extract(nb_path)?;
        format.render(&extraction.tree, &self.toml_options)
    }

    /// Locate the notebook and write its configuration.
    pub fn export(
        &self,
        nb_path: Option<&Path>,
        output_path: Option<&Path>,
        format: ExportFormat,
    ) -> Result<OutputArtifact> {
        let input = self.locate(nb_path)?;
        let options = ExportOptions::new()
            .with_format(format)
            .with_extract_options(self.extract_options.clone())
            .with_toml_options(self.toml_options.clone());
        export(&input, output_path, &options)
    }
}

impl Default for Nbconf {
    fn default() -> Self {
        Self::new()
    }
}
