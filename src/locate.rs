//! Resolving which notebook to process.
//!
//! An explicit path always wins and is used verbatim. Without one, the host
//! environment is consulted: first for a kernel-provided notebook path, then for
//! the most recent `%notebook <path>` directive in the command history. Both
//! lookups are best effort; callers that need determinism pass the path.

use std::fs;
use std::path::{Path, PathBuf};

use regex::Regex;

use crate::convert::ExportFormat;
use crate::error::{Error, Result};

/// Environment variable holding the kernel's notebook path.
pub const DEFAULT_KERNEL_PATH_VAR: &str = "JPY_SESSION_NAME";

/// Environment variable naming a plain-text command history file.
pub const HISTORY_FILE_VAR: &str = "NBCONF_HISTORY_FILE";

/// Capabilities of the host that may reveal the current notebook.
pub trait HostEnvironment {
    /// Notebook path reported by the kernel, if any.
    fn kernel_path(&self) -> Option<PathBuf>;

    /// The most recent `limit` history entries, oldest first.
    fn recent_history(&self, limit: usize) -> Vec<String>;
}

/// Host environment backed by environment variables and a history file.
#[derive(Debug, Clone)]
pub struct ProcessEnvironment {
    kernel_var: String,
    history_file: Option<PathBuf>,
}

impl ProcessEnvironment {
    /// Read the default variables.
    pub fn new() -> Self {
        Self {
            kernel_var: DEFAULT_KERNEL_PATH_VAR.to_string(),
            history_file: std::env::var_os(HISTORY_FILE_VAR).map(PathBuf::from),
        }
    }

    /// Read the kernel path from a different environment variable.
    pub fn with_kernel_var(mut self, var: impl Into<String>) -> Self {
        self.kernel_var = var.into();
        self
    }

    /// Read history from the given file.
    pub fn with_history_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.history_file = Some(path.into());
        self
    }
}

impl Default for ProcessEnvironment {
    fn default() -> Self {
        Self::new()
    }
}

impl HostEnvironment for ProcessEnvironment {
    fn kernel_path(&self) -> Option<PathBuf> {
        std::env::var_os(&self.kernel_var)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
    }

    fn recent_history(&self, limit: usize) -> Vec<String> {
        let Some(path) = self.history_file.as_ref() else {
            return Vec::new();
        };
        match fs::read_to_string(path) {
            Ok(content) => {
                let lines: Vec<&str> = content.lines().collect();
                let start = lines.len().saturating_sub(limit);
                lines[start..].iter().map(|l| l.to_string()).collect()
            }
            Err(e) => {
                log::debug!("history file {} unreadable: {}", path.display(), e);
                Vec::new()
            }
        }
    }
}

/// Options for notebook path resolution.
#[derive(Debug, Clone)]
pub struct LocateOptions {
    /// How many history entries to scan
    pub history_limit: usize,

    /// Directive token followed by the notebook path
    pub directive: String,
}

impl LocateOptions {
    /// Create new locate options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of history entries to scan.
    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = limit;
        self
    }

    /// Set the directive token.
    pub fn with_directive(mut self, directive: impl Into<String>) -> Self {
        self.directive = directive.into();
        self
    }
}

impl Default for LocateOptions {
    fn default() -> Self {
        Self {
            history_limit: 100,
            directive: "%notebook".to_string(),
        }
    }
}

/// Resolve the notebook to process.
///
/// # Returns
/// * the explicit path, verbatim, when given (no existence check)
/// * otherwise the kernel path, then the last history directive argument
/// * `Err(Error::PathNotDeterminable)` when nothing matched
pub fn locate_notebook(
    explicit: Option<&Path>,
    host: &dyn HostEnvironment,
    options: &LocateOptions,
) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }

    if let Some(path) = host.kernel_path() {
        log::debug!("notebook path from kernel: {}", path.display());
        return Ok(path);
    }

    let history = host.recent_history(options.history_limit);
    if let Some(path) = scan_history(&history, &options.directive) {
        log::debug!("notebook path from history: {}", path.display());
        return Ok(path);
    }

    Err(Error::PathNotDeterminable)
}

/// Find the path argument of the most recent directive in `history`.
pub fn scan_history(history: &[String], directive: &str) -> Option<PathBuf> {
    let pattern = format!(r"(?:^|\s){}\s+(\S+)", regex::escape(directive));
    let re = Regex::new(&pattern).ok()?;

    history
        .iter()
        .rev()
        .find_map(|entry| re.captures(entry).map(|caps| PathBuf::from(&caps[1])))
}

/// Default output path: the input with its extension replaced.
pub fn default_output_path(input: &Path, format: ExportFormat) -> PathBuf {
    input.with_extension(format.extension())
}
