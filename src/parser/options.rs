//! Extraction options and configuration.

/// Tokens that mark a line as a call to one of the export operations.
pub const DEFAULT_GUARD_TOKENS: [&str; 2] = ["export_ipynb_yaml", "export_ipynb_toml"];

/// Options for walking a notebook and extracting assignments.
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// Markdown heading level that opens a section (1-6)
    pub heading_level: u8,

    /// Lines containing any of these tokens are never captured
    pub guard_tokens: Vec<String>,

    /// Ignore IPython magic (`%`) and shell (`!`) lines
    pub skip_magics: bool,
}

impl ExtractOptions {
    /// Create new extract options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the heading level that opens a section.
    pub fn with_heading_level(mut self, level: u8) -> Self {
        self.heading_level = level.clamp(1, 6);
        self
    }

    /// Add a self-reference guard token.
    pub fn with_guard_token(mut self, token: impl Into<String>) -> Self {
        self.guard_tokens.push(token.into());
        self
    }

    /// Replace the self-reference guard tokens.
    pub fn with_guard_tokens<I, S>(mut self, tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.guard_tokens = tokens.into_iter().map(Into::into).collect();
        self
    }

    /// Enable or disable skipping of magic and shell lines.
    pub fn with_skip_magics(mut self, skip: bool) -> Self {
        self.skip_magics = skip;
        self
    }

    /// The heading prefix for the configured level, e.g. `"## "`.
    pub fn heading_marker(&self) -> String {
        format!("{} ", "#".repeat(self.heading_level as usize))
    }

    /// Check if a line references one of the export operations.
    pub fn is_guarded(&self, line: &str) -> bool {
        self.guard_tokens
            .iter()
            .any(|t| !t.is_empty() && line.contains(t.as_str()))
    }
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            heading_level: 2,
            guard_tokens: DEFAULT_GUARD_TOKENS.iter().map(|t| t.to_string()).collect(),
            skip_magics: true,
        }
    }
}
