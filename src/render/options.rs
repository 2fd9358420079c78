//! Rendering options and configuration.

/// Key whose list-of-tuples value is written as a TOML array of arrays.
pub const DEFAULT_SPLIT_HEADER_KEY: &str = "headers_to_split_on";

/// Options for TOML rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TomlOptions {
    /// Reserved key that triggers the multi-line array-of-arrays layout
    pub split_header_key: String,

    /// Indentation of each row inside that layout
    pub row_indent: String,
}

impl TomlOptions {
    /// Create new TOML options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the reserved header-splitting key.
    pub fn with_split_header_key(mut self, key: impl Into<String>) -> Self {
        self.split_header_key = key.into();
        self
    }

    /// Set the row indentation.
    pub fn with_row_indent(mut self, indent: impl Into<String>) -> Self {
        self.row_indent = indent.into();
        self
    }
}

impl Default for TomlOptions {
    fn default() -> Self {
        Self {
            split_header_key: DEFAULT_SPLIT_HEADER_KEY.to_string(),
            row_indent: "  ".to_string(),
        }
    }
}
