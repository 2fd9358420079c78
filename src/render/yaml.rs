//! YAML rendering for configuration trees.

use crate::error::{Error, Result};
use crate::model::ConfigTree;

/// Convert a configuration tree to a block-style YAML document.
///
/// Sections and keys keep their insertion order.
pub fn to_yaml(tree: &ConfigTree) -> Result<String> {
    serde_yaml::to_string(tree).map_err(|e| Error::Render(format!("YAML serialization error: {}", e)))
}
