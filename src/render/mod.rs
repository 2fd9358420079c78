//! Rendering module for serializing a [`ConfigTree`](crate::model::ConfigTree).

mod options;
mod toml_writer;
mod tree;
mod yaml;

pub use options::{TomlOptions, DEFAULT_SPLIT_HEADER_KEY};
pub use toml_writer::{to_toml, TomlRenderer};
pub use tree::to_tree;
pub use yaml::to_yaml;
