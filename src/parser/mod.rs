//! Notebook reading and configuration extraction.

mod literal;
mod notebook_reader;
mod options;
mod walker;

pub use literal::{extract_assignment, find_assignment, parse_literal, parse_value};
pub use notebook_reader::NotebookReader;
pub use options::{ExtractOptions, DEFAULT_GUARD_TOKENS};
pub use walker::{Extraction, ExtractionStats, SectionWalker};
