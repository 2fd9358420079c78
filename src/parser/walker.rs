//! Single-pass walk over notebook cells that builds a [`ConfigTree`].

use serde::Serialize;

use crate::model::{Cell, CellKind, ConfigTree, Notebook};

use super::literal::extract_assignment;
use super::ExtractOptions;

/// Statistics collected while walking a notebook.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExtractionStats {
    /// Markdown cells visited
    pub markdown_cells: usize,

    /// Code cells visited
    pub code_cells: usize,

    /// Section headings encountered (repeats included)
    pub headings: usize,

    /// Assignments captured (overwrites included)
    pub assignments: usize,

    /// Non-blank code lines that were not assignments
    pub rejected_lines: usize,

    /// Code lines dropped because no section was open yet
    pub orphan_lines: usize,
}

/// Result of walking a notebook.
#[derive(Debug, Clone, Default)]
pub struct Extraction {
    /// The extracted configuration
    pub tree: ConfigTree,

    /// Walk statistics
    pub stats: ExtractionStats,
}

/// Walks cells in order, tracking the current section.
///
/// The walker starts with no open section. A markdown line with the heading
/// marker opens (or restarts) a section; code lines are only considered while
/// a section is open.
pub struct SectionWalker {
    options: ExtractOptions,
    marker: String,
}

impl SectionWalker {
    /// Create a walker with the given options.
    pub fn new(options: ExtractOptions) -> Self {
        let marker = options.heading_marker();
        Self { options, marker }
    }

    /// Walk every cell of the notebook.
    pub fn walk(&self, notebook: &Notebook) -> Extraction {
        let mut extraction = Extraction::default();
        let mut current: Option<String> = None;

        for cell in &notebook.cells {
            match cell.kind {
                CellKind::Markdown => {
                    extraction.stats.markdown_cells += 1;
                    self.visit_markdown(cell, &mut current, &mut extraction);
                }
                CellKind::Code => {
                    extraction.stats.code_cells += 1;
                    self.visit_code(cell, current.as_deref(), &mut extraction);
                }
                CellKind::Raw => {}
            }
        }

        extraction
    }

    fn visit_markdown(&self, cell: &Cell, current: &mut Option<String>, out: &mut Extraction) {
        for line in cell.lines() {
            if let Some(rest) = line.strip_prefix(self.marker.as_str()) {
                let name = rest.trim().to_string();
                log::debug!("entering section {:?}", name);
                out.tree.start_section(name.clone());
                out.stats.headings += 1;
                *current = Some(name);
            }
        }
    }

    fn visit_code(&self, cell: &Cell, current: Option<&str>, out: &mut Extraction) {
        let Some(section) = current else {
            let dropped = cell.lines().filter(|l| !l.trim().is_empty()).count();
            if dropped > 0 {
                log::debug!("dropping {} code lines before any section", dropped);
            }
            out.stats.orphan_lines += dropped;
            return;
        };

        for line in cell.lines() {
            if line.trim().is_empty() {
                continue;
            }
            match extract_assignment(line, &self.options) {
                Some((key, value)) => {
                    out.tree.insert(section, key, value);
                    out.stats.assignments += 1;
                }
                None => out.stats.rejected_lines += 1,
            }
        }
    }
}

impl Default for SectionWalker {
    fn default() -> Self {
        Self::new(ExtractOptions::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Value;

    fn walk(notebook: &Notebook) -> Extraction {
        SectionWalker::default().walk(notebook)
    }

    #[test]
    fn test_loader_example() {
        let nb = Notebook::new()
            .with_cell(Cell::markdown("## Loader"))
            .with_cell(Cell::code("path = \"data.csv\"\nretries = 3"));

        let extraction = walk(&nb);
        assert_eq!(extraction.tree.section_names(), vec!["Loader"]);
        assert_eq!(
            extraction.tree.get("Loader", "path"),
            Some(&Value::string("data.csv"))
        );
        assert_eq!(
            extraction.tree.get("Loader", "retries"),
            Some(&Value::Integer(3))
        );
        assert_eq!(extraction.stats.assignments, 2);
    }

    #[test]
    fn test_no_headings_yields_empty_tree() {
        let nb = Notebook::new()
            .with_cell(Cell::markdown("# Title\n### Detail"))
            .with_cell(Cell::code("x = 1\ny = 2"));

        let extraction = walk(&nb);
        assert!(extraction.tree.is_empty());
        assert_eq!(extraction.stats.orphan_lines, 2);
    }

    #[test]
    fn test_keys_before_first_heading_dropped() {
        let nb = Notebook::new()
            .with_cell(Cell::code("early = 1"))
            .with_cell(Cell::markdown("Intro text\n## Model"))
            .with_cell(Cell::code("lr = 0.01"));

        let extraction = walk(&nb);
        assert_eq!(extraction.tree.section_names(), vec!["Model"]);
        assert_eq!(extraction.tree.get("Model", "early"), None);
        assert_eq!(extraction.tree.get("Model", "lr"), Some(&Value::Float(0.01)));
    }

    #[test]
    fn test_repeated_heading_restarts_section() {
        let nb = Notebook::new()
            .with_cell(Cell::markdown("## A"))
            .with_cell(Cell::code("x = 1"))
            .with_cell(Cell::markdown("## B"))
            .with_cell(Cell::code("y = 2"))
            .with_cell(Cell::markdown("## A"))
            .with_cell(Cell::code("z = 3"));

        let tree = walk(&nb).tree;
        assert_eq!(tree.section_names(), vec!["A", "B"]);
        assert_eq!(tree.get("A", "x"), None);
        assert_eq!(tree.get("A", "z"), Some(&Value::Integer(3)));
    }

    #[test]
    fn test_last_heading_in_cell_wins() {
        let nb = Notebook::new()
            .with_cell(Cell::markdown("## First\ntext\n## Second"))
            .with_cell(Cell::code("k = 'v'"));

        let tree = walk(&nb).tree;
        assert_eq!(tree.section_names(), vec!["First", "Second"]);
        assert!(tree.section("First").unwrap().is_empty());
        assert_eq!(tree.get("Second", "k"), Some(&Value::string("v")));
    }

    #[test]
    fn test_heading_requires_exact_marker() {
        let nb = Notebook::new()
            .with_cell(Cell::markdown("  ## Indented\n##NoSpace\n### Deeper"))
            .with_cell(Cell::code("x = 1"));

        assert!(walk(&nb).tree.is_empty());
    }

    #[test]
    fn test_raw_cells_and_code_headings_ignored() {
        let nb = Notebook::new()
            .with_cell(Cell::raw("## NotASection"))
            .with_cell(Cell::code("## comment = 1"));

        assert!(walk(&nb).tree.is_empty());
    }

    #[test]
    fn test_rejected_and_guarded_lines() {
        let nb = Notebook::new().with_cell(Cell::markdown("## Run")).with_cell(Cell::code(
            "import os\n# note = 1\n\nepochs = 10\nexport_ipynb_toml(output_path='cfg.toml')",
        ));

        let extraction = walk(&nb);
        let section = extraction.tree.section("Run").unwrap();
        assert_eq!(section.len(), 1);
        assert_eq!(extraction.stats.rejected_lines, 3);
    }

    #[test]
    fn test_custom_heading_level() {
        let nb = Notebook::new()
            .with_cell(Cell::markdown("## Skipped\n### Used"))
            .with_cell(Cell::code("x = 1"));

        let walker = SectionWalker::new(ExtractOptions::new().with_heading_level(3));
        let tree = walker.walk(&nb).tree;
        assert_eq!(tree.section_names(), vec!["Used"]);
    }
}
