//! Notebook-level types.

/// A loaded notebook: an ordered sequence of cells.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Notebook {
    /// Cells in document order
    pub cells: Vec<Cell>,
}

impl Notebook {
    /// Create a new empty notebook.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a cell to the end of the notebook.
    pub fn add_cell(&mut self, cell: Cell) {
        self.cells.push(cell);
    }

    /// Builder-style variant of [`Notebook::add_cell`].
    pub fn with_cell(mut self, cell: Cell) -> Self {
        self.add_cell(cell);
        self
    }

    /// Get the number of cells.
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Check if the notebook has any cells.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Count cells of the given kind.
    pub fn count_kind(&self, kind: CellKind) -> usize {
        self.cells.iter().filter(|c| c.kind == kind).count()
    }
}

/// Kind of notebook cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellKind {
    /// Narrative markdown cell
    Markdown,
    /// Executable code cell
    Code,
    /// Raw cell (passed through by notebook tools, ignored here)
    Raw,
}

impl std::fmt::Display for CellKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Markdown => "markdown",
            Self::Code => "code",
            Self::Raw => "raw",
        };
        write!(f, "{s}")
    }
}

/// A single cell: its kind plus its source split into lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    /// Cell kind
    pub kind: CellKind,

    /// Source lines, without trailing newlines
    pub source: Vec<String>,
}

impl Cell {
    /// Create a cell from a source text blob, splitting it on `\n`.
    pub fn new(kind: CellKind, source: &str) -> Self {
        Self {
            kind,
            source: source.split('\n').map(String::from).collect(),
        }
    }

    /// Create a markdown cell.
    pub fn markdown(source: &str) -> Self {
        Self::new(CellKind::Markdown, source)
    }

    /// Create a code cell.
    pub fn code(source: &str) -> Self {
        Self::new(CellKind::Code, source)
    }

    /// Create a raw cell.
    pub fn raw(source: &str) -> Self {
        Self::new(CellKind::Raw, source)
    }

    /// Iterate over source lines.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.source.iter().map(String::as_str)
    }

    /// Source text with lines joined by `\n`.
    pub fn text(&self) -> String {
        self.source.join("\n")
    }
}
