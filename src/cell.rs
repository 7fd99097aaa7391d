//! Grid cell data model.
//!
//! A row arrives as [`GridCell`]s, one per grid column. During layout each
//! content cell is expanded to its UTF-16 code units ([`PositionedUtf16Cell`])
//! and every code unit of a subrun's concatenated string is mapped back to the
//! cell it came from ([`CellIndexedUtf16Char`]).

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

use par_term_fonts::text_shaper::{contains_zwj, is_regional_indicator_pair};

/// One grid column of a row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridCell {
    /// Grapheme cluster drawn in this column; empty for a continuation cell
    pub content: String,
    /// Column offset from the start column of the span being laid out
    pub column: usize,
}

impl GridCell {
    pub fn new(content: impl Into<String>, column: usize) -> Self {
        Self {
            content: content.into(),
            column,
        }
    }

    /// The second column of a double-width character.
    pub fn continuation(column: usize) -> Self {
        Self {
            content: String::new(),
            column,
        }
    }

    pub fn is_continuation(&self) -> bool {
        self.content.is_empty()
    }
}

/// The UTF-16 expansion of one content cell, tagged with its column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionedUtf16Cell {
    pub utf16: Vec<u16>,
    pub column: usize,
}

impl PositionedUtf16Cell {
    pub fn new(utf16: Vec<u16>, column: usize) -> Self {
        Self { utf16, column }
    }

    pub fn from_cell(cell: &GridCell) -> Self {
        Self {
            utf16: cell.content.encode_utf16().collect(),
            column: cell.column,
        }
    }
}

/// A code unit of a subrun's string and the index of the cell it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellIndexedUtf16Char {
    pub code_unit: u16,
    /// Zero-based index of the originating cell within the subrun
    pub index: usize,
}

impl CellIndexedUtf16Char {
    pub fn new(code_unit: u16, index: usize) -> Self {
        Self { code_unit, index }
    }
}

/// Number of grid columns a grapheme cluster occupies (1 or 2).
pub fn cluster_width(grapheme: &str) -> usize {
    if contains_zwj(grapheme) || is_regional_indicator_pair(grapheme) || grapheme.contains('\u{FE0F}')
    {
        return 2;
    }
    grapheme.width().clamp(1, 2)
}

/// Split `text` into grid cells: one cell per grapheme cluster, followed by a
/// continuation cell for every double-width cluster. Columns start at 0.
pub fn cells_from_text(text: &str) -> Vec<GridCell> {
    let mut cells = Vec::with_capacity(text.len());
    for grapheme in text.graphemes(true) {
        let column = cells.len();
        cells.push(GridCell::new(grapheme, column));
        if cluster_width(grapheme) == 2 {
            cells.push(GridCell::continuation(column + 1));
        }
    }
    cells
}
