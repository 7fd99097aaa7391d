//! Splitting a row into single-font subruns.

use std::ops::Range;

use par_term_fonts::{Font, FontCapabilities, FontResolver, Nudge};

use crate::cell::{CellIndexedUtf16Char, GridCell, PositionedUtf16Cell};

/// A maximal run of consecutive cells resolved to the same font.
#[derive(Debug, Clone, PartialEq)]
pub struct Subrun {
    pub font: Font,
    /// Cell-relative columns covered, continuation cells included
    pub columns: Range<usize>,
    /// The content cells of the subrun, in column order
    pub positioned_cells: Vec<PositionedUtf16Cell>,
    /// Resolver nudge for each entry of `positioned_cells`
    pub nudges: Vec<Option<Nudge>>,
    /// Maps every code unit of `utf16` to its index in `positioned_cells`
    pub cell_indexed_chars: Vec<CellIndexedUtf16Char>,
    /// Concatenated cell contents
    pub text: String,
    /// `text` as UTF-16
    pub utf16: Vec<u16>,
}

impl Subrun {
    fn new(font: Font, start_column: usize) -> Self {
        Self {
            font,
            columns: start_column..start_column,
            positioned_cells: Vec::new(),
            nudges: Vec::new(),
            cell_indexed_chars: Vec::new(),
            text: String::new(),
            utf16: Vec::new(),
        }
    }

    fn push_cell(&mut self, cell: &GridCell, nudge: Option<Nudge>) {
        let cell_index = self.positioned_cells.len();
        let positioned = PositionedUtf16Cell::from_cell(cell);

        self.cell_indexed_chars.extend(
            positioned
                .utf16
                .iter()
                .map(|&code_unit| CellIndexedUtf16Char::new(code_unit, cell_index)),
        );
        self.utf16.extend_from_slice(&positioned.utf16);
        self.text.push_str(&cell.content);
        self.positioned_cells.push(positioned);
        self.nudges.push(nudge);
        self.extend_to(cell.column);
    }

    fn extend_to(&mut self, column: usize) {
        self.columns.end = self.columns.end.max(column + 1);
    }

    /// Column of the first content cell.
    pub fn first_cell_column(&self) -> usize {
        self.positioned_cells
            .first()
            .map_or(self.columns.start, |cell| cell.column)
    }

    /// Length of `utf16`.
    pub fn utf16_len(&self) -> usize {
        self.utf16.len()
    }
}

/// Split `cells` into subruns by resolved font, in column order.
///
/// Continuation cells extend the subrun of the cell before them; leading
/// continuation cells are folded into the first subrun. A span of continuation
/// cells only (the right half of a wide character) yields one empty subrun in
/// the preferred font covering those columns.
pub fn split_into_subruns<C>(
    cells: &[GridCell],
    resolver: &FontResolver,
    caps: &C,
    preferred: &Font,
) -> Vec<Subrun>
where
    C: FontCapabilities + ?Sized,
{
    let mut subruns: Vec<Subrun> = Vec::new();
    let mut leading_start: Option<usize> = None;

    for cell in cells {
        if cell.is_continuation() {
            match subruns.last_mut() {
                Some(subrun) => subrun.extend_to(cell.column),
                None => {
                    leading_start.get_or_insert(cell.column);
                }
            }
            continue;
        }

        let resolution = resolver.resolve(caps, &cell.content, preferred);
        let same_font = subruns
            .last()
            .is_some_and(|subrun| subrun.font == resolution.font);
        if !same_font {
            let start = leading_start.take().unwrap_or(cell.column);
            subruns.push(Subrun::new(resolution.font, start));
        }
        if let Some(current) = subruns.last_mut() {
            current.push_cell(cell, resolution.nudge);
        }
    }

    if subruns.is_empty()
        && let (Some(start), Some(last)) = (leading_start, cells.last())
    {
        let mut subrun = Subrun::new(preferred.clone(), start);
        subrun.extend_to(last.column);
        subruns.push(subrun);
    }

    log::trace!(
        "Split {} cells into {} subruns",
        cells.len(),
        subruns.len()
    );
    subruns
}
