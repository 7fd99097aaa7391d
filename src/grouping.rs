//! Regrouping shaped glyphs against grid cells.
//!
//! The shaper reports each glyph by the UTF-16 offset of its cluster start.
//! [`group_utf16_cells_and_glyphs`] turns that into groups of adjacent cells
//! and the glyphs that draw them, and [`group_by_string_ranges`] maps a list
//! of consecutive string ranges onto those groups. Both partition their input:
//! every cell and every glyph lands in exactly one group, in order.

use std::ops::{Range, RangeInclusive};

use par_term_fonts::Utf16IndexedGlyph;

use crate::cell::{CellIndexedUtf16Char, PositionedUtf16Cell};

/// Adjacent cells and the glyphs that render them.
///
/// A ligature shows up as several cells with fewer glyphs; a cluster drawn
/// with several glyphs (base plus mark) as one cell with several glyphs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellGlyphGroup<'a> {
    pub cells: &'a [PositionedUtf16Cell],
    pub glyphs: &'a [Utf16IndexedGlyph],
}

impl<'a> CellGlyphGroup<'a> {
    pub fn new(cells: &'a [PositionedUtf16Cell], glyphs: &'a [Utf16IndexedGlyph]) -> Self {
        Self { cells, glyphs }
    }

    /// Number of UTF-16 code units the group's cells hold.
    pub fn utf16_len(&self) -> usize {
        self.cells.iter().map(|cell| cell.utf16.len()).sum()
    }

    /// Column of the first cell.
    pub fn first_column(&self) -> Option<usize> {
        self.cells.first().map(|cell| cell.column)
    }
}

/// Partition `cells` and `glyphs` into [`CellGlyphGroup`]s.
///
/// Glyphs are walked in order. A glyph whose origin cell is past the cells
/// already covered by the current group starts a new group; the previous group
/// then owns every cell up to that origin cell. The first group always starts
/// at the first cell and the last group runs to the final cell, so cells
/// without glyphs of their own join their neighbours.
///
/// With no glyphs at all, every cell lands in a single glyph-less group.
/// Glyph indices past the end of `chars` are attributed to the last cell.
pub fn group_utf16_cells_and_glyphs<'a>(
    cells: &'a [PositionedUtf16Cell],
    chars: &[CellIndexedUtf16Char],
    glyphs: &'a [Utf16IndexedGlyph],
) -> Vec<CellGlyphGroup<'a>> {
    let Some(last_cell) = cells.len().checked_sub(1) else {
        if !glyphs.is_empty() {
            log::warn!("Dropping {} glyphs shaped without cells", glyphs.len());
        }
        return Vec::new();
    };

    let origin_cell = |glyph: &Utf16IndexedGlyph| -> usize {
        chars
            .get(glyph.index)
            .map_or(last_cell, |c| c.index.min(last_cell))
    };

    // (cell range, glyph range) per group; the current group is the last one
    let mut bounds: Vec<(Range<usize>, Range<usize>)> = Vec::new();
    let mut covered_through = 0;

    for (glyph_index, glyph) in glyphs.iter().enumerate() {
        let cell = origin_cell(glyph);
        match bounds.last_mut() {
            Some((cell_range, glyph_range)) if cell <= covered_through => {
                glyph_range.end = glyph_index + 1;
                cell_range.end = cell_range.end.max(cell + 1);
            }
            Some((cell_range, _)) => {
                cell_range.end = cell;
                bounds.push((cell..cell + 1, glyph_index..glyph_index + 1));
                covered_through = cell;
            }
            None => {
                bounds.push((0..cell + 1, 0..1));
                covered_through = cell;
            }
        }
    }

    match bounds.last_mut() {
        Some((cell_range, _)) => cell_range.end = cells.len(),
        None => bounds.push((0..cells.len(), 0..0)),
    }

    bounds
        .into_iter()
        .map(|(cell_range, glyph_range)| CellGlyphGroup::new(&cells[cell_range], &glyphs[glyph_range]))
        .collect()
}

/// Map consecutive string ranges onto `groups`.
///
/// Walking the groups in order while accumulating the code units their cells
/// consumed, each range claims groups until the running total reaches its
/// upper bound (and always at least one group). The result holds one
/// inclusive group-index range per string range, covering every group once.
///
/// Malformed input is tolerated: ranges left without groups are dropped and
/// groups left over after the last range are given to it, both logged.
pub fn group_by_string_ranges(
    string_ranges: &[Range<usize>],
    groups: &[CellGlyphGroup<'_>],
) -> Vec<RangeInclusive<usize>> {
    let mut result: Vec<RangeInclusive<usize>> = Vec::with_capacity(string_ranges.len());
    let mut next_group = 0;
    let mut consumed = 0;

    for string_range in string_ranges {
        if next_group >= groups.len() {
            log::warn!(
                "No glyph groups left for string range {:?} ({} groups total)",
                string_range,
                groups.len()
            );
            break;
        }

        let first = next_group;
        loop {
            consumed += groups[next_group].utf16_len();
            next_group += 1;
            if consumed >= string_range.end || next_group >= groups.len() {
                break;
            }
        }
        result.push(first..=next_group - 1);
    }

    if next_group < groups.len()
        && let Some(last) = result.last_mut()
    {
        log::warn!(
            "{} glyph groups left after the last string range",
            groups.len() - next_group
        );
        *last = *last.start()..=groups.len() - 1;
    }

    result
}
