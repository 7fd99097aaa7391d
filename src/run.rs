//! Drawable runs: the final, painter-ready layout output.

use serde::Serialize;
use std::ops::Range;

use par_term_fonts::{Font, Nudge, Point};

use crate::grouping::CellGlyphGroup;

/// A glyph and where to draw it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PositionedGlyph {
    pub glyph: u32,
    pub position: Point,
}

/// One font, one pen-down anchor, an ordered glyph list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DrawableRun {
    pub font: Font,
    /// Foreground color as `0xRRGGBB`
    pub color: u32,
    pub anchor: Point,
    pub glyphs: Vec<PositionedGlyph>,
    /// Absolute grid columns the run covers, continuation cells included
    pub columns: Range<usize>,
}

impl DrawableRun {
    pub fn glyph_ids(&self) -> Vec<u32> {
        self.glyphs.iter().map(|g| g.glyph).collect()
    }

    pub fn positions(&self) -> Vec<Point> {
        self.glyphs.iter().map(|g| g.position).collect()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }
}

/// Row-level layout parameters shared by both layout modes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutParams {
    /// Absolute column of the first cell
    pub start_column: usize,
    /// Baseline y position in pixels
    pub y: f32,
    /// Foreground color as `0xRRGGBB`
    pub color: u32,
    pub cell_width: f32,
}

impl LayoutParams {
    pub fn new(start_column: usize, y: f32, color: u32, cell_width: f32) -> Self {
        Self {
            start_column,
            y,
            color,
            cell_width,
        }
    }

    /// Pixel x of a cell-relative column.
    pub fn column_x(&self, column: usize) -> f32 {
        (self.start_column + column) as f32 * self.cell_width
    }

    /// Absolute column span of a cell-relative range.
    pub fn absolute(&self, columns: &Range<usize>) -> Range<usize> {
        self.start_column + columns.start..self.start_column + columns.end
    }
}

/// Build a run from shaped groups, keeping the shaper's relative positions.
///
/// The anchor sits at the first cell's column; every glyph is placed at the
/// anchor plus its offset from the first glyph, without snapping to cells.
pub(crate) fn shaped_run(
    font: Font,
    groups: &[CellGlyphGroup<'_>],
    columns: Range<usize>,
    params: &LayoutParams,
) -> DrawableRun {
    let first_column = groups
        .iter()
        .find_map(CellGlyphGroup::first_column)
        .unwrap_or(columns.start);
    let anchor = Point::new(params.column_x(first_column), params.y);

    let mut shaped = groups.iter().flat_map(|group| group.glyphs.iter()).peekable();
    let origin = shaped.peek().map_or(Point::ZERO, |glyph| glyph.position);
    let glyphs = shaped
        .map(|glyph| PositionedGlyph {
            glyph: glyph.glyph,
            position: Point::new(
                anchor.x + (glyph.position.x - origin.x),
                anchor.y + (glyph.position.y - origin.y),
            ),
        })
        .collect();

    DrawableRun {
        font,
        color: params.color,
        anchor,
        glyphs,
        columns: params.absolute(&columns),
    }
}

/// Build a run that pins every group to its first cell's column.
///
/// The first glyph of a group sits exactly on the cell; further glyphs (marks
/// drawn as separate glyphs) get the cell's nudge on top.
pub(crate) fn per_cell_run(
    font: Font,
    groups: &[CellGlyphGroup<'_>],
    nudges: &[Option<Nudge>],
    columns: Range<usize>,
    params: &LayoutParams,
) -> DrawableRun {
    let mut glyphs = Vec::new();
    let mut cell_index = 0;
    let mut anchor = None;

    for group in groups {
        let Some(column) = group.first_column() else {
            continue;
        };
        let origin = Point::new(params.column_x(column), params.y);
        anchor.get_or_insert(origin);

        let nudge = nudges
            .get(cell_index)
            .copied()
            .flatten()
            .map_or(Point::ZERO, |nudge| nudge.to_pixels(params.cell_width));
        cell_index += group.cells.len();

        glyphs.extend(group.glyphs.iter().enumerate().map(|(i, glyph)| {
            let position = if i == 0 {
                origin
            } else {
                Point::new(origin.x + nudge.x, origin.y + nudge.y)
            };
            PositionedGlyph {
                glyph: glyph.glyph,
                position,
            }
        }));
    }

    let absolute = params.absolute(&columns);
    let anchor = anchor.unwrap_or_else(|| Point::new(params.column_x(columns.start), params.y));
    DrawableRun {
        font,
        color: params.color,
        anchor,
        glyphs,
        columns: absolute,
    }
}
