//! The two layout entry points.
//!
//! Both modes split a row into single-font subruns (font fallback happens
//! here), shape each subrun and regroup the glyphs against the cells. They
//! differ in placement:
//! - Without ligatures every glyph is pinned to its cell's column.
//! - With ligatures the shaper's own relative positions are kept, so a
//!   ligature spanning several cells is drawn as the font designed it.

use std::ops::Range;

use par_term_config::Config;
use par_term_fonts::{Font, FontCapabilities, FontResolver, Shaper, ShapingOptions};

use crate::cell::GridCell;
use crate::grouping::{CellGlyphGroup, group_by_string_ranges, group_utf16_cells_and_glyphs};
use crate::run::{DrawableRun, LayoutParams, per_cell_run, shaped_run};
use crate::subrun::{Subrun, split_into_subruns};

/// Lays out rows of grid cells as drawable runs.
///
/// Stateless between calls apart from whatever caching the shaper and the
/// capability oracle do; a `Typesetter` can be shared between threads when
/// both of those are `Sync`.
pub struct Typesetter<S, C> {
    shaper: S,
    capabilities: C,
    resolver: FontResolver,
}

impl<S: Shaper, C: FontCapabilities> Typesetter<S, C> {
    pub fn new(shaper: S, capabilities: C, resolver: FontResolver) -> Self {
        Self {
            shaper,
            capabilities,
            resolver,
        }
    }

    /// Build a typesetter whose resolver uses the configured range fonts,
    /// fallback lists and glyph nudges.
    pub fn from_config(config: &Config, shaper: S, capabilities: C) -> Self {
        Self::new(shaper, capabilities, FontResolver::from_config(config))
    }

    pub fn resolver(&self) -> &FontResolver {
        &self.resolver
    }

    pub fn shaper(&self) -> &S {
        &self.shaper
    }

    pub fn capabilities(&self) -> &C {
        &self.capabilities
    }

    /// Cell width of `font` at `line_spacing`.
    pub fn cell_width(&self, font: &Font, line_spacing: f32) -> f32 {
        self.capabilities.cell_size(font, line_spacing).0
    }

    /// Lay out `cells` in the configured mode.
    pub fn layout(
        &self,
        cells: &[GridCell],
        font: &Font,
        params: &LayoutParams,
        ligatures: bool,
    ) -> Vec<DrawableRun> {
        if ligatures {
            self.layout_with_ligatures(cells, font, params)
        } else {
            self.layout_without_ligatures(cells, font, params)
        }
    }

    /// One run per font subrun, every glyph pinned to its cell's column.
    ///
    /// Subruns are shaped with ligatures and contextual alternates off. A cell
    /// drawn with several glyphs places all of them on its column, glyphs
    /// after the first shifted by the cell's nudge.
    pub fn layout_without_ligatures(
        &self,
        cells: &[GridCell],
        font: &Font,
        params: &LayoutParams,
    ) -> Vec<DrawableRun> {
        let options = ShapingOptions::without_ligatures();
        let runs: Vec<DrawableRun> = self
            .subruns(cells, font)
            .into_iter()
            .map(|subrun| {
                let glyphs = self.shaper.shape(&subrun.text, &subrun.font, &options);
                let groups = group_utf16_cells_and_glyphs(
                    &subrun.positioned_cells,
                    &subrun.cell_indexed_chars,
                    &glyphs,
                );
                per_cell_run(
                    subrun.font.clone(),
                    &groups,
                    &subrun.nudges,
                    subrun.columns.clone(),
                    params,
                )
            })
            .collect();

        log::debug!(
            "Laid out {} cells at column {} without ligatures: {} runs",
            cells.len(),
            params.start_column,
            runs.len()
        );
        runs
    }

    /// One run per font subrun, glyphs at the shaper's relative positions.
    ///
    /// Each subrun is shaped on its own and regrouped against its cells; the
    /// groups of the whole row are then mapped back onto the subruns by the
    /// UTF-16 range each subrun contributed.
    pub fn layout_with_ligatures(
        &self,
        cells: &[GridCell],
        font: &Font,
        params: &LayoutParams,
    ) -> Vec<DrawableRun> {
        let subruns = self.subruns(cells, font);
        let options = ShapingOptions::default();
        let shaped: Vec<Vec<_>> = subruns
            .iter()
            .map(|subrun| self.shaper.shape(&subrun.text, &subrun.font, &options))
            .collect();

        let mut groups: Vec<CellGlyphGroup<'_>> = Vec::new();
        for (subrun, glyphs) in subruns.iter().zip(&shaped) {
            groups.extend(group_utf16_cells_and_glyphs(
                &subrun.positioned_cells,
                &subrun.cell_indexed_chars,
                glyphs,
            ));
        }

        // Subruns without content cells have no string range and draw nothing
        let mut ranges = group_by_string_ranges(&string_ranges(&subruns), &groups).into_iter();
        let runs: Vec<DrawableRun> = subruns
            .iter()
            .map_while(|subrun| {
                let groups = if subrun.positioned_cells.is_empty() {
                    &groups[..0]
                } else {
                    &groups[ranges.next()?]
                };
                Some(shaped_run(
                    subrun.font.clone(),
                    groups,
                    subrun.columns.clone(),
                    params,
                ))
            })
            .collect();

        log::debug!(
            "Laid out {} cells at column {} with ligatures: {} subruns, {} groups, {} runs",
            cells.len(),
            params.start_column,
            subruns.len(),
            groups.len(),
            runs.len()
        );
        runs
    }

    fn subruns(&self, cells: &[GridCell], font: &Font) -> Vec<Subrun> {
        split_into_subruns(cells, &self.resolver, &self.capabilities, font)
    }
}

/// Consecutive UTF-16 ranges of the strings of the subruns with content cells.
fn string_ranges(subruns: &[Subrun]) -> Vec<Range<usize>> {
    let mut start = 0;
    subruns
        .iter()
        .filter(|subrun| !subrun.positioned_cells.is_empty())
        .map(|subrun| {
            let range = start..start + subrun.utf16_len();
            start = range.end;
            range
        })
        .collect()
}
