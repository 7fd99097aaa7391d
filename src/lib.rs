//! Grid typesetting for par-term.
//!
//! Turns a row of terminal grid cells, each holding one grapheme cluster, into
//! font-resolved, positioned glyph runs ready for painting:
//!
//! 1. [`subrun`] splits the row into single-font subruns (font fallback)
//! 2. each subrun is shaped by a [`Shaper`]
//! 3. [`grouping`] regroups the shaped glyphs against the cells
//! 4. [`run`] assembles one [`DrawableRun`] per subrun
//!
//! [`Typesetter`] drives the pipeline in either ligature mode. Font coverage
//! and metrics come from a [`FontCapabilities`] oracle, so the pipeline runs
//! against the real font stack (`par_term_fonts::FontCache` and
//! `par_term_fonts::TextShaper`) or against test fakes alike.

/// Application version (root crate version, for use in logs).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod cell;
pub mod cli;
pub mod debug;
pub mod grouping;
pub mod run;
pub mod subrun;
pub mod typesetter;

// Re-export main types for convenience
pub use cell::{CellIndexedUtf16Char, GridCell, PositionedUtf16Cell, cells_from_text};
pub use grouping::{CellGlyphGroup, group_by_string_ranges, group_utf16_cells_and_glyphs};
pub use par_term_fonts::{
    Font, FontCapabilities, FontResolution, FontResolver, Nudge, Point, Shaper, ShapingOptions,
    Size, Utf16IndexedGlyph,
};
pub use run::{DrawableRun, LayoutParams, PositionedGlyph};
pub use subrun::{Subrun, split_into_subruns};
pub use typesetter::Typesetter;
