//! Font fallback, font caching and text shaping for the par-term grid typesetter.
//!
//! This crate provides:
//! - Font identity (`Font`) and owned font bytes (`FontData`)
//! - A process-wide, read-through font/metrics cache (`FontCache`)
//! - The capability interfaces the typesetter consumes (`FontCapabilities`, `Shaper`)
//! - Declarative per-script fallback and glyph nudge tables
//! - A deterministic per-cluster `FontResolver`
//! - HarfBuzz-based text shaping via rustybuzz with LRU caching (`TextShaper`)
//!
//! # Architecture
//!
//! The `FontResolver` picks a font for each grapheme cluster by asking a
//! `FontCapabilities` oracle whether the preferred font covers it, and if not,
//! walking the fallback candidates in priority order:
//! 1. Unicode range-specific fonts from the configuration
//! 2. The fallback list for the cluster's script class (emoji, CJK)
//! 3. The general fallback list
//!
//! The `TextShaper` turns a string and a font into glyphs indexed by UTF-16
//! offset, which is the coordinate space the typesetter regroups in.

pub mod capabilities;
mod error;
pub mod font_manager;
pub mod resolver;
pub mod text_shaper;

// Re-export main types for convenience
pub use capabilities::{FontCapabilities, Point, Shaper, Size, Utf16IndexedGlyph};
pub use error::FontError;
pub use font_manager::{
    CellMetrics, FallbackTable, Font, FontCache, FontData, Nudge, NudgeTable, ScriptClass,
    classify, is_default_ignorable,
};
pub use resolver::{FontResolution, FontResolver};
pub use text_shaper::{ShapingOptions, TextShaper};
