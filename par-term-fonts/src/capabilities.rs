//! Capability interfaces consumed by the typesetter.
//!
//! The layout pipeline never talks to a concrete font stack directly. It asks a
//! [`FontCapabilities`] oracle about glyph coverage and cell metrics, and a
//! [`Shaper`] for glyphs. Production code plugs in [`crate::FontCache`] and
//! [`crate::TextShaper`]; tests plug in deterministic fakes.

use serde::Serialize;
use std::sync::Arc;

use crate::font_manager::Font;
use crate::text_shaper::ShapingOptions;

/// A point in pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// A width/height pair in pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const ZERO: Size = Size {
        width: 0.0,
        height: 0.0,
    };

    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// A shaped glyph tagged with the UTF-16 offset of its cluster start.
///
/// Several glyphs may share an `index` when one cluster expands into multiple
/// glyphs; a ligature glyph carries the index of the first character it consumed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Utf16IndexedGlyph {
    /// Glyph ID from the font
    pub glyph: u32,
    /// UTF-16 offset of the first code unit of the cluster this glyph renders
    pub index: usize,
    /// Pen position (plus offsets) relative to the start of the shaped string
    pub position: Point,
    /// Advance to the next glyph
    pub advance: Size,
}

impl Utf16IndexedGlyph {
    pub fn new(glyph: u32, index: usize, position: Point, advance: Size) -> Self {
        Self {
            glyph,
            index,
            position,
            advance,
        }
    }
}

/// Font coverage and metric queries.
pub trait FontCapabilities {
    /// Whether `font` contains a glyph for `c`.
    fn can_render(&self, font: &Font, c: char) -> bool;

    /// Cell `(width, height)` of `font` at the given line spacing.
    fn cell_size(&self, font: &Font, line_spacing: f32) -> (f32, f32);
}

/// A text shaping engine.
pub trait Shaper {
    /// Shape `text` with `font`, returning glyphs in visual (left-to-right) order.
    ///
    /// Every glyph's `index` is a UTF-16 offset into `text`.
    fn shape(&self, text: &str, font: &Font, options: &ShapingOptions) -> Vec<Utf16IndexedGlyph>;
}

impl<T: FontCapabilities + ?Sized> FontCapabilities for &T {
    fn can_render(&self, font: &Font, c: char) -> bool {
        (**self).can_render(font, c)
    }

    fn cell_size(&self, font: &Font, line_spacing: f32) -> (f32, f32) {
        (**self).cell_size(font, line_spacing)
    }
}

impl<T: FontCapabilities + ?Sized> FontCapabilities for Arc<T> {
    fn can_render(&self, font: &Font, c: char) -> bool {
        (**self).can_render(font, c)
    }

    fn cell_size(&self, font: &Font, line_spacing: f32) -> (f32, f32) {
        (**self).cell_size(font, line_spacing)
    }
}

impl<T: Shaper + ?Sized> Shaper for &T {
    fn shape(&self, text: &str, font: &Font, options: &ShapingOptions) -> Vec<Utf16IndexedGlyph> {
        (**self).shape(text, font, options)
    }
}

impl<T: Shaper + ?Sized> Shaper for Arc<T> {
    fn shape(&self, text: &str, font: &Font, options: &ShapingOptions) -> Vec<Utf16IndexedGlyph> {
        (**self).shape(text, font, options)
    }
}
