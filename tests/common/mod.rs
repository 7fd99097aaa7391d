//! Shared integration test helpers for par-term-typeset.
//!
//! This module provides a deterministic font capability table and shaper so
//! layout tests do not depend on the fonts installed on the machine.
//!
//! # Usage
//!
//! Include this module at the top of each test file that needs it:
//!
//! ```ignore
//! mod common;
//! use common::{MockFonts, MockShaper, typesetter};
//! ```
//!
//! Note: Rust integration tests use `mod common;` (not `use`) to bring in
//! helpers from `tests/common/mod.rs`. The `#[allow(dead_code)]` attributes
//! suppress warnings when only a subset of helpers are used per file.

#![allow(dead_code)]

use std::collections::HashMap;
use std::ops::RangeInclusive;

use par_term_fonts::{FallbackTable, NudgeTable};
use par_term_typeset::{
    DrawableRun, Font, FontCapabilities, FontResolver, GridCell, LayoutParams, Point, Shaper,
    ShapingOptions, Size, Typesetter, Utf16IndexedGlyph,
};

pub const MENLO: &str = "Menlo";
pub const FIRA: &str = "Fira Code";
pub const COURIER_NEW: &str = "Courier New";
pub const MONACO: &str = "Monaco";
pub const EMOJI: &str = "Apple Color Emoji";
pub const GOTHIC: &str = "Apple SD Gothic Neo";
pub const BASKERVILLE: &str = "Baskerville";

/// Font size used by the tests; the mock cell width is `0.6 * size`.
pub const FONT_SIZE: f32 = 10.0;
/// Cell width of every mock font at `FONT_SIZE`.
pub const CELL_WIDTH: f32 = 6.0;
pub const Y: f32 = 8.0;
pub const COLOR: u32 = 0x00FF00;

/// First glyph ID handed out for ligature components.
pub const LIGATURE_GLYPH_BASE: u32 = 0xF000;

pub fn font(family: &str) -> Font {
    Font::new(family, FONT_SIZE)
}

pub fn params(start_column: usize) -> LayoutParams {
    LayoutParams::new(start_column, Y, COLOR, CELL_WIDTH)
}

/// Build cells from cluster strings; `""` is a continuation cell.
pub fn cells(contents: &[&str]) -> Vec<GridCell> {
    contents
        .iter()
        .enumerate()
        .map(|(column, content)| GridCell::new(*content, column))
        .collect()
}

fn is_combining_mark(c: char) -> bool {
    matches!(c as u32, 0x0300..=0x036F | 0x1DC0..=0x1DFF)
}

fn is_skin_tone(c: char) -> bool {
    (0x1F3FB..=0x1F3FF).contains(&(c as u32))
}

fn is_emoji(c: char) -> bool {
    matches!(c as u32, 0x1F1E6..=0x1F1FF | 0x1F300..=0x1FAFF)
}

/// Glyph coverage per family, modelled on a macOS font stack.
#[derive(Clone)]
pub struct MockFonts {
    coverage: HashMap<&'static str, Vec<RangeInclusive<u32>>>,
}

impl MockFonts {
    pub fn new() -> Self {
        let ascii = 0x20..=0x7E;
        let mut coverage = HashMap::new();
        coverage.insert(
            MENLO,
            vec![ascii.clone(), 0xA0..=0x17F, 0x0300..=0x0333, 0x1F00..=0x1FFF],
        );
        coverage.insert(FIRA, vec![ascii.clone()]);
        coverage.insert(COURIER_NEW, vec![ascii.clone(), 0x1DC0..=0x1DFF]);
        coverage.insert(MONACO, vec![ascii, 0x0334..=0x036F]);
        coverage.insert(EMOJI, vec![0x1F1E6..=0x1F1FF, 0x1F300..=0x1FAFF]);
        coverage.insert(GOTHIC, vec![0xAC00..=0xD7AF, 0x4E00..=0x9FFF]);
        coverage.insert(BASKERVILLE, vec![0x10400..=0x1044F]);
        Self { coverage }
    }

    /// A resolver with the families above as fallbacks and no nudges.
    pub fn resolver(&self) -> FontResolver {
        self.resolver_with_nudges(NudgeTable::new())
    }

    pub fn resolver_with_nudges(&self, nudges: NudgeTable) -> FontResolver {
        let fallbacks = FallbackTable::new(
            &[EMOJI.to_string()],
            &[GOTHIC.to_string()],
            &[
                COURIER_NEW.to_string(),
                MONACO.to_string(),
                BASKERVILLE.to_string(),
            ],
        );
        FontResolver::new(&[], fallbacks, nudges)
    }
}

impl Default for MockFonts {
    fn default() -> Self {
        Self::new()
    }
}

impl FontCapabilities for MockFonts {
    fn can_render(&self, font: &Font, c: char) -> bool {
        self.coverage
            .get(font.family())
            .is_some_and(|ranges| ranges.iter().any(|r| r.contains(&(c as u32))))
    }

    fn cell_size(&self, font: &Font, line_spacing: f32) -> (f32, f32) {
        (font.size() * 0.6, font.size() * 1.2 * line_spacing)
    }
}

/// Deterministic shaper.
///
/// - One glyph per character, glyph ID = codepoint (0 when the font lacks it)
/// - Combining marks get their own zero-advance glyph at the base's cluster
/// - Skin tone modifiers, ZWJ continuations and VS16 merge into the glyph before
/// - Ligature fonts (with ligatures enabled) replace `-->`, `->`, `=>`, `>=`
///   and `!=` by one full-width component glyph per character, all carrying
///   the index of the first character
pub struct MockShaper {
    fonts: MockFonts,
    ligature_fonts: Vec<&'static str>,
}

impl MockShaper {
    pub fn new(fonts: MockFonts) -> Self {
        Self {
            fonts,
            ligature_fonts: vec![FIRA],
        }
    }
}

const LIGATURES: &[&str] = &["-->", "->", "=>", ">=", "!="];

impl Shaper for MockShaper {
    fn shape(&self, text: &str, font: &Font, options: &ShapingOptions) -> Vec<Utf16IndexedGlyph> {
        let (cell_width, _) = self.fonts.cell_size(font, 1.0);
        let ligatures = options.enable_ligatures
            && self.ligature_fonts.iter().any(|family| *family == font.family());

        let chars: Vec<char> = text.chars().collect();
        let mut glyphs: Vec<Utf16IndexedGlyph> = Vec::new();
        let mut pen_x = 0.0;
        let mut utf16 = 0;
        let mut base_index = 0;
        let mut i = 0;

        while i < chars.len() {
            let c = chars[i];

            if ligatures && let Some(lig) = LIGATURES.iter().find(|lig| text_at(&chars, i, lig)) {
                let len = lig.chars().count();
                for j in 0..len {
                    glyphs.push(Utf16IndexedGlyph::new(
                        LIGATURE_GLYPH_BASE + j as u32,
                        utf16,
                        Point::new(pen_x, 0.0),
                        Size::new(cell_width, 0.0),
                    ));
                    pen_x += cell_width;
                }
                base_index = utf16;
                utf16 += len;
                i += len;
                continue;
            }

            let merges_into_previous = !glyphs.is_empty()
                && (is_skin_tone(c)
                    || c == '\u{FE0F}'
                    || c == '\u{200D}'
                    || (i > 0 && chars[i - 1] == '\u{200D}'));

            if merges_into_previous {
                // Nothing new to draw
            } else if is_combining_mark(c) && !glyphs.is_empty() {
                let base_x = glyphs.last().map_or(0.0, |g| g.position.x);
                glyphs.push(Utf16IndexedGlyph::new(
                    self.glyph_id(font, c),
                    base_index,
                    Point::new(base_x, 0.0),
                    Size::ZERO,
                ));
            } else {
                let advance = if is_emoji(c) { 2.0 * cell_width } else { cell_width };
                base_index = utf16;
                glyphs.push(Utf16IndexedGlyph::new(
                    self.glyph_id(font, c),
                    utf16,
                    Point::new(pen_x, 0.0),
                    Size::new(advance, 0.0),
                ));
                pen_x += advance;
            }

            utf16 += c.len_utf16();
            i += 1;
        }

        glyphs
    }
}

impl MockShaper {
    fn glyph_id(&self, font: &Font, c: char) -> u32 {
        if self.fonts.can_render(font, c) {
            c as u32
        } else {
            0
        }
    }
}

fn text_at(chars: &[char], at: usize, needle: &str) -> bool {
    let needle: Vec<char> = needle.chars().collect();
    chars.get(at..at + needle.len()) == Some(needle.as_slice())
}

/// Typesetter over the mock font stack.
pub fn typesetter() -> Typesetter<MockShaper, MockFonts> {
    let fonts = MockFonts::new();
    Typesetter::new(MockShaper::new(fonts.clone()), fonts.clone(), fonts.resolver())
}

/// Typesetter over the mock font stack with the given nudges.
pub fn typesetter_with_nudges(nudges: NudgeTable) -> Typesetter<MockShaper, MockFonts> {
    let fonts = MockFonts::new();
    let resolver = fonts.resolver_with_nudges(nudges);
    Typesetter::new(MockShaper::new(fonts.clone()), fonts, resolver)
}

/// Assert that the runs cover `[start, start + count)` exactly once, in order.
pub fn assert_partition(runs: &[DrawableRun], start: usize, count: usize) {
    let mut next = start;
    for run in runs {
        assert_eq!(
            run.columns.start, next,
            "run {:?} does not continue at column {next}",
            run.columns
        );
        assert!(!run.columns.is_empty(), "empty run {:?}", run.columns);
        next = run.columns.end;
    }
    assert_eq!(next, start + count, "runs end at {next}");
}

/// Glyph x positions of a run in cell widths.
pub fn x_cells(run: &DrawableRun) -> Vec<f32> {
    run.glyphs
        .iter()
        .map(|g| g.position.x / CELL_WIDTH)
        .collect()
}
