/// Text shaping module using HarfBuzz via rustybuzz
///
/// This module turns a string and a [`Font`] into glyphs whose `index` is the
/// UTF-16 offset of the cluster they render. The typesetter regroups glyphs
/// against grid cells in that coordinate space.
///
/// # Architecture
///
/// The text shaping pipeline:
/// 1. Font bytes are fetched from the shared [`FontCache`]
/// 2. Font feature selection (ligatures, kerning, contextual alternates)
/// 3. Text shaping (rustybuzz)
/// 4. UTF-8 byte clusters are mapped to UTF-16 offsets
/// 5. Font units are scaled to pixels and pen positions accumulated
/// 6. Result caching (LRU) for performance
///
/// # Usage
///
/// ```ignore
/// let shaper = TextShaper::new(Arc::clone(&font_cache));
/// let glyphs = shaper.shape(
///     "a-->a",
///     &Font::new("Fira Code", 13.0),
///     &ShapingOptions::without_ligatures(),
/// );
/// ```
use lru::LruCache;
use parking_lot::Mutex;
use rustybuzz::{Feature, GlyphBuffer, UnicodeBuffer};
use std::num::NonZeroUsize;
use std::str::FromStr;
use std::sync::Arc;
use unicode_segmentation::UnicodeSegmentation;

use crate::capabilities::{Point, Shaper, Size, Utf16IndexedGlyph};
use crate::font_manager::{Font, FontCache};

/// Default number of shaped strings kept in the cache
const DEFAULT_CACHE_SIZE: usize = 1000;

/// Options for text shaping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShapingOptions {
    /// Enable standard, contextual and discretionary ligatures (liga, clig, dlig)
    pub enable_ligatures: bool,

    /// Enable kerning adjustments
    pub enable_kerning: bool,

    /// Enable contextual alternates
    pub enable_contextual_alternates: bool,
}

impl Default for ShapingOptions {
    fn default() -> Self {
        Self {
            enable_ligatures: true,
            enable_kerning: true,
            enable_contextual_alternates: true,
        }
    }
}

impl ShapingOptions {
    /// Options that keep one glyph per character where the font allows it.
    ///
    /// Contextual alternates are disabled too: programming fonts implement
    /// many arrow and comparison ligatures through `calt`.
    pub fn without_ligatures() -> Self {
        Self {
            enable_ligatures: false,
            enable_contextual_alternates: false,
            ..Self::default()
        }
    }

    /// OpenType features to pass to the shaper.
    ///
    /// HarfBuzz turns `liga`, `clig`, `calt` and `kern` on by default, so
    /// disabled options are sent as explicit `-feature` settings.
    pub fn features(&self) -> Vec<Feature> {
        let toggle = |tag: &str, enabled: bool| -> Option<Feature> {
            let notation = if enabled {
                tag.to_string()
            } else {
                format!("-{tag}")
            };
            Feature::from_str(&notation).ok()
        };

        let mut features = Vec::new();
        // Standard ligatures (liga): fi, fl, ffi, ffl
        features.extend(toggle("liga", self.enable_ligatures));
        // Contextual ligatures (clig) - often includes programming ligatures like ->, =>
        features.extend(toggle("clig", self.enable_ligatures));
        // Discretionary ligatures (dlig) - programming ligatures in many fonts
        features.extend(toggle("dlig", self.enable_ligatures));
        features.extend(toggle("kern", self.enable_kerning));
        features.extend(toggle("calt", self.enable_contextual_alternates));
        // Glyph composition/decomposition (ccmp) - required for emoji and combining marks
        features.extend(toggle("ccmp", true));
        // Localized forms (locl) - language-specific glyph variants
        features.extend(toggle("locl", true));
        features
    }
}

/// Cache key for shaped strings
#[derive(Debug, Clone, Hash, Eq, PartialEq)]
struct ShapeCacheKey {
    text: String,
    font: Font,
    options: ShapingOptions,
}

/// Text shaper using HarfBuzz via rustybuzz
///
/// Safe to share between threads; the cache sits behind a mutex and shaping of
/// a cache miss happens outside of it.
pub struct TextShaper {
    fonts: Arc<FontCache>,

    /// LRU cache of shaped strings
    shape_cache: Mutex<LruCache<ShapeCacheKey, Arc<[Utf16IndexedGlyph]>>>,
}

impl TextShaper {
    /// Create a new text shaper with the default cache size
    pub fn new(fonts: Arc<FontCache>) -> Self {
        Self::with_cache_size(fonts, DEFAULT_CACHE_SIZE)
    }

    /// Create a new text shaper with a specific cache size (minimum 1)
    pub fn with_cache_size(fonts: Arc<FontCache>, max_cache_size: usize) -> Self {
        let capacity = NonZeroUsize::new(max_cache_size).unwrap_or(NonZeroUsize::MIN);
        Self {
            fonts,
            shape_cache: Mutex::new(LruCache::new(capacity)),
        }
    }

    pub fn fonts(&self) -> &Arc<FontCache> {
        &self.fonts
    }

    /// Shape `text` and return glyphs indexed by UTF-16 offset.
    ///
    /// A font that cannot be loaded shapes to an empty list. Codepoints missing
    /// from the font come back as glyph 0 (`.notdef`).
    pub fn shape_text(
        &self,
        text: &str,
        font: &Font,
        options: &ShapingOptions,
    ) -> Arc<[Utf16IndexedGlyph]> {
        let cache_key = ShapeCacheKey {
            text: text.to_string(),
            font: font.clone(),
            options: *options,
        };

        if let Some(cached) = self.shape_cache.lock().get(&cache_key) {
            return Arc::clone(cached);
        }

        let glyphs: Arc<[Utf16IndexedGlyph]> = self.shape_uncached(text, font, options).into();
        self.shape_cache
            .lock()
            .put(cache_key, Arc::clone(&glyphs));
        glyphs
    }

    fn shape_uncached(
        &self,
        text: &str,
        font: &Font,
        options: &ShapingOptions,
    ) -> Vec<Utf16IndexedGlyph> {
        if text.is_empty() {
            return Vec::new();
        }

        let Some(font_data) = self.fonts.face_data(font.family()) else {
            log::warn!("Cannot shape {:?}: font {:?} is not available", text, font);
            return Vec::new();
        };
        let Some(face) = font_data.face() else {
            log::warn!("Cannot shape {:?}: font data for {:?} does not parse", text, font);
            return Vec::new();
        };

        let units_per_em = face.units_per_em() as f32;
        if units_per_em <= 0.0 {
            return Vec::new();
        }
        let scale = font.size() / units_per_em;

        let mut unicode_buffer = UnicodeBuffer::new();
        unicode_buffer.push_str(text);
        unicode_buffer.set_direction(rustybuzz::Direction::LeftToRight);

        let glyph_buffer = rustybuzz::shape(&face, &options.features(), unicode_buffer);
        let glyphs = extract_glyphs(&glyph_buffer, &utf16_offsets(text), scale);

        log::trace!(
            "Shaped {:?} with {:?}: {} chars -> {} glyphs",
            text,
            font,
            text.chars().count(),
            glyphs.len()
        );
        glyphs
    }

    /// Clear the shape cache
    pub fn clear_cache(&self) {
        self.shape_cache.lock().clear();
    }

    /// Get the current cache size
    pub fn cache_size(&self) -> usize {
        self.shape_cache.lock().len()
    }
}

impl Shaper for TextShaper {
    fn shape(&self, text: &str, font: &Font, options: &ShapingOptions) -> Vec<Utf16IndexedGlyph> {
        self.shape_text(text, font, options).to_vec()
    }
}

/// UTF-16 offset of every UTF-8 byte offset in `text` (plus one past the end).
///
/// Only char boundaries are meaningful; interior bytes map to the offset of
/// the char they belong to.
fn utf16_offsets(text: &str) -> Vec<usize> {
    let mut offsets = Vec::with_capacity(text.len() + 1);
    let mut utf16 = 0;
    for c in text.chars() {
        offsets.extend(std::iter::repeat_n(utf16, c.len_utf8()));
        utf16 += c.len_utf16();
    }
    offsets.push(utf16);
    offsets
}

/// Convert a glyph buffer into pixel-space glyphs with accumulated pen positions.
///
/// Positions use screen orientation: y grows downward from the baseline.
fn extract_glyphs(buffer: &GlyphBuffer, offsets: &[usize], scale: f32) -> Vec<Utf16IndexedGlyph> {
    let last = offsets.len().saturating_sub(1);
    let mut pen_x = 0.0;
    let mut pen_y = 0.0;

    buffer
        .glyph_infos()
        .iter()
        .zip(buffer.glyph_positions())
        .map(|(info, pos)| {
            let index = offsets[(info.cluster as usize).min(last)];
            let position = Point::new(
                pen_x + pos.x_offset as f32 * scale,
                pen_y - pos.y_offset as f32 * scale,
            );
            let advance = Size::new(pos.x_advance as f32 * scale, pos.y_advance as f32 * scale);
            pen_x += advance.width;
            pen_y -= advance.height;
            Utf16IndexedGlyph::new(info.glyph_id, index, position, advance)
        })
        .collect()
}

/// Detect grapheme clusters in the input text
///
/// This is crucial for:
/// - Regional indicator pairs (flag emoji like 🇺🇸)
/// - ZWJ sequences (emoji like 👨‍👩‍👧‍👦)
/// - Combining characters (diacritics like é)
/// - Emoji with skin tone modifiers (👋🏽)
pub fn detect_grapheme_clusters(text: &str) -> Vec<(usize, &str)> {
    text.grapheme_indices(true).collect()
}

/// Detect regional indicator pairs (flag emoji)
///
/// Regional indicators are pairs of characters U+1F1E6-U+1F1FF
/// that combine to form flag emoji (e.g., 🇺🇸 = U+1F1FA + U+1F1F8)
pub fn is_regional_indicator_pair(grapheme: &str) -> bool {
    let is_ri = |c: char| (0x1F1E6..=0x1F1FF).contains(&(c as u32));
    let mut chars = grapheme.chars();
    match (chars.next(), chars.next(), chars.next()) {
        (Some(first), Some(second), None) => is_ri(first) && is_ri(second),
        _ => false,
    }
}

/// Check if a grapheme contains a Zero Width Joiner (ZWJ)
///
/// ZWJ sequences are used for complex emoji like family emoji (👨‍👩‍👧‍👦)
pub fn contains_zwj(grapheme: &str) -> bool {
    grapheme.contains('\u{200D}')
}
