//! Font identity, owned font data and cell metrics.

use serde::Serialize;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::path::Path;
use std::sync::Arc;
use swash::FontRef;

use crate::error::FontError;

/// A font family at a pixel size.
///
/// Cheap to clone; used as the font identity throughout the layout pipeline
/// and as a cache key. Sizes compare by bit pattern.
#[derive(Clone, Serialize)]
pub struct Font {
    family: Arc<str>,
    size: f32,
}

impl Font {
    pub fn new(family: impl Into<Arc<str>>, size: f32) -> Self {
        Self {
            family: family.into(),
            size,
        }
    }

    pub fn family(&self) -> &str {
        &self.family
    }

    /// Font size in pixels
    pub fn size(&self) -> f32 {
        self.size
    }

    /// The same size in another family.
    pub fn with_family(&self, family: Arc<str>) -> Self {
        Self {
            family,
            size: self.size,
        }
    }
}

impl PartialEq for Font {
    fn eq(&self, other: &Self) -> bool {
        self.family == other.family && self.size.to_bits() == other.size.to_bits()
    }
}

impl Eq for Font {}

impl Hash for Font {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.family.hash(state);
        self.size.to_bits().hash(state);
    }
}

impl fmt::Debug for Font {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Font({:?} {}px)", self.family, self.size)
    }
}

/// Owned font bytes (TTF/OTF/TTC) plus the face index inside them.
///
/// The bytes are validated once at construction; `font_ref` and `face` borrow
/// from them on demand.
#[derive(Clone)]
pub struct FontData {
    /// Raw font data bytes
    pub data: Arc<Vec<u8>>,
    /// Face index within the data (0 for single-face fonts)
    pub face_index: u32,
}

impl fmt::Debug for FontData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FontData")
            .field("data_len", &self.data.len())
            .field("face_index", &self.face_index)
            .finish()
    }
}

impl FontData {
    /// Create a new FontData from bytes using face index 0.
    ///
    /// Returns `None` if the bytes are not a parsable font.
    pub fn new(data: Vec<u8>) -> Option<Self> {
        Self::new_with_index(data, 0)
    }

    /// Create a new FontData from bytes with a specific face index.
    ///
    /// This is needed for TrueType Collection (.ttc) files where multiple
    /// font faces share the same data but have different face indices.
    pub fn new_with_index(data: Vec<u8>, face_index: u32) -> Option<Self> {
        FontRef::from_index(&data, face_index as usize)?;
        Some(Self {
            data: Arc::new(data),
            face_index,
        })
    }

    /// Read a font file from disk.
    pub fn from_file(path: &Path, face_index: u32) -> Result<Self, FontError> {
        let data = std::fs::read(path).map_err(|source| FontError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::new_with_index(data, face_index).ok_or_else(|| FontError::InvalidFontData {
            path: path.to_path_buf(),
            face_index,
        })
    }

    /// Swash font reference for charmap and metric queries.
    pub fn font_ref(&self) -> Option<FontRef<'_>> {
        FontRef::from_index(&self.data, self.face_index as usize)
    }

    /// rustybuzz face for shaping.
    pub fn face(&self) -> Option<rustybuzz::Face<'_>> {
        rustybuzz::Face::from_slice(&self.data, self.face_index)
    }

    /// Glyph ID for `c`, or 0 (`.notdef`) when the font lacks it.
    pub fn glyph_id(&self, c: char) -> u16 {
        self.font_ref().map_or(0, |font| font.charmap().map(c))
    }

    /// Compute cell metrics at `size` pixels.
    ///
    /// The cell width is the advance of `'m'`; the height is the natural line
    /// height scaled by `line_spacing`. Both are at least one pixel.
    pub fn cell_metrics(&self, size: f32, line_spacing: f32) -> Option<CellMetrics> {
        let font_ref = self.font_ref()?;
        let metrics = font_ref.metrics(&[]);
        if metrics.units_per_em == 0 {
            return None;
        }
        let scale = size / metrics.units_per_em as f32;

        let ascent = metrics.ascent * scale;
        let descent = metrics.descent * scale;
        let leading = metrics.leading * scale;

        let glyph_id = font_ref.charmap().map('m');
        let char_advance = font_ref.glyph_metrics(&[]).advance_width(glyph_id) * scale;

        Some(CellMetrics {
            cell_width: char_advance.max(1.0),
            cell_height: ((ascent + descent + leading) * line_spacing).max(1.0),
            ascent,
            descent,
            leading,
        })
    }
}

/// Grid cell metrics derived from a font.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellMetrics {
    /// Width of a single cell in pixels
    pub cell_width: f32,
    /// Height of a single cell in pixels
    pub cell_height: f32,
    /// Font ascent (distance from baseline to top)
    pub ascent: f32,
    /// Font descent (distance from baseline to bottom)
    pub descent: f32,
    /// Font leading (extra line spacing)
    pub leading: f32,
}
