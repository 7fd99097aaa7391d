//! Font-related configuration types.

use serde::{Deserialize, Serialize};

/// Font mapping for a specific Unicode range.
///
/// Range fonts are consulted before the per-script fallback lists, so a user
/// can pin e.g. box drawing or Nerd Font icons to a specific family.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontRange {
    /// Start of Unicode range (inclusive), e.g., 0x4E00 for CJK
    pub start: u32,
    /// End of Unicode range (inclusive), e.g., 0x9FFF for CJK
    pub end: u32,
    /// Font family name to use for this range
    pub font_family: String,
}

impl FontRange {
    /// Whether `c` falls inside this range.
    pub fn contains(&self, c: char) -> bool {
        (self.start..=self.end).contains(&(c as u32))
    }
}

/// Ordered fallback font families per script class.
///
/// Each list is tried in order; the first family that can render every
/// codepoint of a grapheme cluster wins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FallbackFonts {
    /// Emoji and pictograph fallbacks
    #[serde(default = "crate::defaults::emoji_fallbacks")]
    pub emoji: Vec<String>,

    /// Hangul, Han/Hanja and Kana fallbacks
    #[serde(default = "crate::defaults::cjk_fallbacks")]
    pub cjk: Vec<String>,

    /// Everything else (serif/general coverage fonts)
    #[serde(default = "crate::defaults::general_fallbacks")]
    pub general: Vec<String>,
}

impl Default for FallbackFonts {
    fn default() -> Self {
        Self {
            emoji: crate::defaults::emoji_fallbacks(),
            cjk: crate::defaults::cjk_fallbacks(),
            general: crate::defaults::general_fallbacks(),
        }
    }
}

/// Empirical position correction for a combining mark drawn with a fallback font.
///
/// Offsets are expressed in cell-width units so they survive font size
/// changes. They depend on the platform's font versions and must be measured
/// against the installed font stack.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlyphNudge {
    /// Family the mark glyph is rendered with
    pub font_family: String,
    /// The combining mark the correction applies to
    pub mark: char,
    /// Horizontal offset in cell widths
    #[serde(default)]
    pub x: f32,
    /// Vertical offset in cell widths
    #[serde(default)]
    pub y: f32,
}
