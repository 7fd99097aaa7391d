//! Declarative fallback font table.
//!
//! Uncovered codepoints are classified by Unicode block into a script class,
//! and each class maps to an ordered list of candidate families. The table is
//! plain data; the [`crate::FontResolver`] walks it.

use std::sync::Arc;

use par_term_config::FallbackFonts;

/// Script classes with their own fallback lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScriptClass {
    /// Emoji, pictographs, regional indicators, skin tone modifiers
    Emoji,
    /// Hangul, Han/Hanja, Kana and CJK symbols
    Cjk,
    /// Everything else
    General,
}

/// Emoji and pictograph blocks (inclusive).
const EMOJI_RANGES: &[(u32, u32)] = &[
    (0x2600, 0x27BF),   // Miscellaneous Symbols, Dingbats
    (0x2B00, 0x2BFF),   // Miscellaneous Symbols and Arrows
    (0x1F000, 0x1F0FF), // Mahjong, Domino, Playing Cards
    (0x1F100, 0x1F1FF), // Enclosed Alphanumeric Supplement (incl. regional indicators)
    (0x1F300, 0x1F5FF), // Miscellaneous Symbols and Pictographs (incl. Fitzpatrick modifiers)
    (0x1F600, 0x1F64F), // Emoticons
    (0x1F680, 0x1F6FF), // Transport and Map Symbols
    (0x1F700, 0x1F7FF), // Alchemical Symbols, Geometric Shapes Extended
    (0x1F900, 0x1F9FF), // Supplemental Symbols and Pictographs
    (0x1FA70, 0x1FAFF), // Symbols and Pictographs Extended-A
];

/// Hangul, Han and Kana blocks (inclusive).
const CJK_RANGES: &[(u32, u32)] = &[
    (0x1100, 0x11FF),   // Hangul Jamo
    (0x2E80, 0x2FDF),   // CJK Radicals Supplement, Kangxi Radicals
    (0x3000, 0x303F),   // CJK Symbols and Punctuation
    (0x3040, 0x30FF),   // Hiragana, Katakana
    (0x3100, 0x312F),   // Bopomofo
    (0x3130, 0x318F),   // Hangul Compatibility Jamo
    (0x3190, 0x31FF),   // Kanbun .. Katakana Phonetic Extensions
    (0x3200, 0x33FF),   // Enclosed CJK Letters, CJK Compatibility
    (0x3400, 0x4DBF),   // CJK Unified Ideographs Extension A
    (0x4E00, 0x9FFF),   // CJK Unified Ideographs
    (0xA960, 0xA97F),   // Hangul Jamo Extended-A
    (0xAC00, 0xD7AF),   // Hangul Syllables
    (0xD7B0, 0xD7FF),   // Hangul Jamo Extended-B
    (0xF900, 0xFAFF),   // CJK Compatibility Ideographs (Hanja)
    (0xFF00, 0xFFEF),   // Halfwidth and Fullwidth Forms
    (0x20000, 0x2FA1F), // CJK Extensions B-F, Compatibility Supplement
    (0x30000, 0x3134F), // CJK Extension G
];

fn in_ranges(ranges: &[(u32, u32)], c: char) -> bool {
    let code = c as u32;
    ranges
        .iter()
        .any(|&(start, end)| (start..=end).contains(&code))
}

/// Classify a codepoint by Unicode block.
pub fn classify(c: char) -> ScriptClass {
    if in_ranges(EMOJI_RANGES, c) {
        ScriptClass::Emoji
    } else if in_ranges(CJK_RANGES, c) {
        ScriptClass::Cjk
    } else {
        ScriptClass::General
    }
}

/// Codepoints that never need a glyph of their own (joiners, variation
/// selectors, tags). They must not trigger a fallback by themselves.
pub fn is_default_ignorable(c: char) -> bool {
    matches!(
        c as u32,
        0x00AD
            | 0x034F
            | 0x200B..=0x200F
            | 0x2060..=0x2064
            | 0xFE00..=0xFE0F
            | 0xFEFF
            | 0xE0000..=0xE0FFF
    )
}

/// Ordered candidate families per script class.
#[derive(Debug, Clone, PartialEq)]
pub struct FallbackTable {
    emoji: Vec<Arc<str>>,
    cjk: Vec<Arc<str>>,
    general: Vec<Arc<str>>,
}

impl FallbackTable {
    pub fn new(emoji: &[String], cjk: &[String], general: &[String]) -> Self {
        let to_arcs = |families: &[String]| -> Vec<Arc<str>> {
            families.iter().map(|f| Arc::from(f.as_str())).collect()
        };
        Self {
            emoji: to_arcs(emoji),
            cjk: to_arcs(cjk),
            general: to_arcs(general),
        }
    }

    pub fn from_config(fonts: &FallbackFonts) -> Self {
        Self::new(&fonts.emoji, &fonts.cjk, &fonts.general)
    }

    /// Families listed for exactly `class`.
    pub fn families(&self, class: ScriptClass) -> &[Arc<str>] {
        match class {
            ScriptClass::Emoji => &self.emoji,
            ScriptClass::Cjk => &self.cjk,
            ScriptClass::General => &self.general,
        }
    }

    /// Families to try for `class`: its own list, then the general list.
    pub fn candidates(&self, class: ScriptClass) -> impl Iterator<Item = &Arc<str>> {
        let general: &[Arc<str>] = if class == ScriptClass::General {
            &[]
        } else {
            &self.general
        };
        self.families(class).iter().chain(general)
    }
}

impl Default for FallbackTable {
    fn default() -> Self {
        Self::from_config(&FallbackFonts::default())
    }
}
