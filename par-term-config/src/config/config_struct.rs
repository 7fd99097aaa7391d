//! `Config`: the typesetter's top-level configuration struct.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::types::{FallbackFonts, FontRange, GlyphNudge, LogLevel};

/// Typesetter configuration loaded from `config.yaml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Primary (preferred) font family
    #[serde(default = "crate::defaults::font_family")]
    pub font_family: String,

    /// Font size in pixels
    #[serde(default = "crate::defaults::font_size")]
    pub font_size: f32,

    /// Line height multiplier (1.0 = natural font line height)
    #[serde(default = "crate::defaults::line_spacing")]
    pub line_spacing: f32,

    /// Use the ligature-aware typesetter (shaped runs) instead of per-cell layout
    #[serde(default = "crate::defaults::enable_ligatures")]
    pub enable_ligatures: bool,

    /// Unicode range-specific font overrides, checked before the fallback lists
    #[serde(default)]
    pub font_ranges: Vec<FontRange>,

    /// Per-script fallback font lists
    #[serde(default)]
    pub fallback_fonts: FallbackFonts,

    /// Measured nudge offsets for fallback-font/combining-mark pairs
    #[serde(default)]
    pub glyph_nudges: Vec<GlyphNudge>,

    /// Number of shaped strings kept by the shaping cache
    #[serde(default = "crate::defaults::shape_cache_size")]
    pub shape_cache_size: usize,

    /// Debug log verbosity
    #[serde(default = "crate::defaults::log_level")]
    pub log_level: LogLevel,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            font_family: crate::defaults::font_family(),
            font_size: crate::defaults::font_size(),
            line_spacing: crate::defaults::line_spacing(),
            enable_ligatures: crate::defaults::enable_ligatures(),
            font_ranges: Vec::new(),
            fallback_fonts: FallbackFonts::default(),
            glyph_nudges: Vec::new(),
            shape_cache_size: crate::defaults::shape_cache_size(),
            log_level: crate::defaults::log_level(),
        }
    }
}

impl Config {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the primary font family
    pub fn with_font_family(mut self, family: impl Into<String>) -> Self {
        self.font_family = family.into();
        self
    }

    /// Set the font size in pixels
    pub fn with_font_size(mut self, size: f32) -> Self {
        self.font_size = size;
        self
    }

    /// Enable or disable the ligature-aware typesetter
    pub fn with_ligatures(mut self, enabled: bool) -> Self {
        self.enable_ligatures = enabled;
        self
    }

    /// Check semantic constraints serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.font_family.trim().is_empty() {
            return Err(ConfigError::Validation(
                "font_family must not be empty".to_string(),
            ));
        }
        if !(self.font_size.is_finite() && self.font_size > 0.0) {
            return Err(ConfigError::Validation(format!(
                "font_size must be a positive number, got {}",
                self.font_size
            )));
        }
        if !(self.line_spacing.is_finite() && self.line_spacing > 0.0) {
            return Err(ConfigError::Validation(format!(
                "line_spacing must be a positive number, got {}",
                self.line_spacing
            )));
        }
        for range in &self.font_ranges {
            if range.start > range.end {
                return Err(ConfigError::Validation(format!(
                    "font range U+{:04X}-U+{:04X} ({}) is inverted",
                    range.start, range.end, range.font_family
                )));
            }
        }
        for nudge in &self.glyph_nudges {
            if !(nudge.x.is_finite() && nudge.y.is_finite()) {
                return Err(ConfigError::Validation(format!(
                    "glyph nudge for U+{:04X} in '{}' is not finite",
                    nudge.mark as u32, nudge.font_family
                )));
            }
        }
        Ok(())
    }
}
