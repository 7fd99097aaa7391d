//! Configuration system for the par-term grid typesetter.
//!
//! This crate provides configuration loading, saving, and default values
//! for the typesetting engine. It includes:
//!
//! - Primary font selection (family, pixel size, line spacing)
//! - Ligature mode selection
//! - Unicode range font overrides and per-script fallback font lists
//! - Empirical glyph nudge offsets for fallback-font/combining-mark pairs
//! - Log level and shaping cache sizing

pub mod config;
pub mod defaults;
mod error;
mod types;

// Re-export main types for convenience
pub use config::Config;
pub use error::ConfigError;
pub use types::{FallbackFonts, FontRange, GlyphNudge, LogLevel};
