//! Default value functions for configuration.
//!
//! Each sub-module groups related free functions used as
//! `#[serde(default = "crate::defaults::...")]` attributes on `Config` fields.

mod font;
mod misc;

// ── Font & text layout ─────────────────────────────────────────────────────
pub use font::{
    cjk_fallbacks, emoji_fallbacks, enable_ligatures, font_family, font_size, general_fallbacks,
    line_spacing,
};

// ── Caching & diagnostics ──────────────────────────────────────────────────
pub use misc::{log_level, shape_cache_size};
