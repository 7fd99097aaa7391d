//! Configuration value types shared with the font and typesetting crates.

mod font;
mod logging;

pub use font::{FallbackFonts, FontRange, GlyphNudge};
pub use logging::LogLevel;
