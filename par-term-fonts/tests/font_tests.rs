//! Integration tests for par-term-fonts crate.
//!
//! Tests that need real font files use the system monospace font and are
//! skipped (with a note on stderr) on machines without one.

use std::sync::Arc;

use par_term_config::{Config, FontRange, GlyphNudge};
use par_term_fonts::text_shaper::{ShapingOptions, TextShaper};
use par_term_fonts::{
    FallbackTable, Font, FontCache, FontCapabilities, FontData, FontResolver, Nudge, NudgeTable,
    ScriptClass, Shaper, classify, is_default_ignorable,
};

/// Shared cache with the system monospace font, if the machine has one.
fn system_monospace() -> Option<(Arc<FontCache>, Font)> {
    let cache = FontCache::new();
    let Some(family) = cache.default_monospace_family() else {
        eprintln!("skipping: no system monospace font");
        return None;
    };
    if !cache.has_family(&family) {
        eprintln!("skipping: monospace family {family:?} does not load");
        return None;
    }
    Some((Arc::new(cache), Font::new(family, 13.0)))
}

#[test]
fn test_font_data_invalid_bytes() {
    let font_data = FontData::new(vec![0u8; 100]);
    assert!(
        font_data.is_none(),
        "Should return None for invalid font data"
    );
}

#[test]
fn test_font_data_empty_bytes() {
    let font_data = FontData::new(vec![]);
    assert!(font_data.is_none(), "Should return None for empty data");
}

#[test]
fn test_classify_blocks() {
    assert_eq!(classify('a'), ScriptClass::General);
    assert_eq!(classify('한'), ScriptClass::Cjk);
    assert_eq!(classify('漢'), ScriptClass::Cjk);
    assert_eq!(classify('か'), ScriptClass::Cjk);
    assert_eq!(classify('\u{1F600}'), ScriptClass::Emoji);
    assert_eq!(classify('\u{1F1FA}'), ScriptClass::Emoji);
    assert_eq!(classify('\u{10437}'), ScriptClass::General);
}

#[test]
fn test_default_ignorables() {
    assert!(is_default_ignorable('\u{200D}'));
    assert!(is_default_ignorable('\u{FE0F}'));
    assert!(!is_default_ignorable('a'));
    assert!(!is_default_ignorable('\u{0301}'));
}

#[test]
fn test_default_fallback_table_not_empty() {
    let table = FallbackTable::default();
    assert!(!table.families(ScriptClass::Emoji).is_empty());
    assert!(!table.families(ScriptClass::Cjk).is_empty());
    assert!(!table.families(ScriptClass::General).is_empty());
    // Class candidates end with the general list
    let candidates: Vec<_> = table.candidates(ScriptClass::Cjk).collect();
    assert_eq!(
        candidates.len(),
        table.families(ScriptClass::Cjk).len() + table.families(ScriptClass::General).len()
    );
}

#[test]
fn test_resolver_from_config() {
    let mut config = Config::default();
    config.font_ranges.push(FontRange {
        start: 0x2500,
        end: 0x257F,
        font_family: "Box Font".to_string(),
    });
    config.glyph_nudges.push(GlyphNudge {
        font_family: "Monaco".to_string(),
        mark: '\u{034B}',
        x: 0.997,
        y: 0.0,
    });

    let resolver = FontResolver::from_config(&config);
    assert_eq!(resolver.range_fonts('─').count(), 1);
    assert_eq!(
        resolver.nudges().lookup("Monaco", '\u{034B}'),
        Some(Nudge::new(0.997, 0.0))
    );
    assert_eq!(resolver.nudges().len(), 1);
    assert_eq!(
        resolver.fallbacks(),
        &FallbackTable::from_config(&config.fallback_fonts)
    );
}

#[test]
fn test_nudge_pixels_scale_with_cell_width() {
    let mut table = NudgeTable::new();
    table.insert("Monaco", '\u{034B}', Nudge::new(0.5, -0.25));
    let nudge = table.for_cluster("Monaco", "a\u{034B}").unwrap();
    let pixels = nudge.to_pixels(8.0);
    assert_eq!(pixels.x, 4.0);
    assert_eq!(pixels.y, -2.0);
}

#[test]
fn test_text_shaper_creation() {
    let shaper = TextShaper::new(Arc::new(FontCache::empty()));
    assert_eq!(shaper.cache_size(), 0, "New shaper should have empty cache");
}

#[test]
fn test_shaping_options_default() {
    let opts = ShapingOptions::default();
    assert!(opts.enable_ligatures);
    assert!(opts.enable_kerning);
    assert!(opts.enable_contextual_alternates);

    let opts = ShapingOptions::without_ligatures();
    assert!(!opts.enable_ligatures);
    assert!(!opts.enable_contextual_alternates);
}

#[test]
fn test_system_font_metrics() {
    let Some((cache, font)) = system_monospace() else {
        return;
    };
    let metrics = cache.cell_metrics(&font, 1.0).expect("metrics");
    assert!(metrics.cell_width >= 1.0);
    assert!(metrics.cell_height >= metrics.ascent);

    let (width, height) = cache.cell_size(&font, 1.5);
    assert_eq!(width, metrics.cell_width);
    assert!(height > metrics.cell_height);
    assert!(cache.can_render(&font, 'A'));
}

#[test]
fn test_system_font_shaping_indices_are_utf16() {
    let Some((cache, font)) = system_monospace() else {
        return;
    };
    let shaper = TextShaper::new(Arc::clone(&cache));
    let options = ShapingOptions::without_ligatures();

    let glyphs = shaper.shape("Hello", &font, &options);
    assert_eq!(glyphs.len(), 5, "one glyph per ASCII char");
    let indices: Vec<usize> = glyphs.iter().map(|g| g.index).collect();
    assert_eq!(indices, vec![0, 1, 2, 3, 4]);
    // Pen positions accumulate left to right
    assert!(glyphs.windows(2).all(|w| w[1].position.x > w[0].position.x));

    // A supplementary-plane char occupies two UTF-16 units
    let glyphs = shaper.shape("\u{10437}a", &font, &options);
    assert_eq!(glyphs.last().map(|g| g.index), Some(2));
}

#[test]
fn test_system_font_shaping_cache() {
    let Some((cache, font)) = system_monospace() else {
        return;
    };
    let shaper = TextShaper::new(cache);
    let options = ShapingOptions::default();

    let first = shaper.shape_text("test", &font, &options);
    assert_eq!(shaper.cache_size(), 1, "Should have 1 cached entry");
    let second = shaper.shape_text("test", &font, &options);
    assert!(Arc::ptr_eq(&first, &second), "Cache hit returns the same glyphs");
    assert_eq!(shaper.cache_size(), 1);

    // Different options are a different entry
    shaper.shape_text("test", &font, &ShapingOptions::without_ligatures());
    assert_eq!(shaper.cache_size(), 2);

    shaper.clear_cache();
    assert_eq!(shaper.cache_size(), 0, "Cache should be empty after clear");
}

#[test]
fn test_registered_font_data_is_served() {
    let Some((cache, font)) = system_monospace() else {
        return;
    };
    let data = cache.face_data(font.family()).expect("font data");

    let other = FontCache::empty();
    other.register("Registered", (*data).clone());
    let registered = Font::new("Registered", 13.0);
    assert!(other.can_render(&registered, 'A'));
    assert_eq!(
        other.cell_metrics(&registered, 1.0),
        cache.cell_metrics(&font, 1.0)
    );
}
