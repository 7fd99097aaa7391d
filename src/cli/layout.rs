//! The `layout` command: lay out one row with the real font stack.

use anyhow::{Context, Result};
use par_term_config::Config;
use par_term_fonts::{Font, FontCache, FontData, TextShaper};
use std::fmt::Write as _;
use std::path::PathBuf;
use std::sync::Arc;

use crate::cell::cells_from_text;
use crate::run::{DrawableRun, LayoutParams};
use crate::typesetter::Typesetter;

/// How to print the runs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Options of the `layout` command
#[derive(Debug, Clone, Default)]
pub struct LayoutOptions {
    pub text: String,
    pub start_column: usize,
    pub y: f32,
    /// Foreground color as `0xRRGGBB`
    pub color: u32,
    /// Overrides the config's font family
    pub font_family: Option<String>,
    /// Overrides the config's font size
    pub font_size: Option<f32>,
    /// Primary font file, registered under the primary family name
    pub font_file: Option<PathBuf>,
    /// Overrides the config's ligature mode
    pub ligatures: Option<bool>,
    pub format: OutputFormat,
}

/// Lay out `options.text` and render the runs in the requested format.
pub fn run_layout(options: &LayoutOptions, config: &Config) -> Result<String> {
    let fonts = Arc::new(FontCache::new());
    let mut family = options
        .font_family
        .clone()
        .unwrap_or_else(|| config.font_family.clone());

    if let Some(path) = &options.font_file {
        let data = FontData::from_file(path, 0)
            .with_context(|| format!("Failed to load font file {}", path.display()))?;
        fonts.register(&family, data);
    } else if !fonts.has_family(&family) {
        match fonts.default_monospace_family() {
            Some(monospace) => {
                log::warn!(
                    "Font family {:?} is not installed, using {:?}",
                    family,
                    monospace
                );
                family = monospace;
            }
            None => log::warn!("Font family {:?} is not installed", family),
        }
    }

    let font = Font::new(family, options.font_size.unwrap_or(config.font_size));
    let shaper = TextShaper::with_cache_size(Arc::clone(&fonts), config.shape_cache_size);
    let typesetter = Typesetter::from_config(config, shaper, Arc::clone(&fonts));

    let cells = cells_from_text(&options.text);
    let cell_width = typesetter.cell_width(&font, config.line_spacing);
    let params = LayoutParams::new(options.start_column, options.y, options.color, cell_width);
    let ligatures = options.ligatures.unwrap_or(config.enable_ligatures);
    let runs = typesetter.layout(&cells, &font, &params, ligatures);

    match options.format {
        OutputFormat::Json => {
            serde_json::to_string_pretty(&runs).context("Failed to serialize runs")
        }
        OutputFormat::Text => Ok(format_runs(&runs, cell_width)),
    }
}

/// Human-readable run listing.
pub fn format_runs(runs: &[DrawableRun], cell_width: f32) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "cell width: {cell_width:.3}px, {} runs", runs.len());
    for (i, run) in runs.iter().enumerate() {
        let _ = writeln!(
            out,
            "run {i}: {:?} color=#{:06x} columns={:?} anchor=({:.3}, {:.3})",
            run.font, run.color, run.columns, run.anchor.x, run.anchor.y
        );
        for glyph in &run.glyphs {
            let _ = writeln!(
                out,
                "  glyph {:>5} at ({:.3}, {:.3})",
                glyph.glyph, glyph.position.x, glyph.position.y
            );
        }
    }
    out
}
