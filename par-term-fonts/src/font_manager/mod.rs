//! Font data, fallback tables and the process-wide font/metrics cache.
//!
//! This module provides:
//! - `Font` / `FontData` / `CellMetrics` value types
//! - The declarative per-script fallback table and glyph nudge table
//! - `FontCache`, a read-through cache over the system font database

mod fallbacks;
mod loader;
mod nudges;
mod types;

use std::collections::HashMap;
use std::sync::Arc;

use fontdb::Database;
use parking_lot::{RwLock, RwLockUpgradableReadGuard};

use crate::capabilities::FontCapabilities;

pub use fallbacks::{FallbackTable, ScriptClass, classify, is_default_ignorable};
pub use nudges::{Nudge, NudgeTable};
pub use types::{CellMetrics, Font, FontData};

/// Metrics cache key: family, size bits, line spacing bits.
type MetricsKey = (Arc<str>, u32, u32);

/// Process-wide read-through cache of font data and cell metrics.
///
/// Entries are populated lazily on the first request for a family (or a
/// family/size/spacing triple for metrics), misses included, and are never
/// evicted. A miss takes the upgradable lock, so only one thread loads at a
/// time while plain readers of populated entries proceed in parallel.
///
/// Construct one per process and share it (`Arc<FontCache>`) between the
/// typesetter and the shaper.
pub struct FontCache {
    /// Font database for system font queries
    font_db: Database,

    /// Loaded faces by family name (`None` records a miss)
    faces: RwLock<HashMap<Arc<str>, Option<Arc<FontData>>>>,

    /// Cell metrics by family/size/spacing
    metrics: RwLock<HashMap<MetricsKey, Option<CellMetrics>>>,
}

impl FontCache {
    /// Create a cache backed by the system fonts.
    pub fn new() -> Self {
        let mut font_db = Database::new();
        font_db.load_system_fonts();
        log::info!("Loaded {} system fonts", font_db.len());
        Self::with_database(font_db)
    }

    /// Create a cache backed by a prepared font database.
    pub fn with_database(font_db: Database) -> Self {
        Self {
            font_db,
            faces: RwLock::new(HashMap::new()),
            metrics: RwLock::new(HashMap::new()),
        }
    }

    /// Create a cache with no fonts at all; populate it with `register`.
    pub fn empty() -> Self {
        Self::with_database(Database::new())
    }

    /// Pre-populate (or replace) the entry for `family`.
    pub fn register(&self, family: &str, data: FontData) {
        log::info!("Registered font data for '{}'", family);
        self.faces
            .write()
            .insert(Arc::from(family), Some(Arc::new(data)));
        self.metrics
            .write()
            .retain(|(cached_family, _, _), _| cached_family.as_ref() != family);
    }

    /// Font data for `family`, loading it from the database on first request.
    pub fn face_data(&self, family: &str) -> Option<Arc<FontData>> {
        if let Some(entry) = self.faces.read().get(family) {
            return entry.clone();
        }

        // Another thread may have loaded it between the two locks
        let faces = self.faces.upgradable_read();
        if let Some(entry) = faces.get(family) {
            return entry.clone();
        }

        let mut faces = RwLockUpgradableReadGuard::upgrade(faces);
        let loaded = loader::load_font_from_db(&self.font_db, family).map(Arc::new);
        match &loaded {
            Some(data) => log::info!("Loaded font '{}' ({:?})", family, data),
            None => log::debug!("Font '{}' not found in font database", family),
        }
        faces.insert(Arc::from(family), loaded.clone());
        loaded
    }

    /// Whether `family` resolves to a loadable face.
    pub fn has_family(&self, family: &str) -> bool {
        self.face_data(family).is_some()
    }

    /// The first family in `families` that resolves to a loadable face.
    pub fn first_available<'a>(&self, families: &[&'a str]) -> Option<&'a str> {
        families.iter().copied().find(|family| self.has_family(family))
    }

    /// The family the font database uses for generic monospace text.
    pub fn default_monospace_family(&self) -> Option<String> {
        loader::default_monospace_family(&self.font_db)
    }

    /// Cell metrics of `font` at `line_spacing`, computed on first request.
    pub fn cell_metrics(&self, font: &Font, line_spacing: f32) -> Option<CellMetrics> {
        let key: MetricsKey = (
            Arc::from(font.family()),
            font.size().to_bits(),
            line_spacing.to_bits(),
        );
        if let Some(entry) = self.metrics.read().get(&key) {
            return *entry;
        }

        let computed = self
            .face_data(font.family())
            .and_then(|data| data.cell_metrics(font.size(), line_spacing));
        log::debug!(
            "Cell metrics for {:?} at spacing {}: {:?}",
            font,
            line_spacing,
            computed
        );
        *self.metrics.write().entry(key).or_insert(computed)
    }

    /// Number of families requested so far (hits and misses).
    pub fn cached_family_count(&self) -> usize {
        self.faces.read().len()
    }
}

impl Default for FontCache {
    fn default() -> Self {
        Self::new()
    }
}

impl FontCapabilities for FontCache {
    fn can_render(&self, font: &Font, c: char) -> bool {
        self.face_data(font.family())
            .is_some_and(|data| data.glyph_id(c) != 0)
    }

    fn cell_size(&self, font: &Font, line_spacing: f32) -> (f32, f32) {
        match self.cell_metrics(font, line_spacing) {
            Some(metrics) => (metrics.cell_width, metrics.cell_height),
            None => {
                // Rough monospace proportions when the font is unavailable
                let width = (font.size() * 0.6).max(1.0);
                let height = (font.size() * 1.2 * line_spacing).max(1.0);
                (width, height)
            }
        }
    }
}
