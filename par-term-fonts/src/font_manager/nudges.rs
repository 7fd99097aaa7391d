//! Empirical position corrections for combining marks drawn with fallback fonts.

use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;

use par_term_config::GlyphNudge;

use crate::capabilities::Point;

/// A small positional correction in cell-width units.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Nudge {
    pub x: f32,
    pub y: f32,
}

impl Nudge {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// The correction in pixels for a grid with `cell_width`.
    pub fn to_pixels(self, cell_width: f32) -> Point {
        Point::new(self.x * cell_width, self.y * cell_width)
    }
}

/// Lookup table keyed by (font family, combining mark).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NudgeTable {
    entries: HashMap<Arc<str>, HashMap<char, Nudge>>,
}

impl NudgeTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(nudges: &[GlyphNudge]) -> Self {
        let mut table = Self::new();
        for nudge in nudges {
            table.insert(&nudge.font_family, nudge.mark, Nudge::new(nudge.x, nudge.y));
        }
        table
    }

    pub fn insert(&mut self, family: &str, mark: char, nudge: Nudge) {
        self.entries
            .entry(Arc::from(family))
            .or_default()
            .insert(mark, nudge);
    }

    pub fn lookup(&self, family: &str, mark: char) -> Option<Nudge> {
        self.entries.get(family)?.get(&mark).copied()
    }

    /// Nudge for the first mark of `cluster` (characters after the base) that
    /// has an entry for `family`.
    pub fn for_cluster(&self, family: &str, cluster: &str) -> Option<Nudge> {
        let marks = self.entries.get(family)?;
        cluster.chars().skip(1).find_map(|c| marks.get(&c).copied())
    }

    pub fn len(&self) -> usize {
        self.entries.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
