//! Per-cluster font resolution.
//!
//! Given a grapheme cluster and the preferred font, pick the font that will
//! render it and the nudge to apply to its combining marks. Resolution is pure:
//! the same cluster, preferred font and capability oracle always produce the
//! same answer.

use std::ops::RangeInclusive;
use std::sync::Arc;

use par_term_config::{Config, FontRange};

use crate::capabilities::FontCapabilities;
use crate::font_manager::{FallbackTable, Font, Nudge, NudgeTable, classify, is_default_ignorable};

/// The font chosen for a grapheme cluster.
#[derive(Debug, Clone, PartialEq)]
pub struct FontResolution {
    pub font: Font,
    /// Correction for the cluster's combining marks, in cell-width units
    pub nudge: Option<Nudge>,
}

/// Picks a font for each grapheme cluster.
#[derive(Debug, Clone, Default)]
pub struct FontResolver {
    range_fonts: Vec<(RangeInclusive<u32>, Arc<str>)>,
    fallbacks: FallbackTable,
    nudges: NudgeTable,
}

impl FontResolver {
    pub fn new(range_fonts: &[FontRange], fallbacks: FallbackTable, nudges: NudgeTable) -> Self {
        let range_fonts = range_fonts
            .iter()
            .map(|range| (range.start..=range.end, Arc::from(range.font_family.as_str())))
            .collect();
        Self {
            range_fonts,
            fallbacks,
            nudges,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            &config.font_ranges,
            FallbackTable::from_config(&config.fallback_fonts),
            NudgeTable::from_config(&config.glyph_nudges),
        )
    }

    pub fn fallbacks(&self) -> &FallbackTable {
        &self.fallbacks
    }

    pub fn nudges(&self) -> &NudgeTable {
        &self.nudges
    }

    /// Range-font families that contain `c`, in configuration order.
    pub fn range_fonts(&self, c: char) -> impl Iterator<Item = &Arc<str>> {
        self.range_fonts
            .iter()
            .filter(move |(range, _)| range.contains(&(c as u32)))
            .map(|(_, family)| family)
    }

    /// Resolve the font for `cluster`, preferring `preferred`.
    pub fn resolve<C>(&self, caps: &C, cluster: &str, preferred: &Font) -> FontResolution
    where
        C: FontCapabilities + ?Sized,
    {
        let Some(missing) = first_uncovered(caps, preferred, cluster) else {
            return self.resolution(preferred.clone(), cluster);
        };

        let class = classify(missing);
        let mut tried: Vec<&Arc<str>> = Vec::new();
        let candidates = self
            .range_fonts(missing)
            .chain(self.fallbacks.candidates(class));

        for family in candidates {
            if family.as_ref() == preferred.family() || tried.contains(&family) {
                continue;
            }
            tried.push(family);

            let candidate = preferred.with_family(Arc::clone(family));
            if first_uncovered(caps, &candidate, cluster).is_none() {
                log::trace!(
                    "Cluster {:?} ({:?}) falls back to {:?}",
                    cluster,
                    class,
                    candidate
                );
                return self.resolution(candidate, cluster);
            }
        }

        log::debug!(
            "No fallback font covers {:?} (U+{:04X}), using {:?}",
            cluster,
            missing as u32,
            preferred
        );
        self.resolution(preferred.clone(), cluster)
    }

    fn resolution(&self, font: Font, cluster: &str) -> FontResolution {
        let nudge = self.nudges.for_cluster(font.family(), cluster);
        FontResolution { font, nudge }
    }
}

/// The first codepoint of `cluster` that `font` cannot render, ignoring
/// default-ignorable codepoints.
fn first_uncovered<C>(caps: &C, font: &Font, cluster: &str) -> Option<char>
where
    C: FontCapabilities + ?Sized,
{
    cluster
        .chars()
        .filter(|&c| !is_default_ignorable(c))
        .find(|&c| !caps.can_render(font, c))
}
