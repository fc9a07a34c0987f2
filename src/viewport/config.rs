use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

use super::locale::{default_regions, RegionDefault};

/// Spans of at least `min_span_deg` degrees of latitude open at `zoom`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SpanZoom {
    pub min_span_deg: f64,
    pub zoom: f64,
}

/// Tunables for picking the initial camera.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct ViewportConfig {
    /// Zoom when centering on the device ("neighborhood").
    pub device_zoom: f64,

    /// Zoom when exactly one entry has a location ("street").
    pub single_entry_zoom: f64,

    /// Bounding box growth so pins do not touch the edge.
    pub margin_factor: f64,

    /// Lower bound for a span after the margin is applied.
    pub min_span_deg: f64,

    /// Descending by `min_span_deg`; first match wins.
    pub span_zoom_table: Vec<SpanZoom>,

    /// Locale fallbacks, evaluated top-to-bottom.
    pub regions: Vec<RegionDefault>,
}

const DEFAULT_SPAN_TABLE: [(f64, f64); 13] = [
    (90.0, 2.0),
    (45.0, 3.0),
    (20.0, 4.0),
    (10.0, 5.0),
    (5.0, 6.0),
    (2.5, 7.0),
    (1.0, 8.0),
    (0.5, 9.0),
    (0.25, 10.0),
    (0.1, 11.0),
    (0.05, 12.0),
    (0.02, 13.0),
    (0.0, 14.0),
];

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            device_zoom: 8.0,
            single_entry_zoom: 14.0,
            margin_factor: 1.3,
            min_span_deg: 0.01,
            span_zoom_table: DEFAULT_SPAN_TABLE
                .iter()
                .map(|&(min_span_deg, zoom)| SpanZoom { min_span_deg, zoom })
                .collect(),
            regions: default_regions(),
        }
    }
}

impl ViewportConfig {
    /// Larger span, lower zoom. Falls back to the street zoom when a custom
    /// table has no catch-all row.
    pub fn zoom_for_span(&self, span_deg: f64) -> f64 {
        let span = span_deg.max(self.min_span_deg);
        self.span_zoom_table
            .iter()
            .find(|row| span >= row.min_span_deg)
            .map(|row| row.zoom)
            .unwrap_or(self.single_entry_zoom)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.margin_factor.is_finite() && self.margin_factor >= 1.0) {
            bail!("margin_factor must be at least 1.0, got {}", self.margin_factor);
        }
        if !(self.min_span_deg.is_finite() && self.min_span_deg > 0.0) {
            bail!("min_span_deg must be positive, got {}", self.min_span_deg);
        }
        if !self.device_zoom.is_finite() || !self.single_entry_zoom.is_finite() {
            bail!("zoom levels must be finite");
        }
        for pair in self.span_zoom_table.windows(2) {
            if pair[1].min_span_deg >= pair[0].min_span_deg {
                bail!(
                    "span table must be sorted by descending span ({} after {})",
                    pair[1].min_span_deg,
                    pair[0].min_span_deg
                );
            }
            if pair[1].zoom < pair[0].zoom {
                bail!("span table zoom must not decrease with span");
            }
        }
        Ok(())
    }
}
