use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

/// One row of the zoom threshold table: zoom levels strictly below
/// `below_zoom` cluster at `threshold_km`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ZoomThreshold {
    pub below_zoom: f64,
    pub threshold_km: f64,
}

/// Configuration for the clustering pass with tunable thresholds.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct ClusterConfig {
    /// Rows evaluated top-to-bottom; first row whose `below_zoom` exceeds the
    /// zoom wins.
    pub thresholds: Vec<ZoomThreshold>,

    /// Threshold once zoom is past the last row.
    pub floor_km: f64,

    /// Joins sorted member ids into the cluster id.
    pub id_separator: String,
}

const DEFAULT_THRESHOLDS: [(f64, f64); 8] = [
    (3.0, 1000.0),
    (5.0, 500.0),
    (7.0, 200.0),
    (9.0, 100.0),
    (11.0, 50.0),
    (13.0, 25.0),
    (15.0, 10.0),
    (17.0, 5.0),
];

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            thresholds: DEFAULT_THRESHOLDS
                .iter()
                .map(|&(below_zoom, threshold_km)| ZoomThreshold {
                    below_zoom,
                    threshold_km,
                })
                .collect(),
            floor_km: 1.0,
            id_separator: "-".into(),
        }
    }
}

impl ClusterConfig {
    /// Aggregation distance for a zoom level. Lower zoom never yields a
    /// smaller threshold. NaN maps to the floor.
    pub fn threshold_km(&self, zoom: f64) -> f64 {
        if zoom.is_nan() {
            return self.floor_km;
        }
        self.thresholds
            .iter()
            .find(|row| zoom < row.below_zoom)
            .map(|row| row.threshold_km)
            .unwrap_or(self.floor_km)
    }

    /// Reject tables that would break monotonic aggregation.
    pub fn validate(&self) -> Result<()> {
        if !(self.floor_km.is_finite() && self.floor_km > 0.0) {
            bail!("floor_km must be positive, got {}", self.floor_km);
        }
        if self.id_separator.is_empty() {
            bail!("id_separator must not be empty");
        }

        for row in &self.thresholds {
            if !(row.threshold_km.is_finite() && row.threshold_km > 0.0) {
                bail!("threshold_km must be positive, got {}", row.threshold_km);
            }
            if !row.below_zoom.is_finite() {
                bail!("below_zoom must be finite");
            }
        }

        for pair in self.thresholds.windows(2) {
            if pair[1].below_zoom <= pair[0].below_zoom {
                bail!(
                    "threshold table must be sorted by zoom ({} after {})",
                    pair[1].below_zoom,
                    pair[0].below_zoom
                );
            }
            if pair[1].threshold_km > pair[0].threshold_km {
                bail!(
                    "threshold must not grow with zoom ({}km after {}km)",
                    pair[1].threshold_km,
                    pair[0].threshold_km
                );
            }
        }

        if let Some(last) = self.thresholds.last() {
            if self.floor_km > last.threshold_km {
                bail!("floor_km {} exceeds last threshold {}", self.floor_km, last.threshold_km);
            }
        }

        Ok(())
    }
}
