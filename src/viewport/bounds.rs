use serde::{Deserialize, Serialize};

use crate::models::GeoPoint;

/// Axis-aligned latitude/longitude box.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Bounds {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

impl Bounds {
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a GeoPoint>) -> Option<Self> {
        points.into_iter().fold(None, |acc, p| {
            Some(match acc {
                None => Self {
                    min_lat: p.latitude,
                    max_lat: p.latitude,
                    min_lon: p.longitude,
                    max_lon: p.longitude,
                },
                Some(b) => Self {
                    min_lat: b.min_lat.min(p.latitude),
                    max_lat: b.max_lat.max(p.latitude),
                    min_lon: b.min_lon.min(p.longitude),
                    max_lon: b.max_lon.max(p.longitude),
                },
            })
        })
    }

    pub fn center(&self) -> GeoPoint {
        GeoPoint::new(
            (self.min_lat + self.max_lat) / 2.0,
            (self.min_lon + self.max_lon) / 2.0,
        )
    }

    pub fn lat_span(&self) -> f64 {
        self.max_lat - self.min_lat
    }

    pub fn lon_span(&self) -> f64 {
        self.max_lon - self.min_lon
    }

    pub fn contains(&self, point: &GeoPoint) -> bool {
        (self.min_lat..=self.max_lat).contains(&point.latitude)
            && (self.min_lon..=self.max_lon).contains(&point.longitude)
    }
}
