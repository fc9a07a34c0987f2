use geo::{Distance, HaversineMeasure, Point};

use crate::models::GeoPoint;

/// Mean Earth radius used for all map distances.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

const EARTH: HaversineMeasure = HaversineMeasure::new(EARTH_RADIUS_KM * 1000.0);

/// Great-circle distance in kilometres (haversine formula).
pub fn haversine_km(a: &GeoPoint, b: &GeoPoint) -> f64 {
    let from = Point::new(a.longitude, a.latitude);
    let to = Point::new(b.longitude, b.latitude);
    EARTH.distance(from, to) / 1000.0
}
