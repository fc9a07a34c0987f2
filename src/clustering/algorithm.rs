use crate::clustering::config::ClusterConfig;
use crate::clustering::distance::haversine_km;
use crate::models::{Cluster, Entry, GeoPoint};

// Set to true to enable verbose logging in this module
const ENABLE_LOGS: bool = true;

use crate::log_debug;

/// An entry paired with its (present) location.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Located<'a> {
    pub point: GeoPoint,
    pub entry: &'a Entry,
}

/// Cluster with the default threshold table.
pub fn cluster(entries: &[Entry], zoom: f64) -> Vec<Cluster> {
    cluster_entries(entries, zoom, &ClusterConfig::default())
}

/// Main clustering function: greedy single-pass seeding.
///
/// Each seed absorbs every remaining entry strictly closer than the zoom's
/// threshold. Absorbed entries do not seed further expansion, so two
/// entries can end up in different clusters even when a chain of close
/// neighbours links them. Located entries are seeded in ascending id order.
///
/// Zooming out only approximately reduces the cluster count: in some 2-D
/// layouts a larger radius lets an early seed take part of a neighbour's
/// group and the remainder splits. Use [`cluster_connected`] when the count
/// must never grow as the threshold widens.
///
/// [`cluster_connected`]: super::cluster_connected
pub fn cluster_entries(entries: &[Entry], zoom: f64, config: &ClusterConfig) -> Vec<Cluster> {
    let threshold_km = config.threshold_km(zoom);
    let mut remaining = located_pool(entries);

    // Edge case: nothing to place on the map
    if remaining.is_empty() {
        return Vec::new();
    }

    log_debug!(
        "clustering {} located of {} entries at zoom {} (threshold {}km)",
        remaining.len(),
        entries.len(),
        zoom,
        threshold_km
    );

    let mut clusters = Vec::new();
    while !remaining.is_empty() {
        let seed = remaining.remove(0);

        let (absorbed, rest): (Vec<Located>, Vec<Located>) = remaining
            .into_iter()
            .partition(|candidate| haversine_km(&seed.point, &candidate.point) < threshold_km);
        remaining = rest;

        let mut bucket = Vec::with_capacity(absorbed.len() + 1);
        bucket.push(seed);
        bucket.extend(absorbed);
        clusters.push(build_cluster(&bucket, &config.id_separator));
    }

    log_debug!("produced {} clusters", clusters.len());
    clusters
}

/// Located entries in a stable order (ascending id), independent of the
/// caller's ordering.
pub(crate) fn located_pool(entries: &[Entry]) -> Vec<Located<'_>> {
    let mut pool: Vec<Located> = entries
        .iter()
        .filter_map(|entry| entry.location.map(|point| Located { point, entry }))
        .collect();
    pool.sort_by(|a, b| a.entry.id.cmp(&b.entry.id));
    pool
}

/// Turn a non-empty bucket into a cluster value.
pub(crate) fn build_cluster(bucket: &[Located], separator: &str) -> Cluster {
    let count = bucket.len() as f64;
    let (lat_sum, lon_sum) = bucket.iter().fold((0.0, 0.0), |(lat, lon), located| {
        (lat + located.point.latitude, lon + located.point.longitude)
    });
    let centroid = GeoPoint::new(lat_sum / count, lon_sum / count);

    let mut ids: Vec<&str> = bucket.iter().map(|located| located.entry.id.as_str()).collect();
    ids.sort_unstable();
    let id = ids.join(separator);

    let mut members: Vec<Entry> = bucket.iter().map(|located| located.entry.clone()).collect();
    // Most recent first; id breaks ties so the order is reproducible
    members.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then_with(|| a.id.cmp(&b.id)));

    Cluster {
        id,
        centroid,
        members,
    }
}
