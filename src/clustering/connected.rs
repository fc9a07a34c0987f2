use std::collections::HashMap;

use crate::clustering::algorithm::{build_cluster, located_pool, Located};
use crate::clustering::config::ClusterConfig;
use crate::clustering::distance::haversine_km;
use crate::models::{Cluster, Entry};

// Set to true to enable verbose logging in this module
const ENABLE_LOGS: bool = true;

use crate::log_debug;

/// Union-find over pool indices.
struct DisjointSet {
    parent: Vec<usize>,
    rank: Vec<u8>,
}

impl DisjointSet {
    fn new(len: usize) -> Self {
        Self {
            parent: (0..len).collect(),
            rank: vec![0; len],
        }
    }

    fn find(&mut self, mut node: usize) -> usize {
        while self.parent[node] != node {
            self.parent[node] = self.parent[self.parent[node]];
            node = self.parent[node];
        }
        node
    }

    fn union(&mut self, a: usize, b: usize) {
        let (root_a, root_b) = (self.find(a), self.find(b));
        if root_a == root_b {
            return;
        }
        match self.rank[root_a].cmp(&self.rank[root_b]) {
            std::cmp::Ordering::Less => self.parent[root_a] = root_b,
            std::cmp::Ordering::Greater => self.parent[root_b] = root_a,
            std::cmp::Ordering::Equal => {
                self.parent[root_b] = root_a;
                self.rank[root_a] += 1;
            }
        }
    }
}

/// Connected-components clustering: any two entries closer than the
/// threshold share a cluster, transitively. Independent of seed order.
///
/// Same O(n²) distance cost as [`cluster_entries`](super::cluster_entries).
pub fn cluster_connected(entries: &[Entry], zoom: f64, config: &ClusterConfig) -> Vec<Cluster> {
    let threshold_km = config.threshold_km(zoom);
    let pool = located_pool(entries);
    if pool.is_empty() {
        return Vec::new();
    }

    let mut sets = DisjointSet::new(pool.len());
    for i in 0..pool.len() {
        for j in (i + 1)..pool.len() {
            if haversine_km(&pool[i].point, &pool[j].point) < threshold_km {
                sets.union(i, j);
            }
        }
    }

    // Group by root, keeping the pool's id order for both groups and members
    let mut group_of_root: HashMap<usize, usize> = HashMap::new();
    let mut groups: Vec<Vec<Located>> = Vec::new();
    for (index, located) in pool.iter().enumerate() {
        let root = sets.find(index);
        let slot = *group_of_root.entry(root).or_insert_with(|| {
            groups.push(Vec::new());
            groups.len() - 1
        });
        groups[slot].push(*located);
    }

    log_debug!(
        "connected clustering: {} entries into {} components at {}km",
        pool.len(),
        groups.len(),
        threshold_km
    );

    groups
        .iter()
        .map(|group| build_cluster(group, &config.id_separator))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn located(id: &str, lat: f64, lon: f64) -> Entry {
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        Entry::new(id, id, at).with_location(lat, lon)
    }

    #[test]
    fn chains_are_joined() {
        let entries = vec![
            located("a", 0.0, 0.0),
            located("b", 0.6, 0.0),
            located("c", 1.2, 0.0),
            located("far", 20.0, 20.0),
        ];
        let clusters = cluster_connected(&entries, 7.5, &ClusterConfig::default());
        let ids: Vec<&str> = clusters.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["a-b-c", "far"]);
    }

    #[test]
    fn empty_input() {
        assert!(cluster_connected(&[], 3.0, &ClusterConfig::default()).is_empty());
    }

    #[test]
    fn disjoint_set_merges_transitively() {
        let mut sets = DisjointSet::new(5);
        sets.union(0, 1);
        sets.union(3, 4);
        sets.union(1, 4);
        assert_eq!(sets.find(0), sets.find(3));
        assert_ne!(sets.find(0), sets.find(2));
    }
}
