use serde::{Deserialize, Serialize};

use super::{Entry, GeoPoint};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ClusterKind {
    /// Drawn as a regular pin.
    Singleton,
    /// Drawn with a count badge.
    Multi,
}

impl ClusterKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClusterKind::Singleton => "singleton",
            ClusterKind::Multi => "multi",
        }
    }
}

/// A group of nearby entries produced by one clustering pass.
///
/// `id` is derived only from the member ids, so the same membership always
/// yields the same id. `members` is ordered most recent first.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Cluster {
    pub id: String,
    pub centroid: GeoPoint,
    pub members: Vec<Entry>,
}

impl Cluster {
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn is_singleton(&self) -> bool {
        self.members.len() == 1
    }

    pub fn kind(&self) -> ClusterKind {
        if self.is_singleton() {
            ClusterKind::Singleton
        } else {
            ClusterKind::Multi
        }
    }

    /// The most recent member. Clusters are never built empty, so this only
    /// returns `None` for hand-constructed values.
    pub fn primary(&self) -> Option<&Entry> {
        self.members.first()
    }

    pub fn member_ids(&self) -> impl Iterator<Item = &str> {
        self.members.iter().map(|entry| entry.id.as_str())
    }

    pub fn contains(&self, entry_id: &str) -> bool {
        self.members.iter().any(|entry| entry.id == entry_id)
    }
}
