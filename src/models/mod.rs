pub mod cluster;
pub mod entry;
pub mod geo_point;

pub use cluster::{Cluster, ClusterKind};
pub use entry::Entry;
pub use geo_point::GeoPoint;
