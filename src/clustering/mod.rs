pub mod algorithm;
pub mod config;
pub mod connected;
pub mod distance;
pub mod selection;

pub use algorithm::{cluster, cluster_entries};
pub use config::{ClusterConfig, ZoomThreshold};
pub use connected::cluster_connected;
pub use distance::{haversine_km, EARTH_RADIUS_KM};
pub use selection::{find_cluster, reconcile_selection};
