pub mod controller;
pub mod state;

pub use controller::{ClusterSnapshot, ReclusterController, DEFAULT_DEBOUNCE_MS};
pub use state::{Camera, MapSession, MapState};
