use serde::{Deserialize, Serialize};

use crate::clustering::{cluster_entries, ClusterConfig};
use crate::models::{Cluster, Entry, GeoPoint};
use crate::viewport::{plan_initial_viewport, LocaleTag, ViewportConfig, ViewportSource};

/// Map camera: where it looks and how close.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Camera {
    pub center: GeoPoint,
    pub zoom: f64,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum MapState {
    #[default]
    Uninitialized,
    Initialized { camera: Camera },
}

/// Lifetime of one map screen. Plans the camera once, then follows the
/// user's gestures. There is no terminal state.
#[derive(Debug, Clone, Default)]
pub struct MapSession {
    state: MapState,
    initial_source: Option<ViewportSource>,
}

impl MapSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> MapState {
        self.state
    }

    pub fn is_initialized(&self) -> bool {
        matches!(self.state, MapState::Initialized { .. })
    }

    pub fn camera(&self) -> Option<Camera> {
        match self.state {
            MapState::Uninitialized => None,
            MapState::Initialized { camera } => Some(camera),
        }
    }

    /// Rule that produced the first camera, if the planner ran.
    pub fn initial_source(&self) -> Option<ViewportSource> {
        self.initial_source
    }

    /// Plan the initial camera. Later calls return the current camera
    /// without re-planning.
    pub fn initialize(
        &mut self,
        entries: &[Entry],
        device_location: Option<GeoPoint>,
        locale: &LocaleTag,
        config: &ViewportConfig,
    ) -> Camera {
        if let MapState::Initialized { camera } = self.state {
            return camera;
        }

        let viewport = plan_initial_viewport(entries, device_location, locale, config);
        let camera = Camera {
            center: viewport.center,
            zoom: viewport.zoom,
        };
        self.state = MapState::Initialized { camera };
        self.initial_source = Some(viewport.source);
        camera
    }

    /// A pan or zoom settled. A camera reported before planning also
    /// initializes the session; the planner will not run afterwards.
    pub fn camera_moved(&mut self, camera: Camera) {
        self.state = MapState::Initialized { camera };
    }

    /// Clusters for the current zoom; empty until a camera exists.
    pub fn clusters(&self, entries: &[Entry], config: &ClusterConfig) -> Vec<Cluster> {
        match self.camera() {
            Some(camera) => cluster_entries(entries, camera.zoom, config),
            None => Vec::new(),
        }
    }
}
