use anyhow::{anyhow, Context, Result};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;

use crate::clustering::{cluster_entries, ClusterConfig};
use crate::models::{Cluster, Entry};

use super::state::Camera;

// Set to true to enable verbose logging in this module
const ENABLE_LOGS: bool = true;

use crate::{log_debug, log_error, log_info};

pub const DEFAULT_DEBOUNCE_MS: u64 = 300;

/// Latest published clustering result.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterSnapshot {
    /// Bumped on every publish; 0 means nothing computed yet.
    pub generation: u64,
    pub zoom: Option<f64>,
    pub threshold_km: Option<f64>,
    pub clusters: Vec<Cluster>,
}

enum MapEvent {
    Camera(Camera),
    Entries(Arc<Vec<Entry>>),
}

/// Re-clusters off the caller's thread once the camera settles.
///
/// Events arriving within `debounce` of each other collapse into one pass,
/// so a pinch gesture costs one recomputation. Pans that keep the same
/// threshold do not recompute at all.
pub struct ReclusterController {
    events: mpsc::UnboundedSender<MapEvent>,
    snapshots: watch::Receiver<ClusterSnapshot>,
    cancel_token: CancellationToken,
    handle: Option<JoinHandle<()>>,
}

impl ReclusterController {
    /// Spawn the worker on the current tokio runtime.
    pub fn spawn(config: ClusterConfig, debounce: Duration) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let (snapshot_tx, snapshot_rx) = watch::channel(ClusterSnapshot::default());
        let cancel_token = CancellationToken::new();

        let handle = tokio::spawn(recluster_loop(
            Arc::new(config),
            debounce,
            events_rx,
            snapshot_tx,
            cancel_token.clone(),
        ));

        Self {
            events: events_tx,
            snapshots: snapshot_rx,
            cancel_token,
            handle: Some(handle),
        }
    }

    pub fn update_camera(&self, camera: Camera) -> Result<()> {
        self.send(MapEvent::Camera(camera))
    }

    pub fn update_entries(&self, entries: Vec<Entry>) -> Result<()> {
        self.send(MapEvent::Entries(Arc::new(entries)))
    }

    fn send(&self, event: MapEvent) -> Result<()> {
        self.events
            .send(event)
            .map_err(|_| anyhow!("recluster worker is not running"))
    }

    pub fn subscribe(&self) -> watch::Receiver<ClusterSnapshot> {
        self.snapshots.clone()
    }

    pub fn latest(&self) -> ClusterSnapshot {
        self.snapshots.borrow().clone()
    }

    pub async fn shutdown(mut self) -> Result<()> {
        self.cancel_token.cancel();

        if let Some(handle) = self.handle.take() {
            handle.await.context("recluster worker failed to join")
        } else {
            Ok(())
        }
    }
}

impl Drop for ReclusterController {
    fn drop(&mut self) {
        self.cancel_token.cancel();
    }
}

async fn recluster_loop(
    config: Arc<ClusterConfig>,
    debounce: Duration,
    mut events: mpsc::UnboundedReceiver<MapEvent>,
    snapshots: watch::Sender<ClusterSnapshot>,
    cancel_token: CancellationToken,
) {
    let mut entries: Arc<Vec<Entry>> = Arc::new(Vec::new());
    let mut zoom: Option<f64> = None;
    let mut dirty = false;
    let mut deadline = Instant::now();
    let mut generation = 0u64;

    loop {
        tokio::select! {
            _ = cancel_token.cancelled() => {
                log_info!("recluster worker shutting down");
                break;
            }
            event = events.recv() => {
                let Some(event) = event else {
                    log_info!("recluster channel closed");
                    break;
                };
                match event {
                    MapEvent::Camera(camera) => {
                        let next_km = config.threshold_km(camera.zoom);
                        let changed = zoom
                            .map(|current| config.threshold_km(current) != next_km)
                            .unwrap_or(true);
                        zoom = Some(camera.zoom);
                        dirty |= changed;
                    }
                    MapEvent::Entries(next) => {
                        entries = next;
                        dirty = true;
                    }
                }
                deadline = Instant::now() + debounce;
            }
            _ = tokio::time::sleep_until(deadline), if dirty => {
                dirty = false;
                // Nothing to cluster for until the map has a camera
                let Some(current_zoom) = zoom else { continue };

                let pass_entries = Arc::clone(&entries);
                let pass_config = Arc::clone(&config);
                let result = tokio::task::spawn_blocking(move || {
                    cluster_entries(&pass_entries, current_zoom, &pass_config)
                })
                .await;

                match result {
                    Ok(clusters) => {
                        generation += 1;
                        log_debug!(
                            "published generation {} with {} clusters at zoom {}",
                            generation,
                            clusters.len(),
                            current_zoom
                        );
                        snapshots.send_replace(ClusterSnapshot {
                            generation,
                            zoom: Some(current_zoom),
                            threshold_km: Some(config.threshold_km(current_zoom)),
                            clusters,
                        });
                    }
                    Err(err) => log_error!("recluster pass failed: {err:?}"),
                }
            }
        }
    }
}
