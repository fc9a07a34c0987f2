pub mod cli;
pub mod clustering;
pub mod models;
pub mod session;
pub mod settings;
pub mod utils;
pub mod viewport;

pub use clustering::{
    cluster, cluster_connected, cluster_entries, reconcile_selection, ClusterConfig,
};
pub use models::{Cluster, ClusterKind, Entry, GeoPoint};
pub use session::{Camera, ClusterSnapshot, MapSession, MapState, ReclusterController};
pub use settings::{MapSettings, SettingsStore};
pub use viewport::{
    plan_initial_viewport, plan_viewport, LocaleTag, Viewport, ViewportConfig, ViewportSource,
};

use clap::Parser;

/// Binary entry point: parse arguments, run, print JSON.
pub fn run() -> anyhow::Result<()> {
    // Initialize logging (reads RUST_LOG env var)
    utils::init_logging();

    let cli = cli::Cli::parse();
    log::debug!("journal-map starting: {:?}", cli.command);

    let output = cli::execute(cli)?;
    println!("{output}");
    Ok(())
}
