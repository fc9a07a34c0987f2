use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::clustering::{cluster_connected, cluster_entries};
use crate::models::{entry::load_entries, GeoPoint};
use crate::settings::{MapSettings, SettingsStore};
use crate::viewport::{plan_initial_viewport, LocaleTag};

// Set to true to enable verbose logging in this module
const ENABLE_LOGS: bool = true;

use crate::log_info;

#[derive(Debug, Parser)]
#[command(name = "journal-map", version, about = "Cluster journal entries and plan the map camera")]
pub struct Cli {
    /// JSON settings file; defaults apply when absent
    #[arg(long, global = true)]
    pub settings: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the clusters for a zoom level
    Cluster {
        /// JSON array of entries
        #[arg(long)]
        entries: PathBuf,
        #[arg(long, allow_negative_numbers = true)]
        zoom: f64,
        /// Join chains of nearby entries instead of greedy seeding
        #[arg(long)]
        connected: bool,
    },
    /// Print the initial camera
    Viewport {
        #[arg(long)]
        entries: Option<PathBuf>,
        /// Device latitude
        #[arg(long, requires = "lon", allow_negative_numbers = true)]
        lat: Option<f64>,
        /// Device longitude
        #[arg(long, requires = "lat", allow_negative_numbers = true)]
        lon: Option<f64>,
        /// e.g. fr-FR; defaults to $LANG
        #[arg(long)]
        locale: Option<String>,
    },
}

fn load_settings(path: Option<PathBuf>) -> Result<MapSettings> {
    match path {
        Some(path) => Ok(SettingsStore::load_strict(path)?.settings()),
        None => Ok(MapSettings::default()),
    }
}

/// Run a parsed command and return its JSON output.
pub fn execute(cli: Cli) -> Result<String> {
    let settings = load_settings(cli.settings)?;

    match cli.command {
        Command::Cluster {
            entries,
            zoom,
            connected,
        } => {
            let entries = load_entries(&entries)?;
            let clusters = if connected {
                cluster_connected(&entries, zoom, &settings.clustering)
            } else {
                cluster_entries(&entries, zoom, &settings.clustering)
            };
            log_info!("{} entries -> {} clusters at zoom {}", entries.len(), clusters.len(), zoom);
            serde_json::to_string_pretty(&clusters).context("Failed to serialize clusters")
        }
        Command::Viewport {
            entries,
            lat,
            lon,
            locale,
        } => {
            let entries = match entries {
                Some(path) => load_entries(&path)?,
                None => Vec::new(),
            };
            let device = lat.zip(lon).map(|(lat, lon)| GeoPoint::new(lat, lon));
            let locale = locale
                .or_else(|| std::env::var("LANG").ok())
                .map(|tag| LocaleTag::parse(&tag))
                .unwrap_or_default();

            let viewport = plan_initial_viewport(&entries, device, &locale, &settings.viewport);
            log_info!("viewport from {} for locale '{}'", viewport.source.as_str(), locale);
            serde_json::to_string_pretty(&viewport).context("Failed to serialize viewport")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_entries(name: &str) -> PathBuf {
        let file = format!("journal-map-cli-{}-{name}.json", std::process::id());
        let path = std::env::temp_dir().join(file);
        fs::write(
            &path,
            r#"[
                {"id":"1","title":"Paris","timestamp":"2024-01-01T00:00:00Z",
                 "location":{"latitude":48.8566,"longitude":2.3522}},
                {"id":"2","title":"Paris again","timestamp":"2024-01-02T00:00:00Z",
                 "location":{"latitude":48.8570,"longitude":2.3530}},
                {"id":"3","title":"At home","timestamp":"2024-01-03T00:00:00Z"}
            ]"#,
        )
        .unwrap();
        path
    }

    #[test]
    fn cluster_command_prints_json() {
        let path = write_entries("cluster");
        let cli = Cli::try_parse_from([
            "journal-map",
            "cluster",
            "--entries",
            path.to_str().unwrap(),
            "--zoom",
            "15",
        ])
        .unwrap();
        let output = execute(cli).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value.as_array().map(Vec::len), Some(1));
        assert_eq!(value[0]["id"], "1-2");
        assert_eq!(value[0]["members"][0]["id"], "2");
        let _ = fs::remove_file(path);
    }

    #[test]
    fn viewport_command_uses_device_location() {
        let cli = Cli::try_parse_from([
            "journal-map",
            "viewport",
            "--lat",
            "-33.8688",
            "--lon",
            "151.2093",
            "--locale",
            "en-AU",
        ])
        .unwrap();
        let output = execute(cli).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["source"], "deviceLocation");
        assert_eq!(value["zoom"], 8.0);
    }

    #[test]
    fn viewport_command_falls_back_to_locale() {
        let cli = Cli::try_parse_from(["journal-map", "viewport", "--locale", "fr-FR"]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&execute(cli).unwrap()).unwrap();
        assert_eq!(value["source"], "localeDefault");
        assert_eq!(value["zoom"], 6.8);
    }

    #[test]
    fn lat_without_lon_is_rejected() {
        assert!(Cli::try_parse_from(["journal-map", "viewport", "--lat", "1.0"]).is_err());
    }

    #[test]
    fn missing_entries_file_is_an_error() {
        let cli = Cli::try_parse_from([
            "journal-map",
            "cluster",
            "--entries",
            "/nonexistent/entries.json",
            "--zoom",
            "3",
        ])
        .unwrap();
        assert!(execute(cli).is_err());
    }
}
