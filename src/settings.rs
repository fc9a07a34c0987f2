use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf, sync::RwLock, time::Duration};

use crate::clustering::ClusterConfig;
use crate::session::DEFAULT_DEBOUNCE_MS;
use crate::viewport::ViewportConfig;

// Set to true to enable verbose logging in this module
const ENABLE_LOGS: bool = true;

use crate::log_warn;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct MapSettings {
    pub clustering: ClusterConfig,
    pub viewport: ViewportConfig,
    /// Quiet period after the last camera event before re-clustering.
    pub debounce_ms: u64,
}

impl Default for MapSettings {
    fn default() -> Self {
        Self {
            clustering: ClusterConfig::default(),
            viewport: ViewportConfig::default(),
            debounce_ms: DEFAULT_DEBOUNCE_MS,
        }
    }
}

impl MapSettings {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn validate(&self) -> Result<()> {
        self.clustering.validate().context("invalid clustering settings")?;
        self.viewport.validate().context("invalid viewport settings")?;
        Ok(())
    }

    /// Replace invalid sections with defaults, keeping the valid ones.
    fn sanitized(mut self) -> Self {
        if let Err(err) = self.clustering.validate() {
            log_warn!("ignoring clustering settings: {err}");
            self.clustering = ClusterConfig::default();
        }
        if let Err(err) = self.viewport.validate() {
            log_warn!("ignoring viewport settings: {err}");
            self.viewport = ViewportConfig::default();
        }
        self
    }
}

pub struct SettingsStore {
    path: PathBuf,
    data: RwLock<MapSettings>,
}

impl SettingsStore {
    /// Lenient load: a missing file means defaults, a broken one is logged
    /// and replaced by defaults.
    pub fn new(path: PathBuf) -> Result<Self> {
        let data = if path.exists() {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read settings from {}", path.display()))?;
            match serde_json::from_str::<MapSettings>(&contents) {
                Ok(settings) => settings.sanitized(),
                Err(err) => {
                    log_warn!("settings at {} unreadable, using defaults: {err}", path.display());
                    MapSettings::default()
                }
            }
        } else {
            MapSettings::default()
        };

        Ok(Self {
            path,
            data: RwLock::new(data),
        })
    }

    /// Strict load: parse and validation failures are errors.
    pub fn load_strict(path: PathBuf) -> Result<Self> {
        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read settings from {}", path.display()))?;
        let data: MapSettings = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse settings in {}", path.display()))?;
        data.validate()
            .with_context(|| format!("Invalid settings in {}", path.display()))?;

        Ok(Self {
            path,
            data: RwLock::new(data),
        })
    }

    pub fn settings(&self) -> MapSettings {
        match self.data.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn update(&self, settings: MapSettings) -> Result<()> {
        settings.validate()?;
        let mut guard = self
            .data
            .write()
            .map_err(|_| anyhow!("settings lock poisoned"))?;
        self.persist(&settings)?;
        *guard = settings;
        Ok(())
    }

    pub fn reload(&self) -> Result<()> {
        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read settings from {}", self.path.display()))?;
        let data: MapSettings = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse settings in {}", self.path.display()))?;
        data.validate()
            .with_context(|| format!("Invalid settings in {}", self.path.display()))?;
        let mut guard = self
            .data
            .write()
            .map_err(|_| anyhow!("settings lock poisoned"))?;
        *guard = data;
        Ok(())
    }

    fn persist(&self, data: &MapSettings) -> Result<()> {
        let serialized = serde_json::to_string_pretty(data)?;
        fs::write(&self.path, serialized)
            .with_context(|| format!("Failed to write settings to {}", self.path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        let file = format!("journal-map-{}-{name}.json", std::process::id());
        let path = std::env::temp_dir().join(file);
        let _ = fs::remove_file(&path);
        path
    }

    #[test]
    fn missing_file_uses_defaults() {
        let store = SettingsStore::new(temp_path("missing")).unwrap();
        assert_eq!(store.settings(), MapSettings::default());
        assert_eq!(store.settings().debounce(), Duration::from_millis(300));
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let path = temp_path("partial");
        fs::write(&path, r#"{"debounceMs": 120, "viewport": {"deviceZoom": 10.0}}"#).unwrap();

        let store = SettingsStore::new(path.clone()).unwrap();
        let settings = store.settings();
        assert_eq!(settings.debounce_ms, 120);
        assert_eq!(settings.viewport.device_zoom, 10.0);
        assert_eq!(settings.viewport.single_entry_zoom, 14.0);
        assert_eq!(settings.clustering, ClusterConfig::default());
        let _ = fs::remove_file(path);
    }

    #[test]
    fn invalid_section_falls_back_leniently_but_fails_strictly() {
        let path = temp_path("invalid");
        fs::write(&path, r#"{"clustering": {"floorKm": -1.0}, "debounceMs": 50}"#).unwrap();

        let store = SettingsStore::new(path.clone()).unwrap();
        assert_eq!(store.settings().clustering, ClusterConfig::default());
        assert_eq!(store.settings().debounce_ms, 50);

        assert!(SettingsStore::load_strict(path.clone()).is_err());
        let _ = fs::remove_file(path);
    }

    #[test]
    fn garbage_file_is_tolerated() {
        let path = temp_path("garbage");
        fs::write(&path, "not json").unwrap();
        let store = SettingsStore::new(path.clone()).unwrap();
        assert_eq!(store.settings(), MapSettings::default());
        let _ = fs::remove_file(path);
    }

    #[test]
    fn update_persists_and_reloads() {
        let path = temp_path("update");
        let store = SettingsStore::new(path.clone()).unwrap();

        let mut settings = store.settings();
        settings.debounce_ms = 75;
        settings.viewport.margin_factor = 1.5;
        store.update(settings.clone()).unwrap();

        let reopened = SettingsStore::load_strict(path.clone()).unwrap().settings();
        assert_eq!(reopened.debounce_ms, 75);
        assert_eq!(reopened.viewport.margin_factor, 1.5);
        assert_eq!(reopened.viewport.regions.len(), settings.viewport.regions.len());

        let mut invalid = settings.clone();
        invalid.viewport.margin_factor = 0.5;
        assert!(store.update(invalid).is_err());
        assert_eq!(store.settings(), settings);

        store.reload().unwrap();
        assert_eq!(store.settings().debounce_ms, 75);
        let _ = fs::remove_file(path);
    }

    #[test]
    fn reload_errors_name_the_file_and_keep_current_settings() {
        let path = temp_path("reload");
        let store = SettingsStore::new(path.clone()).unwrap();
        let mut settings = store.settings();
        settings.debounce_ms = 90;
        store.update(settings).unwrap();

        fs::write(&path, "{ broken").unwrap();
        let err = store.reload().unwrap_err();
        let message = format!("{err:#}");
        assert!(message.starts_with("Failed to parse settings in"));
        assert!(message.contains(&path.display().to_string()));
        assert_eq!(store.settings().debounce_ms, 90);

        fs::write(&path, r#"{"viewport": {"marginFactor": 0.5}}"#).unwrap();
        let err = store.reload().unwrap_err();
        assert!(format!("{err:#}").starts_with("Invalid settings in"));

        fs::remove_file(&path).unwrap();
        let err = store.reload().unwrap_err();
        assert!(format!("{err:#}").starts_with("Failed to read settings from"));
        assert_eq!(store.settings().debounce_ms, 90);
    }
}
