use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

use super::GeoPoint;

/// A journal record as the map sees it. Supplied by the journal data
/// service; never mutated here.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub location: Option<GeoPoint>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl Entry {
    pub fn new(id: impl Into<String>, title: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            location: None,
            city: None,
            country: None,
            timestamp,
        }
    }

    pub fn with_location(mut self, latitude: f64, longitude: f64) -> Self {
        self.location = Some(GeoPoint::new(latitude, longitude));
        self
    }

    pub fn with_place(mut self, city: Option<&str>, country: Option<&str>) -> Self {
        self.city = city.map(str::to_string);
        self.country = country.map(str::to_string);
        self
    }

    pub fn is_located(&self) -> bool {
        self.location.is_some()
    }

    /// Subtitle for detail rows: "City, Country", or whichever half exists.
    pub fn place_label(&self) -> Option<String> {
        let city = self.city.as_deref().filter(|s| !s.trim().is_empty());
        let country = self.country.as_deref().filter(|s| !s.trim().is_empty());
        match (city, country) {
            (Some(city), Some(country)) => Some(format!("{city}, {country}")),
            (Some(city), None) => Some(city.to_string()),
            (None, Some(country)) => Some(country.to_string()),
            (None, None) => None,
        }
    }
}

/// Read a JSON array of entries from disk.
pub fn load_entries(path: &Path) -> Result<Vec<Entry>> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read entries from {}", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse entries in {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ts() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 2, 14, 19, 30, 0).unwrap()
    }

    #[test]
    fn place_label_combines_available_parts() {
        let entry = Entry::new("1", "Dinner", ts());
        assert_eq!(entry.place_label(), None);

        let entry = entry.with_place(Some("Paris"), Some("France"));
        assert_eq!(entry.place_label().as_deref(), Some("Paris, France"));

        let entry = Entry::new("2", "Beach", ts()).with_place(None, Some("Portugal"));
        assert_eq!(entry.place_label().as_deref(), Some("Portugal"));

        let entry = Entry::new("3", "Hike", ts()).with_place(Some("Annecy"), Some("  "));
        assert_eq!(entry.place_label().as_deref(), Some("Annecy"));
    }

    #[test]
    fn deserializes_without_optional_fields() {
        let json = r#"[
            {"id":"a","title":"First date","timestamp":"2023-06-01T18:00:00Z"},
            {"id":"b","title":"Picnic","timestamp":"2023-07-04T12:00:00Z",
             "location":{"latitude":48.85,"longitude":2.35},"city":"Paris"}
        ]"#;
        let entries: Vec<Entry> = serde_json::from_str(json).unwrap();
        assert_eq!(entries.len(), 2);
        assert!(!entries[0].is_located());
        assert_eq!(entries[1].location, Some(GeoPoint::new(48.85, 2.35)));
        assert_eq!(entries[1].city.as_deref(), Some("Paris"));
    }

    #[test]
    fn load_entries_reports_missing_file() {
        let path = std::env::temp_dir().join("journal-map-missing-entries.json");
        let _ = fs::remove_file(&path);
        let err = load_entries(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to read entries"));
    }
}
