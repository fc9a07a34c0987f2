use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::GeoPoint;

/// Language plus optional region, e.g. `fr-FR`, `en_US`, `fr`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LocaleTag {
    pub language: String,
    pub region: Option<String>,
}

impl LocaleTag {
    pub fn new(language: &str, region: Option<&str>) -> Self {
        Self {
            language: language.to_ascii_lowercase(),
            region: region.map(str::to_ascii_uppercase),
        }
    }

    /// Parse `fr-FR`, `en_US.UTF-8`, `zh-Hant-TW` or `de`. Anything that
    /// does not look like a locale yields an empty tag, which only the
    /// catch-all region matches.
    pub fn parse(tag: &str) -> Self {
        // Drop POSIX encoding / modifier suffixes
        let tag = tag.split(['.', '@']).next().unwrap_or_default().trim();
        let mut parts = tag.split(['-', '_']).filter(|part| !part.is_empty());

        let language = match parts.next() {
            Some(lang)
                if (2..=3).contains(&lang.len()) && lang.chars().all(|c| c.is_ascii_alphabetic()) =>
            {
                lang.to_ascii_lowercase()
            }
            _ => return Self::default(),
        };

        // Skip script subtags (four letters); take the first region-like part.
        let region = parts
            .find(|part| {
                (part.len() == 2 && part.chars().all(|c| c.is_ascii_alphabetic()))
                    || (part.len() == 3 && part.chars().all(|c| c.is_ascii_digit()))
            })
            .map(str::to_ascii_uppercase);

        Self { language, region }
    }

    pub fn is_empty(&self) -> bool {
        self.language.is_empty() && self.region.is_none()
    }
}

impl fmt::Display for LocaleTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.region {
            Some(region) => write!(f, "{}-{}", self.language, region),
            None => write!(f, "{}", self.language),
        }
    }
}

/// Which locales a fallback row applies to.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "match", rename_all = "camelCase")]
pub enum LocaleMatcher {
    Exact { language: String, region: String },
    Region { region: String },
    Language { language: String },
    Any,
}

impl LocaleMatcher {
    pub fn matches(&self, locale: &LocaleTag) -> bool {
        let region_is = |wanted: &str| {
            locale
                .region
                .as_deref()
                .is_some_and(|region| region.eq_ignore_ascii_case(wanted))
        };
        match self {
            LocaleMatcher::Exact { language, region } => {
                locale.language.eq_ignore_ascii_case(language) && region_is(region)
            }
            LocaleMatcher::Region { region } => region_is(region),
            LocaleMatcher::Language { language } => locale.language.eq_ignore_ascii_case(language),
            LocaleMatcher::Any => true,
        }
    }
}

/// A hand-picked camera for users with nothing to show yet.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RegionDefault {
    pub matcher: LocaleMatcher,
    pub center: GeoPoint,
    pub zoom: f64,
    pub label: String,
}

pub const WORLD_CENTER: GeoPoint = GeoPoint {
    latitude: 20.0,
    longitude: 0.0,
};
pub const WORLD_ZOOM: f64 = 1.5;

fn row(
    matcher: LocaleMatcher,
    latitude: f64,
    longitude: f64,
    zoom: f64,
    label: &str,
) -> RegionDefault {
    RegionDefault {
        matcher,
        center: GeoPoint::new(latitude, longitude),
        zoom,
        label: label.into(),
    }
}

fn exact(language: &str, region: &str) -> LocaleMatcher {
    LocaleMatcher::Exact {
        language: language.into(),
        region: region.into(),
    }
}

fn region(region: &str) -> LocaleMatcher {
    LocaleMatcher::Region {
        region: region.into(),
    }
}

fn language(language: &str) -> LocaleMatcher {
    LocaleMatcher::Language {
        language: language.into(),
    }
}

/// Ordered fallback table: exact pairs, then countries, then languages,
/// then the world view.
pub fn default_regions() -> Vec<RegionDefault> {
    vec![
        row(exact("fr", "CA"), 52.9399, -73.5491, 4.8, "Québec"),
        row(region("FR"), 46.2276, 2.2137, 6.8, "France"),
        row(region("US"), 39.8283, -98.5795, 3.5, "United States"),
        row(region("GB"), 54.0, -2.5, 5.5, "United Kingdom"),
        row(region("IE"), 53.4129, -8.2439, 6.5, "Ireland"),
        row(region("DE"), 51.1657, 10.4515, 5.8, "Germany"),
        row(region("ES"), 40.4637, -3.7492, 5.8, "Spain"),
        row(region("PT"), 39.3999, -8.2245, 6.3, "Portugal"),
        row(region("IT"), 41.8719, 12.5674, 5.6, "Italy"),
        row(region("BE"), 50.5039, 4.4699, 7.5, "Belgium"),
        row(region("NL"), 52.1326, 5.2913, 7.3, "Netherlands"),
        row(region("CH"), 46.8182, 8.2275, 7.5, "Switzerland"),
        row(region("CA"), 56.1304, -106.3468, 3.0, "Canada"),
        row(region("MX"), 23.6345, -102.5528, 4.6, "Mexico"),
        row(region("BR"), -14.235, -51.9253, 3.6, "Brazil"),
        row(region("AU"), -25.2744, 133.7751, 3.7, "Australia"),
        row(region("JP"), 36.2048, 138.2529, 4.8, "Japan"),
        row(region("KR"), 35.9078, 127.7669, 6.5, "South Korea"),
        row(region("CN"), 35.8617, 104.1954, 3.6, "China"),
        row(region("IN"), 20.5937, 78.9629, 4.0, "India"),
        row(language("fr"), 47.0, 4.0, 4.0, "Western Europe"),
        row(language("de"), 50.5, 10.5, 4.5, "Central Europe"),
        row(language("es"), 40.4637, -3.7492, 5.0, "Spain"),
        row(language("it"), 41.8719, 12.5674, 5.0, "Italy"),
        row(language("pt"), 39.3999, -8.2245, 5.0, "Portugal"),
        row(language("ja"), 36.2048, 138.2529, 4.8, "Japan"),
        row(LocaleMatcher::Any, WORLD_CENTER.latitude, WORLD_CENTER.longitude, WORLD_ZOOM, "World"),
    ]
}

/// First matching row. `None` only for custom tables without a catch-all.
pub fn default_region<'a>(
    locale: &LocaleTag,
    table: &'a [RegionDefault],
) -> Option<&'a RegionDefault> {
    table.iter().find(|row| row.matcher.matches(locale))
}
