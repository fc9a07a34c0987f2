use serde::{Deserialize, Serialize};

use super::bounds::Bounds;
use super::config::ViewportConfig;
use super::locale::{default_region, LocaleTag, WORLD_CENTER, WORLD_ZOOM};
use crate::models::{Entry, GeoPoint};

// Set to true to enable verbose logging in this module
const ENABLE_LOGS: bool = true;

use crate::log_debug;

/// Which rule produced the viewport.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum ViewportSource {
    DeviceLocation,
    SingleEntry,
    EntryBounds,
    LocaleDefault,
}

impl ViewportSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            ViewportSource::DeviceLocation => "device_location",
            ViewportSource::SingleEntry => "single_entry",
            ViewportSource::EntryBounds => "entry_bounds",
            ViewportSource::LocaleDefault => "locale_default",
        }
    }
}

/// Visible extent in degrees, after the margin.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CoordinateSpan {
    pub latitude_delta: f64,
    pub longitude_delta: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Viewport {
    pub center: GeoPoint,
    pub zoom: f64,
    /// Only set for the bounding-box rule.
    pub span: Option<CoordinateSpan>,
    pub source: ViewportSource,
}

/// Plan with the default configuration.
pub fn plan_viewport(
    entries: &[Entry],
    device_location: Option<GeoPoint>,
    locale: &LocaleTag,
) -> Viewport {
    plan_initial_viewport(entries, device_location, locale, &ViewportConfig::default())
}

/// Initial camera for a map session. First matching rule wins:
/// device location, single entry, bounding box of entries, locale default.
pub fn plan_initial_viewport(
    entries: &[Entry],
    device_location: Option<GeoPoint>,
    locale: &LocaleTag,
    config: &ViewportConfig,
) -> Viewport {
    let viewport = if let Some(device) = device_location {
        Viewport {
            center: device,
            zoom: config.device_zoom,
            span: None,
            source: ViewportSource::DeviceLocation,
        }
    } else {
        let points: Vec<GeoPoint> = entries.iter().filter_map(|entry| entry.location).collect();
        match points.as_slice() {
            [] => locale_viewport(locale, config),
            [only] => Viewport {
                center: *only,
                zoom: config.single_entry_zoom,
                span: None,
                source: ViewportSource::SingleEntry,
            },
            many => match Bounds::from_points(many) {
                Some(bounds) => bounds_viewport(&bounds, config),
                None => locale_viewport(locale, config),
            },
        }
    };

    log_debug!(
        "initial viewport via {}: center {} zoom {}",
        viewport.source.as_str(),
        viewport.center,
        viewport.zoom
    );
    viewport
}

fn bounds_viewport(bounds: &Bounds, config: &ViewportConfig) -> Viewport {
    // Co-located entries would otherwise give a zero span
    let span = CoordinateSpan {
        latitude_delta: (bounds.lat_span() * config.margin_factor).max(config.min_span_deg),
        longitude_delta: (bounds.lon_span() * config.margin_factor).max(config.min_span_deg),
    };

    Viewport {
        center: bounds.center(),
        zoom: config.zoom_for_span(span.latitude_delta),
        span: Some(span),
        source: ViewportSource::EntryBounds,
    }
}

fn locale_viewport(locale: &LocaleTag, config: &ViewportConfig) -> Viewport {
    let (center, zoom) = match default_region(locale, &config.regions) {
        Some(region) => (region.center, region.zoom),
        None => (WORLD_CENTER, WORLD_ZOOM),
    };
    Viewport {
        center,
        zoom,
        span: None,
        source: ViewportSource::LocaleDefault,
    }
}
