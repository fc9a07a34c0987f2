use chrono::{TimeZone, Utc};
use journal_map_lib::{
    plan_viewport, Entry, GeoPoint, LocaleTag, MapSession, ViewportConfig, ViewportSource,
};

fn french_trip() -> Vec<Entry> {
    let at = Utc.with_ymd_and_hms(2023, 7, 14, 10, 0, 0).unwrap();
    vec![
        Entry::new("paris", "Eiffel tower", at).with_location(48.8566, 2.3522),
        Entry::new("marseille", "Calanques", at).with_location(43.2965, 5.3698),
        Entry::new("lyon", "Fourvière", at).with_location(45.764, 4.8357),
        Entry::new("notes", "Packing list", at),
    ]
}

#[test]
fn scenario_d_bounding_box_of_three_cities() {
    let viewport = plan_viewport(&french_trip(), None, &LocaleTag::parse("en-US"));
    assert_eq!(viewport.source, ViewportSource::EntryBounds);
    assert!((viewport.center.latitude - (48.8566 + 43.2965) / 2.0).abs() < 1e-9);
    assert!((viewport.center.longitude - (2.3522 + 5.3698) / 2.0).abs() < 1e-9);
    assert_eq!(viewport.zoom, 6.0);

    let span = viewport.span.unwrap();
    assert!((span.latitude_delta - 5.5601 * 1.3).abs() < 1e-9);
}

#[test]
fn scenario_e_french_locale_without_entries() {
    let viewport = plan_viewport(&[], None, &LocaleTag::parse("fr-FR"));
    assert_eq!(viewport.source, ViewportSource::LocaleDefault);
    assert!((viewport.center.latitude - 46.23).abs() < 0.01);
    assert!((viewport.center.longitude - 2.21).abs() < 0.01);
    assert!((viewport.zoom - 6.8).abs() < 1e-9);
}

#[test]
fn device_location_beats_entries() {
    let device = GeoPoint::new(51.5074, -0.1278);
    let viewport = plan_viewport(&french_trip(), Some(device), &LocaleTag::parse("fr-FR"));
    assert_eq!(viewport.source, ViewportSource::DeviceLocation);
    assert_eq!(viewport.center, device);
}

#[test]
fn unknown_locale_gets_world_view() {
    let viewport = plan_viewport(&[], None, &LocaleTag::parse("xx-YY"));
    assert_eq!(viewport.center, GeoPoint::new(20.0, 0.0));
    assert_eq!(viewport.zoom, 1.5);
}

#[test]
fn session_plans_then_follows_camera() {
    let mut session = MapSession::new();
    let camera = session.initialize(
        &french_trip(),
        None,
        &LocaleTag::parse("fr-FR"),
        &ViewportConfig::default(),
    );
    assert_eq!(camera.zoom, 6.0);
    assert_eq!(session.initial_source(), Some(ViewportSource::EntryBounds));
}
