//! Storm categories and distance enrichment on loaded data

use pretty_assertions::assert_eq;
use test_log::test;

use crate::common::MemorySource;
use storm_risk_dashboard::loader::load_dashboard_data;
use storm_risk_dashboard::storm::{closest_to_track, storm_category_color, storm_category_label, StormCategory};

#[test]
fn test_category_table() {
    let cases = [
        (0.0, "Tropical Depression", "#1e90ff"),
        (38.9, "Tropical Depression", "#1e90ff"),
        (39.0, "Tropical Storm", "#00bfff"),
        (74.0, "Category 1 Hurricane", "#ffd700"),
        (96.0, "Category 2 Hurricane", "#ffa500"),
        (111.0, "Category 3 Hurricane", "#ff4500"),
        (130.0, "Category 4 Hurricane", "#ff0000"),
        (157.0, "Category 5 Hurricane", "#8b0000"),
        (200.0, "Category 5 Hurricane", "#8b0000"),
    ];
    for (wind, label, color) in cases {
        assert_eq!(storm_category_label(wind), label, "label for {} mph", wind);
        assert_eq!(storm_category_color(wind), color, "color for {} mph", wind);
    }
}

#[test]
fn test_negative_wind_is_depression() {
    assert_eq!(StormCategory::classify(-5.0), StormCategory::TropicalDepression);
}

#[test]
fn test_loader_derives_distance_to_track() {
    let data = tokio_test::block_on(load_dashboard_data(&MemorySource::standard())).expect("loads");

    assert!(data.districts.iter().all(|d| d.distance_to_storm_km.is_some()));

    let closest = closest_to_track(&data.districts, 1);
    assert_eq!(closest[0].names.district, "A");
    assert_eq!(closest[0].distance_class_label().as_deref(), Some("Very Close"));

    let a = data.districts[0].distance_to_storm_km.unwrap_or_default();
    let c = data.districts[2].distance_to_storm_km.unwrap_or_default();
    assert!(a < c, "A ({:.1} km) should be nearer than C ({:.1} km)", a, c);
}
