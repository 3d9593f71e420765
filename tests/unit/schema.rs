//! Load-boundary parsing of feed payloads

use assert_matches::assert_matches;
use pretty_assertions::assert_eq;
use serde_json::json;
use test_log::test;

use crate::common::fixtures::{collection, district_feature, point_feature};
use storm_risk_dashboard::error::FeedError;
use storm_risk_dashboard::models::schema::{parse_districts, parse_facilities, parse_storm_track, parse_summary};
use storm_risk_dashboard::styling::RiskClass;

#[test]
fn test_district_defaults_when_properties_missing() {
    let districts = parse_districts(collection(vec![district_feature(90.0, 22.0, json!({}))])).expect("parses");
    let d = &districts[0];

    assert_eq!(d.risk_class, RiskClass::NoRisk);
    assert_eq!(d.children_under_five, 0.0);
    assert_eq!(d.health_facility_count, 0);
    assert_eq!(d.education_facility_count, 0);
    assert_eq!(d.risk_level, "");
    assert_eq!(d.names.sub_district, "");
    assert_eq!(d.distance_to_storm_km, None);
}

#[test]
fn test_district_accepts_loose_values() {
    let features = vec![district_feature(
        90.0,
        22.0,
        json!({
            "NAME_4": "Hatiya",
            "storm_risk_score": "3",
            "children_under_five": "1520.4",
            "health_facility_count": 4.0,
            "education_facility_count": null,
            "distance_to_storm_km": 42
        }),
    )];

    let d = &parse_districts(collection(features)).expect("parses")[0];
    assert_eq!(d.names.sub_district, "Hatiya");
    assert_eq!(d.risk_class, RiskClass::Medium);
    assert_eq!(d.children_under_five, 1520.4);
    assert_eq!(d.health_facility_count, 4);
    assert_eq!(d.education_facility_count, 0);
    assert_eq!(d.distance_class_label().as_deref(), Some("Very Close"));
}

#[test]
fn test_out_of_range_score_is_no_risk() {
    let features = vec![
        district_feature(90.0, 22.0, json!({ "storm_risk_score": 7 })),
        district_feature(90.0, 22.0, json!({ "storm_risk_score": -2 })),
        district_feature(90.0, 22.0, json!({ "storm_risk_score": "high" })),
    ];
    let districts = parse_districts(collection(features)).expect("parses");
    assert!(districts.iter().all(|d| d.risk_class == RiskClass::NoRisk));
}

#[test]
fn test_track_and_facilities_keep_feed_order() {
    let track = parse_storm_track(collection(vec![
        point_feature(89.0, 20.0, json!({ "max_sustained_wind": 45 })),
        point_feature(89.5, 20.5, json!({ "max_sustained_wind": "130", "timestamp": "T2" })),
    ]))
    .expect("parses");
    assert_eq!(track.len(), 2);
    assert_eq!(track[0].max_sustained_wind, Some(45.0));
    assert_eq!(track[1].timestamp.as_deref(), Some("T2"));
    assert_eq!(track[1].central_pressure, None);

    let facilities = parse_facilities(collection(vec![point_feature(90.1, 22.1, json!({ "name": "Clinic" }))]))
        .expect("parses");
    assert_eq!(facilities[0].name, "Clinic");
    assert_eq!(facilities[0].city, "");
}

#[test]
fn test_non_collection_is_rejected() {
    let point = json!({ "type": "Point", "coordinates": [90.0, 22.0] });
    assert_matches!(parse_districts(point), Err(FeedError::Parse(_)));
    assert_matches!(parse_summary(json!([1, 2, 3])), Err(FeedError::Parse(_)));
}

#[test]
fn test_summary_missing_counts_default_to_zero() {
    let summary = parse_summary(json!({ "total_districts": 544 })).expect("parses");
    assert_eq!(summary.total_districts, 544);
    assert_eq!(summary.high_risk_districts, 0);
}
