//! Feed payloads and domain values shared by the test suites

use serde_json::{json, Value};
use std::collections::HashMap;

use storm_risk_dashboard::api::Feed;
use storm_risk_dashboard::models::{AdminNames, District, DistrictId};
use storm_risk_dashboard::styling::RiskClass;

/// A 0.1 degree square polygon with its south-west corner at (lon, lat)
pub fn square(lon: f64, lat: f64) -> Value {
    json!({
        "type": "Polygon",
        "coordinates": [[
            [lon, lat], [lon + 0.1, lat], [lon + 0.1, lat + 0.1], [lon, lat + 0.1], [lon, lat]
        ]]
    })
}

/// A district feature at (lon, lat) with the given attributes
pub fn district_feature(lon: f64, lat: f64, properties: Value) -> Value {
    json!({
        "type": "Feature",
        "geometry": square(lon, lat),
        "properties": properties
    })
}

pub fn point_feature(lon: f64, lat: f64, properties: Value) -> Value {
    json!({
        "type": "Feature",
        "geometry": { "type": "Point", "coordinates": [lon, lat] },
        "properties": properties
    })
}

pub fn collection(features: Vec<Value>) -> Value {
    json!({ "type": "FeatureCollection", "features": features })
}

/// The three districts of the export walkthrough: two share the name "X"
pub fn export_districts() -> Value {
    collection(vec![
        district_feature(90.0, 22.0, json!({
            "NAME_2": "A", "NAME_4": "X",
            "children_under_five": 4.6,
            "health_facility_count": 2,
            "education_facility_count": null,
            "risk_level": "High",
            "storm_risk_score": 4
        })),
        district_feature(90.2, 22.0, json!({
            "NAME_2": "B", "NAME_4": "X",
            "children_under_five": 1,
            "health_facility_count": 0,
            "education_facility_count": 1,
            "risk_level": "Low",
            "storm_risk_score": 2
        })),
        district_feature(90.4, 22.2, json!({
            "NAME_2": "C", "NAME_4": "Y",
            "children_under_five": 0,
            "health_facility_count": 1,
            "education_facility_count": 1,
            "risk_level": "Very High",
            "storm_risk_score": 5
        })),
    ])
}

pub fn storm_track() -> Value {
    collection(vec![
        point_feature(89.5, 21.0, json!({
            "timestamp": "2024-05-26T06:00:00Z",
            "max_sustained_wind": 60,
            "central_pressure": 990
        })),
        point_feature(90.0, 21.8, json!({
            "timestamp": "2024-05-26T12:00:00Z",
            "max_sustained_wind": 120,
            "central_pressure": 960
        })),
    ])
}

pub fn health_facilities() -> Value {
    collection(vec![point_feature(90.05, 22.05, json!({ "name": "Upazila Health Complex", "city": "Hatiya" }))])
}

pub fn education_facilities() -> Value {
    collection(vec![
        point_feature(90.25, 22.05, json!({ "name": "Govt Primary School" })),
        point_feature(90.45, 22.25, json!({})),
    ])
}

pub fn summary() -> Value {
    json!({
        "total_districts": 3,
        "high_risk_districts": 2,
        "total_health_facilities": 1,
        "total_education_facilities": 2
    })
}

/// Every feed keyed by its endpoint
pub fn standard_feeds() -> HashMap<Feed, Value> {
    HashMap::from([
        (Feed::Districts, export_districts()),
        (Feed::StormTrack, storm_track()),
        (Feed::HealthFacilities, health_facilities()),
        (Feed::EducationFacilities, education_facilities()),
        (Feed::SummaryStats, summary()),
    ])
}

/// A domain district with no geometry, for pure logic tests
pub fn district(id: usize, sub_district: &str, risk_level: &str, class: RiskClass) -> District {
    District {
        id: DistrictId(id),
        geometry: None,
        names: AdminNames {
            division: "Chattogram".to_string(),
            district: "Noakhali".to_string(),
            upazila: "Hatiya".to_string(),
            sub_district: sub_district.to_string(),
        },
        risk_class: class,
        hospital_density_class: "Low".to_string(),
        health_facility_count: 1,
        education_facility_count: 3,
        children_under_five: 120.0,
        risk_level: risk_level.to_string(),
        distance_to_storm_km: None,
        storm_distance_class: None,
        children_density_km2: None,
        area_km2: None,
    }
}
