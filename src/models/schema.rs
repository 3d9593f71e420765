//! Load-boundary validation of the raw feeds
//!
//! Feature properties arrive loosely typed (numbers as strings, missing keys,
//! nulls). Every optional attribute is resolved to its documented default here
//! so that styling, interaction and export code never has to.

use geo::{Geometry, MultiPolygon, Point};
use geojson::{Feature, FeatureCollection, GeoJson};
use serde_json::{Map, Value};
use tracing::{debug, warn};

use super::{AdminNames, District, DistrictId, Facility, StormTrackPoint, SummaryStats};
use crate::error::FeedError;
use crate::styling::RiskClass;

type Properties = Map<String, Value>;

/// Parse the districts FeatureCollection
pub fn parse_districts(value: Value) -> Result<Vec<District>, FeedError> {
    let collection = feature_collection(value)?;
    let districts = collection
        .features
        .into_iter()
        .enumerate()
        .map(|(index, feature)| district_from_feature(DistrictId(index), feature))
        .collect::<Vec<_>>();

    let without_shape = districts.iter().filter(|d| d.geometry.is_none()).count();
    if without_shape > 0 {
        warn!("⚠️ {} districts have no polygon geometry and will not be drawn", without_shape);
    }
    Ok(districts)
}

/// Parse the storm track FeatureCollection, preserving feed order
pub fn parse_storm_track(value: Value) -> Result<Vec<StormTrackPoint>, FeedError> {
    let collection = feature_collection(value)?;
    let mut track = Vec::with_capacity(collection.features.len());

    for feature in collection.features {
        let Some(position) = point_geometry(&feature) else {
            warn!("Skipping storm track feature without point geometry");
            continue;
        };
        let props = &properties(&feature);
        track.push(StormTrackPoint {
            position,
            timestamp: optional_text(props, "timestamp"),
            max_sustained_wind: number(props, "max_sustained_wind"),
            central_pressure: number(props, "central_pressure"),
        });
    }
    Ok(track)
}

/// Parse a health or education facility FeatureCollection
pub fn parse_facilities(value: Value) -> Result<Vec<Facility>, FeedError> {
    let collection = feature_collection(value)?;
    let mut facilities = Vec::with_capacity(collection.features.len());

    for feature in collection.features {
        let Some(position) = point_geometry(&feature) else {
            debug!("Skipping facility without point geometry");
            continue;
        };
        let props = &properties(&feature);
        facilities.push(Facility {
            position,
            name: text(props, "name"),
            city: text(props, "city"),
        });
    }
    Ok(facilities)
}

/// Parse the flat summary statistics object
pub fn parse_summary(value: Value) -> Result<SummaryStats, FeedError> {
    let Value::Object(props) = value else {
        return Err(FeedError::Parse("summary statistics must be a JSON object".to_string()));
    };

    Ok(SummaryStats {
        total_districts: count(&props, "total_districts"),
        high_risk_districts: count(&props, "high_risk_districts"),
        total_health_facilities: count(&props, "total_health_facilities"),
        total_education_facilities: count(&props, "total_education_facilities"),
    })
}

fn feature_collection(value: Value) -> Result<FeatureCollection, FeedError> {
    match GeoJson::from_json_value(value).map_err(|e| FeedError::Parse(e.to_string()))? {
        GeoJson::FeatureCollection(fc) => Ok(fc),
        _ => Err(FeedError::Parse("GeoJSON must be a FeatureCollection".to_string())),
    }
}

fn district_from_feature(id: DistrictId, feature: Feature) -> District {
    let geometry = polygon_geometry(&feature);
    let props = &properties(&feature);

    District {
        id,
        geometry,
        names: AdminNames {
            division: text(props, "NAME_1"),
            district: text(props, "NAME_2"),
            upazila: text(props, "NAME_3"),
            sub_district: text(props, "NAME_4"),
        },
        risk_class: RiskClass::from_score(integer(props, "storm_risk_score")),
        hospital_density_class: text(props, "hospital_density_class"),
        health_facility_count: count(props, "health_facility_count"),
        education_facility_count: count(props, "education_facility_count"),
        children_under_five: number(props, "children_under_five").unwrap_or(0.0),
        risk_level: text(props, "risk_level"),
        distance_to_storm_km: number(props, "distance_to_storm_km"),
        storm_distance_class: optional_text(props, "storm_distance_class"),
        children_density_km2: number(props, "children_density_km2"),
        area_km2: number(props, "area_km2"),
    }
}

fn polygon_geometry(feature: &Feature) -> Option<MultiPolygon<f64>> {
    let value = feature.geometry.as_ref()?.value.clone();
    match Geometry::<f64>::try_from(value).ok()? {
        Geometry::MultiPolygon(mp) => Some(mp),
        Geometry::Polygon(p) => Some(MultiPolygon::new(vec![p])),
        _ => None,
    }
}

fn point_geometry(feature: &Feature) -> Option<Point<f64>> {
    let value = feature.geometry.as_ref()?.value.clone();
    match Geometry::<f64>::try_from(value).ok()? {
        Geometry::Point(p) => Some(p),
        _ => None,
    }
}

fn properties(feature: &Feature) -> Properties {
    feature.properties.clone().unwrap_or_default()
}

/// Numeric attribute; numeric strings are accepted, anything else is absent
fn number(props: &Properties, key: &str) -> Option<f64> {
    let value = match props.get(key)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    value.filter(|v| v.is_finite())
}

/// Integer attribute; fractional values are not integers and count as absent
fn integer(props: &Properties, key: &str) -> Option<i64> {
    number(props, key).filter(|v| v.fract() == 0.0).map(|v| v as i64)
}

fn count(props: &Properties, key: &str) -> u64 {
    number(props, key)
        .filter(|v| *v > 0.0)
        .map(|v| v.round() as u64)
        .unwrap_or(0)
}

fn optional_text(props: &Properties, key: &str) -> Option<String> {
    match props.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn text(props: &Properties, key: &str) -> String {
    optional_text(props, key).unwrap_or_default()
}
