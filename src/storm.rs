//! Storm classification: Saffir-Simpson wind bands and distance-to-track bands

use geo::{Centroid, Closest, HaversineClosestPoint, HaversineDistance, LineString, MultiPolygon};

use crate::models::{District, StormTrackPoint};

/// Wind-speed band, ordered from weakest to strongest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StormCategory {
    TropicalDepression,
    TropicalStorm,
    Category1,
    Category2,
    Category3,
    Category4,
    Category5,
}

impl StormCategory {
    /// Classify a sustained wind speed in mph. Lower bounds are inclusive and
    /// checked from the strongest band down.
    pub fn classify(wind_mph: f64) -> Self {
        if wind_mph >= 157.0 {
            StormCategory::Category5
        } else if wind_mph >= 130.0 {
            StormCategory::Category4
        } else if wind_mph >= 111.0 {
            StormCategory::Category3
        } else if wind_mph >= 96.0 {
            StormCategory::Category2
        } else if wind_mph >= 74.0 {
            StormCategory::Category1
        } else if wind_mph >= 39.0 {
            StormCategory::TropicalStorm
        } else {
            StormCategory::TropicalDepression
        }
    }

    /// Missing readings fall into the lowest band
    pub fn from_reading(wind_mph: Option<f64>) -> Self {
        wind_mph.map(Self::classify).unwrap_or(StormCategory::TropicalDepression)
    }

    pub fn label(self) -> &'static str {
        match self {
            StormCategory::Category5 => "Category 5 Hurricane",
            StormCategory::Category4 => "Category 4 Hurricane",
            StormCategory::Category3 => "Category 3 Hurricane",
            StormCategory::Category2 => "Category 2 Hurricane",
            StormCategory::Category1 => "Category 1 Hurricane",
            StormCategory::TropicalStorm => "Tropical Storm",
            StormCategory::TropicalDepression => "Tropical Depression",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            StormCategory::Category5 => "#8b0000",
            StormCategory::Category4 => "#ff0000",
            StormCategory::Category3 => "#ff4500",
            StormCategory::Category2 => "#ffa500",
            StormCategory::Category1 => "#ffd700",
            StormCategory::TropicalStorm => "#00bfff",
            StormCategory::TropicalDepression => "#1e90ff",
        }
    }
}

/// Category label for a wind speed
pub fn storm_category_label(wind_mph: f64) -> &'static str {
    StormCategory::classify(wind_mph).label()
}

/// Marker color for a wind speed
pub fn storm_category_color(wind_mph: f64) -> &'static str {
    StormCategory::classify(wind_mph).color()
}

/// Distance band between a sub-district and the storm track
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StormDistanceClass {
    VeryClose,
    Close,
    Moderate,
    Far,
}

impl StormDistanceClass {
    /// Bins are (0, 50], (50, 100], (100, 200], (200, inf) with 0 in the first
    pub fn from_km(km: f64) -> Option<Self> {
        if km.is_nan() || km < 0.0 {
            None
        } else if km <= 50.0 {
            Some(StormDistanceClass::VeryClose)
        } else if km <= 100.0 {
            Some(StormDistanceClass::Close)
        } else if km <= 200.0 {
            Some(StormDistanceClass::Moderate)
        } else {
            Some(StormDistanceClass::Far)
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            StormDistanceClass::VeryClose => "Very Close",
            StormDistanceClass::Close => "Close",
            StormDistanceClass::Moderate => "Moderate",
            StormDistanceClass::Far => "Far",
        }
    }
}

/// Great-circle distance in km from the centroid of `shape` to the track polyline
pub fn distance_to_track_km(shape: &MultiPolygon<f64>, track: &[StormTrackPoint]) -> Option<f64> {
    let centroid = shape.centroid()?;
    let closest = match track {
        [] => return None,
        [only] => only.position,
        _ => {
            let line: LineString<f64> = track.iter().map(|p| p.position).collect();
            match line.haversine_closest_point(&centroid) {
                Closest::Intersection(p) | Closest::SinglePoint(p) => p,
                Closest::Indeterminate => return None,
            }
        }
    };
    Some(centroid.haversine_distance(&closest) / 1000.0)
}

/// Fill in `distance_to_storm_km` for districts whose feed lacks it
pub fn enrich_storm_distances(districts: &mut [District], track: &[StormTrackPoint]) -> usize {
    let mut derived = 0;
    for district in districts.iter_mut().filter(|d| d.distance_to_storm_km.is_none()) {
        if let Some(shape) = &district.geometry {
            district.distance_to_storm_km = distance_to_track_km(shape, track);
            if district.distance_to_storm_km.is_some() {
                derived += 1;
            }
        }
    }
    derived
}

/// The `n` districts nearest the track, nearest first
pub fn closest_to_track(districts: &[District], n: usize) -> Vec<&District> {
    let mut with_distance: Vec<&District> = districts
        .iter()
        .filter(|d| d.distance_to_storm_km.is_some_and(|km| !km.is_nan()))
        .collect();
    with_distance.sort_by(|a, b| {
        let (a, b) = (a.distance_to_storm_km.unwrap_or(f64::MAX), b.distance_to_storm_km.unwrap_or(f64::MAX));
        a.total_cmp(&b)
    });
    with_distance.truncate(n);
    with_distance
}
