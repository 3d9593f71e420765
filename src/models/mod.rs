use geo::{BoundingRect, MultiPoint, MultiPolygon, Point, Rect};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

use crate::storm::StormDistanceClass;
use crate::styling::RiskClass;

pub mod schema;

/// Index of a district within the loaded feed, stable for the whole session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DistrictId(pub usize);

/// Administrative names of a sub-district (GADM levels 1 to 4)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AdminNames {
    pub division: String,     // NAME_1
    pub district: String,     // NAME_2
    pub upazila: String,      // NAME_3
    pub sub_district: String, // NAME_4
}

/// A sub-district polygon with its risk attributes
#[derive(Debug, Clone)]
pub struct District {
    pub id: DistrictId,
    pub geometry: Option<MultiPolygon<f64>>,
    pub names: AdminNames,
    pub risk_class: RiskClass,
    pub hospital_density_class: String,
    pub health_facility_count: u64,
    pub education_facility_count: u64,
    pub children_under_five: f64,
    /// Textual label from the feed, independent of `risk_class`
    pub risk_level: String,
    pub distance_to_storm_km: Option<f64>,
    pub storm_distance_class: Option<String>,
    pub children_density_km2: Option<f64>,
    pub area_km2: Option<f64>,
}

impl District {
    /// Bounding box of the district shape, if it has one
    pub fn bounds(&self) -> Option<Rect<f64>> {
        self.geometry.as_ref().and_then(|g| g.bounding_rect())
    }

    /// Distance band to the storm track; the feed's own label wins over a derived one
    pub fn distance_class_label(&self) -> Option<String> {
        if let Some(label) = self.storm_distance_class.as_ref().filter(|l| !l.is_empty()) {
            return Some(label.clone());
        }
        self.distance_to_storm_km
            .and_then(StormDistanceClass::from_km)
            .map(|class| class.label().to_string())
    }
}

/// One observation along the storm trajectory
#[derive(Debug, Clone)]
pub struct StormTrackPoint {
    pub position: Point<f64>,
    pub timestamp: Option<String>,
    pub max_sustained_wind: Option<f64>,
    pub central_pressure: Option<f64>,
}

/// Health or education facility location
#[derive(Debug, Clone)]
pub struct Facility {
    pub position: Point<f64>,
    pub name: String,
    pub city: String,
}

/// Precomputed counts supplied by the summary feed
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SummaryStats {
    pub total_districts: u64,
    pub high_risk_districts: u64,
    pub total_health_facilities: u64,
    pub total_education_facilities: u64,
}

/// Session data store, written once by the loader and read-only afterwards
#[derive(Debug, Clone, Default)]
pub struct DashboardData {
    pub districts: Vec<District>,
    pub storm_track: Vec<StormTrackPoint>,
    pub health_facilities: Vec<Facility>,
    pub education_facilities: Vec<Facility>,
    pub summary: SummaryStats,
}

impl DashboardData {
    pub fn district(&self, id: DistrictId) -> Option<&District> {
        self.districts.get(id.0).filter(|d| d.id == id)
    }

    /// Bounds covering every district shape, used for the initial view
    pub fn district_bounds(&self) -> Option<Rect<f64>> {
        let corners: MultiPoint<f64> = self
            .districts
            .iter()
            .filter_map(District::bounds)
            .flat_map(|r| [Point::from(r.min()), Point::from(r.max())])
            .collect();
        corners.bounding_rect()
    }
}

/// Configuration for the application
#[derive(Debug, Clone)]
pub struct Config {
    pub base_url: Url,
    pub districts_endpoint: String,
    pub storm_track_endpoint: String,
    pub health_facilities_endpoint: String,
    pub education_facilities_endpoint: String,
    pub summary_stats_endpoint: String,
    pub request_timeout: Duration,
    pub export_dir: PathBuf,
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base URL is valid"),
            districts_endpoint: "/api/districts".to_string(),
            storm_track_endpoint: "/api/storm-track".to_string(),
            health_facilities_endpoint: "/api/health-facilities".to_string(),
            education_facilities_endpoint: "/api/education-facilities".to_string(),
            summary_stats_endpoint: "/api/summary-stats".to_string(),
            request_timeout: Duration::from_secs(30),
            export_dir: PathBuf::from("."),
            log_filter: "storm_risk_dashboard=info".to_string(),
        }
    }
}

const DEFAULT_BASE_URL: &str = "http://localhost:5000";

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok(); // Load .env file if it exists

        let defaults = Config::default();
        let base_url = std::env::var("DASHBOARD_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        Ok(Config {
            base_url: Self::parse_base_url(&base_url)?,
            districts_endpoint: std::env::var("DISTRICTS_ENDPOINT")
                .unwrap_or(defaults.districts_endpoint),
            storm_track_endpoint: std::env::var("STORM_TRACK_ENDPOINT")
                .unwrap_or(defaults.storm_track_endpoint),
            health_facilities_endpoint: std::env::var("HEALTH_FACILITIES_ENDPOINT")
                .unwrap_or(defaults.health_facilities_endpoint),
            education_facilities_endpoint: std::env::var("EDUCATION_FACILITIES_ENDPOINT")
                .unwrap_or(defaults.education_facilities_endpoint),
            summary_stats_endpoint: std::env::var("SUMMARY_STATS_ENDPOINT")
                .unwrap_or(defaults.summary_stats_endpoint),
            request_timeout: Duration::from_secs(
                std::env::var("REQUEST_TIMEOUT_SECS")
                    .unwrap_or_else(|_| "30".to_string())
                    .parse()
                    .unwrap_or(30),
            ),
            export_dir: std::env::var("EXPORT_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.export_dir),
            log_filter: std::env::var("LOG_FILTER").unwrap_or(defaults.log_filter),
        })
    }

    /// Point every feed at a different server
    pub fn with_base_url(mut self, base_url: &str) -> anyhow::Result<Self> {
        self.base_url = Self::parse_base_url(base_url)?;
        Ok(self)
    }

    fn parse_base_url(raw: &str) -> anyhow::Result<Url> {
        Url::parse(raw).map_err(|e| anyhow::anyhow!("Invalid DASHBOARD_BASE_URL '{}': {}", raw, e))
    }
}
