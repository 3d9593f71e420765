use anyhow::Result;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

use crate::api::FeedSource;
use crate::error::LOAD_ERROR_MESSAGE;
use crate::export::build_export;
use crate::loader::load_dashboard_data;
use crate::models::{DashboardData, District, DistrictId, Facility, StormTrackPoint};
use crate::storm::StormCategory;
use crate::styling::{district_style, highlight_style};
use crate::utils::format_count;
use crate::view::{DetailPanel, DistrictShape, Layer, MapView, Marker, ViewEvent};

const HEALTH_MARKER_COLOR: &str = "#e41a1c";
const EDUCATION_MARKER_COLOR: &str = "#377eb8";

/// Session state, replaced wholesale rather than mutated in place
#[derive(Debug, Clone)]
pub enum SessionState {
    Loading,
    Failed { message: String },
    Ready(Arc<DashboardData>),
}

/// Owns the session state and drives a [`MapView`]
pub struct DashboardController<V: MapView> {
    view: V,
    state: SessionState,
    layer_visibility: HashMap<Layer, bool>,
}

impl<V: MapView> DashboardController<V> {
    /// Create a controller; every overlay layer starts visible
    pub fn new(view: V) -> Self {
        Self {
            view,
            state: SessionState::Loading,
            layer_visibility: Layer::ALL.into_iter().map(|layer| (layer, true)).collect(),
        }
    }

    /// Start with some layers hidden, mirroring unchecked toggles
    pub fn with_initial_layers(mut self, visible: &[(Layer, bool)]) -> Self {
        for (layer, on) in visible {
            self.layer_visibility.insert(*layer, *on);
        }
        self
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn data(&self) -> Option<&Arc<DashboardData>> {
        match &self.state {
            SessionState::Ready(data) => Some(data),
            _ => None,
        }
    }

    pub fn is_layer_visible(&self, layer: Layer) -> bool {
        self.layer_visibility.get(&layer).copied().unwrap_or(false)
    }

    /// Load every feed and render, or show the error state
    pub async fn start<S>(&mut self, source: &S)
    where
        S: FeedSource + ?Sized,
    {
        self.state = SessionState::Loading;
        self.view.show_loading();

        match load_dashboard_data(source).await {
            Ok(data) => self.present(data),
            Err(failure) => {
                error!("Error loading data: {}", failure);
                self.view.show_error(failure.user_message());
                self.state = SessionState::Failed {
                    message: LOAD_ERROR_MESSAGE.to_string(),
                };
            }
        }
    }

    /// Render already-loaded data and enter the ready state
    pub fn present(&mut self, data: DashboardData) {
        let data = Arc::new(data);
        self.render_layers(&data);
        self.view.show_summary(&data.summary);
        self.view.hide_loading();
        self.state = SessionState::Ready(data);
        info!("🗺️ Dashboard ready");
    }

    fn render_layers(&mut self, data: &DashboardData) {
        let shapes: Vec<DistrictShape> = data
            .districts
            .iter()
            .filter_map(|district| {
                district.geometry.as_ref().map(|geometry| DistrictShape {
                    id: district.id,
                    name: district.names.sub_district.clone(),
                    geometry: geometry.clone(),
                    style: district_style(district),
                })
            })
            .collect();
        self.view.render_districts(&shapes);

        let track: Vec<Marker> = data.storm_track.iter().map(storm_marker).collect();
        self.view.render_markers(Layer::StormTrack, &track);

        let health: Vec<Marker> = data
            .health_facilities
            .iter()
            .map(|f| facility_marker(f, "Health Facility", HEALTH_MARKER_COLOR))
            .collect();
        self.view.render_markers(Layer::HealthFacilities, &health);

        let education: Vec<Marker> = data
            .education_facilities
            .iter()
            .map(|f| facility_marker(f, "Education Facility", EDUCATION_MARKER_COLOR))
            .collect();
        self.view.render_markers(Layer::EducationFacilities, &education);

        for layer in Layer::ALL {
            let visible = self.is_layer_visible(layer);
            self.view.set_layer_visible(layer, visible);
        }

        if let Some(bounds) = data.district_bounds() {
            self.view.fit_bounds(bounds);
        }
    }

    /// Dispatch one interaction. Events before the ready state are dropped.
    pub fn handle_event(&mut self, event: ViewEvent) -> Result<()> {
        let data = match &self.state {
            SessionState::Ready(data) => Arc::clone(data),
            _ => {
                debug!("Ignoring {:?} while not ready", event);
                return Ok(());
            }
        };

        match event {
            ViewEvent::PointerEnter(id) => {
                if let Some(district) = lookup(&data, id) {
                    self.view.set_district_style(id, &highlight_style(district));
                    self.view.bring_to_front(id);
                }
            }
            ViewEvent::PointerLeave(id) => {
                if let Some(district) = lookup(&data, id) {
                    self.view.set_district_style(id, &district_style(district));
                }
            }
            ViewEvent::Select(id) => {
                if let Some(district) = lookup(&data, id) {
                    self.view.show_detail(&detail_panel(district));
                    if let Some(bounds) = district.bounds() {
                        self.view.fit_bounds(bounds);
                    }
                }
            }
            ViewEvent::LayerToggled { layer, visible } => {
                self.layer_visibility.insert(layer, visible);
                self.view.set_layer_visible(layer, visible);
                debug!("{} layer {}", layer.title(), if visible { "shown" } else { "hidden" });
            }
            ViewEvent::ExportRequested => {
                let artifact = build_export(&data)?;
                self.view.offer_download(&artifact)?;
            }
        }
        Ok(())
    }
}

fn lookup(data: &DashboardData, id: DistrictId) -> Option<&District> {
    let district = data.district(id);
    if district.is_none() {
        warn!("Event for unknown district {:?}", id);
    }
    district
}

/// Attribute table shown when a district is selected
pub fn detail_panel(district: &District) -> DetailPanel {
    let mut rows = vec![
        ("District".to_string(), district.names.district.clone()),
        ("Upazila".to_string(), district.names.upazila.clone()),
        ("Division".to_string(), district.names.division.clone()),
        (
            "Storm Risk Score".to_string(),
            format!("{} ({})", district.risk_class.score(), district.risk_class.label()),
        ),
        ("Risk Level".to_string(), display_or_na(&district.risk_level)),
        ("Hospital Density".to_string(), display_or_na(&district.hospital_density_class)),
        ("Health Facilities".to_string(), format_count(district.health_facility_count as f64)),
        ("Education Facilities".to_string(), format_count(district.education_facility_count as f64)),
        ("Children Under 5".to_string(), format_count(district.children_under_five)),
    ];

    if let Some(density) = district.children_density_km2 {
        rows.push(("Children per km²".to_string(), format!("{:.1}", density)));
    }
    if let Some(area) = district.area_km2 {
        rows.push(("Area".to_string(), format!("{:.1} km²", area)));
    }
    if let Some(km) = district.distance_to_storm_km {
        let class = district.distance_class_label().unwrap_or_default();
        rows.push(("Distance to Storm".to_string(), format!("{:.1} km {}", km, class).trim_end().to_string()));
    }

    DetailPanel {
        title: district.names.sub_district.clone(),
        rows,
    }
}

fn display_or_na(value: &str) -> String {
    if value.is_empty() {
        "N/A".to_string()
    } else {
        value.to_string()
    }
}

fn storm_marker(point: &StormTrackPoint) -> Marker {
    let category = StormCategory::from_reading(point.max_sustained_wind);
    let wind = point
        .max_sustained_wind
        .map(|w| format!("{:.0} mph", w))
        .unwrap_or_else(|| "N/A".to_string());
    let pressure = point
        .central_pressure
        .map(|p| format!("{:.0} mb", p))
        .unwrap_or_else(|| "N/A".to_string());

    Marker {
        position: point.position,
        color: category.color(),
        popup: format!(
            "{}\nTime: {}\nMax Wind: {}\nPressure: {}",
            category.label(),
            point.timestamp.as_deref().unwrap_or("N/A"),
            wind,
            pressure
        ),
    }
}

fn facility_marker(facility: &Facility, kind: &str, color: &'static str) -> Marker {
    let name = if facility.name.is_empty() { "Unnamed" } else { facility.name.as_str() };
    let popup = if facility.city.is_empty() {
        format!("{}\n{}", kind, name)
    } else {
        format!("{}\n{}\n{}", kind, name, facility.city)
    };

    Marker {
        position: facility.position,
        color,
        popup,
    }
}
