//! Capability interface between the dashboard controller and whatever draws it
//!
//! Nothing here depends on a UI toolkit. The controller only talks to a
//! [`MapView`]; the terminal front end in `ui` is one implementation.

use anyhow::Result;
use geo::{MultiPolygon, Point, Rect};

use crate::export::ExportArtifact;
use crate::models::{DistrictId, SummaryStats};
use crate::styling::ShapeStyle;

/// Toggleable overlay layers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Layer {
    StormTrack,
    HealthFacilities,
    EducationFacilities,
}

impl Layer {
    pub const ALL: [Layer; 3] = [Layer::StormTrack, Layer::HealthFacilities, Layer::EducationFacilities];

    pub fn title(self) -> &'static str {
        match self {
            Layer::StormTrack => "Storm Track",
            Layer::HealthFacilities => "Health Facilities",
            Layer::EducationFacilities => "Education Facilities",
        }
    }
}

/// A district polygon handed to the view
#[derive(Debug, Clone)]
pub struct DistrictShape {
    pub id: DistrictId,
    pub name: String,
    pub geometry: MultiPolygon<f64>,
    pub style: ShapeStyle,
}

/// A point with a popup that is built once and never restyled
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub position: Point<f64>,
    pub color: &'static str,
    pub popup: String,
}

/// Content of the selection detail panel
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DetailPanel {
    pub title: String,
    pub rows: Vec<(String, String)>,
}

impl DetailPanel {
    pub fn value(&self, label: &str) -> Option<&str> {
        self.rows
            .iter()
            .find(|(key, _)| key == label)
            .map(|(_, value)| value.as_str())
    }
}

/// Input signals from the view
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ViewEvent {
    PointerEnter(DistrictId),
    PointerLeave(DistrictId),
    Select(DistrictId),
    LayerToggled { layer: Layer, visible: bool },
    ExportRequested,
}

/// Operations the controller needs from a map surface
pub trait MapView {
    fn show_loading(&mut self);

    /// Replace the loading indicator with an error message
    fn show_error(&mut self, message: &str);

    fn hide_loading(&mut self);

    fn render_districts(&mut self, shapes: &[DistrictShape]);

    fn render_markers(&mut self, layer: Layer, markers: &[Marker]);

    fn set_layer_visible(&mut self, layer: Layer, visible: bool);

    fn set_district_style(&mut self, id: DistrictId, style: &ShapeStyle);

    /// Raise a district above its siblings
    fn bring_to_front(&mut self, id: DistrictId);

    fn show_detail(&mut self, panel: &DetailPanel);

    fn fit_bounds(&mut self, bounds: Rect<f64>);

    fn show_summary(&mut self, summary: &SummaryStats);

    /// Hand a generated file to the user
    fn offer_download(&mut self, artifact: &ExportArtifact) -> Result<()>;
}
