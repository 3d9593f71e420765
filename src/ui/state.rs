use anyhow::Result;
use chrono::{DateTime, Local};
use geo::Rect;
use std::collections::HashMap;
use std::path::PathBuf;

use crate::export::{write_artifact, ExportArtifact};
use crate::models::{DistrictId, SummaryStats};
use crate::styling::ShapeStyle;
use crate::view::{DetailPanel, DistrictShape, Layer, MapView, Marker};

/// Log levels
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LogLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// Log message with timestamp
#[derive(Debug, Clone)]
pub struct LogMessage {
    pub timestamp: DateTime<Local>,
    pub level: LogLevel,
    pub message: String,
}

/// Loading indicator state
#[derive(Debug, Clone, PartialEq)]
pub enum LoadingIndicator {
    Hidden,
    Loading,
    Error(String),
}

/// A district as the terminal draws it: outer rings only, in draw order
#[derive(Debug, Clone)]
pub struct RenderedDistrict {
    pub id: DistrictId,
    pub name: String,
    pub rings: Vec<Vec<(f64, f64)>>,
    pub style: ShapeStyle,
}

/// Terminal implementation of [`MapView`]; holds everything the frame needs
#[derive(Debug)]
pub struct TerminalView {
    pub indicator: LoadingIndicator,
    pub districts: Vec<RenderedDistrict>,
    pub markers: HashMap<Layer, Vec<Marker>>,
    pub visible_layers: HashMap<Layer, bool>,
    pub detail: Option<DetailPanel>,
    pub viewport: Option<Rect<f64>>,
    pub summary: Option<SummaryStats>,
    pub log_messages: Vec<LogMessage>,
    export_dir: PathBuf,
}

const MAX_LOG_MESSAGES: usize = 50;

impl TerminalView {
    pub fn new(export_dir: PathBuf) -> Self {
        Self {
            indicator: LoadingIndicator::Hidden,
            districts: Vec::new(),
            markers: HashMap::new(),
            visible_layers: HashMap::new(),
            detail: None,
            viewport: None,
            summary: None,
            log_messages: Vec::new(),
            export_dir,
        }
    }

    pub fn is_layer_visible(&self, layer: Layer) -> bool {
        self.visible_layers.get(&layer).copied().unwrap_or(false)
    }

    pub fn layer_markers(&self, layer: Layer) -> &[Marker] {
        self.markers.get(&layer).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn district(&self, id: DistrictId) -> Option<&RenderedDistrict> {
        self.districts.iter().find(|d| d.id == id)
    }

    pub fn log(&mut self, level: LogLevel, message: impl Into<String>) {
        self.log_messages.push(LogMessage {
            timestamp: Local::now(),
            level,
            message: message.into(),
        });
        if self.log_messages.len() > MAX_LOG_MESSAGES {
            let overflow = self.log_messages.len() - MAX_LOG_MESSAGES;
            self.log_messages.drain(..overflow);
        }
    }

    pub fn latest_log(&self) -> Option<&LogMessage> {
        self.log_messages.last()
    }
}

impl MapView for TerminalView {
    fn show_loading(&mut self) {
        self.indicator = LoadingIndicator::Loading;
    }

    fn show_error(&mut self, message: &str) {
        self.indicator = LoadingIndicator::Error(message.to_string());
        self.log(LogLevel::Error, message);
    }

    fn hide_loading(&mut self) {
        self.indicator = LoadingIndicator::Hidden;
    }

    fn render_districts(&mut self, shapes: &[DistrictShape]) {
        self.districts = shapes
            .iter()
            .map(|shape| RenderedDistrict {
                id: shape.id,
                name: shape.name.clone(),
                rings: shape
                    .geometry
                    .iter()
                    .map(|polygon| polygon.exterior().coords().map(|c| (c.x, c.y)).collect())
                    .collect(),
                style: shape.style.clone(),
            })
            .collect();
    }

    fn render_markers(&mut self, layer: Layer, markers: &[Marker]) {
        self.markers.insert(layer, markers.to_vec());
    }

    fn set_layer_visible(&mut self, layer: Layer, visible: bool) {
        self.visible_layers.insert(layer, visible);
    }

    fn set_district_style(&mut self, id: DistrictId, style: &ShapeStyle) {
        if let Some(district) = self.districts.iter_mut().find(|d| d.id == id) {
            district.style = style.clone();
        }
    }

    fn bring_to_front(&mut self, id: DistrictId) {
        if let Some(index) = self.districts.iter().position(|d| d.id == id) {
            let district = self.districts.remove(index);
            self.districts.push(district);
        }
    }

    fn show_detail(&mut self, panel: &DetailPanel) {
        self.detail = Some(panel.clone());
    }

    fn fit_bounds(&mut self, bounds: Rect<f64>) {
        self.viewport = Some(bounds);
    }

    fn show_summary(&mut self, summary: &SummaryStats) {
        self.summary = Some(summary.clone());
    }

    fn offer_download(&mut self, artifact: &ExportArtifact) -> Result<()> {
        match write_artifact(artifact, &self.export_dir) {
            Ok(path) => {
                self.log(
                    LogLevel::Success,
                    format!("Exported {} rows to {}", artifact.row_count, path.display()),
                );
                Ok(())
            }
            Err(e) => {
                self.log(LogLevel::Error, format!("Export failed: {}", e));
                Err(e)
            }
        }
    }
}
