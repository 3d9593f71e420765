//! Risk classification and the district style lookup table

use crate::models::District;

/// Storm risk score of a district, 0 to 5
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum RiskClass {
    #[default]
    NoRisk = 0,
    VeryLow = 1,
    Low = 2,
    Medium = 3,
    High = 4,
    VeryHigh = 5,
}

impl RiskClass {
    /// Every class, lowest first
    pub const ALL: [RiskClass; 6] = [
        RiskClass::NoRisk,
        RiskClass::VeryLow,
        RiskClass::Low,
        RiskClass::Medium,
        RiskClass::High,
        RiskClass::VeryHigh,
    ];

    /// Absent and out-of-range scores are "no risk"
    pub fn from_score(score: Option<i64>) -> Self {
        match score {
            Some(1) => RiskClass::VeryLow,
            Some(2) => RiskClass::Low,
            Some(3) => RiskClass::Medium,
            Some(4) => RiskClass::High,
            Some(5) => RiskClass::VeryHigh,
            _ => RiskClass::NoRisk,
        }
    }

    pub fn score(self) -> u8 {
        self as u8
    }

    pub fn label(self) -> &'static str {
        match self {
            RiskClass::NoRisk => "No Risk",
            RiskClass::VeryLow => "Very Low",
            RiskClass::Low => "Low",
            RiskClass::Medium => "Medium",
            RiskClass::High => "High",
            RiskClass::VeryHigh => "Very High",
        }
    }

    /// Fill color of the choropleth
    pub fn color(self) -> &'static str {
        match self {
            RiskClass::NoRisk => "#f0f0f0",
            RiskClass::VeryLow => "#91bfdb",
            RiskClass::Low => "#e0f3f8",
            RiskClass::Medium => "#fee08b",
            RiskClass::High => "#fc8d59",
            RiskClass::VeryHigh => "#d73027",
        }
    }
}

/// Rendering style of a district polygon
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeStyle {
    pub fill_color: &'static str,
    pub fill_opacity: f32,
    pub stroke_color: &'static str,
    pub stroke_weight: u8,
    pub stroke_opacity: f32,
    pub dash_array: Option<&'static str>,
}

/// Resting style, driven only by the numeric risk score
pub fn district_style(district: &District) -> ShapeStyle {
    risk_style(district.risk_class)
}

pub fn risk_style(class: RiskClass) -> ShapeStyle {
    ShapeStyle {
        fill_color: class.color(),
        fill_opacity: 0.7,
        stroke_color: "white",
        stroke_weight: 2,
        stroke_opacity: 1.0,
        dash_array: Some("3"),
    }
}

/// Emphasized outline applied while the pointer is over a district
pub fn highlight_style(district: &District) -> ShapeStyle {
    ShapeStyle {
        stroke_color: "#666",
        stroke_weight: 5,
        dash_array: None,
        ..district_style(district)
    }
}
