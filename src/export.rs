//! Sub-district CSV export
//!
//! Rows are deduplicated by sub-district name (first occurrence wins, parent
//! district is not part of the key), projected to six columns, stably sorted
//! by the severity of the textual risk label and written with every field
//! quoted.

use anyhow::{Context, Result};
use csv::{QuoteStyle, Terminator, WriterBuilder};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::models::{DashboardData, District};

pub const EXPORT_FILE_NAME: &str = "bangladesh_subdistricts_export.csv";
pub const EXPORT_MIME_TYPE: &str = "text/csv";

pub const EXPORT_HEADERS: [&str; 6] = [
    "District",
    "Sub-district",
    "Children Under 5",
    "Health Facilities",
    "Education Facilities",
    "Risk Level",
];

/// One line of the export
#[derive(Debug, Clone, PartialEq)]
pub struct ExportRow {
    pub district: String,
    pub sub_district: String,
    pub children_under_five: i64,
    pub health_facilities: u64,
    pub education_facilities: u64,
    pub risk_level: String,
}

impl ExportRow {
    fn from_district(district: &District) -> Self {
        Self {
            district: district.names.district.clone(),
            sub_district: district.names.sub_district.clone(),
            children_under_five: round_half_up(district.children_under_five),
            health_facilities: district.health_facility_count,
            education_facilities: district.education_facility_count,
            risk_level: district.risk_level.clone(),
        }
    }

    fn fields(&self) -> [String; 6] {
        [
            self.district.clone(),
            self.sub_district.clone(),
            self.children_under_five.to_string(),
            self.health_facilities.to_string(),
            self.education_facilities.to_string(),
            self.risk_level.clone(),
        ]
    }
}

/// A file ready to be handed to the user
#[derive(Debug, Clone, PartialEq)]
pub struct ExportArtifact {
    pub file_name: &'static str,
    pub mime_type: &'static str,
    pub contents: String,
    pub row_count: usize,
}

/// Nearest integer with halves rounded toward positive infinity
fn round_half_up(value: f64) -> i64 {
    if value.is_finite() {
        (value + 0.5).floor() as i64
    } else {
        0
    }
}

/// Severity rank of a textual risk label; unknown labels rank lowest
pub fn severity_rank(label: &str) -> u8 {
    match label {
        "Very High" => 5,
        "High" => 4,
        "Medium" => 3,
        "Low" => 2,
        "Very Low" => 1,
        _ => 0,
    }
}

/// Deduplicate, project and sort the district rows
pub fn export_rows(districts: &[District]) -> Vec<ExportRow> {
    let mut seen = HashSet::new();
    let mut rows: Vec<ExportRow> = districts
        .iter()
        .filter(|d| seen.insert(d.names.sub_district.as_str()))
        .map(ExportRow::from_district)
        .collect();

    let dropped = districts.len() - rows.len();
    if dropped > 0 {
        debug!("Dropped {} rows with repeated sub-district names", dropped);
    }

    // sort_by is stable, ties keep input order
    rows.sort_by(|a, b| severity_rank(&b.risk_level).cmp(&severity_rank(&a.risk_level)));
    rows
}

/// Serialize rows with a header, quoting every field and joining lines with `\n`
pub fn to_csv(rows: &[ExportRow]) -> Result<String> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(EXPORT_HEADERS)?;
    for row in rows {
        writer.write_record(row.fields())?;
    }

    let bytes = writer.into_inner().context("Failed to flush CSV writer")?;
    let mut csv = String::from_utf8(bytes).context("CSV output is not valid UTF-8")?;
    if csv.ends_with('\n') {
        csv.pop();
    }
    Ok(csv)
}

/// Build the downloadable export from the loaded data
pub fn build_export(data: &DashboardData) -> Result<ExportArtifact> {
    let rows = export_rows(&data.districts);
    let contents = to_csv(&rows)?;
    info!("📄 Built export with {} rows from {} districts", rows.len(), data.districts.len());

    Ok(ExportArtifact {
        file_name: EXPORT_FILE_NAME,
        mime_type: EXPORT_MIME_TYPE,
        contents,
        row_count: rows.len(),
    })
}

/// Write the artifact into `dir`, returning the full path
pub fn write_artifact(artifact: &ExportArtifact, dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(dir).with_context(|| format!("Failed to create export directory: {:?}", dir))?;
    let path = dir.join(artifact.file_name);
    fs::write(&path, &artifact.contents)
        .with_context(|| format!("Failed to write export file: {:?}", path))?;
    info!("💾 Saved {} ({} rows) to {:?}", artifact.file_name, artifact.row_count, path);
    Ok(path)
}
