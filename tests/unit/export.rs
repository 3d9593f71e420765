//! Export pipeline from raw district feed to CSV text

use pretty_assertions::assert_eq;
use test_log::test;

use crate::common::fixtures;
use crate::common::logging::{init_test_logging, log_test_step};
use storm_risk_dashboard::export::{build_export, export_rows, severity_rank, EXPORT_FILE_NAME, EXPORT_HEADERS};
use storm_risk_dashboard::models::schema::parse_districts;
use storm_risk_dashboard::models::DashboardData;
use storm_risk_dashboard::styling::RiskClass;

fn data_from_fixture() -> DashboardData {
    DashboardData {
        districts: parse_districts(fixtures::export_districts()).expect("districts parse"),
        ..DashboardData::default()
    }
}

#[test]
fn test_export_walkthrough() {
    init_test_logging();
    log_test_step("Exporting the three-district fixture");

    let artifact = build_export(&data_from_fixture()).expect("export builds");

    assert_eq!(artifact.file_name, EXPORT_FILE_NAME);
    assert_eq!(artifact.mime_type, "text/csv");
    assert_eq!(artifact.row_count, 2);
    assert_eq!(
        artifact.contents,
        [
            r#""District","Sub-district","Children Under 5","Health Facilities","Education Facilities","Risk Level""#,
            r#""C","Y","0","1","1","Very High""#,
            r#""A","X","5","2","0","High""#,
        ]
        .join("\n")
    );
}

#[test]
fn test_export_reads_back_with_csv_reader() {
    let mut districts = parse_districts(fixtures::export_districts()).expect("districts parse");
    districts[2].names.district = "Cox's \"Bazar\", South".to_string();
    let data = DashboardData { districts, ..DashboardData::default() };

    let artifact = build_export(&data).expect("export builds");
    let mut reader = csv::Reader::from_reader(artifact.contents.as_bytes());

    let headers: Vec<String> = reader.headers().expect("headers").iter().map(str::to_string).collect();
    assert_eq!(headers, EXPORT_HEADERS.map(str::to_string).to_vec());

    let rows: Vec<Vec<String>> = reader
        .records()
        .map(|r| r.expect("record").iter().map(str::to_string).collect())
        .collect();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0][0], "Cox's \"Bazar\", South");
    assert_eq!(rows[0][1], "Y");
    assert_eq!(rows[1], vec!["A", "X", "5", "2", "0", "High"]);
}

#[test]
fn test_rows_sorted_by_severity_with_stable_ties() {
    let districts = vec![
        fixtures::district(0, "Low-1", "Low", RiskClass::Low),
        fixtures::district(1, "Unknown", "Severe", RiskClass::VeryHigh),
        fixtures::district(2, "High-1", "High", RiskClass::High),
        fixtures::district(3, "Low-2", "Low", RiskClass::Low),
        fixtures::district(4, "Blank", "", RiskClass::NoRisk),
        fixtures::district(5, "High-2", "High", RiskClass::High),
    ];

    let rows = export_rows(&districts);
    let order: Vec<&str> = rows.iter().map(|r| r.sub_district.as_str()).collect();
    assert_eq!(order, vec!["High-1", "High-2", "Low-1", "Low-2", "Unknown", "Blank"]);

    for pair in rows.windows(2) {
        assert!(severity_rank(&pair[0].risk_level) >= severity_rank(&pair[1].risk_level));
    }
}

#[test]
fn test_dedup_ignores_parent_district() {
    let mut first = fixtures::district(0, "Sadar", "Medium", RiskClass::Medium);
    first.names.district = "Bhola".to_string();
    let mut second = fixtures::district(1, "Sadar", "Very High", RiskClass::VeryHigh);
    second.names.district = "Barguna".to_string();

    let rows = export_rows(&[first, second]);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].district, "Bhola");
    assert_eq!(rows[0].risk_level, "Medium");
}

#[test]
fn test_risk_level_and_score_are_independent() {
    // score 1 but labelled "Very High": export ranks by the label
    let mismatched = fixtures::district(0, "Mismatch", "Very High", RiskClass::VeryLow);
    let consistent = fixtures::district(1, "Consistent", "High", RiskClass::VeryHigh);

    let rows = export_rows(&[consistent, mismatched]);
    assert_eq!(rows[0].sub_district, "Mismatch");
}

#[test]
fn test_malformed_counts_are_normalized() {
    init_test_logging();
    log_test_step("Fractional and negative counts in the district feed");

    let feed = fixtures::collection(vec![fixtures::district_feature(
        90.0,
        22.0,
        serde_json::json!({
            "NAME_2": "D", "NAME_4": "Z",
            "children_under_five": -2.5,
            "health_facility_count": 2.5,
            "education_facility_count": -1,
            "risk_level": "Medium"
        }),
    )]);
    let data = DashboardData {
        districts: parse_districts(feed).expect("districts parse"),
        ..DashboardData::default()
    };

    let artifact = build_export(&data).expect("export builds");
    let last = artifact.contents.lines().last().unwrap_or_default();
    assert_eq!(last, r#""D","Z","-2","3","0","Medium""#);
}
