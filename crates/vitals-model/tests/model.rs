//! Tests for vitals-model types.

use chrono::NaiveDate;
use vitals_model::{
    ClassifiedRecord, GroupKey, ObservationRecord, RunSummary, VitalFields, VitalValue,
};

fn classified(course: Option<&str>) -> ClassifiedRecord {
    let timestamp = NaiveDate::from_ymd_opt(2024, 10, 14)
        .unwrap()
        .and_hms_opt(9, 15, 0)
        .unwrap();
    let mut vitals = VitalFields::new();
    vitals.insert("Hr", Some(VitalValue::from("72")));
    vitals.insert("SpO2", None);
    ClassifiedRecord {
        observation: ObservationRecord {
            timestamp: Some(timestamp),
            raw_timestamp: Some("2024-10-14T09:15:00".to_string()),
            device_serial: Some("AI23F013939".to_string()),
            source_file: "a.json".to_string(),
            vitals,
        },
        timestamp,
        mannequin: Some("Dave".to_string()),
        course: course.map(str::to_string),
        session: Some("Sim1".to_string()),
        override_mannequin: Some("Dave".to_string()),
        date_key: "2024-10-14".to_string(),
    }
}

#[test]
fn row_columns_follow_extraction_order() {
    let row = classified(Some("2025A")).to_row();
    let columns: Vec<&str> = row.columns().collect();
    assert_eq!(
        columns,
        vec![
            "TimeStr",
            "DevSerial",
            "Hr",
            "SpO2",
            "SourceFile",
            "rawMannequin",
            "Course",
            "Sim",
            "overrideMannequin",
            "DateStr",
        ]
    );
    assert_eq!(row.get("Hr"), Some("72"));
    assert_eq!(row.get("SpO2"), None);
    assert_eq!(row.get("DateStr"), Some("2024-10-14"));
}

#[test]
fn row_keeps_missing_course_as_null() {
    let row = classified(None).to_row();
    assert_eq!(row.get("Course"), None);
    assert!(row.columns().any(|column| column == "Course"));
}

#[test]
fn group_key_paths_flatten_separators() {
    let key = GroupKey::new("2025G/H", "Sim2", "Oscar", "2025-02-18");
    assert_eq!(key.folder_path(), "2025G_H/Sim2/Oscar/2025-02-18");
    assert_eq!(key.file_stem(), "2025G_H_Sim2_Oscar_20250218");
    assert_eq!(key.to_string(), "2025G/H/Sim2/Oscar/2025-02-18");
}

#[test]
fn summary_counts_dropped_rows() {
    let summary = RunSummary {
        total_rows: 10,
        valid_rows: 4,
        unknown_rows: 5,
    };
    assert_eq!(summary.dropped_rows(), 1);
}

#[test]
fn summary_serializes() {
    let summary = RunSummary {
        total_rows: 3,
        valid_rows: 2,
        unknown_rows: 1,
    };
    let json = serde_json::to_string(&summary).expect("serialize summary");
    let round: RunSummary = serde_json::from_str(&json).expect("deserialize summary");
    assert_eq!(round, summary);
}
