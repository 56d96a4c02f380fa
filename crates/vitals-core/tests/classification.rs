//! Tests for classification, partitioning and grouping.

use chrono::{NaiveDate, NaiveDateTime};
use proptest::prelude::*;

use vitals_core::{Engine, TimeClassifier, audit_schedules};
use vitals_model::{GroupKey, ObservationRecord, VitalFields, VitalValue};
use vitals_standards::{CourseWindow, ScheduleTables, load_default_tables};

const DAVE: &str = "AI23F013939";
const OSCAR: &str = "AI20C009617";

fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(h, min, 0)
        .unwrap()
}

fn record(timestamp: Option<NaiveDateTime>, serial: Option<&str>, tag: &str) -> ObservationRecord {
    let mut vitals = VitalFields::new();
    vitals.insert("Hr", Some(VitalValue::from(tag)));
    ObservationRecord {
        timestamp,
        raw_timestamp: timestamp.map(|t| t.format("%Y-%m-%dT%H:%M:%S").to_string()),
        device_serial: serial.map(str::to_string),
        source_file: "case.json".to_string(),
        vitals,
    }
}

fn tag(record: &vitals_model::ClassifiedRecord) -> String {
    record.observation.vitals.get("Hr").unwrap().to_string()
}

#[test]
fn day_zero_is_valid_and_day_six_is_unknown() {
    let tables = load_default_tables().unwrap();
    let engine = Engine::new(&tables);
    let records = vec![
        record(Some(at(2024, 10, 14, 9, 0)), Some(DAVE), "first"),
        record(Some(at(2024, 10, 20, 9, 0)), Some(DAVE), "second"),
    ];

    let result = engine.run(records);

    assert_eq!(result.summary.valid_rows, 1);
    assert_eq!(result.summary.unknown_rows, 1);
    let key = GroupKey::new("2025A", "Sim1", "Dave", "2024-10-14");
    let group = result.groups.get(&key).expect("Sim1 group");
    assert_eq!(group.len(), 1);
    assert_eq!(tag(&group[0]), "first");
    assert_eq!(tag(&result.unknown[0]), "second");
    assert_eq!(result.unknown[0].course, None);
}

#[test]
fn window_crossing_month_end_reaches_sim5() {
    let tables = load_default_tables().unwrap();
    let engine = Engine::new(&tables);
    // 2025B runs 10/28 - 11/01, so 11/01 is day offset 4.
    let result = engine.run(vec![record(Some(at(2024, 11, 1, 9, 0)), Some(OSCAR), "x")]);
    assert_eq!(result.summary.valid_rows, 1);
    let key = GroupKey::new("2025B", "Sim5", "Oscar", "2024-11-01");
    assert!(result.groups.contains_key(&key));
}

#[test]
fn missing_serial_is_always_unknown() {
    let tables = load_default_tables().unwrap();
    let engine = Engine::new(&tables);
    let result = engine.run(vec![record(Some(at(2024, 10, 14, 9, 0)), None, "x")]);

    assert_eq!(result.summary.valid_rows, 0);
    assert_eq!(result.unknown.len(), 1);
    let unknown = &result.unknown[0];
    assert_eq!(unknown.course.as_deref(), Some("2025A"));
    assert_eq!(unknown.session.as_deref(), Some("Sim1"));
    assert_eq!(unknown.mannequin, None);
}

#[test]
fn mannequin_off_roster_is_unknown() {
    let tables = load_default_tables().unwrap();
    let engine = Engine::new(&tables);
    // Oscar is not on the Sim1 roster.
    let result = engine.run(vec![record(Some(at(2024, 10, 14, 9, 0)), Some(OSCAR), "x")]);
    assert_eq!(result.summary.unknown_rows, 1);
    assert_eq!(result.unknown[0].override_mannequin.as_deref(), Some("Oscar"));
}

#[test]
fn untimed_records_are_dropped_from_both_outputs() {
    let tables = load_default_tables().unwrap();
    let engine = Engine::new(&tables);
    let result = engine.run(vec![
        record(None, Some(DAVE), "untimed"),
        record(Some(at(2024, 10, 14, 9, 0)), Some(DAVE), "timed"),
    ]);

    assert_eq!(result.summary.total_rows, 2);
    assert_eq!(result.summary.valid_rows, 1);
    assert_eq!(result.summary.unknown_rows, 0);
    assert_eq!(result.summary.dropped_rows(), 1);
}

#[test]
fn groups_split_by_date_and_stay_chronological() {
    let tables = load_default_tables().unwrap();
    let engine = Engine::new(&tables);
    let result = engine.run(vec![
        record(Some(at(2024, 10, 14, 11, 0)), Some(DAVE), "late"),
        record(Some(at(2024, 10, 16, 9, 0)), Some(DAVE), "sim3"),
        record(Some(at(2024, 10, 14, 9, 0)), Some(DAVE), "early"),
    ]);

    assert_eq!(result.groups.len(), 2);
    let day0 = &result.groups[&GroupKey::new("2025A", "Sim1", "Dave", "2024-10-14")];
    let tags: Vec<String> = day0.iter().map(tag).collect();
    assert_eq!(tags, vec!["early", "late"]);
    assert!(
        result
            .groups
            .contains_key(&GroupKey::new("2025A", "Sim3", "Dave", "2024-10-16"))
    );
}

#[test]
fn equal_timestamps_keep_input_order() {
    let tables = load_default_tables().unwrap();
    let engine = Engine::new(&tables);
    let same = Some(at(2024, 10, 14, 9, 0));
    let result = engine.run(vec![
        record(same, Some(DAVE), "a"),
        record(same, None, "u1"),
        record(same, Some(DAVE), "b"),
        record(same, None, "u2"),
    ]);

    let valid: Vec<String> = result.valid_records().map(tag).collect();
    let unknown: Vec<String> = result.unknown.iter().map(tag).collect();
    assert_eq!(valid, vec!["a", "b"]);
    assert_eq!(unknown, vec!["u1", "u2"]);
}

#[test]
fn earlier_declared_window_wins_on_shared_boundary() {
    let tables = ScheduleTables {
        course_windows: vec![
            CourseWindow {
                start: "01/01".parse().unwrap(),
                end: "01/10".parse().unwrap(),
                course: "FIRST".to_string(),
            },
            CourseWindow {
                start: "01/10".parse().unwrap(),
                end: "01/20".parse().unwrap(),
                course: "SECOND".to_string(),
            },
        ],
        ..ScheduleTables::default()
    };
    let classifier = TimeClassifier::new(&tables);
    let boundary = NaiveDate::from_ymd_opt(2025, 1, 10).unwrap();
    assert_eq!(classifier.resolve_course(boundary), Some("FIRST"));
    let later = NaiveDate::from_ymd_opt(2025, 1, 11).unwrap();
    assert_eq!(classifier.resolve_course(later), Some("SECOND"));
}

#[test]
fn shared_start_dates_resolve_to_first_declared() {
    let tables = load_default_tables().unwrap();
    let classifier = TimeClassifier::new(&tables);
    let date = NaiveDate::from_ymd_opt(2025, 2, 19).unwrap();
    assert_eq!(classifier.resolve_course(date), Some("2025G/H"));
    let date = NaiveDate::from_ymd_opt(2025, 2, 25).unwrap();
    assert_eq!(classifier.resolve_course(date), Some("2025H"));
}

#[test]
fn schedule_audit_counts_out_of_slot_rows() {
    let tables = load_default_tables().unwrap();
    let engine = Engine::new(&tables);
    let result = engine.run(vec![
        record(Some(at(2024, 10, 14, 9, 0)), Some(DAVE), "in"),
        record(Some(at(2024, 10, 14, 12, 55)), Some(DAVE), "lunch"),
        record(Some(at(2024, 10, 14, 18, 0)), Some(DAVE), "evening"),
    ]);

    let audit = audit_schedules(result.valid_records(), &tables);
    assert_eq!(audit.checked, 3);
    assert_eq!(audit.outside_window, 2);
    assert_eq!(audit.by_session.get("Sim1"), Some(&2));
    assert!(!audit.is_clean());
    // The audit is a report only.
    assert_eq!(result.summary.valid_rows, 3);
}

fn arbitrary_record() -> impl Strategy<Value = ObservationRecord> {
    let serials = prop_oneof![
        Just(None),
        Just(Some(DAVE)),
        Just(Some(OSCAR)),
        Just(Some("AI15D003889")),
        Just(Some("NOT-A-DEVICE")),
    ];
    (
        prop::option::weighted(0.9, 0i64..400),
        0u32..24,
        serials,
        0u32..1000,
    )
        .prop_map(|(day, hour, serial, id)| {
            let base = NaiveDate::from_ymd_opt(2024, 10, 1).unwrap();
            let timestamp = day.map(|offset| {
                (base + chrono::Duration::days(offset))
                    .and_hms_opt(hour, 0, 0)
                    .unwrap()
            });
            record(timestamp, serial, &id.to_string())
        })
}

proptest! {
    #[test]
    fn every_timed_record_lands_exactly_once(
        records in prop::collection::vec(arbitrary_record(), 0..60)
    ) {
        let tables = load_default_tables().unwrap();
        let engine = Engine::new(&tables);
        let timed = records.iter().filter(|r| r.timestamp.is_some()).count();

        let result = engine.run(records.clone());

        let grouped: usize = result.groups.values().map(Vec::len).sum();
        prop_assert_eq!(grouped, result.summary.valid_rows);
        prop_assert_eq!(result.summary.valid_rows + result.summary.unknown_rows, timed);
        prop_assert_eq!(result.summary.total_rows, records.len());
        for (key, group) in &result.groups {
            for row in group {
                prop_assert!(engine.is_valid(row));
                prop_assert_eq!(row.course.as_deref(), Some(key.course.as_str()));
                prop_assert_eq!(row.session.as_deref(), Some(key.session.as_str()));
                prop_assert_eq!(row.override_mannequin.as_deref(), Some(key.mannequin.as_str()));
                prop_assert_eq!(&row.date_key, &key.date);
            }
        }
        for row in &result.unknown {
            prop_assert!(!engine.is_valid(row));
        }
    }

    #[test]
    fn outputs_are_chronological(
        records in prop::collection::vec(arbitrary_record(), 0..60)
    ) {
        let tables = load_default_tables().unwrap();
        let result = Engine::new(&tables).run(records);
        for group in result.groups.values() {
            prop_assert!(group.windows(2).all(|pair| pair[0].timestamp <= pair[1].timestamp));
        }
        prop_assert!(result.unknown.windows(2).all(|pair| pair[0].timestamp <= pair[1].timestamp));
    }
}
