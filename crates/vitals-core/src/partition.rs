//! Partitioning of classified records and grouping into export buckets.

use std::collections::BTreeMap;
use std::time::Instant;

use tracing::{debug, info, info_span};

use vitals_model::{ClassifiedRecord, GroupKey, ObservationRecord, RunSummary};
use vitals_standards::ScheduleTables;

use crate::classifier::TimeClassifier;
use crate::mannequin::MannequinValidator;

/// Valid records bucketed by group key, each bucket in timestamp order.
pub type ExportGroups = BTreeMap<GroupKey, Vec<ClassifiedRecord>>;

/// Result of classifying one run's records.
#[derive(Debug, Clone, Default)]
pub struct Classification {
    pub groups: ExportGroups,
    /// Records with a timestamp that failed classification, in timestamp order.
    pub unknown: Vec<ClassifiedRecord>,
    pub summary: RunSummary,
}

impl Classification {
    pub fn valid_records(&self) -> impl Iterator<Item = &ClassifiedRecord> {
        self.groups.values().flatten()
    }
}

/// Classification engine over a fixed set of lookup tables.
#[derive(Debug, Clone, Copy)]
pub struct Engine<'t> {
    tables: &'t ScheduleTables,
    time: TimeClassifier<'t>,
    mannequins: MannequinValidator<'t>,
}

impl<'t> Engine<'t> {
    pub fn new(tables: &'t ScheduleTables) -> Self {
        Self {
            tables,
            time: TimeClassifier::new(tables),
            mannequins: MannequinValidator::new(tables),
        }
    }

    pub fn tables(&self) -> &'t ScheduleTables {
        self.tables
    }

    /// Annotate one record; `None` when it has no usable timestamp.
    pub fn classify(&self, record: ObservationRecord) -> Option<ClassifiedRecord> {
        let timestamp = record.timestamp?;
        let date = timestamp.date();
        let mannequin = self
            .mannequins
            .resolve_mannequin(record.device_serial.as_deref())
            .map(str::to_string);
        let course = self.time.resolve_course(date);
        let session = self.time.resolve_session(course, date);
        Some(ClassifiedRecord {
            observation: record,
            timestamp,
            override_mannequin: mannequin.clone(),
            mannequin,
            course: course.map(str::to_string),
            session: session.map(str::to_string),
            date_key: date.format("%Y-%m-%d").to_string(),
        })
    }

    /// Valid means course, session and override mannequin are all resolved
    /// and the mannequin is on the session's roster.
    pub fn is_valid(&self, record: &ClassifiedRecord) -> bool {
        record.course.is_some()
            && self.mannequins.is_valid(
                record.session.as_deref(),
                record.override_mannequin.as_deref(),
            )
    }

    /// Classify, partition and group a complete set of records.
    ///
    /// Records without a usable timestamp are dropped and appear in neither
    /// output; they still count towards `total_rows`.
    pub fn run(&self, records: Vec<ObservationRecord>) -> Classification {
        let span = info_span!("classify", records = records.len());
        let _guard = span.enter();
        let start = Instant::now();

        let total_rows = records.len();
        let mut timed: Vec<ObservationRecord> = records
            .into_iter()
            .filter(|record| record.timestamp.is_some())
            .collect();
        let dropped = total_rows - timed.len();
        if dropped > 0 {
            debug!(dropped, "dropped records without a usable timestamp");
        }
        // Stable: equal timestamps keep their extraction order.
        timed.sort_by_key(|record| record.timestamp);

        let (valid, unknown): (Vec<_>, Vec<_>) = timed
            .into_iter()
            .filter_map(|record| self.classify(record))
            .partition(|record| self.is_valid(record));

        let summary = RunSummary {
            total_rows,
            valid_rows: valid.len(),
            unknown_rows: unknown.len(),
        };
        let groups = group_valid(valid);
        info!(
            total_rows,
            valid_rows = summary.valid_rows,
            unknown_rows = summary.unknown_rows,
            groups = groups.len(),
            duration_ms = start.elapsed().as_millis(),
            "classification complete"
        );
        Classification {
            groups,
            unknown,
            summary,
        }
    }
}

/// Bucket valid records by `(course, session, override mannequin, date)`,
/// keeping input order within each bucket.
///
/// Records missing any key component are skipped; callers pass only records
/// that passed validation, which always have all four.
pub fn group_valid(valid: Vec<ClassifiedRecord>) -> ExportGroups {
    let mut groups = ExportGroups::new();
    for record in valid {
        let (Some(course), Some(session), Some(mannequin)) = (
            record.course.clone(),
            record.session.clone(),
            record.override_mannequin.clone(),
        ) else {
            continue;
        };
        let key = GroupKey::new(course, session, mannequin, record.date_key.clone());
        groups.entry(key).or_default().push(record);
    }
    groups
}
