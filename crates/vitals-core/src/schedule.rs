//! Audit of valid records against the session clock schedules.
//!
//! Purely a report: it never changes which records are valid or how they
//! are grouped.

use std::collections::BTreeMap;

use vitals_model::ClassifiedRecord;
use vitals_standards::ScheduleTables;

/// Per-session counts of valid records outside every scheduled slot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScheduleAudit {
    pub checked: usize,
    pub outside_window: usize,
    /// Session name to records outside its slots. Sessions without a
    /// schedule are not audited and do not appear.
    pub by_session: BTreeMap<String, usize>,
}

impl ScheduleAudit {
    pub fn is_clean(&self) -> bool {
        self.outside_window == 0
    }
}

/// Count valid records whose time of day falls outside their session's slots.
pub fn audit_schedules<'r, I>(records: I, tables: &ScheduleTables) -> ScheduleAudit
where
    I: IntoIterator<Item = &'r ClassifiedRecord>,
{
    let mut audit = ScheduleAudit::default();
    for record in records {
        let Some(session) = record.session.as_deref() else {
            continue;
        };
        let slots = tables.schedule(session);
        if slots.is_empty() {
            continue;
        }
        audit.checked += 1;
        let time = record.timestamp.time();
        if !slots.iter().any(|slot| slot.contains(time)) {
            audit.outside_window += 1;
            *audit.by_session.entry(session.to_string()).or_default() += 1;
        }
    }
    audit
}
