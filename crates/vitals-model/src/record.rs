//! Observation and classified record types.
//!
//! An [`ObservationRecord`] is one trend-report sample from one source file.
//! A [`ClassifiedRecord`] is the same sample once course, session and
//! mannequin have been resolved; only records with a parsed timestamp get
//! that far.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::value::VitalValue;
use crate::{DEV_SERIAL_COLUMN, SOURCE_FILE_COLUMN, TIME_STR_COLUMN};

/// Named vital-sign fields in extraction order.
///
/// Field order is the column order of every exported row, so this is kept as
/// an ordered list rather than a map.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VitalFields {
    fields: Vec<(String, Option<VitalValue>)>,
}

impl VitalFields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field, replacing an earlier value of the same name in place.
    pub fn insert(&mut self, name: impl Into<String>, value: Option<VitalValue>) {
        let name = name.into();
        match self.fields.iter_mut().find(|(existing, _)| *existing == name) {
            Some(slot) => slot.1 = value,
            None => self.fields.push((name, value)),
        }
    }

    /// Value of a field; `None` when the field is absent or null.
    pub fn get(&self, name: &str) -> Option<&VitalValue> {
        self.fields
            .iter()
            .find(|(existing, _)| existing == name)
            .and_then(|(_, value)| value.as_ref())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.iter().any(|(existing, _)| existing == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&VitalValue>)> {
        self.fields
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_ref()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// One timestamped sample extracted from a monitor export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObservationRecord {
    /// Parsed device time, `None` when absent or unparsable.
    pub timestamp: Option<NaiveDateTime>,
    /// Timestamp text exactly as found in the document.
    pub raw_timestamp: Option<String>,
    pub device_serial: Option<String>,
    pub source_file: String,
    pub vitals: VitalFields,
}

/// A flat exported row: column name and rendered value, in column order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    cells: Vec<(String, Option<String>)>,
}

impl Row {
    pub fn push(&mut self, column: impl Into<String>, value: Option<String>) {
        self.cells.push((column.into(), value));
    }

    pub fn get(&self, column: &str) -> Option<&str> {
        self.cells
            .iter()
            .find(|(name, _)| name == column)
            .and_then(|(_, value)| value.as_deref())
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().map(|(name, _)| name.as_str())
    }

    pub fn cells(&self) -> &[(String, Option<String>)] {
        &self.cells
    }
}

/// An observation annotated with its resolved course, session and mannequin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedRecord {
    pub observation: ObservationRecord,
    pub timestamp: NaiveDateTime,
    /// Mannequin resolved from the device serial.
    pub mannequin: Option<String>,
    pub course: Option<String>,
    pub session: Option<String>,
    /// Mannequin used for validation and grouping; starts as `mannequin`.
    pub override_mannequin: Option<String>,
    /// Calendar date of `timestamp` as `YYYY-MM-DD`.
    pub date_key: String,
}

impl ClassifiedRecord {
    /// Flatten into an export row.
    ///
    /// The parsed timestamp object is not a column; `TimeStr` carries the
    /// raw device text instead.
    pub fn to_row(&self) -> Row {
        let observation = &self.observation;
        let mut row = Row::default();
        row.push(TIME_STR_COLUMN, observation.raw_timestamp.clone());
        row.push(DEV_SERIAL_COLUMN, observation.device_serial.clone());
        for (name, value) in observation.vitals.iter() {
            row.push(name, value.map(ToString::to_string));
        }
        row.push(SOURCE_FILE_COLUMN, Some(observation.source_file.clone()));
        row.push("rawMannequin", self.mannequin.clone());
        row.push("Course", self.course.clone());
        row.push("Sim", self.session.clone());
        row.push("overrideMannequin", self.override_mannequin.clone());
        row.push("DateStr", Some(self.date_key.clone()));
        row
    }
}
