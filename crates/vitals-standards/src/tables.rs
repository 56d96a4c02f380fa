#![deny(unsafe_code)]

//! Lookup tables that drive course, session and mannequin resolution.
//!
//! Tables are plain data. They are loaded once and handed to the classifier,
//! which only ever reads them.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::TablesError;

/// A year-less calendar position, ordered month first then day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MonthDay {
    pub month: u32,
    pub day: u32,
}

impl MonthDay {
    pub fn new(month: u32, day: u32) -> Result<Self, TablesError> {
        if (1..=12).contains(&month) && (1..=31).contains(&day) {
            Ok(Self { month, day })
        } else {
            Err(TablesError::InvalidMonthDay {
                value: format!("{month:02}/{day:02}"),
            })
        }
    }

    pub fn of(date: NaiveDate) -> Self {
        Self {
            month: date.month(),
            day: date.day(),
        }
    }
}

impl FromStr for MonthDay {
    type Err = TablesError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let invalid = || TablesError::InvalidMonthDay {
            value: value.to_string(),
        };
        let (month, day) = value.trim().split_once('/').ok_or_else(invalid)?;
        let month = month.trim().parse().map_err(|_| invalid())?;
        let day = day.trim().parse().map_err(|_| invalid())?;
        Self::new(month, day).map_err(|_| invalid())
    }
}

impl TryFrom<String> for MonthDay {
    type Error = TablesError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<MonthDay> for String {
    fn from(value: MonthDay) -> Self {
        value.to_string()
    }
}

impl fmt::Display for MonthDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}/{:02}", self.month, self.day)
    }
}

/// One entry of the ordered course calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseWindow {
    pub start: MonthDay,
    pub end: MonthDay,
    pub course: String,
}

impl CourseWindow {
    /// Inclusive month/day containment. The year of `date` plays no part.
    pub fn contains(&self, date: NaiveDate) -> bool {
        let point = MonthDay::of(date);
        self.start <= point && point <= self.end
    }
}

/// Day offset from a course's first day mapped to a session name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionOffset {
    pub offset: i64,
    pub session: String,
}

/// A scheduled scenario slot within a session day, inclusive at both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClockSlot {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl ClockSlot {
    pub fn contains(&self, time: NaiveTime) -> bool {
        self.start <= time && time <= self.end
    }
}

impl FromStr for ClockSlot {
    type Err = TablesError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let invalid = || TablesError::InvalidClockSlot {
            value: value.to_string(),
        };
        let (start, end) = value.trim().split_once('-').ok_or_else(invalid)?;
        let start = NaiveTime::parse_from_str(start.trim(), "%H:%M").map_err(|_| invalid())?;
        let end = NaiveTime::parse_from_str(end.trim(), "%H:%M").map_err(|_| invalid())?;
        Ok(Self { start, end })
    }
}

impl TryFrom<String> for ClockSlot {
    type Error = TablesError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ClockSlot> for String {
    fn from(value: ClockSlot) -> Self {
        value.to_string()
    }
}

impl fmt::Display for ClockSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}",
            self.start.format("%H:%M"),
            self.end.format("%H:%M")
        )
    }
}

/// The full set of classification lookup tables.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleTables {
    /// Course calendar. Declaration order is the tie-break for overlaps.
    #[serde(default)]
    pub course_windows: Vec<CourseWindow>,
    /// First day ("day 0") of each course.
    #[serde(default)]
    pub course_start_dates: BTreeMap<String, NaiveDate>,
    #[serde(default)]
    pub session_offsets: Vec<SessionOffset>,
    /// Mannequins permitted per session.
    #[serde(default)]
    pub session_rosters: BTreeMap<String, Vec<String>>,
    /// Device serial number to mannequin name.
    #[serde(default)]
    pub devices: BTreeMap<String, String>,
    #[serde(default)]
    pub session_schedules: BTreeMap<String, Vec<ClockSlot>>,
}

impl ScheduleTables {
    /// Reject tables whose lookups would be ambiguous.
    ///
    /// Overlapping course windows are allowed; their order decides. A window
    /// ending before it starts is kept and simply never matches.
    pub fn validate(&self) -> Result<(), TablesError> {
        let mut seen = BTreeSet::new();
        for entry in &self.session_offsets {
            if !seen.insert(entry.offset) {
                return Err(TablesError::DuplicateOffset {
                    offset: entry.offset,
                });
            }
        }
        Ok(())
    }

    /// Courses whose window ends before it starts, in declaration order.
    pub fn inverted_windows(&self) -> Vec<&str> {
        self.course_windows
            .iter()
            .filter(|window| window.end < window.start)
            .map(|window| window.course.as_str())
            .collect()
    }

    pub fn course_start(&self, course: &str) -> Option<NaiveDate> {
        self.course_start_dates.get(course).copied()
    }

    pub fn session_for_offset(&self, offset: i64) -> Option<&str> {
        self.session_offsets
            .iter()
            .find(|entry| entry.offset == offset)
            .map(|entry| entry.session.as_str())
    }

    /// Permitted mannequins for a session; empty when the session is unmapped.
    pub fn roster(&self, session: &str) -> &[String] {
        self.session_rosters
            .get(session)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn mannequin_for_serial(&self, serial: &str) -> Option<&str> {
        self.devices.get(serial).map(String::as_str)
    }

    pub fn schedule(&self, session: &str) -> &[ClockSlot] {
        self.session_schedules
            .get(session)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Courses named by a window but missing a start date.
    pub fn courses_without_start(&self) -> Vec<&str> {
        self.course_windows
            .iter()
            .map(|window| window.course.as_str())
            .filter(|course| !self.course_start_dates.contains_key(*course))
            .collect()
    }
}
