//! Course and session resolution from calendar dates.

use chrono::NaiveDate;
use vitals_standards::ScheduleTables;

/// Resolves course and session for a date against injected lookup tables.
#[derive(Debug, Clone, Copy)]
pub struct TimeClassifier<'t> {
    tables: &'t ScheduleTables,
}

impl<'t> TimeClassifier<'t> {
    pub fn new(tables: &'t ScheduleTables) -> Self {
        Self { tables }
    }

    /// First course window, in declaration order, whose month/day range holds `date`.
    ///
    /// The comparison is component-wise on (month, day); the year is ignored.
    pub fn resolve_course(&self, date: NaiveDate) -> Option<&'t str> {
        self.tables
            .course_windows
            .iter()
            .find(|window| window.contains(date))
            .map(|window| window.course.as_str())
    }

    /// Session for `date` by whole-day offset from the course's first day.
    pub fn resolve_session(&self, course: Option<&str>, date: NaiveDate) -> Option<&'t str> {
        let start = self.tables.course_start(course?)?;
        self.tables.session_for_offset(day_offset(start, date))
    }
}

/// Calendar-day difference; time of day never enters into it.
pub fn day_offset(start: NaiveDate, date: NaiveDate) -> i64 {
    (date - start).num_days()
}

#[cfg(test)]
mod tests {
    use super::*;
    use vitals_standards::load_default_tables;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn resolves_course_inside_window() {
        let tables = load_default_tables().unwrap();
        let classifier = TimeClassifier::new(&tables);
        assert_eq!(classifier.resolve_course(date(2024, 10, 16)), Some("2025A"));
        assert_eq!(classifier.resolve_course(date(2024, 10, 31)), Some("2025B"));
        assert_eq!(classifier.resolve_course(date(2024, 10, 19)), None);
    }

    #[test]
    fn window_bounds_are_inclusive() {
        let tables = load_default_tables().unwrap();
        let classifier = TimeClassifier::new(&tables);
        assert_eq!(classifier.resolve_course(date(2024, 10, 14)), Some("2025A"));
        assert_eq!(classifier.resolve_course(date(2024, 10, 18)), Some("2025A"));
        assert_eq!(classifier.resolve_course(date(2024, 10, 13)), None);
    }

    #[test]
    fn session_offsets_map_to_sims() {
        let tables = load_default_tables().unwrap();
        let classifier = TimeClassifier::new(&tables);
        let expected = ["Sim1", "Sim2", "Sim3", "Sim4", "Sim5"];
        for (offset, sim) in expected.iter().enumerate() {
            let day = date(2024, 10, 14 + offset as u32);
            assert_eq!(classifier.resolve_session(Some("2025A"), day), Some(*sim));
        }
        assert_eq!(classifier.resolve_session(Some("2025A"), date(2024, 10, 19)), None);
        assert_eq!(classifier.resolve_session(Some("2025A"), date(2024, 10, 13)), None);
    }

    #[test]
    fn unknown_course_has_no_session() {
        let tables = load_default_tables().unwrap();
        let classifier = TimeClassifier::new(&tables);
        assert_eq!(classifier.resolve_session(None, date(2024, 10, 14)), None);
        assert_eq!(classifier.resolve_session(Some("1999Z"), date(2024, 10, 14)), None);
    }

    #[test]
    fn offset_counts_calendar_days() {
        assert_eq!(day_offset(date(2024, 10, 14), date(2024, 10, 14)), 0);
        assert_eq!(day_offset(date(2024, 10, 14), date(2024, 10, 13)), -1);
        assert_eq!(day_offset(date(2024, 12, 30), date(2025, 1, 2)), 3);
    }
}
