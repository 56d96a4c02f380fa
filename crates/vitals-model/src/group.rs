use std::fmt;

use serde::{Deserialize, Serialize};

/// Key of one export group: `(course, session, mannequin, date)`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GroupKey {
    pub course: String,
    pub session: String,
    pub mannequin: String,
    /// Calendar date as `YYYY-MM-DD`.
    pub date: String,
}

impl GroupKey {
    pub fn new(
        course: impl Into<String>,
        session: impl Into<String>,
        mannequin: impl Into<String>,
        date: impl Into<String>,
    ) -> Self {
        Self {
            course: course.into(),
            session: session.into(),
            mannequin: mannequin.into(),
            date: date.into(),
        }
    }

    /// Destination folder `course/session/mannequin/date`.
    ///
    /// Separators inside a component (course names such as `2025G/H`) are
    /// replaced so the folder is always four levels deep.
    pub fn folder_path(&self) -> String {
        [&self.course, &self.session, &self.mannequin, &self.date]
            .iter()
            .map(|part| path_component(part))
            .collect::<Vec<_>>()
            .join("/")
    }

    /// File stem `course_session_mannequin_YYYYMMDD`.
    pub fn file_stem(&self) -> String {
        format!(
            "{}_{}_{}_{}",
            path_component(&self.course),
            path_component(&self.session),
            path_component(&self.mannequin),
            self.date.replace('-', "")
        )
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}/{}/{}",
            self.course, self.session, self.mannequin, self.date
        )
    }
}

fn path_component(value: &str) -> String {
    value.replace(['/', '\\'], "_")
}
