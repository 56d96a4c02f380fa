#![deny(unsafe_code)]

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum TablesError {
    #[error("failed to read file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse lookup tables {origin}: {source}")]
    Toml {
        origin: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid month/day '{value}' (expected MM/DD)")]
    InvalidMonthDay { value: String },

    #[error("invalid clock slot '{value}' (expected HH:MM-HH:MM)")]
    InvalidClockSlot { value: String },

    #[error("session offset {offset} is mapped more than once")]
    DuplicateOffset { offset: i64 },
}

impl TablesError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
