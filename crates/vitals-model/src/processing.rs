use serde::{Deserialize, Serialize};

use crate::group::GroupKey;

/// Row counts reported back to the caller after a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Every extracted record, including those dropped for a bad timestamp.
    pub total_rows: usize,
    pub valid_rows: usize,
    pub unknown_rows: usize,
}

impl RunSummary {
    /// Records excluded from both outputs because their timestamp was unusable.
    pub fn dropped_rows(&self) -> usize {
        self.total_rows
            .saturating_sub(self.valid_rows + self.unknown_rows)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupSummary {
    pub key: GroupKey,
    pub rows: usize,
}
