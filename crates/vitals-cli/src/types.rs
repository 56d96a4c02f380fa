use std::path::PathBuf;

use vitals_core::ScheduleAudit;
use vitals_model::{GroupSummary, RunSummary};

#[derive(Debug)]
pub struct ProcessResult {
    /// Bundle location; `None` for a dry run.
    pub output: Option<PathBuf>,
    pub files: usize,
    pub documents_with_records: usize,
    pub summary: RunSummary,
    pub groups: Vec<GroupSummary>,
    pub unknown_written: bool,
    pub audit: Option<ScheduleAudit>,
    /// Per-file problems that were skipped over.
    pub errors: Vec<String>,
}
