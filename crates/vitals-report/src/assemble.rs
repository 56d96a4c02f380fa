//! Export assembly.

use std::time::Instant;

use tracing::{info, info_span};

use vitals_core::ExportGroups;
use vitals_model::{ClassifiedRecord, ExportOptions, GroupSummary};

use crate::error::Result;
use crate::sink::ExportSink;
use crate::table::build_group_table;
use crate::unknown_csv::{UNKNOWN_ROWS_FILENAME, unknown_rows_csv};

/// What was handed to the sink.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportReport {
    /// One entry per written table, in group-key order.
    pub tables: Vec<GroupSummary>,
    /// Rows in the unknown CSV; zero when it was not written.
    pub unknown_rows: usize,
    pub unknown_written: bool,
}

/// Write every group as a table, then the unknown CSV when requested and
/// non-empty. The sink is left open so callers can add more files.
pub fn export_bundle(
    groups: &ExportGroups,
    unknown: &[ClassifiedRecord],
    options: &ExportOptions,
    sink: &mut dyn ExportSink,
) -> Result<ExportReport> {
    let span = info_span!("export", groups = groups.len(), unknown = unknown.len());
    let _guard = span.enter();
    let start = Instant::now();

    let mut report = ExportReport::default();
    for (key, records) in groups {
        let mut table = build_group_table(key, records)?;
        sink.write_table(&table.folder, &table.filename, &mut table.frame)?;
        report.tables.push(GroupSummary {
            key: key.clone(),
            rows: records.len(),
        });
    }

    if options.include_unknown && !unknown.is_empty() {
        sink.write_text(UNKNOWN_ROWS_FILENAME, &unknown_rows_csv(unknown)?)?;
        report.unknown_rows = unknown.len();
        report.unknown_written = true;
    }

    info!(
        tables = report.tables.len(),
        unknown_written = report.unknown_written,
        duration_ms = start.elapsed().as_millis(),
        "export assembled"
    );
    Ok(report)
}
