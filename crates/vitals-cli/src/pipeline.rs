//! Export pipeline with explicit stages.
//!
//! 1. **Ingest**: discover JSON files, read and extract them in parallel
//! 2. **Classify**: resolve course, session and mannequin, then partition
//!    and group
//! 3. **Output**: hand tables, the unknown CSV and the optional summary to a
//!    sink
//!
//! Per-file failures are collected and logged; only failures to list inputs
//! or write the bundle abort the run.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use serde_json::{Value, json};
use tracing::{info, info_span, trace, warn};

use vitals_core::{Classification, Engine, ScheduleAudit, audit_schedules};
use vitals_ingest::{extract_documents, list_json_files, read_documents};
use vitals_model::{ExportOptions, ObservationRecord, RunSummary};
use vitals_report::{ExportReport, ExportSink, export_bundle};
use vitals_standards::ScheduleTables;

use crate::logging::redact_value;
use crate::types::ProcessResult;

/// Bundle-root file name of the run summary.
pub const SUMMARY_FILENAME: &str = "summary.json";

// ============================================================================
// Stage 1: Ingest
// ============================================================================

#[derive(Debug)]
pub struct IngestResult {
    pub files: Vec<PathBuf>,
    pub records: Vec<ObservationRecord>,
    pub documents_with_records: usize,
    pub errors: Vec<String>,
}

/// Find input files and extract their records.
///
/// Unreadable or malformed files are reported in `errors` and skipped.
pub fn ingest(inputs: &[PathBuf]) -> Result<IngestResult> {
    let files = list_json_files(inputs).context("list input files")?;
    let (documents, read_errors) = read_documents(&files);
    let outcome = extract_documents(&documents);
    let errors = read_errors
        .iter()
        .chain(outcome.errors.iter())
        .map(ToString::to_string)
        .collect();
    Ok(IngestResult {
        files,
        records: outcome.records,
        documents_with_records: outcome.documents_with_records,
        errors,
    })
}

// ============================================================================
// Stage 2: Classify
// ============================================================================

pub fn classify(records: Vec<ObservationRecord>, tables: &ScheduleTables) -> Classification {
    for course in tables.inverted_windows() {
        warn!(course, "course window ends before it starts and never matches");
    }
    let classification = Engine::new(tables).run(records);
    if classification.summary.dropped_rows() > 0 {
        warn!(
            dropped = classification.summary.dropped_rows(),
            "records without a usable timestamp were dropped"
        );
    }
    for record in &classification.unknown {
        trace!(
            serial = redact_value(record.observation.device_serial.as_deref().unwrap_or("")),
            source = %record.observation.source_file,
            course = record.course.as_deref().unwrap_or("-"),
            session = record.session.as_deref().unwrap_or("-"),
            "record left unclassified"
        );
    }
    classification
}

/// Count valid records outside their session's clock schedule.
pub fn audit(classification: &Classification, tables: &ScheduleTables) -> ScheduleAudit {
    let audit = audit_schedules(classification.valid_records(), tables);
    if audit.is_clean() {
        info!(checked = audit.checked, "all valid records within session schedule");
    } else {
        for (session, count) in &audit.by_session {
            warn!(session = %session, count, "records outside session schedule");
        }
    }
    audit
}

// ============================================================================
// Stage 3: Output
// ============================================================================

/// Write the bundle contents. The caller finishes the sink.
pub fn output(
    classification: &Classification,
    options: &ExportOptions,
    audit: Option<&ScheduleAudit>,
    sink: &mut dyn ExportSink,
) -> Result<ExportReport> {
    let report = export_bundle(
        &classification.groups,
        &classification.unknown,
        options,
        sink,
    )
    .context("write export tables")?;
    if options.generate_summary {
        let summary = summary_json(&classification.summary, &report, audit);
        let text = serde_json::to_string_pretty(&summary).context("serialize run summary")?;
        sink.write_text(SUMMARY_FILENAME, &text)
            .context("write run summary")?;
    }
    Ok(report)
}

/// Run counts and per-group row counts as written to `summary.json`.
pub fn summary_json(
    summary: &RunSummary,
    report: &ExportReport,
    audit: Option<&ScheduleAudit>,
) -> Value {
    let groups: Vec<Value> = report
        .tables
        .iter()
        .map(|table| {
            json!({
                "course": table.key.course,
                "session": table.key.session,
                "mannequin": table.key.mannequin,
                "date": table.key.date,
                "rows": table.rows,
            })
        })
        .collect();
    let mut value = json!({
        "total_rows": summary.total_rows,
        "valid_rows": summary.valid_rows,
        "unknown_rows": summary.unknown_rows,
        "dropped_rows": summary.dropped_rows(),
        "unknown_written": report.unknown_written,
        "groups": groups,
    });
    if let Some(audit) = audit {
        value["schedule_audit"] = json!({
            "checked": audit.checked,
            "outside_window": audit.outside_window,
            "by_session": audit.by_session,
        });
    }
    value
}

/// Run every stage against `sink`, leaving it open.
pub fn process(
    inputs: &[PathBuf],
    tables: &ScheduleTables,
    options: &ExportOptions,
    sink: &mut dyn ExportSink,
) -> Result<ProcessResult> {
    let run_span = info_span!("process", inputs = inputs.len());
    let _run_guard = run_span.enter();

    let ingest_start = Instant::now();
    let ingested = info_span!("ingest").in_scope(|| ingest(inputs))?;
    info!(
        files = ingested.files.len(),
        documents_with_records = ingested.documents_with_records,
        records = ingested.records.len(),
        errors = ingested.errors.len(),
        duration_ms = ingest_start.elapsed().as_millis(),
        "ingest complete"
    );
    let IngestResult {
        files,
        records,
        documents_with_records,
        errors,
    } = ingested;

    let classification = classify(records, tables);
    let schedule_audit = options
        .validate_schedules
        .then(|| audit(&classification, tables));

    let report = output(&classification, options, schedule_audit.as_ref(), sink)?;

    Ok(ProcessResult {
        output: None,
        files: files.len(),
        documents_with_records,
        summary: classification.summary,
        groups: report.tables,
        unknown_written: report.unknown_written,
        audit: schedule_audit,
        errors,
    })
}

/// Default bundle path for a run started at `now`.
pub fn default_output_path(now: NaiveDateTime) -> PathBuf {
    PathBuf::from(format!(
        "vital_signs_processed_{}.zip",
        now.format("%Y%m%d_%H%M%S")
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn default_output_is_timestamped_archive() {
        let now = NaiveDate::from_ymd_opt(2025, 2, 18)
            .unwrap()
            .and_hms_opt(14, 5, 9)
            .unwrap();
        let path = default_output_path(now);
        assert_eq!(path, PathBuf::from("vital_signs_processed_20250218_140509.zip"));
    }
}
