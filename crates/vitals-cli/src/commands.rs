use anyhow::{Context, Result};
use chrono::Local;
use comfy_table::Table;
use tracing::info;

use vitals_cli::pipeline::{default_output_path, process};
use vitals_cli::types::ProcessResult;
use vitals_report::{ExportSink, MemorySink, open_sink};
use vitals_standards::{ScheduleTables, load_default_tables, load_tables};

use crate::cli::{ProcessArgs, TablesArgs};
use crate::summary::apply_table_style;

pub fn run_process(args: &ProcessArgs) -> Result<ProcessResult> {
    let tables = active_tables(args.tables.as_deref())?;
    let options = args.export_options();

    if args.dry_run {
        let mut sink = MemorySink::new();
        let result = process(&args.inputs, &tables, &options, &mut sink)?;
        info!(files = sink.paths().count(), "dry run, bundle not written");
        return Ok(result);
    }

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(Local::now().naive_local()));
    let mut sink: Box<dyn ExportSink> = open_sink(&output)
        .with_context(|| format!("open output {}", output.display()))?;
    let mut result = process(&args.inputs, &tables, &options, sink.as_mut())?;
    sink.finish()
        .with_context(|| format!("finish output {}", output.display()))?;
    info!(output = %output.display(), "bundle written");
    result.output = Some(output);
    Ok(result)
}

pub fn run_tables(args: &TablesArgs) -> Result<()> {
    let tables = active_tables(args.tables.as_deref())?;

    let mut windows = Table::new();
    windows.set_header(vec!["Course", "Start", "End", "Start date"]);
    apply_table_style(&mut windows);
    for window in &tables.course_windows {
        let start_date = tables
            .course_start(&window.course)
            .map_or_else(|| "-".to_string(), |date| date.to_string());
        windows.add_row(vec![
            window.course.clone(),
            window.start.to_string(),
            window.end.to_string(),
            start_date,
        ]);
    }
    println!("Course windows:");
    println!("{windows}");

    let mut sessions = Table::new();
    sessions.set_header(vec!["Day offset", "Session", "Mannequins", "Schedule"]);
    apply_table_style(&mut sessions);
    for entry in &tables.session_offsets {
        let schedule = tables
            .schedule(&entry.session)
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        sessions.add_row(vec![
            entry.offset.to_string(),
            entry.session.clone(),
            tables.roster(&entry.session).join(", "),
            schedule,
        ]);
    }
    println!("Sessions:");
    println!("{sessions}");

    let mut devices = Table::new();
    devices.set_header(vec!["Device serial", "Mannequin"]);
    apply_table_style(&mut devices);
    for (serial, mannequin) in &tables.devices {
        devices.add_row(vec![serial.clone(), mannequin.clone()]);
    }
    println!("Devices:");
    println!("{devices}");

    let missing = tables.courses_without_start();
    if !missing.is_empty() {
        eprintln!("Courses without a start date: {}", missing.join(", "));
    }
    let inverted = tables.inverted_windows();
    if !inverted.is_empty() {
        eprintln!(
            "Course windows that end before they start (never matched): {}",
            inverted.join(", ")
        );
    }
    Ok(())
}

fn active_tables(path: Option<&std::path::Path>) -> Result<ScheduleTables> {
    match path {
        Some(path) => {
            load_tables(path).with_context(|| format!("load lookup tables {}", path.display()))
        }
        None => load_default_tables().context("load built-in lookup tables"),
    }
}
