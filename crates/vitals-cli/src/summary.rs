use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use vitals_cli::types::ProcessResult;

pub fn print_summary(result: &ProcessResult) {
    match &result.output {
        Some(path) => println!("Output: {}", path.display()),
        None => println!("Output: (dry run, nothing written)"),
    }
    println!(
        "Files: {} ({} with records)",
        result.files, result.documents_with_records
    );

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Course"),
        header_cell("Session"),
        header_cell("Mannequin"),
        header_cell("Date"),
        header_cell("Rows"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 4, CellAlignment::Right);
    for group in &result.groups {
        table.add_row(vec![
            Cell::new(&group.key.course)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(&group.key.session),
            Cell::new(&group.key.mannequin),
            Cell::new(&group.key.date),
            Cell::new(group.rows),
        ]);
    }
    let summary = &result.summary;
    table.add_row(vec![
        header_cell("VALID"),
        dim_cell("-"),
        dim_cell("-"),
        dim_cell("-"),
        Cell::new(summary.valid_rows).add_attribute(Attribute::Bold),
    ]);
    table.add_row(vec![
        header_cell("UNKNOWN"),
        dim_cell(if result.unknown_written {
            "written"
        } else {
            "not written"
        }),
        dim_cell("-"),
        dim_cell("-"),
        count_cell(summary.unknown_rows, Color::Yellow),
    ]);
    table.add_row(vec![
        header_cell("DROPPED"),
        dim_cell("no timestamp"),
        dim_cell("-"),
        dim_cell("-"),
        count_cell(summary.dropped_rows(), Color::Red),
    ]);
    println!("{table}");

    if let Some(audit) = &result.audit {
        println!(
            "Schedule audit: {} of {} valid rows outside their session schedule",
            audit.outside_window, audit.checked
        );
        if !audit.is_clean() {
            let mut sessions = Table::new();
            sessions.set_header(vec![header_cell("Session"), header_cell("Outside")]);
            apply_table_style(&mut sessions);
            align_column(&mut sessions, 1, CellAlignment::Right);
            for (session, count) in &audit.by_session {
                sessions.add_row(vec![Cell::new(session), count_cell(*count, Color::Yellow)]);
            }
            println!("{sessions}");
        }
    }

    if !result.errors.is_empty() {
        eprintln!("Skipped files:");
        for error in &result.errors {
            eprintln!("- {error}");
        }
    }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
