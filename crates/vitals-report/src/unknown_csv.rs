//! CSV text for records that could not be classified.

use csv::{QuoteStyle, Terminator, WriterBuilder};

use vitals_model::{ClassifiedRecord, Row};

use crate::error::{ExportError, Result};

/// Bundle-root file name of the unknown-rows CSV.
pub const UNKNOWN_ROWS_FILENAME: &str = "unknown_rows.csv";

/// Render unknown records as CSV.
///
/// The header is the column list of the first record; later records are
/// written against that header, so columns only they carry are left out.
/// Null values render empty. Lines end in `\n` except the last. Returns an
/// empty string for no records.
pub fn unknown_rows_csv(records: &[ClassifiedRecord]) -> Result<String> {
    let rows: Vec<Row> = records.iter().map(ClassifiedRecord::to_row).collect();
    let Some(first) = rows.first() else {
        return Ok(String::new());
    };
    let headers: Vec<&str> = first.columns().collect();

    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Necessary)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());
    writer.write_record(&headers)?;
    for row in &rows {
        writer.write_record(headers.iter().map(|header| row.get(header).unwrap_or_default()))?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|error| ExportError::Csv(error.into_error().into()))?;

    let text = String::from_utf8_lossy(&bytes).into_owned();
    Ok(text.strip_suffix('\n').unwrap_or(text.as_str()).to_string())
}
