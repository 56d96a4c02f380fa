//! Tabular payloads for export groups.

use polars::prelude::{CsvWriter, DataFrame, IntoColumn, NamedFrom, SerWriter, Series};

use vitals_model::{ClassifiedRecord, GroupKey, Row};

use crate::error::Result;

/// One group's rows ready for the sink.
#[derive(Debug, Clone)]
pub struct GroupTable {
    pub key: GroupKey,
    /// Destination folder, `course/session/mannequin/date`.
    pub folder: String,
    pub filename: String,
    pub frame: DataFrame,
}

impl GroupTable {
    pub fn path(&self) -> String {
        format!("{}/{}", self.folder, self.filename)
    }
}

/// Build the table for one export group.
pub fn build_group_table(key: &GroupKey, records: &[ClassifiedRecord]) -> Result<GroupTable> {
    let rows: Vec<Row> = records.iter().map(ClassifiedRecord::to_row).collect();
    Ok(GroupTable {
        key: key.clone(),
        folder: key.folder_path(),
        filename: format!("{}.csv", key.file_stem()),
        frame: rows_to_frame(&rows)?,
    })
}

/// String-typed frame over the union of row columns in first-seen order.
///
/// Rows from different exports can carry different probe channels; a row
/// lacking a column gets null there.
pub fn rows_to_frame(rows: &[Row]) -> Result<DataFrame> {
    let mut names: Vec<&str> = Vec::new();
    for row in rows {
        for column in row.columns() {
            if !names.contains(&column) {
                names.push(column);
            }
        }
    }
    let columns = names
        .iter()
        .map(|name| {
            let values: Vec<Option<String>> = rows
                .iter()
                .map(|row| row.get(name).map(str::to_string))
                .collect();
            Series::new((*name).into(), values).into_column()
        })
        .collect();
    Ok(DataFrame::new(columns)?)
}

/// Serialize a frame as CSV with a header row.
pub fn frame_to_csv(frame: &mut DataFrame) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    CsvWriter::new(&mut buffer)
        .include_header(true)
        .finish(frame)?;
    Ok(buffer)
}
