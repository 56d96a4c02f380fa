//! Export assembly for classified vital-sign records.
//!
//! Each export group becomes one table named after its key and placed under
//! `course/session/mannequin/date`; unknown records optionally become one
//! CSV at the bundle root. Payloads are handed to an [`ExportSink`].

pub mod assemble;
pub mod error;
pub mod sink;
pub mod table;
pub mod unknown_csv;

pub use assemble::{ExportReport, export_bundle};
pub use error::{ExportError, Result};
pub use sink::{DirectorySink, ExportSink, MemorySink, ZipSink, open_sink};
pub use table::{GroupTable, build_group_table, frame_to_csv, rows_to_frame};
pub use unknown_csv::{UNKNOWN_ROWS_FILENAME, unknown_rows_csv};
