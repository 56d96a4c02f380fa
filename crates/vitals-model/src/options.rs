//! Options accepted by an export run.

use serde::{Deserialize, Serialize};

/// Caller-selected export options.
///
/// Only `include_unknown` changes the assembled payloads. The other two
/// switches drive reporting around the export.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportOptions {
    /// Add the unknown-rows CSV to the bundle.
    pub include_unknown: bool,
    /// Audit valid rows against the session clock schedules.
    pub validate_schedules: bool,
    /// Add a JSON run summary to the bundle.
    pub generate_summary: bool,
}
