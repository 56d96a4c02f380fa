pub mod group;
pub mod options;
pub mod processing;
pub mod record;
pub mod value;

pub use group::GroupKey;
pub use options::ExportOptions;
pub use processing::{GroupSummary, RunSummary};
pub use record::{ClassifiedRecord, ObservationRecord, Row, VitalFields};
pub use value::VitalValue;

/// Column holding the timestamp text as read from the device.
pub const TIME_STR_COLUMN: &str = "TimeStr";
/// Column holding the device serial number.
pub const DEV_SERIAL_COLUMN: &str = "DevSerial";
/// Column holding the originating file name.
pub const SOURCE_FILE_COLUMN: &str = "SourceFile";
