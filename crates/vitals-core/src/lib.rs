//! Classification and grouping engine.
//!
//! Records flow through three steps:
//! 1. **Classify**: resolve course, session and mannequin for every record
//!    with a usable timestamp ([`TimeClassifier`], [`MannequinValidator`])
//! 2. **Partition**: split into valid and unknown, in timestamp order
//! 3. **Group**: bucket valid records by `(course, session, mannequin, date)`

pub mod classifier;
pub mod mannequin;
pub mod partition;
pub mod schedule;

pub use classifier::TimeClassifier;
pub use mannequin::MannequinValidator;
pub use partition::{Classification, Engine, ExportGroups, group_valid};
pub use schedule::{ScheduleAudit, audit_schedules};
