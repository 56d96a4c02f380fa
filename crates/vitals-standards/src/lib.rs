#![deny(unsafe_code)]

pub mod error;
pub mod loader;
pub mod tables;

pub use crate::error::TablesError;
pub use crate::loader::{DEFAULT_TABLES_TOML, load_default_tables, load_tables, parse_tables};
pub use crate::tables::{ClockSlot, CourseWindow, MonthDay, ScheduleTables, SessionOffset};
