#![deny(unsafe_code)]

use std::path::Path;

use crate::error::TablesError;
use crate::tables::ScheduleTables;

/// Lookup tables shipped with the crate.
pub const DEFAULT_TABLES_TOML: &str = include_str!("../data/default_tables.toml");

/// Parse the embedded default tables.
pub fn load_default_tables() -> Result<ScheduleTables, TablesError> {
    parse_tables(DEFAULT_TABLES_TOML, "<embedded>")
}

/// Load an alternate table set from a TOML file.
pub fn load_tables(path: &Path) -> Result<ScheduleTables, TablesError> {
    let text = std::fs::read_to_string(path).map_err(|e| TablesError::io(path, e))?;
    parse_tables(&text, &path.display().to_string())
}

/// Parse and validate a TOML table document. `origin` names it in errors.
pub fn parse_tables(text: &str, origin: &str) -> Result<ScheduleTables, TablesError> {
    let tables: ScheduleTables = toml::from_str(text).map_err(|source| TablesError::Toml {
        origin: origin.to_string(),
        source,
    })?;
    tables.validate()?;
    Ok(tables)
}
