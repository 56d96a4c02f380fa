//! Export file discovery.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{IngestError, Result};

/// Collects JSON export files from the given inputs.
///
/// Directories are walked recursively and yield every `*.json` file
/// (extension compared case-insensitively). File inputs are taken as given,
/// whatever their extension. Directory results are sorted by path; inputs
/// keep their order.
pub fn list_json_files(inputs: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for input in inputs {
        if input.is_file() {
            files.push(input.clone());
        } else if input.is_dir() {
            files.extend(walk_json_files(input)?);
        } else {
            return Err(IngestError::InputNotFound {
                path: input.clone(),
            });
        }
    }
    Ok(files)
}

fn walk_json_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir).follow_links(false) {
        let entry = entry.map_err(|e| IngestError::DirectoryRead {
            path: dir.to_path_buf(),
            message: e.to_string(),
        })?;
        if entry.file_type().is_file() && is_json(entry.path()) {
            files.push(entry.into_path());
        }
    }
    files.sort();
    Ok(files)
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}
