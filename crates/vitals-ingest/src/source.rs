//! Ingestion source: `(filename, text)` pairs and per-file extraction.
//!
//! Files are independent, so reading and extraction run in parallel with one
//! result list per file. Lists are merged in input order afterwards, and a
//! failure in one file never affects another.

use std::path::{Path, PathBuf};

use rayon::prelude::*;
use tracing::{debug, warn};

use vitals_model::ObservationRecord;

use crate::error::{IngestError, Result};
use crate::extract::parse_document;

/// One export file's name and UTF-8 content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDocument {
    pub filename: String,
    pub content: String,
}

impl SourceDocument {
    pub fn new(filename: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            content: content.into(),
        }
    }

    /// Read a file; the document is named by the file's base name.
    pub fn read(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| IngestError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        let filename = path
            .file_name()
            .and_then(|name| name.to_str())
            .map_or_else(|| path.display().to_string(), str::to_string);
        Ok(Self { filename, content })
    }
}

/// Read every path, keeping input order. Unreadable files are logged and skipped.
pub fn read_documents(paths: &[PathBuf]) -> (Vec<SourceDocument>, Vec<IngestError>) {
    let results: Vec<Result<SourceDocument>> = paths
        .par_iter()
        .map(|path| SourceDocument::read(path))
        .collect();
    let mut documents = Vec::with_capacity(results.len());
    let mut errors = Vec::new();
    for result in results {
        match result {
            Ok(document) => documents.push(document),
            Err(error) => {
                warn!(%error, "skipping unreadable file");
                errors.push(error);
            }
        }
    }
    (documents, errors)
}

/// Outcome of extracting records from a batch of documents.
#[derive(Debug, Default)]
pub struct ExtractOutcome {
    /// Records from all documents, grouped by document in input order.
    pub records: Vec<ObservationRecord>,
    /// Documents that contributed records.
    pub documents_with_records: usize,
    /// Documents that failed to parse.
    pub errors: Vec<IngestError>,
}

/// Extract records from every document.
pub fn extract_documents(documents: &[SourceDocument]) -> ExtractOutcome {
    let per_file: Vec<Result<Vec<ObservationRecord>>> = documents
        .par_iter()
        .map(|document| parse_document(&document.filename, &document.content))
        .collect();

    let mut outcome = ExtractOutcome::default();
    for (document, result) in documents.iter().zip(per_file) {
        match result {
            Ok(records) => {
                debug!(
                    filename = %document.filename,
                    records = records.len(),
                    "extracted document"
                );
                if !records.is_empty() {
                    outcome.documents_with_records += 1;
                }
                outcome.records.extend(records);
            }
            Err(error) => {
                warn!(filename = %document.filename, %error, "skipping malformed document");
                outcome.errors.push(error);
            }
        }
    }
    outcome
}
