//! Error types for monitor export ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while locating, reading or parsing export files.
#[derive(Debug, Error)]
pub enum IngestError {
    /// Input path does not exist.
    #[error("input not found: {path}")]
    InputNotFound { path: PathBuf },

    /// Failed while walking an input directory.
    #[error("failed to read directory {path}: {message}")]
    DirectoryRead { path: PathBuf, message: String },

    /// Failed to read file contents.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File content is not a JSON document.
    #[error("failed to parse JSON {filename}: {source}")]
    Json {
        filename: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = IngestError::InputNotFound {
            path: PathBuf::from("/path/to/exports"),
        };
        assert_eq!(err.to_string(), "input not found: /path/to/exports");
    }

    #[test]
    fn test_error_from_json() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = IngestError::Json {
            filename: "broken.json".to_string(),
            source,
        };
        assert!(err.to_string().starts_with("failed to parse JSON broken.json"));
    }
}
