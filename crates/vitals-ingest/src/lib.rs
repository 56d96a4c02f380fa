pub mod datetime;
pub mod discovery;
pub mod document;
pub mod error;
pub mod extract;
pub mod resolver;
pub mod source;

pub use datetime::parse_device_timestamp;
pub use discovery::list_json_files;
pub use document::{PathSegment, lookup, lookup_keys};
pub use error::{IngestError, Result};
pub use extract::{extract_records, parse_document};
pub use resolver::resolve_vital;
pub use source::{ExtractOutcome, SourceDocument, extract_documents, read_documents};
