//! Tests for export file discovery.

use std::fs;
use std::path::Path;

use vitals_ingest::{IngestError, list_json_files, read_documents};

fn touch(dir: &Path, name: &str) {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create dir");
    }
    fs::write(&path, "{}").expect("write file");
}

#[test]
fn walks_directories_for_json() {
    let dir = tempfile::tempdir().expect("temp dir");
    touch(dir.path(), "b.json");
    touch(dir.path(), "a.JSON");
    touch(dir.path(), "notes.txt");
    touch(dir.path(), "case1/nested/c.json");

    let files = list_json_files(&[dir.path().to_path_buf()]).expect("list files");
    let names: Vec<String> = files
        .iter()
        .map(|path| {
            path.strip_prefix(dir.path())
                .unwrap()
                .to_string_lossy()
                .replace('\\', "/")
        })
        .collect();

    assert_eq!(names, vec!["a.JSON", "b.json", "case1/nested/c.json"]);
}

#[test]
fn explicit_files_are_kept() {
    let dir = tempfile::tempdir().expect("temp dir");
    touch(dir.path(), "export.txt");
    let file = dir.path().join("export.txt");

    let files = list_json_files(std::slice::from_ref(&file)).expect("list files");
    assert_eq!(files, vec![file]);
}

#[test]
fn missing_input_is_fatal() {
    let dir = tempfile::tempdir().expect("temp dir");
    let missing = dir.path().join("nope");
    let error = list_json_files(&[missing]).unwrap_err();
    assert!(matches!(error, IngestError::InputNotFound { .. }));
}

#[test]
fn unreadable_files_are_skipped() {
    let dir = tempfile::tempdir().expect("temp dir");
    touch(dir.path(), "ok.json");
    let paths = vec![dir.path().join("ok.json"), dir.path().join("gone.json")];

    let (documents, errors) = read_documents(&paths);

    assert_eq!(documents.len(), 1);
    assert_eq!(documents[0].filename, "ok.json");
    assert_eq!(errors.len(), 1);
}
