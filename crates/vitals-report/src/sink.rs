//! Destinations for an export bundle.
//!
//! A sink receives tables by folder and file name plus free-standing text
//! files at the bundle root. Paths use `/` as separator regardless of host.

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use polars::prelude::DataFrame;
use tracing::debug;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use crate::error::{ExportError, Result};
use crate::table::frame_to_csv;

/// Receives the files of one export bundle.
pub trait ExportSink {
    /// Write one table as `folder/filename`.
    fn write_table(&mut self, folder: &str, filename: &str, frame: &mut DataFrame) -> Result<()>;

    /// Write a text file at the bundle root.
    fn write_text(&mut self, filename: &str, text: &str) -> Result<()>;

    /// Flush and close the bundle. Writing after this fails.
    fn finish(&mut self) -> Result<()>;
}

/// Open the sink matching an output path: `.zip` selects an archive,
/// anything else a directory tree.
pub fn open_sink(path: &Path) -> Result<Box<dyn ExportSink>> {
    let is_zip = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("zip"));
    if is_zip {
        Ok(Box::new(ZipSink::create(path)?))
    } else {
        Ok(Box::new(DirectorySink::create(path)?))
    }
}

/// Writes the bundle as a directory tree.
#[derive(Debug)]
pub struct DirectorySink {
    root: PathBuf,
    finished: bool,
}

impl DirectorySink {
    pub fn create(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root).map_err(|source| ExportError::io(&root, source))?;
        Ok(Self {
            root,
            finished: false,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn write_bytes(&self, relative: &str, bytes: &[u8]) -> Result<()> {
        if self.finished {
            return Err(ExportError::Finished);
        }
        let path = relative
            .split('/')
            .fold(self.root.clone(), |path, part| path.join(part));
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| ExportError::io(parent, source))?;
        }
        fs::write(&path, bytes).map_err(|source| ExportError::io(&path, source))?;
        debug!(path = %path.display(), bytes = bytes.len(), "wrote export file");
        Ok(())
    }
}

impl ExportSink for DirectorySink {
    fn write_table(&mut self, folder: &str, filename: &str, frame: &mut DataFrame) -> Result<()> {
        let bytes = frame_to_csv(frame)?;
        self.write_bytes(&format!("{folder}/{filename}"), &bytes)
    }

    fn write_text(&mut self, filename: &str, text: &str) -> Result<()> {
        self.write_bytes(filename, text.as_bytes())
    }

    fn finish(&mut self) -> Result<()> {
        self.finished = true;
        Ok(())
    }
}

/// Writes the bundle as a single deflated zip archive.
pub struct ZipSink {
    path: PathBuf,
    writer: Option<ZipWriter<File>>,
}

impl ZipSink {
    pub fn create(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| ExportError::io(parent, source))?;
        }
        let file = File::create(&path).map_err(|source| ExportError::io(&path, source))?;
        Ok(Self {
            path,
            writer: Some(ZipWriter::new(file)),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn add_entry(&mut self, name: &str, bytes: &[u8]) -> Result<()> {
        let writer = self.writer.as_mut().ok_or(ExportError::Finished)?;
        let options =
            SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);
        writer.start_file(name, options)?;
        writer
            .write_all(bytes)
            .map_err(|source| ExportError::io(&self.path, source))?;
        debug!(entry = name, bytes = bytes.len(), "added archive entry");
        Ok(())
    }
}

impl ExportSink for ZipSink {
    fn write_table(&mut self, folder: &str, filename: &str, frame: &mut DataFrame) -> Result<()> {
        let bytes = frame_to_csv(frame)?;
        self.add_entry(&format!("{folder}/{filename}"), &bytes)
    }

    fn write_text(&mut self, filename: &str, text: &str) -> Result<()> {
        self.add_entry(filename, text.as_bytes())
    }

    fn finish(&mut self) -> Result<()> {
        let writer = self.writer.take().ok_or(ExportError::Finished)?;
        writer.finish()?;
        Ok(())
    }
}

/// Keeps every file in memory, keyed by bundle path. Used for dry runs.
#[derive(Debug, Default)]
pub struct MemorySink {
    files: BTreeMap<String, Vec<u8>>,
    finished: bool,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(String::as_str)
    }

    pub fn get(&self, path: &str) -> Option<&[u8]> {
        self.files.get(path).map(Vec::as_slice)
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    fn insert(&mut self, path: String, bytes: Vec<u8>) -> Result<()> {
        if self.finished {
            return Err(ExportError::Finished);
        }
        self.files.insert(path, bytes);
        Ok(())
    }
}

impl ExportSink for MemorySink {
    fn write_table(&mut self, folder: &str, filename: &str, frame: &mut DataFrame) -> Result<()> {
        let bytes = frame_to_csv(frame)?;
        self.insert(format!("{folder}/{filename}"), bytes)
    }

    fn write_text(&mut self, filename: &str, text: &str) -> Result<()> {
        self.insert(filename.to_string(), text.as_bytes().to_vec())
    }

    fn finish(&mut self) -> Result<()> {
        self.finished = true;
        Ok(())
    }
}
