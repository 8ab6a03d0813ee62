//! Persisted conversion history.
//!
//! The log is a JSON array on disk; each element records one completed
//! conversion. The whole file is rewritten on every update, and entry order
//! is chronological insertion order. A missing file reads as an empty
//! history.

use crate::error::CoreResult;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// One completed conversion, flattened for display. Field names on disk
/// match the historical log format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    #[serde(rename = "Directory")]
    pub directory: String,

    #[serde(rename = "File Name")]
    pub file_name: String,

    #[serde(rename = "Input Codec")]
    pub input_codec: String,

    #[serde(rename = "Output Codec")]
    pub output_codec: String,

    #[serde(rename = "Input Size")]
    pub input_size: u64,

    #[serde(rename = "Output Size")]
    pub output_size: u64,

    /// output_size/input_size rounded to 3 decimals; absent when the input
    /// size was unknown
    #[serde(rename = "Relative Size", default)]
    pub ratio: Option<f64>,
}

/// Handle to the persisted conversion log file.
#[derive(Debug, Clone)]
pub struct ConversionLog {
    path: PathBuf,
}

impl ConversionLog {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads all entries in insertion order. A missing file is an empty
    /// history, not an error.
    pub fn read_all(&self) -> CoreResult<Vec<LogEntry>> {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) => Ok(serde_json::from_str(&contents)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }

    /// Returns the last `n` entries, oldest first.
    pub fn tail(&self, n: usize) -> CoreResult<Vec<LogEntry>> {
        let mut entries = self.read_all()?;
        let skip = entries.len().saturating_sub(n);
        Ok(entries.split_off(skip))
    }

    /// Appends an entry and rewrites the file.
    pub fn append(&self, entry: LogEntry) -> CoreResult<()> {
        let mut entries = self.read_all()?;
        entries.push(entry);
        self.write(&entries)
    }

    /// Wipes the history, leaving an empty JSON array behind.
    pub fn clear(&self) -> CoreResult<()> {
        self.write(&[])
    }

    fn write(&self, entries: &[LogEntry]) -> CoreResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let contents = serde_json::to_string_pretty(entries)?;
        std::fs::write(&self.path, contents)?;
        Ok(())
    }
}
