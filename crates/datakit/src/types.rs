//! Core data types shared across the text, CSV, JSON, and HTTP modules.

use std::path::PathBuf;
use std::sync::Arc;

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

/// How a write treats existing file content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WriteMode {
    /// Truncate the file before writing.
    #[default]
    Overwrite,
    /// Keep existing content and write at the end.
    Append,
}

/// One CSV row keyed by the header row it was parsed under.
///
/// Headers are shared between every record of a parse. Values beyond the
/// header width are kept but have no name. When a header name repeats, the
/// first column with that name is the one `get`, `fields`, and serialization
/// see.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    headers: Arc<[String]>,
    values: Vec<String>,
}

impl Record {
    pub fn new(headers: Arc<[String]>, values: Vec<String>) -> Self {
        Self { headers, values }
    }

    /// Look up a field by header name.
    pub fn get(&self, name: &str) -> Option<&str> {
        let idx = self.headers.iter().position(|h| h == name)?;
        self.values.get(idx).map(String::as_str)
    }

    /// Named fields in header order. Headers with no value and repeated
    /// header names are skipped.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.headers
            .iter()
            .zip(self.values.iter())
            .enumerate()
            .filter(|&(i, (h, _))| !self.headers[..i].contains(h))
            .map(|(_, (h, v))| (h.as_str(), v.as_str()))
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        for (name, value) in self.fields() {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// The result of parsing delimited text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum RecordSet {
    /// Every line as a plain sequence of fields.
    Rows(Vec<Vec<String>>),
    /// Every line after the first, keyed by the first line.
    Records(Vec<Record>),
}

impl RecordSet {
    /// Number of data rows (the header row is not counted).
    pub fn len(&self) -> usize {
        match self {
            RecordSet::Rows(rows) => rows.len(),
            RecordSet::Records(records) => records.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_rows(&self) -> Option<&[Vec<String>]> {
        match self {
            RecordSet::Rows(rows) => Some(rows),
            RecordSet::Records(_) => None,
        }
    }

    pub fn as_records(&self) -> Option<&[Record]> {
        match self {
            RecordSet::Records(records) => Some(records),
            RecordSet::Rows(_) => None,
        }
    }
}

/// The three failure categories callers branch on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    FileAccess,
    Parse,
    Network,
}

/// Errors that can occur in datakit.
#[derive(thiserror::Error, Debug)]
pub enum DataError {
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("File access error on {}: {source}", path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl DataError {
    /// Map an I/O failure on `path` to the matching variant.
    pub fn from_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            DataError::FileNotFound(path)
        } else {
            DataError::FileAccess { path, source }
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            DataError::FileNotFound(_) | DataError::FileAccess { .. } => ErrorKind::FileAccess,
            DataError::Csv(_) | DataError::Json(_) | DataError::InvalidUrl(_) => ErrorKind::Parse,
            DataError::Network(_) => ErrorKind::Network,
        }
    }
}

/// Convenience result type.
pub type DataResult<T> = Result<T, DataError>;
