//! Filesystem capability: the local disk or an in-memory fake.

use std::collections::HashMap;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::types::{DataError, DataResult, WriteMode};

/// Whole-file text access. Every call opens and releases its own handle.
pub trait FileSystem {
    /// Read the full contents of `path`.
    fn read_to_string(&self, path: &Path) -> DataResult<String>;

    /// Write `content` to `path`, creating the file if absent.
    fn write(&self, path: &Path, content: &str, mode: WriteMode) -> DataResult<()>;
}

/// The real filesystem via `std::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs;

impl FileSystem for LocalFs {
    fn read_to_string(&self, path: &Path) -> DataResult<String> {
        std::fs::read_to_string(path).map_err(|e| DataError::from_io(path, e))
    }

    fn write(&self, path: &Path, content: &str, mode: WriteMode) -> DataResult<()> {
        let mut options = OpenOptions::new();
        options.create(true);
        match mode {
            WriteMode::Overwrite => options.write(true).truncate(true),
            WriteMode::Append => options.append(true),
        };

        // The handle drops at the end of this scope on success and on `?`.
        let mut file = options.open(path).map_err(|e| DataError::from_io(path, e))?;
        file.write_all(content.as_bytes())
            .map_err(|e| DataError::from_io(path, e))?;
        file.flush().map_err(|e| DataError::from_io(path, e))
    }
}

/// In-memory filesystem for tests and dry runs.
#[derive(Debug, Default)]
pub struct MemoryFs {
    files: Mutex<HashMap<PathBuf, String>>,
}

impl MemoryFs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a file.
    pub fn with_file(self, path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        self.files
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(path.into(), content.into());
        self
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.files
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .contains_key(path)
    }
}

impl FileSystem for MemoryFs {
    fn read_to_string(&self, path: &Path) -> DataResult<String> {
        self.files
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(path)
            .cloned()
            .ok_or_else(|| DataError::FileNotFound(path.to_path_buf()))
    }

    fn write(&self, path: &Path, content: &str, mode: WriteMode) -> DataResult<()> {
        let mut files = self.files.lock().unwrap_or_else(|e| e.into_inner());
        let entry = files.entry(path.to_path_buf()).or_default();
        if mode == WriteMode::Overwrite {
            entry.clear();
        }
        entry.push_str(content);
        Ok(())
    }
}
