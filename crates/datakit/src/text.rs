//! Plain text file reading and writing.

use std::path::Path;

use crate::fs::FileSystem;
use crate::types::{DataResult, WriteMode};

/// Read the whole file at `path` as text.
pub fn read_text<F: FileSystem + ?Sized>(fs: &F, path: impl AsRef<Path>) -> DataResult<String> {
    let path = path.as_ref();
    let content = fs.read_to_string(path)?;
    tracing::debug!(path = %path.display(), bytes = content.len(), "read text");
    Ok(content)
}

/// Write `content` to `path`, truncating or appending per `mode`.
pub fn write_text<F: FileSystem + ?Sized>(
    fs: &F,
    path: impl AsRef<Path>,
    content: &str,
    mode: WriteMode,
) -> DataResult<()> {
    let path = path.as_ref();
    fs.write(path, content, mode)?;
    tracing::debug!(path = %path.display(), bytes = content.len(), ?mode, "wrote text");
    Ok(())
}

/// Append `content` to `path`, creating it if needed.
pub fn append_text<F: FileSystem + ?Sized>(
    fs: &F,
    path: impl AsRef<Path>,
    content: &str,
) -> DataResult<()> {
    write_text(fs, path, content, WriteMode::Append)
}
