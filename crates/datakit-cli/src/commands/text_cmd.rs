//! `datakit read` and `datakit write`.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use datakit::{read_text, write_text, FileSystem, WriteMode};

/// Paths are carried as display strings so any OS path serializes.
#[derive(Debug, Serialize)]
pub struct FileText {
    pub path: String,
    pub content: String,
}

#[derive(Debug, Serialize)]
pub struct WriteSummary {
    pub path: String,
    pub bytes: usize,
    pub append: bool,
}

pub fn read(fs: &dyn FileSystem, path: &Path) -> Result<FileText> {
    let content = read_text(fs, path).with_context(|| format!("reading {}", path.display()))?;
    Ok(FileText {
        path: path.display().to_string(),
        content,
    })
}

pub fn write(
    fs: &dyn FileSystem,
    path: &Path,
    content: &str,
    append: bool,
) -> Result<WriteSummary> {
    let mode = if append {
        WriteMode::Append
    } else {
        WriteMode::Overwrite
    };
    write_text(fs, path, content, mode)
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(WriteSummary {
        path: path.display().to_string(),
        bytes: content.len(),
        append,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use datakit::MemoryFs;

    #[test]
    fn test_write_append_read() {
        let fs = MemoryFs::new();
        let path = Path::new("sample.txt");
        write(&fs, path, "a", false).unwrap();
        let summary = write(&fs, path, "bc", true).unwrap();
        assert_eq!(summary.bytes, 2);
        assert!(summary.append);
        assert_eq!(read(&fs, path).unwrap().content, "abc");
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_path_serializes() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let fs = MemoryFs::new();
        let path = Path::new(OsStr::from_bytes(b"bad\xff.txt"));
        let summary = write(&fs, path, "x", false).unwrap();
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["path"], "bad\u{fffd}.txt");

        let text = read(&fs, path).unwrap();
        assert_eq!(text.content, "x");
        assert!(serde_json::to_string(&text).is_ok());
    }

    #[test]
    fn test_read_error_carries_path() {
        let err = read(&MemoryFs::new(), Path::new("gone.txt")).unwrap_err();
        assert!(format!("{err:#}").contains("gone.txt"));
    }
}
