//! `datakit csv parse` and `datakit csv generate`.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use datakit::sample::roster_rows;
use datakit::{generate_csv, read_csv, CsvOptions, FileSystem, Quoting, RecordSet, WriteMode};

/// Parse a `--delimiter` argument: one ASCII character, or `tab` / `\t`.
pub fn parse_delimiter(raw: &str) -> Result<u8, String> {
    match raw {
        "tab" | "\\t" | "\t" => Ok(b'\t'),
        s if s.len() == 1 && s.is_ascii() => Ok(s.as_bytes()[0]),
        other => Err(format!(
            "delimiter must be a single ASCII character, got '{other}'"
        )),
    }
}

#[derive(Debug, Serialize)]
pub struct GeneratedCsv {
    pub path: String,
    pub csv: String,
}

pub fn parse(
    fs: &dyn FileSystem,
    path: &Path,
    delimiter: u8,
    headers: bool,
) -> Result<RecordSet> {
    let options = CsvOptions::new()
        .with_delimiter(delimiter)
        .with_headers(headers);
    read_csv(fs, path, &options).with_context(|| format!("parsing {}", path.display()))
}

/// Write the sample roster to `path` and return what was written.
pub fn generate(
    fs: &dyn FileSystem,
    path: &Path,
    delimiter: u8,
    append: bool,
    naive: bool,
) -> Result<GeneratedCsv> {
    let options = CsvOptions::new()
        .with_delimiter(delimiter)
        .with_quoting(if naive { Quoting::Never } else { Quoting::Necessary });
    let text = generate_csv(roster_rows(), &options)?;
    let mode = if append {
        WriteMode::Append
    } else {
        WriteMode::Overwrite
    };
    fs.write(path, &text, mode)
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(GeneratedCsv {
        path: path.display().to_string(),
        csv: text,
    })
}

/// One line per row: plain fields tab-separated, records as `name=value`.
pub fn render(set: &RecordSet) -> String {
    let mut out = String::new();
    match set {
        RecordSet::Rows(rows) => {
            for row in rows {
                out.push_str(&row.join("\t"));
                out.push('\n');
            }
        }
        RecordSet::Records(records) => {
            for record in records {
                let line: Vec<String> = record
                    .fields()
                    .map(|(name, value)| format!("{name}={value}"))
                    .collect();
                out.push_str(&line.join(" "));
                out.push('\n');
            }
        }
    }
    out
}
