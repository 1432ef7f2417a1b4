//! `datakit demo`: every section of the walkthrough, in order.
//!
//! Sections share nothing but the working directory. The HTTP section is
//! skipped when no client is supplied.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use datakit::sample::{self, Person, NEW_CONTENT, PERSON_JSON, PRICES_CSV};
use datakit::{
    append_text, generate_csv, generate_csv_records, get_body, get_response, parse_csv,
    parse_json, read_csv, read_text, to_json, write_text, CsvOptions, DataError, FileSystem,
    HttpFetch, HttpResponse, JsonStyle, Quoting, WriteMode,
};

const SAMPLE_TXT: &str = "sample.txt";
const SAMPLE_CSV: &str = "sample.csv";
const GENERATED_CSV: &str = "demo_generated.csv";
const SEED_TEXT: &str = "Hello from datakit!\n";

#[derive(Debug, Serialize)]
pub struct DemoReport {
    pub dir: String,
    pub text: TextSection,
    pub csv_read: CsvReadSection,
    pub csv_write: CsvWriteSection,
    pub json: JsonSection,
    pub http: Option<HttpSection>,
}

#[derive(Debug, Serialize)]
pub struct TextSection {
    pub before: String,
    pub after: String,
}

#[derive(Debug, Serialize)]
pub struct CsvReadSection {
    pub raw_bytes: usize,
    pub lines: Vec<String>,
    pub rows_via_file: usize,
}

#[derive(Debug, Serialize)]
pub struct CsvWriteSection {
    pub naive: String,
    pub quoted: String,
    pub typed: String,
    pub rows_read_back: usize,
}

#[derive(Debug, Serialize)]
pub struct JsonSection {
    pub parsed_id: Option<i64>,
    pub compact: String,
    pub pretty: String,
    pub round_trip: bool,
}

#[derive(Debug, Serialize)]
pub struct HttpSection {
    pub url: String,
    pub body: String,
    pub response: HttpResponse,
}

pub async fn run(
    fs: &dyn FileSystem,
    client: Option<&dyn HttpFetch>,
    dir: &Path,
    endpoint: &str,
) -> Result<DemoReport> {
    let text = text_section(fs, dir).context("text section")?;
    let csv_read = csv_read_section(fs, dir).context("CSV read section")?;
    let csv_write = csv_write_section(fs, dir).context("CSV write section")?;
    let json = json_section().context("JSON section")?;
    let http = match client {
        Some(client) => Some(http_section(client, endpoint).await.context("HTTP section")?),
        None => {
            tracing::info!("HTTP section skipped");
            None
        }
    };

    Ok(DemoReport {
        dir: dir.display().to_string(),
        text,
        csv_read,
        csv_write,
        json,
        http,
    })
}

/// Seed `path` with `content` if it does not exist yet.
fn ensure_file(fs: &dyn FileSystem, path: &Path, content: &str) -> Result<String> {
    match read_text(fs, path) {
        Ok(existing) => Ok(existing),
        Err(DataError::FileNotFound(_)) => {
            tracing::info!(path = %path.display(), "seeding sample file");
            write_text(fs, path, content, WriteMode::Overwrite)?;
            Ok(content.to_string())
        }
        Err(e) => Err(e.into()),
    }
}

fn text_section(fs: &dyn FileSystem, dir: &Path) -> Result<TextSection> {
    let path = dir.join(SAMPLE_TXT);
    let before = ensure_file(fs, &path, SEED_TEXT)?;

    write_text(fs, &path, NEW_CONTENT, WriteMode::Append)?;
    append_text(fs, &path, NEW_CONTENT)?;

    let after = read_text(fs, &path)?;
    Ok(TextSection { before, after })
}

fn csv_read_section(fs: &dyn FileSystem, dir: &Path) -> Result<CsvReadSection> {
    let path = dir.join(SAMPLE_CSV);
    let raw = ensure_file(fs, &path, PRICES_CSV)?;

    let options = CsvOptions::new().with_headers(true);
    let records = parse_csv(&raw, &options)?;
    let lines = records
        .as_records()
        .unwrap_or_default()
        .iter()
        .map(|r| {
            format!(
                "Date: {} Price: {}",
                r.get("date").unwrap_or(""),
                r.get("price").unwrap_or("")
            )
        })
        .collect();

    // Same data through the file-reading entry point with an explicit delimiter.
    let rows_via_file = read_csv(fs, &path, &options.with_delimiter(b','))?.len();

    Ok(CsvReadSection {
        raw_bytes: raw.len(),
        lines,
        rows_via_file,
    })
}

fn csv_write_section(fs: &dyn FileSystem, dir: &Path) -> Result<CsvWriteSection> {
    let path = dir.join(GENERATED_CSV);
    let rows = sample::roster_rows();

    let naive = generate_csv(&rows, &CsvOptions::new().with_quoting(Quoting::Never))?;
    write_text(fs, &path, &naive, WriteMode::Overwrite)?;

    let quoted = generate_csv(&rows, &CsvOptions::new())?;
    write_text(fs, &path, &quoted, WriteMode::Overwrite)?;

    let typed = generate_csv_records(&sample::members(), &CsvOptions::new())?;
    write_text(fs, &path, &typed, WriteMode::Overwrite)?;

    let rows_read_back = read_csv(fs, &path, &CsvOptions::new().with_headers(true))?.len();

    Ok(CsvWriteSection {
        naive,
        quoted,
        typed,
        rows_read_back,
    })
}

fn json_section() -> Result<JsonSection> {
    let parsed = parse_json(PERSON_JSON)?;
    let parsed_id = parsed["id"].as_i64();

    let person = Person::leah();
    let compact = to_json(&person, JsonStyle::Compact)?;
    let pretty = to_json(&person, JsonStyle::Pretty)?;
    let round_trip = datakit::from_json::<Person>(&compact)? == person;

    Ok(JsonSection {
        parsed_id,
        compact,
        pretty,
        round_trip,
    })
}

async fn http_section(client: &dyn HttpFetch, url: &str) -> Result<HttpSection> {
    let body = get_body(client, url).await?;
    let response = get_response(client, url).await?;
    Ok(HttpSection {
        url: url.to_string(),
        body,
        response,
    })
}

impl DemoReport {
    /// Plain-text rendering, one block per section.
    pub fn render(&self) -> String {
        let mut out = String::new();
        let sample_path = Path::new(&self.dir).join(SAMPLE_TXT);
        out.push_str(&format!("== Text ({})\n", sample_path.display()));
        out.push_str(&self.text.after);
        if !self.text.after.ends_with('\n') {
            out.push('\n');
        }

        out.push_str(&format!(
            "\n== CSV read ({} bytes, {} rows)\n",
            self.csv_read.raw_bytes, self.csv_read.rows_via_file
        ));
        for line in &self.csv_read.lines {
            out.push_str(line);
            out.push('\n');
        }

        out.push_str(&format!(
            "\n== CSV write ({} rows read back)\n",
            self.csv_write.rows_read_back
        ));
        out.push_str(&self.csv_write.typed);

        out.push_str("\n== JSON\n");
        if let Some(id) = self.json.parsed_id {
            out.push_str(&format!("{id}\n"));
        }
        out.push_str(&self.json.pretty);
        out.push('\n');

        match &self.http {
            Some(h) => {
                out.push_str(&format!("\n== GET {}\n", h.url));
                out.push_str(&h.body);
                out.push('\n');
                out.push_str(&format!(
                    "{}\n{}\n",
                    h.response.status,
                    h.response.content_type.as_deref().unwrap_or("")
                ));
            }
            None => out.push_str("\n== GET skipped (offline)\n"),
        }
        out
    }
}
