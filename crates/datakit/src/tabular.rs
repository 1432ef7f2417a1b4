//! CSV parsing and generation.
//!
//! Reading is lenient: rows of any width are accepted and nothing is
//! trimmed. Blank lines are not rows and are skipped.
//!
//! Writing quotes only the fields that need it unless [`Quoting::Never`] is
//! selected, which joins fields verbatim and will corrupt any field that
//! contains the delimiter, a quote, or a newline.

use std::path::Path;
use std::sync::Arc;

use csv::{QuoteStyle, ReaderBuilder, Terminator, WriterBuilder};
use serde::Serialize;

use crate::fs::FileSystem;
use crate::types::{DataResult, Record, RecordSet, WriteMode};

/// Field quoting policy when generating CSV.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Quoting {
    /// Quote fields containing the delimiter, quotes, or line breaks.
    #[default]
    Necessary,
    /// Plain join with no escaping.
    Never,
}

impl From<Quoting> for QuoteStyle {
    fn from(q: Quoting) -> Self {
        match q {
            Quoting::Necessary => QuoteStyle::Necessary,
            Quoting::Never => QuoteStyle::Never,
        }
    }
}

/// Dialect settings for reading and writing CSV.
#[derive(Debug, Clone, Copy)]
pub struct CsvOptions {
    /// Field separator (default: comma)
    pub delimiter: u8,
    /// Treat the first row as field names
    pub headers: bool,
    pub quoting: Quoting,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            headers: false,
            quoting: Quoting::Necessary,
        }
    }
}

impl CsvOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn with_headers(mut self, headers: bool) -> Self {
        self.headers = headers;
        self
    }

    pub fn with_quoting(mut self, quoting: Quoting) -> Self {
        self.quoting = quoting;
        self
    }

    fn writer(&self) -> WriterBuilder {
        let mut builder = WriterBuilder::new();
        builder
            .delimiter(self.delimiter)
            .quote_style(self.quoting.into())
            .terminator(Terminator::Any(b'\n'))
            .flexible(true);
        builder
    }
}

/// Parse delimited text into rows, or into header-keyed records when
/// `options.headers` is set.
pub fn parse_csv(text: &str, options: &CsvOptions) -> DataResult<RecordSet> {
    let mut reader = ReaderBuilder::new()
        .delimiter(options.delimiter)
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        rows.push(record.iter().map(str::to_string).collect::<Vec<_>>());
    }

    tracing::debug!(rows = rows.len(), headers = options.headers, "parsed csv");

    if !options.headers {
        return Ok(RecordSet::Rows(rows));
    }

    let mut iter = rows.into_iter();
    let headers: Arc<[String]> = match iter.next() {
        Some(h) => h.into(),
        None => return Ok(RecordSet::Records(Vec::new())),
    };
    let records = iter
        .map(|values| Record::new(Arc::clone(&headers), values))
        .collect();
    Ok(RecordSet::Records(records))
}

/// Join `rows` into CSV text, one line per row, each terminated by `\n`.
///
/// A zero-width row is written as `""` so it still occupies a line; it reads
/// back as a single empty field.
pub fn generate_csv<R, T>(
    rows: impl IntoIterator<Item = R>,
    options: &CsvOptions,
) -> DataResult<String>
where
    R: IntoIterator<Item = T>,
    T: AsRef<str>,
{
    let mut writer = options.writer().has_headers(false).from_writer(Vec::new());
    let mut count = 0usize;
    for row in rows {
        let fields: Vec<T> = row.into_iter().collect();
        writer.write_record(fields.iter().map(|f| f.as_ref()))?;
        count += 1;
    }
    let text = finish(writer)?;
    tracing::debug!(rows = count, quoting = ?options.quoting, "generated csv");
    Ok(text)
}

/// Serialize typed records with a header row taken from their field names.
pub fn generate_csv_records<T: Serialize>(
    records: &[T],
    options: &CsvOptions,
) -> DataResult<String> {
    let mut writer = options.writer().has_headers(true).from_writer(Vec::new());
    for record in records {
        writer.serialize(record)?;
    }
    finish(writer)
}

/// Read and parse the CSV file at `path`.
pub fn read_csv<F: FileSystem + ?Sized>(
    fs: &F,
    path: impl AsRef<Path>,
    options: &CsvOptions,
) -> DataResult<RecordSet> {
    let text = fs.read_to_string(path.as_ref())?;
    parse_csv(&text, options)
}

/// Generate CSV from `rows` and write it to `path`.
pub fn write_csv<F, R, T>(
    fs: &F,
    path: impl AsRef<Path>,
    rows: impl IntoIterator<Item = R>,
    options: &CsvOptions,
    mode: WriteMode,
) -> DataResult<()>
where
    F: FileSystem + ?Sized,
    R: IntoIterator<Item = T>,
    T: AsRef<str>,
{
    let text = generate_csv(rows, options)?;
    fs.write(path.as_ref(), &text, mode)
}

fn finish(writer: csv::Writer<Vec<u8>>) -> DataResult<String> {
    let bytes = writer
        .into_inner()
        .map_err(|e| csv::Error::from(e.into_error()))?;
    // Input fields are all `str`, so the buffer is valid UTF-8.
    Ok(String::from_utf8(bytes)
        .unwrap_or_else(|e| String::from_utf8_lossy(e.as_bytes()).into_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::MemoryFs;
    use crate::types::ErrorKind;

    fn headered() -> CsvOptions {
        CsvOptions::new().with_headers(true)
    }

    #[test]
    fn test_parse_rows_without_headers() {
        let set = parse_csv("a,b\nc,d\n", &CsvOptions::new()).unwrap();
        assert_eq!(
            set,
            RecordSet::Rows(vec![
                vec!["a".to_string(), "b".to_string()],
                vec!["c".to_string(), "d".to_string()],
            ])
        );
    }

    #[test]
    fn test_parse_with_headers() {
        let text = "date,price\n2024-01-02,12.5\n2024-01-03,13.0\n";
        let set = parse_csv(text, &headered()).unwrap();
        let records = set.as_records().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].get("date"), Some("2024-01-02"));
        assert_eq!(records[1].get("price"), Some("13.0"));
    }

    #[test]
    fn test_parse_header_only() {
        let set = parse_csv("id,name\n", &headered()).unwrap();
        assert!(set.is_empty());
        assert!(parse_csv("", &headered()).unwrap().is_empty());
    }

    #[test]
    fn test_ragged_rows_accepted() {
        let set = parse_csv("a,b,c\n1\n1,2,3,4\n", &CsvOptions::new()).unwrap();
        let rows = set.as_rows().unwrap();
        assert_eq!(rows[0].len(), 3);
        assert_eq!(rows[1].len(), 1);
        assert_eq!(rows[2].len(), 4);

        let set = parse_csv("a,b,c\n1\n1,2,3,4\n", &headered()).unwrap();
        let records = set.as_records().unwrap();
        assert_eq!(records[0].get("a"), Some("1"));
        assert_eq!(records[0].get("b"), None);
        assert_eq!(records[1].values().len(), 4);
    }

    #[test]
    fn test_custom_delimiter() {
        let opts = headered().with_delimiter(b';');
        let set = parse_csv("id;name\n7;Ada, Countess\n", &opts).unwrap();
        assert_eq!(
            set.as_records().unwrap()[0].get("name"),
            Some("Ada, Countess")
        );
    }

    #[test]
    fn test_blank_lines_are_not_rows() {
        let set = parse_csv("a,b\n\nc,d\n\n", &CsvOptions::new()).unwrap();
        assert_eq!(
            set,
            RecordSet::Rows(vec![
                vec!["a".to_string(), "b".to_string()],
                vec!["c".to_string(), "d".to_string()],
            ])
        );

        let set = parse_csv("id,name\n\n1,Ada\n", &headered()).unwrap();
        assert_eq!(set.len(), 1);
        assert_eq!(set.as_records().unwrap()[0].get("name"), Some("Ada"));
    }

    #[test]
    fn test_zero_width_row_reads_back_as_one_empty_field() {
        let rows: Vec<Vec<&str>> = vec![vec!["h1", "h2"], vec![], vec!["x", "y"]];
        let text = generate_csv(&rows, &CsvOptions::new()).unwrap();
        assert_eq!(text, "h1,h2\n\"\"\nx,y\n");

        let set = parse_csv(&text, &CsvOptions::new()).unwrap();
        let back = set.as_rows().unwrap();
        assert_eq!(back.len(), 3);
        assert_eq!(back[1], vec![String::new()]);
    }

    #[test]
    fn test_generate_plain() {
        let rows = vec![vec!["id", "first_name"], vec!["1", "John"]];
        let text = generate_csv(&rows, &CsvOptions::new()).unwrap();
        assert_eq!(text, "id,first_name\n1,John\n");
    }

    #[test]
    fn test_generate_then_parse_scenario() {
        let rows = vec![
            vec!["id", "first_name", "last_name"],
            vec!["1", "John", "Doe"],
        ];
        let text = generate_csv(&rows, &CsvOptions::new()).unwrap();
        let set = parse_csv(&text, &headered()).unwrap();
        let json = serde_json::to_value(&set).unwrap();
        assert_eq!(
            json,
            serde_json::json!([{"id": "1", "first_name": "John", "last_name": "Doe"}])
        );
    }

    #[test]
    fn test_header_roundtrip_field_for_field() {
        let header = vec!["id", "first_name", "last_name"];
        let body = vec![
            vec!["1", "Johh", "Doe"],
            vec!["2", "Michael", "Smith"],
            vec!["5", "Jordyn", "Murphy Mindorff"],
        ];
        let mut all = vec![header.clone()];
        all.extend(body.iter().cloned());

        let text = generate_csv(&all, &CsvOptions::new()).unwrap();
        let set = parse_csv(&text, &headered()).unwrap();
        let records = set.as_records().unwrap();
        assert_eq!(records.len(), body.len());
        for (record, row) in records.iter().zip(&body) {
            for (name, value) in header.iter().zip(row) {
                assert_eq!(record.get(name), Some(*value));
            }
        }
    }

    #[test]
    fn test_necessary_quoting_preserves_delimiter() {
        let rows = vec![vec!["name", "city"], vec!["Doe, John", "Boston"]];
        let text = generate_csv(&rows, &CsvOptions::new()).unwrap();
        assert_eq!(text, "name,city\n\"Doe, John\",Boston\n");
        let set = parse_csv(&text, &headered()).unwrap();
        assert_eq!(set.as_records().unwrap()[0].get("name"), Some("Doe, John"));
    }

    #[test]
    fn test_never_quoting_corrupts_delimiter_fields() {
        let rows = vec![vec!["name", "city"], vec!["Doe, John", "Boston"]];
        let opts = CsvOptions::new().with_quoting(Quoting::Never);
        let text = generate_csv(&rows, &opts).unwrap();
        assert_eq!(text, "name,city\nDoe, John,Boston\n");
        let set = parse_csv(&text, &CsvOptions::new()).unwrap();
        assert_eq!(set.as_rows().unwrap()[1].len(), 3);
    }

    #[test]
    fn test_generate_records_uses_field_names() {
        #[derive(Serialize)]
        struct Member {
            id: u32,
            first_name: &'static str,
            last_name: &'static str,
        }
        let members = [
            Member {
                id: 1,
                first_name: "Johh",
                last_name: "Doe",
            },
            Member {
                id: 2,
                first_name: "Michael",
                last_name: "Smith",
            },
        ];
        let text = generate_csv_records(&members, &CsvOptions::new()).unwrap();
        assert_eq!(text, "id,first_name,last_name\n1,Johh,Doe\n2,Michael,Smith\n");
    }

    #[test]
    fn test_write_and_read_file() {
        let fs = MemoryFs::new();
        let rows = vec![vec!["date", "price"], vec!["2024-01-02", "12.5"]];
        write_csv(&fs, "prices.csv", &rows, &CsvOptions::new(), WriteMode::Overwrite).unwrap();
        write_csv(
            &fs,
            "prices.csv",
            [["2024-01-03", "13.0"]],
            &CsvOptions::new(),
            WriteMode::Append,
        )
        .unwrap();

        let set = read_csv(&fs, "prices.csv", &headered()).unwrap();
        let records = set.as_records().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].get("price"), Some("13.0"));
    }

    #[test]
    fn test_unterminated_quote_is_lenient_or_parse_error() {
        // csv treats an unclosed quote as running to end of input.
        match parse_csv("a,\"b\nc", &CsvOptions::new()) {
            Ok(set) => assert_eq!(set.len(), 1),
            Err(e) => assert_eq!(e.kind(), ErrorKind::Parse),
        }
    }

    #[test]
    fn test_read_missing_file() {
        let err = read_csv(&MemoryFs::new(), "none.csv", &headered()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::FileAccess);
    }
}
