//! Datakit — read and write text, CSV, and JSON, and fetch over HTTP.
//!
//! Every operation takes its collaborator explicitly: a [`FileSystem`] for
//! file access and an [`HttpFetch`] for network access.

pub mod fs;
pub mod http;
pub mod json;
pub mod sample;
pub mod tabular;
pub mod text;
pub mod types;

pub use fs::{FileSystem, LocalFs, MemoryFs};
pub use http::{get_body, get_response, parse_url, HttpClient, HttpFetch, HttpResponse};
pub use json::{from_json, parse_json, read_json, serialize_json, to_json, JsonStyle};
pub use tabular::{
    generate_csv, generate_csv_records, parse_csv, read_csv, write_csv, CsvOptions, Quoting,
};
pub use text::{append_text, read_text, write_text};
pub use types::*;
