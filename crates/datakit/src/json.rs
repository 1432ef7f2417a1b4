//! JSON parsing and serialization.

use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::fs::FileSystem;
use crate::types::DataResult;

/// Output layout for serialized JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonStyle {
    /// Single line, no insignificant whitespace.
    #[default]
    Compact,
    /// Two-space indentation, one element per line.
    Pretty,
}

/// Parse JSON text into a dynamic value.
pub fn parse_json(text: &str) -> DataResult<Value> {
    let value = serde_json::from_str(text)?;
    tracing::debug!(bytes = text.len(), "parsed json");
    Ok(value)
}

/// Serialize a dynamic value.
pub fn serialize_json(value: &Value, style: JsonStyle) -> DataResult<String> {
    to_json(value, style)
}

/// Serialize any `Serialize` type.
pub fn to_json<T: Serialize + ?Sized>(value: &T, style: JsonStyle) -> DataResult<String> {
    let text = match style {
        JsonStyle::Compact => serde_json::to_string(value)?,
        JsonStyle::Pretty => serde_json::to_string_pretty(value)?,
    };
    Ok(text)
}

/// Deserialize JSON text into a typed value.
pub fn from_json<T: DeserializeOwned>(text: &str) -> DataResult<T> {
    Ok(serde_json::from_str(text)?)
}

/// Read and parse the JSON file at `path`.
pub fn read_json<F: FileSystem + ?Sized>(fs: &F, path: impl AsRef<Path>) -> DataResult<Value> {
    let text = fs.read_to_string(path.as_ref())?;
    parse_json(&text)
}
