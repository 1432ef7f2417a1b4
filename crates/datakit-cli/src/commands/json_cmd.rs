//! `datakit json parse` and `datakit json generate`.

use std::path::Path;

use anyhow::{Context, Result};
use serde_json::Value;

use datakit::sample::Person;
use datakit::{read_json, to_json, FileSystem, JsonStyle};

fn style(pretty: bool) -> JsonStyle {
    if pretty {
        JsonStyle::Pretty
    } else {
        JsonStyle::Compact
    }
}

/// Parse the JSON file at `path` and return the value and its re-serialized text.
pub fn parse(fs: &dyn FileSystem, path: &Path, pretty: bool) -> Result<(Value, String)> {
    let value = read_json(fs, path).with_context(|| format!("parsing {}", path.display()))?;
    let text = to_json(&value, style(pretty))?;
    Ok((value, text))
}

/// Serialize the sample person.
pub fn generate(pretty: bool) -> Result<(Person, String)> {
    let person = Person::leah();
    let text = to_json(&person, style(pretty))?;
    Ok((person, text))
}
