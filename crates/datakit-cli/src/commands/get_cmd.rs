//! `datakit get`.

use anyhow::{Context, Result};
use serde::Serialize;

use datakit::{get_body, get_response, HttpFetch, HttpResponse};

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum Fetched {
    Body { body: String },
    Full(HttpResponse),
}

impl Fetched {
    /// Body alone, or status / content type / body on separate lines.
    pub fn render(&self) -> String {
        match self {
            Fetched::Body { body } => body.clone(),
            Fetched::Full(r) => format!(
                "{}\n{}\n{}",
                r.status,
                r.content_type.as_deref().unwrap_or(""),
                r.body
            ),
        }
    }
}

pub async fn run(client: &dyn HttpFetch, url: &str, full: bool) -> Result<Fetched> {
    if full {
        let resp = get_response(client, url)
            .await
            .with_context(|| format!("GET {url}"))?;
        Ok(Fetched::Full(resp))
    } else {
        let body = get_body(client, url)
            .await
            .with_context(|| format!("GET {url}"))?;
        Ok(Fetched::Body { body })
    }
}
