//! Configuration loading and resolution.
//!
//! Precedence everywhere: explicit flag, then environment, then default.

use std::path::PathBuf;

use datakit::sample::TODO_ENDPOINT;

/// Environment override for the demo working directory.
pub const DIR_ENV: &str = "DATAKIT_DIR";

/// Environment override for the GET endpoint.
pub const ENDPOINT_ENV: &str = "DATAKIT_ENDPOINT";

const DEFAULT_DIR: &str = "./demo_files";

/// Resolve the directory the demo reads and writes in.
pub fn resolve_demo_dir(explicit: Option<&str>) -> PathBuf {
    resolve_demo_dir_from(explicit, std::env::var(DIR_ENV).ok())
}

/// Resolve the URL fetched when none is given.
pub fn resolve_endpoint(explicit: Option<&str>) -> String {
    resolve_endpoint_from(explicit, std::env::var(ENDPOINT_ENV).ok())
}

fn resolve_demo_dir_from(explicit: Option<&str>, env: Option<String>) -> PathBuf {
    if let Some(dir) = explicit {
        return PathBuf::from(dir);
    }
    match env {
        Some(dir) if !dir.trim().is_empty() => PathBuf::from(dir),
        _ => PathBuf::from(DEFAULT_DIR),
    }
}

fn resolve_endpoint_from(explicit: Option<&str>, env: Option<String>) -> String {
    if let Some(url) = explicit {
        return url.to_string();
    }
    match env {
        Some(url) if !url.trim().is_empty() => url,
        _ => TODO_ENDPOINT.to_string(),
    }
}
