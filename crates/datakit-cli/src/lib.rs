//! Datakit CLI — a walkthrough of text, CSV, JSON, and HTTP I/O.

pub mod commands;
pub mod config;
pub mod output;

pub use config::{resolve_demo_dir, resolve_endpoint};
pub use output::Output;
