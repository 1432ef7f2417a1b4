//! Subcommand implementations for the `datakit` binary.
//!
//! Each function takes its collaborators explicitly and returns data;
//! printing is left to the caller.

pub mod csv_cmd;
pub mod demo;
pub mod get_cmd;
pub mod json_cmd;
pub mod text_cmd;
