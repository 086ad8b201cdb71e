//! CLI command handlers for `relgraph`.
//!
//! Each command is implemented in its own submodule.

pub mod config;
pub mod inspect;
pub mod render;

use relgraph::config::Config;
use std::path::{Path, PathBuf};

/// Input spreadsheet: the command argument, else config `paths.input`
fn resolve_input(input: Option<&Path>, config: &Config) -> PathBuf {
    input.map_or_else(|| PathBuf::from(&config.paths.input), Path::to_path_buf)
}
