//! Command handlers for the HVP CLI.
//!
//! Each submodule handles a specific CLI command or command group.
//! The main dispatch logic remains in main.rs.

pub mod completions;
pub mod config;
pub mod position;
pub mod replay;
pub mod storyboard;

use anyhow::Result;
use std::path::{Path, PathBuf};

use hover_preview::Config;

/// Config file to use: the `--config` override or the default location.
pub fn config_file(override_path: Option<&Path>) -> Result<PathBuf> {
    match override_path {
        Some(path) => Ok(path.to_path_buf()),
        None => Config::config_path(),
    }
}

/// Load the effective configuration (defaults when the file is missing).
pub fn load_config(override_path: Option<&Path>) -> Result<Config> {
    Config::load_from(&config_file(override_path)?)
}
