//! Config subcommands handler

use anyhow::{bail, Context, Result};
use std::path::Path;

use hover_preview::Config;

use super::{config_file, load_config};

/// Render a config as pretty TOML.
pub(crate) fn render(config: &Config) -> Result<String> {
    toml::to_string_pretty(config).context("Failed to serialize config")
}

/// Show the effective configuration as TOML.
#[cfg(not(tarpaulin_include))]
pub fn handle_show(override_path: Option<&Path>) -> Result<()> {
    let config = load_config(override_path)?;
    print!("{}", render(&config)?);
    Ok(())
}

/// Print the config file location.
#[cfg(not(tarpaulin_include))]
pub fn handle_path(override_path: Option<&Path>) -> Result<()> {
    println!("{}", config_file(override_path)?.display());
    Ok(())
}

/// Write a config file holding the defaults.
#[cfg(not(tarpaulin_include))]
pub fn handle_init(override_path: Option<&Path>, force: bool) -> Result<()> {
    let path = config_file(override_path)?;
    init_at(&path, force)?;
    println!("Wrote default config to {}", path.display());
    Ok(())
}

/// Write defaults to `path`, refusing to overwrite unless `force`.
pub(crate) fn init_at(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!(
            "Config file already exists: {} (use --force to overwrite)",
            path.display()
        );
    }
    Config::default().save_to(path)
}
