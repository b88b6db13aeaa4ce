//! Replay command handler

use anyhow::{Context, Result};
use std::path::Path;
use std::sync::Arc;

use hover_preview::preview::{DirectoryProvider, LoaderMode, Size};
use hover_preview::trace::{HoverTrace, Replayer};
use hover_preview::Config;

use super::load_config;

/// Replay a hover trace and print the surface calls plus a summary.
#[cfg(not(tarpaulin_include))]
pub fn handle(
    override_path: Option<&Path>,
    trace_path: &Path,
    frames: &Path,
    viewport: Option<Size>,
    workers: Option<usize>,
) -> Result<()> {
    let config = load_config(override_path).context("Failed to load config")?;
    let trace = HoverTrace::parse(trace_path)?;
    for line in run(&config, &trace, frames, viewport, workers)? {
        println!("{}", line);
    }
    Ok(())
}

/// Replay `trace` and return the printed lines.
pub(crate) fn run(
    config: &Config,
    trace: &HoverTrace,
    frames: &Path,
    viewport: Option<Size>,
    workers: Option<usize>,
) -> Result<Vec<String>> {
    if !frames.is_dir() {
        anyhow::bail!("Frames directory not found: {}", frames.display());
    }

    let mode = workers
        .map(LoaderMode::from_workers)
        .unwrap_or_else(|| config.loader.mode());
    let provider = Arc::new(DirectoryProvider::new(frames));

    let mut replayer = Replayer::new(config.preview.clone(), provider, mode)
        .context("Failed to set up preview controller")?;
    if let Some(viewport) = viewport {
        replayer = replayer.with_viewport(viewport);
    }

    let mut lines: Vec<String> = replayer.run(trace).iter().map(|s| s.to_string()).collect();

    let cache = replayer.controller().cache();
    let cached: Vec<&str> = cache.ids().map(|id| id.as_str()).collect();
    lines.push(String::new());
    lines.push(format!(
        "Replayed {} events over {}ms",
        trace.len(),
        trace.duration().as_millis()
    ));
    lines.push(format!(
        "Cached {} of {} items ({}): {}",
        cache.len(),
        cache.capacity(),
        humansize::format_size(cache.total_bytes(), humansize::BINARY),
        if cached.is_empty() {
            "-".to_string()
        } else {
            cached.join(", ")
        }
    ));
    Ok(lines)
}
