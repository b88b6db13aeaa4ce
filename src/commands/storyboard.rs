//! Storyboard command handler

use anyhow::{bail, Context, Result};
use std::path::Path;
use std::time::Duration;

use hover_preview::storyboard::{
    format_timestamp, parse_iso8601_duration, progress_percent, storyboard_timestamps,
};

use super::load_config;

/// Print the frame timestamps for an ISO 8601 duration.
#[cfg(not(tarpaulin_include))]
pub fn handle(override_path: Option<&Path>, duration: &str, frames: Option<usize>) -> Result<()> {
    let frame_count = match frames {
        Some(n) => n,
        None => {
            load_config(override_path)
                .context("Failed to load config")?
                .preview
                .frame_count
        }
    };
    for line in render(duration, frame_count)? {
        println!("{}", line);
    }
    Ok(())
}

/// One line per frame: `#N  m:ss  PP.P%`.
pub(crate) fn render(duration: &str, frame_count: usize) -> Result<Vec<String>> {
    if frame_count == 0 {
        bail!("Frame count must be at least 1");
    }
    let total: Duration = parse_iso8601_duration(duration)
        .with_context(|| format!("Invalid ISO 8601 duration: '{}'", duration))?;

    Ok(storyboard_timestamps(total, frame_count)
        .into_iter()
        .enumerate()
        .map(|(i, ts)| {
            format!(
                "#{:<3} {:>6}  {:>5.1}%",
                i + 1,
                format_timestamp(ts),
                progress_percent(ts, total)
            )
        })
        .collect())
}
