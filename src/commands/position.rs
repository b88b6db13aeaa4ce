//! Position command handler

use anyhow::{Context, Result};
use std::path::Path;

use hover_preview::preview::{OverlayPositioner, OverlayRect, Point, Size};

use super::load_config;

/// Print where the overlay would be placed for a pointer position.
#[cfg(not(tarpaulin_include))]
pub fn handle(
    override_path: Option<&Path>,
    x: f64,
    y: f64,
    viewport: Size,
    size: Option<Size>,
    margin: Option<f64>,
) -> Result<()> {
    let config = load_config(override_path).context("Failed to load config")?;
    let size = size.unwrap_or_else(|| config.preview.preview_size());
    let margin = margin.unwrap_or_else(|| f64::from(config.preview.overlay_margin));

    let rect = place(Point::new(x, y), viewport, size, margin);
    println!("{}", describe(rect, viewport));
    Ok(())
}

pub(crate) fn place(pointer: Point, viewport: Size, size: Size, margin: f64) -> OverlayRect {
    OverlayPositioner::new(size, margin).place(pointer, viewport)
}

/// `x=.. y=.. width=.. height=..`, flagging any overflow.
pub(crate) fn describe(rect: OverlayRect, viewport: Size) -> String {
    let overflows = rect.x < 0.0
        || rect.y < 0.0
        || rect.x + rect.width > viewport.width
        || rect.y + rect.height > viewport.height;
    let mut line = format!(
        "x={} y={} width={} height={}",
        rect.x, rect.y, rect.width, rect.height
    );
    if overflows {
        line.push_str(" (overflows viewport)");
    }
    line
}
