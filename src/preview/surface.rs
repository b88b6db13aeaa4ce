//! Display surface seam
//!
//! The controller never draws by itself. It tells a `Surface` what to show
//! and where; hosts map these calls onto a canvas, window or terminal.

use std::fmt;

use super::overlay::OverlayRect;
use super::{Frame, ItemId};

/// Receives drawing and visibility commands for the preview overlay.
pub trait Surface {
    /// Draw `frame` of `item` into the overlay at `rect` and make it visible.
    fn render(&mut self, item: &ItemId, frame: &Frame, rect: OverlayRect);

    /// Move the visible overlay without redrawing it.
    fn place(&mut self, rect: OverlayRect);

    /// Show the "preview not available" indicator for `item`.
    fn show_placeholder(&mut self, item: &ItemId, rect: OverlayRect);

    /// Hide the overlay.
    fn hide(&mut self);
}

/// One call made on a `RecordingSurface`.
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceEvent {
    Render {
        item: ItemId,
        frame: usize,
        bytes: usize,
        rect: OverlayRect,
    },
    Place {
        rect: OverlayRect,
    },
    Placeholder {
        item: ItemId,
        rect: OverlayRect,
    },
    Hide,
}

impl fmt::Display for SurfaceEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SurfaceEvent::Render {
                item,
                frame,
                bytes,
                rect,
            } => write!(f, "render {} frame={} bytes={} at {}", item, frame, bytes, rect),
            SurfaceEvent::Place { rect } => write!(f, "place at {}", rect),
            SurfaceEvent::Placeholder { item, rect } => {
                write!(f, "placeholder {} at {}", item, rect)
            }
            SurfaceEvent::Hide => write!(f, "hide"),
        }
    }
}

/// Surface that records every call, for tests and trace replay.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    events: Vec<SurfaceEvent>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[SurfaceEvent] {
        &self.events
    }

    /// Remove and return everything recorded so far.
    pub fn take_events(&mut self) -> Vec<SurfaceEvent> {
        std::mem::take(&mut self.events)
    }

    /// `(item, frame index)` of every render call, in order
    pub fn rendered_frames(&self) -> Vec<(ItemId, usize)> {
        self.events
            .iter()
            .filter_map(|event| match event {
                SurfaceEvent::Render { item, frame, .. } => Some((item.clone(), *frame)),
                _ => None,
            })
            .collect()
    }
}

impl Surface for RecordingSurface {
    fn render(&mut self, item: &ItemId, frame: &Frame, rect: OverlayRect) {
        self.events.push(SurfaceEvent::Render {
            item: item.clone(),
            frame: frame.index(),
            bytes: frame.len(),
            rect,
        });
    }

    fn place(&mut self, rect: OverlayRect) {
        self.events.push(SurfaceEvent::Place { rect });
    }

    fn show_placeholder(&mut self, item: &ItemId, rect: OverlayRect) {
        self.events.push(SurfaceEvent::Placeholder {
            item: item.clone(),
            rect,
        });
    }

    fn hide(&mut self) {
        self.events.push(SurfaceEvent::Hide);
    }
}
