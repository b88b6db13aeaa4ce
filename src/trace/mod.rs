//! Hover traces
//!
//! A hover trace is a recorded sequence of pointer and viewport events with
//! absolute millisecond timestamps, stored as NDJSON:
//!
//! ```text
//! [0,"resize",1280,720]
//! [100,"move",400,300]
//! [120,"enter","dQw4w9WgXcQ"]
//! [2500,"leave","dQw4w9WgXcQ"]
//! ```
//!
//! - `reader` - Parsing traces from files, readers and strings
//! - `replay` - Driving a controller through a trace on virtual time

mod reader;
pub mod replay;

pub use replay::{Replayer, Stamped};

use std::time::Duration;

use crate::preview::ItemId;

/// What happened at one point of a trace.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Pointer entered an item (`"enter"`)
    Enter(ItemId),
    /// Pointer left an item (`"leave"`)
    Leave(ItemId),
    /// Pointer moved (`"move"`)
    Move { x: f64, y: f64 },
    /// Viewport resized (`"resize"`)
    Resize { width: f64, height: f64 },
    /// A display refresh with no input (`"tick"`)
    Tick,
}

impl Action {
    /// Trace code for this action
    pub fn code(&self) -> &'static str {
        match self {
            Action::Enter(_) => "enter",
            Action::Leave(_) => "leave",
            Action::Move { .. } => "move",
            Action::Resize { .. } => "resize",
            Action::Tick => "tick",
        }
    }
}

/// A single trace event.
#[derive(Debug, Clone, PartialEq)]
pub struct TraceEvent {
    /// Time since the start of the trace
    pub at: Duration,
    pub action: Action,
}

impl TraceEvent {
    pub fn new(at_ms: u64, action: Action) -> Self {
        Self {
            at: Duration::from_millis(at_ms),
            action,
        }
    }
}

/// A parsed hover trace, in timestamp order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HoverTrace {
    pub events: Vec<TraceEvent>,
}

impl HoverTrace {
    pub fn new(events: Vec<TraceEvent>) -> Self {
        Self { events }
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Timestamp of the last event
    pub fn duration(&self) -> Duration {
        self.events.last().map(|e| e.at).unwrap_or_default()
    }

    /// Distinct items entered, in first-seen order
    pub fn items(&self) -> Vec<ItemId> {
        let mut seen: Vec<ItemId> = Vec::new();
        for event in &self.events {
            if let Action::Enter(id) = &event.action {
                if !seen.contains(id) {
                    seen.push(id.clone());
                }
            }
        }
        seen
    }
}
