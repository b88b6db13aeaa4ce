//! Hover session state machine
//!
//! Tracks the single item currently being previewed. The session only
//! records state and owns its debounce and retry timers; the controller
//! decides when transitions happen and performs their side effects.
//!
//! ```text
//! Idle --enter T--> Pending --debounce--> Loading --loaded--> Playing
//!                      |                     |
//!                      +--enter T2 (restart) +--failed--> Backoff --retry--> Loading
//! any --leave T / enter T2--> Idle (then Pending for T2)
//! ```

use super::timer::{TimerId, TimerQueue};
use super::ItemId;

/// Coarse session phase as seen by the rest of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Pending,
    Loading,
    Playing,
}

/// Full session state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// Nothing hovered
    Idle,
    /// Hovering `target`, waiting for the debounce timer
    Pending { target: ItemId, debounce: TimerId },
    /// Waiting for the frame sequence of `target`
    Loading { target: ItemId },
    /// The last load of `target` failed; a placeholder is showing and a
    /// retry is scheduled. Reported as `Phase::Idle`.
    Backoff { target: ItemId, retry: TimerId },
    /// Animating `target`; `frame_index` is always below the frame count
    Playing { target: ItemId, frame_index: usize },
}

/// The single hover session.
#[derive(Debug)]
pub struct HoverSession {
    state: SessionState,
}

impl HoverSession {
    pub fn new() -> Self {
        Self {
            state: SessionState::Idle,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        match self.state {
            SessionState::Idle | SessionState::Backoff { .. } => Phase::Idle,
            SessionState::Pending { .. } => Phase::Pending,
            SessionState::Loading { .. } => Phase::Loading,
            SessionState::Playing { .. } => Phase::Playing,
        }
    }

    /// Currently hovered item, if any
    pub fn target(&self) -> Option<&ItemId> {
        match &self.state {
            SessionState::Idle => None,
            SessionState::Pending { target, .. }
            | SessionState::Loading { target }
            | SessionState::Backoff { target, .. }
            | SessionState::Playing { target, .. } => Some(target),
        }
    }

    pub fn is_target(&self, id: &ItemId) -> bool {
        self.target() == Some(id)
    }

    /// Whether the session is waiting on a load of `id`
    pub fn is_loading(&self, id: &ItemId) -> bool {
        matches!(&self.state, SessionState::Loading { target } if target == id)
    }

    /// Current frame index; only meaningful while playing.
    pub fn frame_index(&self) -> Option<usize> {
        match self.state {
            SessionState::Playing { frame_index, .. } => Some(frame_index),
            _ => None,
        }
    }

    /// Return to `Idle`, cancelling the debounce or retry timer.
    ///
    /// Returns the state that was left behind.
    pub fn reset<T>(&mut self, timers: &mut TimerQueue<T>) -> SessionState {
        let previous = std::mem::replace(&mut self.state, SessionState::Idle);
        match &previous {
            SessionState::Pending { debounce, .. } => {
                timers.cancel(*debounce);
            }
            SessionState::Backoff { retry, .. } => {
                timers.cancel(*retry);
            }
            _ => {}
        }
        previous
    }

    /// Start hovering `target`. The caller resets any previous target first.
    pub fn begin_pending(&mut self, target: ItemId, debounce: TimerId) {
        debug_assert!(matches!(self.state, SessionState::Idle));
        self.state = SessionState::Pending { target, debounce };
    }

    /// Debounce timer `timer` fired. Moves `Pending -> Loading` and returns
    /// the target, or `None` for a stale timer.
    pub fn debounce_elapsed(&mut self, timer: TimerId) -> Option<ItemId> {
        match &self.state {
            SessionState::Pending { target, debounce } if *debounce == timer => {
                let target = target.clone();
                self.state = SessionState::Loading {
                    target: target.clone(),
                };
                Some(target)
            }
            _ => None,
        }
    }

    /// Frames for `id` are available. Moves `Loading -> Playing` at frame 0
    /// when `id` is still the loading target.
    pub fn start_playing(&mut self, id: &ItemId) -> bool {
        if !self.is_loading(id) {
            return false;
        }
        self.state = SessionState::Playing {
            target: id.clone(),
            frame_index: 0,
        };
        true
    }

    /// The load of `id` failed. Moves `Loading -> Backoff` holding the
    /// retry timer when `id` is still the loading target.
    pub fn load_failed(&mut self, id: &ItemId, retry: TimerId) -> bool {
        if !self.is_loading(id) {
            return false;
        }
        self.state = SessionState::Backoff {
            target: id.clone(),
            retry,
        };
        true
    }

    /// Retry timer `timer` fired. Moves `Backoff -> Loading` and returns the
    /// target, or `None` when the user has moved on.
    pub fn retry_elapsed(&mut self, timer: TimerId) -> Option<ItemId> {
        match &self.state {
            SessionState::Backoff { target, retry } if *retry == timer => {
                let target = target.clone();
                self.state = SessionState::Loading {
                    target: target.clone(),
                };
                Some(target)
            }
            _ => None,
        }
    }

    /// Advance to the next frame, wrapping at `frame_count`.
    pub fn advance_frame(&mut self, frame_count: usize) -> Option<usize> {
        match &mut self.state {
            SessionState::Playing { frame_index, .. } if frame_count > 0 => {
                *frame_index = (*frame_index + 1) % frame_count;
                Some(*frame_index)
            }
            _ => None,
        }
    }
}

impl Default for HoverSession {
    fn default() -> Self {
        Self::new()
    }
}
