//! Trace replay on virtual time
//!
//! The replayer owns a `ManualClock` and a controller drawing into a
//! `RecordingSurface`. Before each trace event it walks the clock through
//! every timer deadline up to the event's timestamp, ticking the controller
//! at each one, so debounce, retry and animation timers fire exactly when
//! they would have in real time. Timers due at the same instant as an event
//! fire before the event is applied.
//!
//! With a worker pool the replayer waits for in-flight loads after every
//! tick, so pooled replays produce the same output as inline ones.

use std::fmt;
use std::time::Duration;

use tracing::debug;

use super::{Action, HoverTrace, TraceEvent};
use crate::config::PreviewConfig;
use crate::preview::{
    Clock, LoaderMode, ManualClock, PreviewController, PreviewError, RecordingSurface, SharedProvider,
    Size, SurfaceEvent,
};

/// How long to wait for pooled loads after each tick
pub const DEFAULT_SETTLE_TIMEOUT: Duration = Duration::from_secs(10);

/// A surface call and the virtual time it happened at.
#[derive(Debug, Clone, PartialEq)]
pub struct Stamped {
    pub at: Duration,
    pub event: SurfaceEvent,
}

impl fmt::Display for Stamped {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:>7}ms  {}", self.at.as_millis(), self.event)
    }
}

/// Drives a controller through hover traces.
pub struct Replayer {
    clock: ManualClock,
    controller: PreviewController<RecordingSurface, ManualClock>,
    settle_timeout: Duration,
    log: Vec<Stamped>,
}

impl Replayer {
    pub fn new(
        config: PreviewConfig,
        provider: SharedProvider,
        mode: LoaderMode,
    ) -> Result<Self, PreviewError> {
        let clock = ManualClock::new();
        let controller =
            PreviewController::new(config, provider, RecordingSurface::new(), clock.clone(), mode)?;
        Ok(Self {
            clock,
            controller,
            settle_timeout: DEFAULT_SETTLE_TIMEOUT,
            log: Vec::new(),
        })
    }

    /// Start with a viewport other than the controller default.
    pub fn with_viewport(mut self, viewport: Size) -> Self {
        self.controller.set_viewport(viewport.width, viewport.height);
        self
    }

    pub fn with_settle_timeout(mut self, timeout: Duration) -> Self {
        self.settle_timeout = timeout;
        self
    }

    pub fn controller(&self) -> &PreviewController<RecordingSurface, ManualClock> {
        &self.controller
    }

    pub fn now(&self) -> Duration {
        self.clock.now()
    }

    /// Replay a whole trace, stopping at its last event.
    pub fn run(&mut self, trace: &HoverTrace) -> &[Stamped] {
        for event in &trace.events {
            self.apply(event);
        }
        &self.log
    }

    /// Fire every timer due up to `event.at`, then apply the event.
    pub fn apply(&mut self, event: &TraceEvent) {
        self.advance_to(event.at);
        self.clock.set(event.at);

        match &event.action {
            Action::Enter(id) => self.controller.pointer_enter(id.clone()),
            Action::Leave(id) => self.controller.pointer_leave(id.clone()),
            Action::Move { x, y } => self.controller.pointer_move(*x, *y),
            Action::Resize { width, height } => self.controller.set_viewport(*width, *height),
            Action::Tick => self.tick(),
        }
        self.collect();
    }

    /// Tick at each timer deadline up to and including `until`.
    pub fn advance_to(&mut self, until: Duration) {
        while let Some(deadline) = self.controller.next_deadline() {
            if deadline > until {
                break;
            }
            self.clock.set(deadline);
            self.tick();
            self.collect();
        }
    }

    /// Everything recorded so far
    pub fn log(&self) -> &[Stamped] {
        &self.log
    }

    pub fn into_log(self) -> Vec<Stamped> {
        self.log
    }

    fn tick(&mut self) {
        self.controller.tick();
        self.controller.settle(self.settle_timeout);
    }

    fn collect(&mut self) {
        let at = self.now();
        let events = self.controller.surface_mut().take_events();
        if !events.is_empty() {
            debug!(at_ms = at.as_millis() as u64, count = events.len(), "surface calls");
        }
        self.log
            .extend(events.into_iter().map(|event| Stamped { at, event }));
    }
}
