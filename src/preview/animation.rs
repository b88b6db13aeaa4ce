//! Animation scheduler
//!
//! While a session is playing, a periodic timer advances the frame index
//! every `frame_interval`. Each tick only requests a render; the draw
//! itself happens once per controller tick (the display refresh
//! opportunity), so several elapsed intervals collapse into one draw.

use std::time::Duration;

use tracing::trace;

use super::timer::{deadline_after, TimerId, TimerQueue};

/// Drives frame advancement for the playing session.
#[derive(Debug)]
pub struct AnimationScheduler {
    interval: Duration,
    /// Next tick, while running
    timer: Option<TimerId>,
    /// A frame change is waiting to be drawn
    render_pending: bool,
}

impl AnimationScheduler {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            timer: None,
            render_pending: false,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn is_running(&self) -> bool {
        self.timer.is_some()
    }

    /// Start ticking from `now` and request a draw of the current frame.
    pub fn start<T>(&mut self, timers: &mut TimerQueue<T>, now: Duration, tick: T) {
        self.stop(timers);
        self.timer = Some(timers.schedule(deadline_after(now, self.interval), tick));
        self.render_pending = true;
        trace!(interval_ms = self.interval.as_millis() as u64, "animation started");
    }

    /// Cancel the pending tick and drop any undrawn frame.
    pub fn stop<T>(&mut self, timers: &mut TimerQueue<T>) {
        if let Some(timer) = self.timer.take() {
            timers.cancel(timer);
            trace!("animation stopped");
        }
        self.render_pending = false;
    }

    /// Handle a fired tick scheduled for `deadline`.
    ///
    /// Returns `false` for a tick that does not belong to the running
    /// animation. Otherwise schedules the next tick one interval after
    /// `deadline` (not after "now", so late ticks do not drift) and marks a
    /// render as pending.
    pub fn on_tick<T>(
        &mut self,
        timer: TimerId,
        deadline: Duration,
        timers: &mut TimerQueue<T>,
        next: T,
    ) -> bool {
        if self.timer != Some(timer) {
            return false;
        }
        self.timer = Some(timers.schedule(deadline_after(deadline, self.interval), next));
        self.render_pending = true;
        true
    }

    /// Consume the pending render request, if any.
    pub fn take_render(&mut self) -> bool {
        std::mem::take(&mut self.render_pending)
    }
}
