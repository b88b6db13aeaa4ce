//! Preview controller
//!
//! Connects pointer events, the clock and the frame loader to the hover
//! session, frame cache, animation scheduler and overlay positioner.
//!
//! Control flow: pointer-enter starts a debounce timer; when it fires the
//! cache is consulted and, on a miss, the loader fetches the sequence and
//! stores it. The session then plays, the scheduler advances frames, and
//! pointer moves reposition the overlay. Pointer-leave stops the animation
//! and hides the overlay but keeps the cached frames.
//!
//! All state changes happen on the thread that calls into the controller.
//! `tick()` is the single periodic entry point: it fires due timers, drains
//! finished loads and then draws at most once.

use std::time::{Duration, Instant};

use tracing::{debug, info, trace, warn};

use super::animation::AnimationScheduler;
use super::cache::FrameCache;
use super::error::PreviewError;
use super::loader::{FrameLoader, LoadOutcome, LoaderMode, RequestStatus};
use super::overlay::{OverlayPositioner, OverlayRect, Point, Size};
use super::provider::SharedProvider;
use super::session::{HoverSession, Phase, SessionState};
use super::surface::Surface;
use super::timer::{deadline_after, Clock, TimerId, TimerQueue};
use super::ItemId;
use crate::config::{PreviewConfig, SettingsStore};

/// Viewport assumed until the host reports one
pub const DEFAULT_VIEWPORT: Size = Size {
    width: 1920.0,
    height: 1080.0,
};

/// What a controller timer does when it fires.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimerEvent {
    /// Hover delay elapsed for the pending target
    Debounce,
    /// Retry a failed load of this item
    Retry(ItemId),
    /// Advance the playing animation
    AnimationTick,
}

/// Hover preview controller.
pub struct PreviewController<S: Surface, C: Clock> {
    config: PreviewConfig,
    settings: Box<dyn SettingsStore>,
    clock: C,
    surface: S,
    timers: TimerQueue<TimerEvent>,
    session: HoverSession,
    cache: FrameCache,
    loader: FrameLoader,
    animation: AnimationScheduler,
    positioner: OverlayPositioner,
    pointer: Point,
    viewport: Size,
    /// Where the overlay currently is, while visible
    overlay: Option<OverlayRect>,
}

impl<S: Surface, C: Clock> PreviewController<S, C> {
    /// Build a controller. The configuration is fixed for its lifetime and
    /// also serves as the feature toggle until `with_settings` replaces it.
    pub fn new(
        config: PreviewConfig,
        provider: SharedProvider,
        surface: S,
        clock: C,
        mode: LoaderMode,
    ) -> Result<Self, PreviewError> {
        config.validate()?;

        Ok(Self {
            settings: Box::new(config.clone()),
            cache: FrameCache::new(config.cache_capacity),
            loader: FrameLoader::new(provider, config.frame_count, mode),
            animation: AnimationScheduler::new(config.frame_interval()),
            positioner: OverlayPositioner::new(
                config.preview_size(),
                f64::from(config.overlay_margin),
            ),
            timers: TimerQueue::new(),
            session: HoverSession::new(),
            pointer: Point::default(),
            viewport: DEFAULT_VIEWPORT,
            overlay: None,
            config,
            clock,
            surface,
        })
    }

    /// Use a different settings store for the preview on/off switch.
    pub fn with_settings(mut self, settings: impl SettingsStore + 'static) -> Self {
        self.settings = Box::new(settings);
        self
    }

    // === Pointer input ===

    /// The pointer entered `id`.
    ///
    /// Ignored when previews are disabled or `id` is already the target.
    /// Any other target is dropped (its timers and animation stop) before
    /// the debounce for `id` starts.
    pub fn pointer_enter(&mut self, id: impl Into<ItemId>) {
        let id = id.into();
        if !self.settings.preview_enabled() {
            trace!(item = %id, "previews disabled; ignoring hover");
            return;
        }
        if self.session.is_target(&id) {
            return;
        }

        self.stop_current();
        let deadline = deadline_after(self.clock.now(), self.config.hover_delay());
        let debounce = self.timers.schedule(deadline, TimerEvent::Debounce);
        debug!(item = %id, deadline_ms = deadline.as_millis() as u64, "hover started");
        self.session.begin_pending(id, debounce);
    }

    /// The pointer left `id`. Leaves for anything but the target are ignored.
    ///
    /// In-flight loads for `id` keep running and still populate the cache.
    pub fn pointer_leave(&mut self, id: impl Into<ItemId>) {
        let id = id.into();
        if !self.session.is_target(&id) {
            trace!(item = %id, "leave for non-target ignored");
            return;
        }
        debug!(item = %id, "hover ended");
        self.stop_current();
    }

    /// The pointer moved; repositions the overlay if it is visible.
    pub fn pointer_move(&mut self, x: f64, y: f64) {
        self.pointer = Point::new(x, y);
        self.reposition();
    }

    /// The viewport changed size.
    pub fn set_viewport(&mut self, width: f64, height: f64) {
        self.viewport = Size::new(width, height);
        self.reposition();
    }

    // === Time ===

    /// Fire due timers, apply finished loads and draw at most once.
    pub fn tick(&mut self) {
        self.drain_loads();

        let now = self.clock.now();
        while let Some((timer, deadline, event)) = self.timers.pop_due(now) {
            match event {
                TimerEvent::Debounce => self.on_debounce(timer),
                TimerEvent::Retry(id) => self.on_retry(timer, id),
                TimerEvent::AnimationTick => self.on_animation_tick(timer, deadline),
            }
        }

        self.drain_loads();
        self.flush_render();
    }

    /// Block for up to `timeout` until every in-flight load has reported
    /// back, applying each outcome as it arrives.
    ///
    /// Lets a virtual-time driver wait for pooled loads before it moves
    /// the clock on.
    pub fn settle(&mut self, timeout: Duration) {
        let give_up = Instant::now() + timeout;
        while self.loader.pending_count() > 0 {
            let remaining = give_up.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                warn!(
                    pending = self.loader.pending_count(),
                    "gave up waiting for preview loads"
                );
                break;
            }
            for outcome in self.loader.wait(remaining) {
                self.on_load(outcome);
            }
        }
        self.flush_render();
    }

    /// Earliest pending timer deadline
    pub fn next_deadline(&self) -> Option<Duration> {
        self.timers.next_deadline()
    }

    /// Stop everything, hide the overlay and drop all cached frames.
    ///
    /// The controller stays usable; the next hover starts from scratch.
    pub fn teardown(&mut self) {
        self.stop_current();
        self.timers.clear();
        self.loader.discard_pending();
        self.cache.clear();
        info!("preview controller torn down");
    }

    // === Inspection ===

    pub fn phase(&self) -> Phase {
        self.session.phase()
    }

    pub fn session_state(&self) -> &SessionState {
        self.session.state()
    }

    pub fn target(&self) -> Option<&ItemId> {
        self.session.target()
    }

    pub fn frame_index(&self) -> Option<usize> {
        self.session.frame_index()
    }

    pub fn cache(&self) -> &FrameCache {
        &self.cache
    }

    pub fn is_loading(&self, id: &ItemId) -> bool {
        self.loader.is_pending(id)
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_running()
    }

    pub fn overlay_visible(&self) -> bool {
        self.overlay.is_some()
    }

    pub fn config(&self) -> &PreviewConfig {
        &self.config
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    // === Transitions ===

    /// Stop the animation, reset the session and hide the overlay.
    fn stop_current(&mut self) {
        self.animation.stop(&mut self.timers);
        self.session.reset(&mut self.timers);
        if self.overlay.take().is_some() {
            self.surface.hide();
        }
    }

    fn on_debounce(&mut self, timer: TimerId) {
        let Some(target) = self.session.debounce_elapsed(timer) else {
            trace!("stale debounce timer");
            return;
        };
        self.resolve(target);
    }

    fn on_retry(&mut self, timer: TimerId, id: ItemId) {
        let Some(target) = self.session.retry_elapsed(timer) else {
            debug!(item = %id, "no longer hovered; skipping retry");
            return;
        };
        info!(item = %target, "retrying preview load");
        self.resolve(target);
    }

    /// The session is loading `target`: play from cache or start a load.
    fn resolve(&mut self, target: ItemId) {
        if self.cache.contains(&target) {
            trace!(item = %target, "preview cache hit");
            self.begin_playing(&target);
        } else if self.loader.request(target.clone()) == RequestStatus::Dropped {
            let id = target.clone();
            self.on_load(LoadOutcome {
                id: target,
                result: Err(PreviewError::WorkersExited { id }),
            });
        }
    }

    fn drain_loads(&mut self) {
        for outcome in self.loader.poll() {
            self.on_load(outcome);
        }
    }

    fn on_load(&mut self, outcome: LoadOutcome) {
        let LoadOutcome { id, result } = outcome;
        match result {
            Ok(sequence) => {
                info!(
                    item = %id,
                    frames = sequence.len(),
                    bytes = sequence.total_bytes(),
                    "preview frames loaded"
                );
                self.cache.store(id.clone(), sequence);
                self.begin_playing(&id);
            }
            Err(err) => {
                warn!(item = %id, error = %err, "preview load failed");
                if !self.session.is_loading(&id) {
                    debug!(item = %id, "no longer hovered; not scheduling retry");
                    return;
                }
                let deadline = deadline_after(self.clock.now(), self.config.retry_delay());
                let retry = self.timers.schedule(deadline, TimerEvent::Retry(id.clone()));
                self.session.load_failed(&id, retry);
                let rect = self.overlay_rect();
                self.overlay = Some(rect);
                self.surface.show_placeholder(&id, rect);
            }
        }
    }

    /// Promote a loading session for `id` to playing.
    fn begin_playing(&mut self, id: &ItemId) {
        if !self.session.start_playing(id) {
            return;
        }
        debug!(item = %id, "preview playing");
        let now = self.clock.now();
        self.animation
            .start(&mut self.timers, now, TimerEvent::AnimationTick);
    }

    fn on_animation_tick(&mut self, timer: TimerId, deadline: Duration) {
        if !self
            .animation
            .on_tick(timer, deadline, &mut self.timers, TimerEvent::AnimationTick)
        {
            return;
        }
        self.session.advance_frame(self.config.frame_count);
    }

    /// Draw the current frame if a render is pending.
    fn flush_render(&mut self) {
        if !self.animation.take_render() {
            return;
        }
        let rect = self.overlay_rect();
        let (Some(target), Some(index)) = (self.session.target(), self.session.frame_index())
        else {
            return;
        };

        match self.cache.lookup(target).and_then(|seq| seq.get(index)) {
            Some(frame) => {
                self.surface.render(target, frame, rect);
                self.overlay = Some(rect);
            }
            None => {
                // Evicted while playing: the last drawn frame stays up.
                warn!(item = %target, "playing preview was evicted; animation stalled");
                self.animation.stop(&mut self.timers);
            }
        }
    }

    fn overlay_rect(&self) -> OverlayRect {
        self.positioner.place(self.pointer, self.viewport)
    }

    fn reposition(&mut self) {
        let Some(current) = self.overlay else {
            return;
        };
        let rect = self.overlay_rect();
        if rect != current {
            self.overlay = Some(rect);
            self.surface.place(rect);
        }
    }
}
