//! Controller with background loading threads

use std::sync::{Arc, Condvar, Mutex};
use std::time::Duration;

use hover_preview::config::PreviewConfig;
use hover_preview::preview::{
    Clock, FetchError, FrameProvider, ItemId, LoaderMode, ManualClock, Phase, PreviewController,
    RecordingSurface, SurfaceEvent,
};

const SETTLE: Duration = Duration::from_secs(10);

/// Provider whose fetches for gated items block until the gate opens.
struct GatedProvider {
    gated: Vec<String>,
    open: Mutex<bool>,
    cond: Condvar,
}

impl GatedProvider {
    fn new(gated: &[&str]) -> Arc<Self> {
        Arc::new(Self {
            gated: gated.iter().map(|s| s.to_string()).collect(),
            open: Mutex::new(false),
            cond: Condvar::new(),
        })
    }

    fn open(&self) {
        *self.open.lock().unwrap() = true;
        self.cond.notify_all();
    }
}

impl FrameProvider for GatedProvider {
    fn fetch_frame(&self, id: &ItemId, index: usize) -> Result<Vec<u8>, FetchError> {
        if self.gated.iter().any(|g| g == id.as_str()) {
            let mut open = self.open.lock().unwrap();
            while !*open {
                open = self.cond.wait(open).unwrap();
            }
        }
        Ok(vec![index as u8; 4])
    }
}

fn controller(
    config: PreviewConfig,
    provider: Arc<GatedProvider>,
    clock: &ManualClock,
) -> PreviewController<RecordingSurface, ManualClock> {
    PreviewController::new(
        config,
        provider,
        RecordingSurface::new(),
        clock.clone(),
        LoaderMode::Pool(2),
    )
    .unwrap()
}

fn at(controller: &mut PreviewController<RecordingSurface, ManualClock>, clock: &ManualClock, ms: u64) {
    clock.set(Duration::from_millis(ms));
    controller.tick();
}

#[test]
fn pooled_load_plays_after_settle() {
    let clock = ManualClock::new();
    let provider = GatedProvider::new(&[]);
    let mut c = controller(PreviewConfig::default(), provider, &clock);

    c.pointer_enter("a");
    at(&mut c, &clock, 500);
    c.settle(SETTLE);

    assert_eq!(c.phase(), Phase::Playing);
    assert_eq!(
        c.surface().rendered_frames(),
        vec![(ItemId::from("a"), 0)]
    );
    assert_eq!(clock.now(), Duration::from_millis(500));
}

#[test]
fn leaving_does_not_cancel_in_flight_load() {
    let clock = ManualClock::new();
    let provider = GatedProvider::new(&["a"]);
    let mut c = controller(PreviewConfig::default(), provider.clone(), &clock);

    c.pointer_enter("a");
    at(&mut c, &clock, 500);
    assert!(c.is_loading(&ItemId::from("a")));

    c.pointer_leave("a");
    provider.open();
    c.settle(SETTLE);

    assert!(c.cache().contains(&ItemId::from("a")));
    assert_eq!(c.phase(), Phase::Idle);
    assert!(c.surface().rendered_frames().is_empty());
}

#[test]
fn duplicate_requests_share_one_load() {
    let clock = ManualClock::new();
    let provider = GatedProvider::new(&["a"]);
    let mut c = controller(PreviewConfig::default(), provider.clone(), &clock);

    c.pointer_enter("a");
    at(&mut c, &clock, 500);
    c.pointer_leave("a");
    c.pointer_enter("a");
    at(&mut c, &clock, 1_000);

    // Still the first fetch in flight; the second hover joined it
    assert!(c.is_loading(&ItemId::from("a")));
    assert_eq!(c.phase(), Phase::Loading);

    provider.open();
    c.settle(SETTLE);
    assert_eq!(c.phase(), Phase::Playing);
}

#[test]
fn eviction_of_playing_item_stalls_animation() {
    let clock = ManualClock::new();
    let provider = GatedProvider::new(&["b"]);
    let config = PreviewConfig {
        cache_capacity: 1,
        ..PreviewConfig::default()
    };
    let mut c = controller(config, provider.clone(), &clock);

    // a is cached and playing
    c.pointer_enter("a");
    at(&mut c, &clock, 500);
    c.settle(SETTLE);

    // b starts loading and is abandoned while its fetch blocks
    c.pointer_enter("b");
    at(&mut c, &clock, 1_000);
    assert!(c.is_loading(&ItemId::from("b")));

    // Back to a, which plays from cache
    c.pointer_enter("a");
    at(&mut c, &clock, 1_500);
    assert_eq!(c.phase(), Phase::Playing);

    // b lands and evicts a
    provider.open();
    c.settle(SETTLE);
    assert!(!c.cache().contains(&ItemId::from("a")));

    c.surface_mut().take_events();
    at(&mut c, &clock, 2_300);

    // Animation gave up; the last drawn frame stays on screen
    assert!(!c.is_animating());
    assert!(c.overlay_visible());
    assert_eq!(c.phase(), Phase::Playing);
    assert!(c.surface().rendered_frames().is_empty());
}

#[test]
fn panicking_provider_shows_placeholder_and_keeps_pool_alive() {
    let clock = ManualClock::new();
    let provider = |id: &ItemId, index: usize| -> Result<Vec<u8>, FetchError> {
        if id.as_str() == "boom" {
            panic!("corrupt frame store");
        }
        Ok(vec![index as u8; 4])
    };
    let mut c = PreviewController::new(
        PreviewConfig::default(),
        Arc::new(provider),
        RecordingSurface::new(),
        clock.clone(),
        LoaderMode::Pool(1),
    )
    .unwrap();

    c.pointer_enter("boom");
    at(&mut c, &clock, 500);
    c.settle(SETTLE);

    // The panic became an ordinary failed load
    assert!(!c.is_loading(&ItemId::from("boom")));
    assert_eq!(c.phase(), Phase::Idle);
    assert_eq!(c.target(), Some(&ItemId::from("boom")));
    assert_eq!(c.next_deadline(), Some(Duration::from_millis(5_500)));
    assert!(matches!(
        c.surface().events().last(),
        Some(SurfaceEvent::Placeholder { .. })
    ));

    // The lone worker still serves other items
    c.pointer_enter("ok");
    at(&mut c, &clock, 1_000);
    c.settle(SETTLE);
    assert_eq!(c.phase(), Phase::Playing);
    assert_eq!(c.target(), Some(&ItemId::from("ok")));
}
