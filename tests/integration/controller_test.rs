//! Controller behaviour on virtual time

use hover_preview::config::PreviewConfig;
use hover_preview::preview::{ItemId, Phase, SurfaceEvent};
use hover_preview::FeatureFlag;

use crate::helpers::Rig;

fn id(s: &str) -> ItemId {
    ItemId::from(s)
}

// ============================================================================
// Debounce
// ============================================================================

#[test]
fn leaving_before_debounce_never_loads() {
    let mut rig = Rig::new();
    rig.controller.pointer_enter("t");
    rig.at(300);
    rig.controller.pointer_leave("t");
    rig.run_until(10_000);

    assert_eq!(rig.provider.total_calls(), 0);
    assert_eq!(rig.controller.phase(), Phase::Idle);
    assert!(rig.controller.surface().events().is_empty());
}

#[test]
fn resting_past_debounce_loads_exactly_once() {
    let mut rig = Rig::new();
    rig.controller.pointer_enter("t");
    rig.at(499);
    assert_eq!(rig.provider.loads("t"), 0);

    rig.at(500);
    assert_eq!(rig.provider.loads("t"), 1);

    rig.run_until(10_000);
    assert_eq!(rig.provider.loads("t"), 1);
    assert_eq!(rig.controller.phase(), Phase::Playing);
}

#[test]
fn switching_target_before_debounce_never_loads_first() {
    let mut rig = Rig::new();
    rig.controller.pointer_enter("t1");
    rig.at(200);
    rig.controller.pointer_enter("t2");
    rig.run_until(2_000);

    assert_eq!(rig.provider.loads("t1"), 0);
    assert_eq!(rig.provider.loads("t2"), 1);
    assert_eq!(rig.controller.target(), Some(&id("t2")));
    // Debounce restarted at 200
    assert_eq!(rig.rendered()[0], ("t2".to_string(), 0));
}

#[test]
fn reentering_current_target_keeps_debounce() {
    let mut rig = Rig::new();
    rig.controller.pointer_enter("t");
    rig.at(400);
    rig.controller.pointer_enter("t");
    assert_eq!(
        rig.controller.next_deadline(),
        Some(std::time::Duration::from_millis(500))
    );
}

#[test]
fn leave_for_other_item_is_ignored() {
    let mut rig = Rig::new();
    rig.controller.pointer_enter("t");
    rig.controller.pointer_leave("other");
    assert_eq!(rig.controller.phase(), Phase::Pending);
}

// ============================================================================
// Cache
// ============================================================================

#[test]
fn cache_never_exceeds_capacity() {
    let mut rig = Rig::with_config(PreviewConfig {
        cache_capacity: 3,
        ..PreviewConfig::default()
    });

    let mut t = 0;
    for n in 0..6 {
        rig.hover(&format!("item{}", n), t);
        t += 1_000;
        assert!(rig.controller.cache().len() <= 3);
    }

    let cached: Vec<String> = rig.controller.cache().ids().map(|i| i.to_string()).collect();
    assert_eq!(cached, vec!["item3", "item4", "item5"]);
    assert!(rig.controller.cache().lookup(&id("item0")).is_none());
}

#[test]
fn loaded_sequence_has_every_frame() {
    let mut rig = Rig::new();
    rig.hover("x", 0);

    let sequence = rig.controller.cache().lookup(&id("x")).unwrap();
    assert_eq!(sequence.len(), 6);
    for (i, frame) in sequence.iter().enumerate() {
        assert_eq!(frame.index(), i);
        assert_eq!(frame.bytes(), vec![i as u8; 16].as_slice());
    }
}

#[test]
fn cached_item_plays_without_reloading() {
    let mut rig = Rig::new();
    rig.hover("x", 0);
    rig.controller.pointer_leave("x");
    assert!(rig.controller.cache().contains(&id("x")));

    rig.hover("x", 3_000);
    assert_eq!(rig.provider.loads("x"), 1);
    assert_eq!(rig.controller.phase(), Phase::Playing);
}

#[test]
fn single_slot_cache_reloads_evicted_item() {
    let mut rig = Rig::with_config(PreviewConfig {
        cache_capacity: 1,
        ..PreviewConfig::default()
    });
    rig.hover("a", 0);
    rig.controller.pointer_leave("a");
    rig.hover("b", 1_000);
    assert!(!rig.controller.cache().contains(&id("a")));

    // Hovering a again reloads it, which evicts b
    rig.hover("a", 3_000);
    assert_eq!(rig.provider.loads("a"), 2);
    assert_eq!(rig.controller.cache().len(), 1);
}

// ============================================================================
// Animation
// ============================================================================

#[test]
fn animation_wraps_after_frame_count_ticks() {
    let mut rig = Rig::new();
    rig.hover("x", 0);
    assert_eq!(rig.controller.frame_index(), Some(0));

    // Playing from 500, one tick every 800ms
    rig.run_until(500 + 6 * 800);
    assert_eq!(rig.controller.frame_index(), Some(0));

    let frames: Vec<usize> = rig.rendered().into_iter().map(|(_, f)| f).collect();
    assert_eq!(frames, vec![0, 1, 2, 3, 4, 5, 0]);
}

#[test]
fn late_refresh_draws_only_latest_frame() {
    let mut rig = Rig::new();
    rig.hover("x", 0);
    rig.controller.surface_mut().take_events();

    rig.at(500 + 3 * 800 + 10);
    assert_eq!(rig.controller.frame_index(), Some(3));
    assert_eq!(rig.rendered(), vec![("x".to_string(), 3)]);

    // Next tick stays on the original cadence
    assert_eq!(
        rig.controller.next_deadline(),
        Some(std::time::Duration::from_millis(500 + 4 * 800))
    );
}

#[test]
fn leaving_stops_animation_and_hides() {
    let mut rig = Rig::new();
    rig.hover("x", 0);
    rig.at(1_000);
    rig.controller.pointer_leave("x");

    assert!(!rig.controller.is_animating());
    assert!(!rig.controller.overlay_visible());
    assert_eq!(rig.controller.next_deadline(), None);
    assert_eq!(
        rig.controller.surface().events().last(),
        Some(&SurfaceEvent::Hide)
    );
}

// ============================================================================
// Retry
// ============================================================================

#[test]
fn failed_load_retries_after_delay() {
    let mut rig = Rig::new();
    rig.provider.break_item("x");
    rig.hover("x", 0);

    assert_eq!(rig.provider.loads("x"), 1);
    assert_eq!(rig.controller.phase(), Phase::Idle);
    assert_eq!(rig.controller.target(), Some(&id("x")));
    assert!(rig.controller.overlay_visible());
    assert!(matches!(
        rig.controller.surface().events(),
        [SurfaceEvent::Placeholder { .. }]
    ));

    rig.provider.restore("x");
    rig.run_until(500 + 4_999);
    assert_eq!(rig.provider.loads("x"), 1);

    rig.run_until(500 + 5_000);
    assert_eq!(rig.provider.loads("x"), 2);
    assert_eq!(rig.controller.phase(), Phase::Playing);
    assert_eq!(rig.rendered(), vec![("x".to_string(), 0)]);
}

#[test]
fn repeated_failures_keep_retrying_while_hovered() {
    let mut rig = Rig::new();
    rig.provider.break_item("x");
    rig.hover("x", 0);
    rig.run_until(500 + 3 * 5_000);
    assert_eq!(rig.provider.loads("x"), 4);
}

#[test]
fn no_retry_after_leaving() {
    let mut rig = Rig::new();
    rig.provider.break_item("x");
    rig.hover("x", 0);
    rig.at(1_000);
    rig.controller.pointer_leave("x");
    rig.run_until(60_000);

    assert_eq!(rig.provider.loads("x"), 1);
    assert_eq!(
        rig.controller.surface().events().last(),
        Some(&SurfaceEvent::Hide)
    );
}

#[test]
fn no_retry_after_switching_target() {
    let mut rig = Rig::new();
    rig.provider.break_item("x");
    rig.hover("x", 0);
    rig.hover("y", 1_000);
    rig.run_until(60_000);

    assert_eq!(rig.provider.loads("x"), 1);
    assert_eq!(rig.controller.target(), Some(&id("y")));
}

#[test]
fn reentering_during_backoff_keeps_scheduled_retry() {
    let mut rig = Rig::new();
    rig.provider.break_item("x");
    rig.hover("x", 0);
    rig.at(2_000);
    rig.controller.pointer_enter("x");
    assert_eq!(
        rig.controller.next_deadline(),
        Some(std::time::Duration::from_millis(5_500))
    );
}

// ============================================================================
// Positioning, settings, teardown
// ============================================================================

#[test]
fn overlay_follows_pointer_with_flips() {
    let mut rig = Rig::new();
    rig.controller.set_viewport(1000.0, 800.0);
    rig.controller.pointer_move(100.0, 100.0);
    rig.hover("x", 0);
    rig.controller.pointer_move(950.0, 780.0);

    let places: Vec<String> = rig
        .controller
        .surface()
        .events()
        .iter()
        .filter(|e| matches!(e, SurfaceEvent::Place { .. }))
        .map(|e| e.to_string())
        .collect();
    assert_eq!(places, vec!["place at (610, 580) 320x180"]);
}

#[test]
fn resize_moves_visible_overlay() {
    let mut rig = Rig::new();
    rig.controller.pointer_move(900.0, 100.0);
    rig.hover("x", 0);
    rig.controller.set_viewport(1000.0, 800.0);

    assert_eq!(
        rig.controller.surface().events().last().map(|e| e.to_string()),
        Some("place at (560, 120) 320x180".to_string())
    );
}

#[test]
fn disabled_feature_ignores_hover() {
    let mut rig = Rig::with_config(PreviewConfig {
        enabled: false,
        ..PreviewConfig::default()
    });
    rig.hover("x", 0);
    assert_eq!(rig.controller.phase(), Phase::Idle);
    assert_eq!(rig.provider.total_calls(), 0);
}

#[test]
fn runtime_flag_is_read_on_each_enter() {
    let flag = FeatureFlag::new(false);
    let mut rig = Rig::new();
    let Rig {
        clock,
        provider,
        controller,
    } = rig;
    rig = Rig {
        clock,
        provider,
        controller: controller.with_settings(flag.clone()),
    };

    rig.hover("x", 0);
    assert_eq!(rig.controller.phase(), Phase::Idle);

    flag.set(true);
    rig.hover("x", 1_000);
    assert_eq!(rig.controller.phase(), Phase::Playing);
}

#[test]
fn teardown_resets_everything() {
    let mut rig = Rig::new();
    rig.hover("x", 0);
    rig.controller.teardown();

    assert_eq!(rig.controller.phase(), Phase::Idle);
    assert_eq!(rig.controller.target(), None);
    assert!(rig.controller.cache().is_empty());
    assert_eq!(rig.controller.next_deadline(), None);
    assert_eq!(
        rig.controller.surface().events().last(),
        Some(&SurfaceEvent::Hide)
    );

    // Still usable afterwards
    rig.hover("x", 5_000);
    assert_eq!(rig.provider.loads("x"), 2);
}
