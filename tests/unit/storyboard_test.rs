//! Unit tests for storyboard helpers

use std::time::Duration;

use hover_preview::storyboard::{
    format_timestamp, parse_iso8601_duration, progress_percent, storyboard_timestamps,
};

#[test]
fn storyboard_for_a_typical_video() {
    let duration = parse_iso8601_duration("PT4M13S").unwrap();
    assert_eq!(duration, Duration::from_secs(253));

    let stamps = storyboard_timestamps(duration, 6);
    assert_eq!(stamps, vec![0, 42, 84, 126, 168, 210]);

    let labels: Vec<String> = stamps.iter().map(|&s| format_timestamp(s)).collect();
    assert_eq!(labels, vec!["0:00", "0:42", "1:24", "2:06", "2:48", "3:30"]);
}

#[test]
fn timestamps_stay_below_duration() {
    let duration = Duration::from_secs(7);
    for count in 1..20 {
        let stamps = storyboard_timestamps(duration, count);
        assert_eq!(stamps.len(), count);
        assert_eq!(stamps[0], 0);
        assert!(stamps.windows(2).all(|w| w[0] <= w[1]));
        assert!(stamps.iter().all(|&s| s < 7));
    }
}

#[test]
fn progress_is_a_percentage_of_duration() {
    let duration = Duration::from_secs(253);
    assert_eq!(progress_percent(0, duration), 0.0);
    let p = progress_percent(126, duration);
    assert!((p - 49.8).abs() < 0.1);
}

#[test]
fn hour_long_durations() {
    assert_eq!(
        parse_iso8601_duration("PT1H"),
        Some(Duration::from_secs(3600))
    );
    assert_eq!(format_timestamp(3600), "60:00");
}
