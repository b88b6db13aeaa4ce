//! Storyboard helpers.
//!
//! Work out where the preview frames of an item sit on its timeline: parse
//! the item's ISO 8601 duration, spread `frame_count` timestamps evenly
//! across it, and format them for display next to the preview.

use std::time::Duration;

/// Components allowed after `PT`, in the order they must appear.
const UNITS: [(char, u64); 3] = [('H', 3600), ('M', 60), ('S', 1)];

/// Parses an ISO 8601 time duration of the form `PT#H#M#S`.
///
/// Each component is optional but they must appear in `H`, `M`, `S` order
/// and at least one must be present. Anything else (dates, fractions,
/// stray characters) yields `None`.
pub fn parse_iso8601_duration(input: &str) -> Option<Duration> {
    let mut rest = input.trim().strip_prefix("PT")?;
    if rest.is_empty() {
        return None;
    }

    let mut total: u64 = 0;
    let mut next_unit = 0;
    while !rest.is_empty() {
        let digits = rest.find(|c: char| !c.is_ascii_digit())?;
        if digits == 0 {
            return None;
        }
        let value: u64 = rest[..digits].parse().ok()?;
        let unit = rest[digits..].chars().next()?;

        let offset = UNITS[next_unit..].iter().position(|(u, _)| *u == unit)?;
        let (_, scale) = UNITS[next_unit + offset];
        total = total.checked_add(value.checked_mul(scale)?)?;

        next_unit += offset + 1;
        rest = &rest[digits + unit.len_utf8()..];
    }

    Some(Duration::from_secs(total))
}

/// Whole-second timestamps for `frame_count` evenly spaced frames.
///
/// Frame `i` sits at `floor(i * duration / frame_count)`.
pub fn storyboard_timestamps(duration: Duration, frame_count: usize) -> Vec<u64> {
    if frame_count == 0 {
        return Vec::new();
    }
    let secs = duration.as_secs_f64();
    (0..frame_count)
        .map(|i| (i as f64 * secs / frame_count as f64).floor() as u64)
        .collect()
}

/// Formats seconds as `m:ss`. Minutes are not wrapped into hours.
pub fn format_timestamp(secs: u64) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}

/// Position of `timestamp` within `duration` as a percentage.
pub fn progress_percent(timestamp: u64, duration: Duration) -> f64 {
    let total = duration.as_secs_f64();
    if total == 0.0 {
        return 0.0;
    }
    timestamp as f64 / total * 100.0
}
