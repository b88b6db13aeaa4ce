//! Unit tests for hover trace parsing

use std::io::Write;
use std::time::Duration;

use hover_preview::preview::ItemId;
use hover_preview::trace::{Action, HoverTrace, TraceEvent};
use tempfile::NamedTempFile;

#[test]
fn parse_file_from_disk() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "[0,\"resize\",800,600]").unwrap();
    writeln!(file, "[40,\"enter\",\"abc\"]").unwrap();
    writeln!(file).unwrap();
    writeln!(file, "[900,\"leave\",\"abc\"]").unwrap();

    let trace = HoverTrace::parse(file.path()).unwrap();
    assert_eq!(trace.len(), 3);
    assert_eq!(trace.duration(), Duration::from_millis(900));
    assert_eq!(trace.items(), vec![ItemId::from("abc")]);
}

#[test]
fn missing_file_names_the_path() {
    let err = HoverTrace::parse("/no/such/trace.ndjson").unwrap_err();
    assert!(err.to_string().contains("/no/such/trace.ndjson"));
}

#[test]
fn equal_timestamps_are_allowed() {
    let trace = HoverTrace::parse_str("[5,\"tick\"]\n[5,\"tick\"]").unwrap();
    assert_eq!(trace.len(), 2);
}

#[test]
fn event_codes_round_trip_through_parser() {
    let event = TraceEvent::from_json(r#"[12,"move",-5,7.25]"#).unwrap();
    assert_eq!(event.at, Duration::from_millis(12));
    assert_eq!(event.action, Action::Move { x: -5.0, y: 7.25 });
    assert_eq!(event.action.code(), "move");
}

#[test]
fn non_array_lines_are_rejected() {
    let err = HoverTrace::parse_str("{\"t\":0}").unwrap_err();
    assert!(format!("{:#}", err).contains("must be a JSON array"));
}
