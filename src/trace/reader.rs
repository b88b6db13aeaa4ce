//! Hover trace parser.
//!
//! Each non-blank line is a JSON array `[t_ms, code, args...]`. Timestamps
//! are absolute milliseconds and may not go backwards. Errors report the
//! one-based line number.

use std::fs;
use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde_json::Value;

use super::{Action, HoverTrace, TraceEvent};

fn number(arr: &[Value], index: usize, what: &str) -> Result<f64> {
    arr.get(index)
        .and_then(Value::as_f64)
        .with_context(|| format!("{} must be a number", what))
}

fn item(arr: &[Value], index: usize) -> Result<String> {
    let id = arr
        .get(index)
        .and_then(Value::as_str)
        .context("Item id must be a string")?;
    if id.is_empty() {
        bail!("Item id must not be empty");
    }
    Ok(id.to_string())
}

impl TraceEvent {
    /// Parse an event from a JSON line.
    ///
    /// # Errors
    ///
    /// Returns an error if the line is not a JSON array, the timestamp is
    /// not a non-negative integer, the code is unknown, or the arguments do
    /// not match the code.
    pub fn from_json(line: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(line).context("Failed to parse event JSON")?;
        let arr = value.as_array().context("Event must be a JSON array")?;

        let at_ms = arr
            .first()
            .and_then(Value::as_u64)
            .context("Event time must be a non-negative integer (milliseconds)")?;
        let code = arr
            .get(1)
            .and_then(Value::as_str)
            .context("Event type must be a string")?;

        let (action, arity) = match code {
            "enter" => (Action::Enter(item(arr, 2)?.into()), 3),
            "leave" => (Action::Leave(item(arr, 2)?.into()), 3),
            "move" => (
                Action::Move {
                    x: number(arr, 2, "Pointer x")?,
                    y: number(arr, 3, "Pointer y")?,
                },
                4,
            ),
            "resize" => (
                Action::Resize {
                    width: number(arr, 2, "Viewport width")?,
                    height: number(arr, 3, "Viewport height")?,
                },
                4,
            ),
            "tick" => (Action::Tick, 2),
            other => bail!("Unknown event type: {}", other),
        };

        if arr.len() != arity {
            bail!(
                "'{}' event takes {} elements, got {}",
                code,
                arity,
                arr.len()
            );
        }

        Ok(TraceEvent::new(at_ms, action))
    }
}

impl HoverTrace {
    /// Parse a trace file.
    pub fn parse<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file =
            fs::File::open(path).with_context(|| format!("Failed to open trace: {:?}", path))?;
        Self::parse_reader(BufReader::new(file))
    }

    /// Parse a trace from any buffered reader. Blank lines are skipped.
    pub fn parse_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut events: Vec<TraceEvent> = Vec::new();

        for (line_num, line_result) in reader.lines().enumerate() {
            let line_no = line_num + 1;
            let line = line_result.with_context(|| format!("Failed to read line {}", line_no))?;
            if line.trim().is_empty() {
                continue;
            }

            let event = TraceEvent::from_json(&line)
                .with_context(|| format!("Failed to parse event on line {}", line_no))?;

            if let Some(previous) = events.last() {
                if event.at < previous.at {
                    bail!(
                        "Timestamp on line {} goes backwards ({}ms after {}ms)",
                        line_no,
                        event.at.as_millis(),
                        previous.at.as_millis()
                    );
                }
            }
            events.push(event);
        }

        Ok(HoverTrace { events })
    }

    pub fn parse_str(content: &str) -> Result<Self> {
        Self::parse_reader(BufReader::new(content.as_bytes()))
    }
}
