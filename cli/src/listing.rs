use std::io::{self, Write};

use causelog_core::{Event, Trace};
use chrono::{DateTime, SecondsFormat, Utc};

/// Print one line per event: process, thread, agent, time, id and parents.
pub fn print_events<W: Write>(trace: &Trace, out: &mut W) -> io::Result<()> {
    writeln!(out, "Trace {} ({} events)", trace.id, trace.events.len())?;
    writeln!(out, "Process, ThreadID, Agent, Timestamp, Event, Parents")?;
    for event in &trace.events {
        writeln!(out, "{}", format_event(event))?;
    }
    Ok(())
}

fn format_event(event: &Event) -> String {
    format!(
        "{}, {}, {}, {}, {}, [{}]",
        event.process_name,
        event.thread_id,
        event.agent.as_deref().unwrap_or("-"),
        format_timestamp(event.timestamp),
        event.event_id,
        event.parents.join(" ")
    )
}

/// Report timestamps are milliseconds since the Unix epoch.
fn format_timestamp(timestamp: Option<u64>) -> String {
    timestamp
        .and_then(|ms| i64::try_from(ms).ok())
        .and_then(DateTime::<Utc>::from_timestamp_millis)
        .map(|at| at.to_rfc3339_opts(SecondsFormat::Millis, true))
        .unwrap_or_else(|| "-".to_string())
}
