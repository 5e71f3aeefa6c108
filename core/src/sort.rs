use crate::event::{Event, EventId};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet, VecDeque};
use std::fmt;
use std::str::FromStr;

/// How the unordered reports of a trace are linearized.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortStrategy {
    /// Single pass over the input with a deferred waiting list. Ties follow
    /// input order for the triggering event, then waiting-list order.
    #[default]
    Scan,
    /// In-degree counting with a FIFO ready queue seeded in input order.
    Kahn,
}

impl FromStr for SortStrategy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.to_lowercase().as_str() {
            "scan" => Ok(Self::Scan),
            "kahn" => Ok(Self::Kahn),
            other => anyhow::bail!("Invalid sort strategy: {}", other),
        }
    }
}

impl fmt::Display for SortStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scan => f.write_str("scan"),
            Self::Kahn => f.write_str("kahn"),
        }
    }
}

/// Result of linearizing a trace.
#[derive(Debug, Clone, Default)]
pub struct SortOutcome<'a> {
    /// Events in an order where every parent precedes its children.
    pub ordered: Vec<&'a Event>,
    /// Events whose ancestry can never be satisfied (a parent missing from
    /// the trace, directly or transitively), in input order.
    pub dropped: Vec<EventId>,
}

/// Order `events` so that every parent is emitted before its children.
///
/// Events referencing a parent that never appears are left out of
/// `ordered` and reported in `dropped` instead of failing the sort.
pub fn sort_events(events: &[Event], strategy: SortStrategy) -> SortOutcome<'_> {
    let outcome = match strategy {
        SortStrategy::Scan => scan_sort(events),
        SortStrategy::Kahn => kahn_sort(events),
    };

    tracing::debug!(
        "Sorted {} events with {} strategy ({} dropped)",
        outcome.ordered.len(),
        strategy,
        outcome.dropped.len()
    );

    outcome
}

fn all_parents_seen(event: &Event, seen: &HashSet<&str>) -> bool {
    event
        .parents
        .iter()
        .all(|parent| seen.contains(parent.as_str()))
}

/// One pass over `waiting` in order, emitting every entry whose parents are
/// all seen. Returns whether anything was promoted.
fn promote_waiting<'a>(
    waiting: &[&'a Event],
    seen: &mut HashSet<&'a str>,
    ordered: &mut Vec<&'a Event>,
) -> bool {
    let mut promoted = false;
    for &waiting_event in waiting {
        if seen.contains(waiting_event.event_id.as_str()) {
            continue;
        }
        if all_parents_seen(waiting_event, seen) {
            ordered.push(waiting_event);
            seen.insert(waiting_event.event_id.as_str());
            promoted = true;
        }
    }
    promoted
}

fn scan_sort(events: &[Event]) -> SortOutcome<'_> {
    let mut ordered = Vec::with_capacity(events.len());
    let mut seen: HashSet<&str> = HashSet::with_capacity(events.len());
    let mut waiting: Vec<&Event> = Vec::new();

    for event in events {
        if !all_parents_seen(event, &seen) {
            waiting.push(event);
            continue;
        }

        ordered.push(event);
        seen.insert(event.event_id.as_str());

        // Promoted entries stay in `waiting`; their id in `seen` marks them.
        promote_waiting(&waiting, &mut seen, &mut ordered);
    }

    // A single pass per ready input can leave entries behind whose ancestors
    // were all promoted later in the same pass. Append them after the input
    // is exhausted so earlier positions are unaffected.
    let emitted = ordered.len();
    while promote_waiting(&waiting, &mut seen, &mut ordered) {}
    if ordered.len() > emitted {
        tracing::debug!(
            "Placed {} deferred events after the input was exhausted",
            ordered.len() - emitted
        );
    }

    let dropped = waiting
        .into_iter()
        .filter(|event| !seen.contains(event.event_id.as_str()))
        .map(|event| event.event_id.clone())
        .collect();

    SortOutcome { ordered, dropped }
}

fn kahn_sort(events: &[Event]) -> SortOutcome<'_> {
    let mut pending: Vec<usize> = events.iter().map(|event| event.parents.len()).collect();
    let mut dependants: HashMap<&str, Vec<usize>> = HashMap::new();
    for (index, event) in events.iter().enumerate() {
        for parent in &event.parents {
            dependants.entry(parent.as_str()).or_default().push(index);
        }
    }

    let mut ready: VecDeque<usize> = pending
        .iter()
        .enumerate()
        .filter(|(_, &count)| count == 0)
        .map(|(index, _)| index)
        .collect();

    let mut ordered = Vec::with_capacity(events.len());
    let mut seen: HashSet<&str> = HashSet::with_capacity(events.len());

    while let Some(index) = ready.pop_front() {
        let event = &events[index];
        ordered.push(event);

        // A repeated id releases its dependants only once.
        if !seen.insert(event.event_id.as_str()) {
            continue;
        }
        if let Some(children) = dependants.get(event.event_id.as_str()) {
            for &child in children {
                pending[child] -= 1;
                if pending[child] == 0 {
                    ready.push_back(child);
                }
            }
        }
    }

    let dropped = events
        .iter()
        .zip(&pending)
        .filter(|(_, &count)| count > 0)
        .map(|(event, _)| event.event_id.clone())
        .collect();

    SortOutcome { ordered, dropped }
}
