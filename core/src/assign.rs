use crate::event::{Event, EventId, NodeId};
use crate::vector_clock::VectorClock;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One output line pair: the timeline, its finalized clock and the label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogRecord {
    pub node: NodeId,
    pub clock: VectorClock,
    pub label: String,
}

/// Assigns vector clocks to causally sorted events.
///
/// Besides the finalized clock of every processed event, the assigner keeps a
/// per-node watermark: the highest tick ever handed out on that timeline. A
/// timeline reached through disjoint branches resumes from the watermark
/// instead of its predecessor's (possibly stale) entry, so no tick value is
/// repeated or lowered on a node.
#[derive(Debug, Default)]
pub struct ClockAssigner {
    node_of: HashMap<EventId, NodeId>,
    clocks: HashMap<EventId, VectorClock>,
    watermarks: HashMap<NodeId, u64>,
}

impl ClockAssigner {
    /// Build an assigner that knows the timeline of every event in `events`,
    /// including events the sorter may later drop.
    pub fn new(events: &[Event]) -> Self {
        let node_of = events
            .iter()
            .map(|event| (event.event_id.clone(), event.node_id()))
            .collect();

        Self {
            node_of,
            clocks: HashMap::new(),
            watermarks: HashMap::new(),
        }
    }

    /// Assign and finalize the clock of `event`. Every parent of `event` that
    /// belongs to the trace must already have been assigned.
    pub fn assign(&mut self, event: &Event) -> LogRecord {
        let node = event.node_id();

        let local_parent = self.local_parent(event, &node);
        let mut clock = local_parent
            .and_then(|parent| self.clocks.get(parent))
            .cloned()
            .unwrap_or_default();

        let tick = self.tick(&mut clock, &node);

        for parent in &event.parents {
            if Some(parent.as_str()) == local_parent {
                continue;
            }
            if let Some(parent_clock) = self.clocks.get(parent) {
                clock.merge(parent_clock);
            }
        }

        tracing::debug!(
            event_id = %event.event_id,
            node = %node,
            tick,
            "Assigned clock {}",
            clock
        );

        self.clocks.insert(event.event_id.clone(), clock.clone());

        LogRecord {
            node,
            clock,
            label: event.label.clone(),
        }
    }

    /// Highest tick handed out on `node` so far.
    pub fn watermark(&self, node: &str) -> Option<u64> {
        self.watermarks.get(node).copied()
    }

    /// Number of distinct timelines that received at least one tick.
    pub fn node_count(&self) -> usize {
        self.watermarks.len()
    }

    /// First parent on the same timeline. Further same-node parents are
    /// merged like remote parents.
    fn local_parent<'e>(&self, event: &'e Event, node: &str) -> Option<&'e str> {
        let mut local = event
            .parents
            .iter()
            .filter(|parent| self.node_of.get(parent.as_str()).map(String::as_str) == Some(node));

        let first = local.next()?;
        if local.next().is_some() {
            tracing::warn!(
                event_id = %event.event_id,
                node = %node,
                "Event has more than one parent on its own timeline; using {} as predecessor",
                first
            );
        }
        Some(first.as_str())
    }

    fn tick(&mut self, clock: &mut VectorClock, node: &str) -> u64 {
        let watermark = self.watermark(node);
        let ticks = match (clock.get(node), watermark) {
            (None, None) => clock.increment(node),
            (None, Some(mark)) => {
                clock.set(node, mark + 1);
                mark + 1
            }
            (Some(current), Some(mark)) if current < mark => {
                clock.set(node, mark);
                clock.increment(node)
            }
            (Some(_), _) => clock.increment(node),
        };

        self.watermarks.insert(node.to_string(), ticks);
        ticks
    }
}
