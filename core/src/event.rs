use serde::{Deserialize, Deserializer, Serialize};

/// Identifier of a single timeline: process name followed by thread id.
pub type NodeId = String;

/// Opaque, trace-unique event identifier.
pub type EventId = String;

/// One report inside a trace. Only the fields the converter needs are
/// decoded; anything else in the record is ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    #[serde(rename = "ProcessName", default)]
    pub process_name: String,

    #[serde(rename = "ThreadID", default)]
    pub thread_id: i64,

    #[serde(rename = "Label", default)]
    pub label: String,

    #[serde(rename = "EventID", default)]
    pub event_id: EventId,

    #[serde(rename = "ParentEventID", default, deserialize_with = "null_as_empty")]
    pub parents: Vec<EventId>,

    #[serde(rename = "Timestamp", default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<u64>,

    #[serde(rename = "HRT", default, skip_serializing_if = "Option::is_none")]
    pub hrt: Option<u64>,

    #[serde(rename = "Agent", default, skip_serializing_if = "Option::is_none")]
    pub agent: Option<String>,
}

impl Event {
    pub fn new(
        event_id: impl Into<EventId>,
        process_name: impl Into<String>,
        thread_id: i64,
        label: impl Into<String>,
        parents: Vec<EventId>,
    ) -> Self {
        Self {
            process_name: process_name.into(),
            thread_id,
            label: label.into(),
            event_id: event_id.into(),
            parents,
            ..Self::default()
        }
    }

    /// Timeline this event belongs to, e.g. `"A"` on thread `0` is `"A0"`.
    pub fn node_id(&self) -> NodeId {
        format!("{}{}", self.process_name, self.thread_id)
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<EventId>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<EventId>>::deserialize(deserializer)?.unwrap_or_default())
}

/// A single recorded trace: an identifier plus its unordered reports.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trace {
    #[serde(default)]
    pub id: String,

    #[serde(rename = "reports", default)]
    pub events: Vec<Event>,
}
