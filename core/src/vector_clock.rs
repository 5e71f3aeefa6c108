use crate::event::NodeId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Per-node logical counters capturing an event's causal history.
///
/// Entries are kept in a `BTreeMap` so the serialized form lists nodes in
/// lexicographic order, which keeps output stable across runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VectorClock {
    entries: BTreeMap<NodeId, u64>,
}

impl VectorClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counter recorded for `node`, or `None` if the node never ticked in
    /// this clock's history.
    pub fn get(&self, node: &str) -> Option<u64> {
        self.entries.get(node).copied()
    }

    pub fn set(&mut self, node: &str, value: u64) {
        if let Some(existing) = self.entries.get_mut(node) {
            *existing = value;
        } else {
            self.entries.insert(node.to_string(), value);
        }
    }

    /// Advance `node` by one, starting from 1 when absent.
    pub fn increment(&mut self, node: &str) -> u64 {
        let next = self.get(node).map_or(1, |ticks| ticks + 1);
        self.set(node, next);
        next
    }

    /// Pointwise maximum with `other`. Nodes missing on one side take the
    /// other side's value.
    pub fn merge(&mut self, other: &VectorClock) {
        for (node, &ticks) in &other.entries {
            self.entries
                .entry(node.clone())
                .and_modify(|existing| *existing = (*existing).max(ticks))
                .or_insert(ticks);
        }
    }

    /// Compact JSON object form, e.g. `{"A0":2,"B0":1}`.
    pub fn serialize(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for VectorClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let encoded = serde_json::to_string(&self.entries).map_err(|_| fmt::Error)?;
        f.write_str(&encoded)
    }
}

impl FromIterator<(NodeId, u64)> for VectorClock {
    fn from_iter<I: IntoIterator<Item = (NodeId, u64)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clock(entries: &[(&str, u64)]) -> VectorClock {
        entries
            .iter()
            .map(|(node, ticks)| (node.to_string(), *ticks))
            .collect()
    }

    #[test]
    fn increment_starts_at_one() {
        let mut vc = VectorClock::new();
        assert_eq!(vc.get("A0"), None);
        assert_eq!(vc.increment("A0"), 1);
        assert_eq!(vc.increment("A0"), 2);
        assert_eq!(vc.get("A0"), Some(2));
    }

    #[test]
    fn set_overwrites_existing_entry() {
        let mut vc = clock(&[("A0", 4)]);
        vc.set("A0", 9);
        vc.set("B0", 1);
        assert_eq!(vc.get("A0"), Some(9));
        assert_eq!(vc.get("B0"), Some(1));
        assert_eq!(vc, clock(&[("A0", 9), ("B0", 1)]));
    }

    #[test]
    fn merge_takes_pointwise_maximum() {
        let mut a = clock(&[("A0", 3), ("B0", 1)]);
        let b = clock(&[("B0", 5), ("C0", 2)]);
        let before = a.clone();

        a.merge(&b);

        for node in ["A0", "B0", "C0"] {
            let floor = before
                .get(node)
                .unwrap_or(0)
                .max(b.get(node).unwrap_or(0));
            assert!(a.get(node).unwrap_or(0) >= floor, "{node} regressed");
        }
        assert_eq!(a, clock(&[("A0", 3), ("B0", 5), ("C0", 2)]));
    }

    #[test]
    fn merge_with_empty_is_identity() {
        let mut a = clock(&[("A0", 3)]);
        a.merge(&VectorClock::new());
        assert_eq!(a, clock(&[("A0", 3)]));

        let mut empty = VectorClock::new();
        empty.merge(&a);
        assert_eq!(empty, a);
    }

    #[test]
    fn serialization_sorts_nodes() {
        let mut vc = VectorClock::new();
        vc.set("B0", 1);
        vc.set("A0", 2);
        assert_eq!(vc.serialize(), r#"{"A0":2,"B0":1}"#);
        assert_eq!(vc.serialize(), vc.serialize());
    }

    #[test]
    fn serialization_escapes_node_names() {
        let vc = clock(&[("we\"ird", 1)]);
        assert_eq!(vc.serialize(), r#"{"we\"ird":1}"#);
        assert_eq!(VectorClock::new().serialize(), "{}");
    }
}
