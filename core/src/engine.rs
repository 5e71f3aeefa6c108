use crate::assign::{ClockAssigner, LogRecord};
use crate::config::ConversionConfig;
use crate::error::{ConvertError, Result};
use crate::event::{EventId, Trace};
use crate::sort::sort_events;
use serde::{Deserialize, Serialize};

/// Main engine that turns a parent-linked trace into clock-annotated records
pub struct ConversionEngine {
    config: ConversionConfig,
}

/// Output of a single conversion run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Conversion {
    pub trace_id: String,
    pub records: Vec<LogRecord>,
    pub stats: ConversionStats,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionStats {
    pub total_events: usize,
    pub emitted_events: usize,
    pub dropped_events: Vec<EventId>,
    pub nodes: usize,
}

impl ConversionEngine {
    pub fn new(config: ConversionConfig) -> Self {
        Self { config }
    }

    /// Sort the trace causally and assign a vector clock to every event
    /// that can be placed. All intermediate state lives for this call only.
    pub fn convert(&self, trace: &Trace) -> Result<Conversion> {
        let outcome = sort_events(&trace.events, self.config.sort_strategy);

        if !outcome.dropped.is_empty() {
            tracing::warn!(
                "Skipping {} of {} events in trace {} whose parents are missing (first: {})",
                outcome.dropped.len(),
                trace.events.len(),
                trace.id,
                outcome.dropped[0]
            );

            if self.config.fail_on_dropped {
                return Err(ConvertError::UnresolvedParents {
                    trace_id: trace.id.clone(),
                    count: outcome.dropped.len(),
                    first: outcome.dropped[0].clone(),
                });
            }
        }

        let mut assigner = ClockAssigner::new(&trace.events);
        let records: Vec<LogRecord> = outcome
            .ordered
            .iter()
            .map(|event| assigner.assign(event))
            .collect();

        let stats = ConversionStats {
            total_events: trace.events.len(),
            emitted_events: records.len(),
            dropped_events: outcome.dropped,
            nodes: assigner.node_count(),
        };

        Ok(Conversion {
            trace_id: trace.id.clone(),
            records,
            stats,
        })
    }
}

impl Default for ConversionEngine {
    fn default() -> Self {
        Self::new(ConversionConfig::default())
    }
}
