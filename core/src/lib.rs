pub mod assign;
pub mod config;
pub mod engine;
pub mod error;
pub mod event;
pub mod shiviz;
pub mod sort;
pub mod trace;
pub mod vector_clock;

pub use assign::{ClockAssigner, LogRecord};
pub use config::{Config, ConversionConfig, LoggingConfig};
pub use engine::{Conversion, ConversionEngine, ConversionStats};
pub use error::ConvertError;
pub use event::{Event, EventId, NodeId, Trace};
pub use shiviz::{write_log, ShivizWriter, SHIVIZ_HEADER};
pub use sort::{sort_events, SortOutcome, SortStrategy};
pub use trace::{load_trace, read_traces};
pub use vector_clock::VectorClock;
