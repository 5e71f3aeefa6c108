use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failures that abort a conversion run.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("failed to open trace file {path:?}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to decode trace file {path:?}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("trace file {path:?} contains no traces")]
    EmptyInput { path: PathBuf },

    #[error("failed to create output file {path:?}: {source}")]
    Create {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write output: {0}")]
    Write(#[from] io::Error),

    #[error("{count} events have parents missing from trace {trace_id} (first: {first})")]
    UnresolvedParents {
        trace_id: String,
        count: usize,
        first: String,
    },
}

pub type Result<T> = std::result::Result<T, ConvertError>;
