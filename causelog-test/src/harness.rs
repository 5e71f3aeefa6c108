use anyhow::{Context, Result};
use causelog::{run_conversion, ConvertOptions, Summary};
use causelog_core::{Config, Trace};
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Scratch directory holding one trace file and its converted log.
pub struct TestApp {
    dir: PathBuf,
    config: Config,
}

/// Result of running the converter through [`TestApp::convert`].
pub struct TestRun {
    pub summary: Summary,
    pub log: String,
    pub listing: String,
}

impl TestApp {
    pub fn new(config: Config) -> Result<Self> {
        let dir = std::env::temp_dir().join(format!("causelog-test-{}", Uuid::new_v4()));
        std::fs::create_dir_all(&dir).context("failed to create scratch directory")?;
        Ok(Self { dir, config })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn trace_path(&self) -> PathBuf {
        self.dir.join("trace.json")
    }

    pub fn output_path(&self) -> PathBuf {
        self.dir.join("shiviz.log")
    }

    /// Write `traces` as the JSON array the converter reads.
    pub fn write_traces(&self, traces: &[Trace]) -> Result<()> {
        let body = serde_json::to_vec_pretty(traces)?;
        std::fs::write(self.trace_path(), body).context("failed to write trace file")
    }

    pub fn write_raw(&self, contents: &str) -> Result<()> {
        std::fs::write(self.trace_path(), contents).context("failed to write trace file")
    }

    pub fn options(&self, list_events: bool) -> ConvertOptions {
        ConvertOptions {
            trace_path: self.trace_path(),
            output_path: self.output_path(),
            list_events,
        }
    }

    pub fn convert(&self) -> Result<TestRun> {
        self.convert_with(&self.options(false))
    }

    pub fn convert_with(&self, options: &ConvertOptions) -> Result<TestRun> {
        let mut listing = Vec::new();
        let summary = run_conversion(&self.config, options, &mut listing)?;
        let log = std::fs::read_to_string(&options.output_path)
            .context("converted log was not written")?;

        Ok(TestRun {
            summary,
            log,
            listing: String::from_utf8(listing)?,
        })
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.dir);
    }
}
