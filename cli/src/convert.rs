use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use causelog_core::{load_trace, write_log, Config, ConversionEngine};

use crate::listing;

/// Paths and switches for one conversion run.
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    pub trace_path: PathBuf,
    pub output_path: PathBuf,
    pub list_events: bool,
}

/// What a finished run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub trace_id: String,
    pub records_written: usize,
    pub dropped_events: usize,
    pub nodes: usize,
}

/// Load the trace, convert it and write the ShiViz log.
///
/// When `options.list_events` is set, the decoded events are printed to
/// `listing_out` before conversion.
pub fn run_conversion<W: Write>(
    config: &Config,
    options: &ConvertOptions,
    listing_out: &mut W,
) -> Result<Summary> {
    let trace = load_trace(&options.trace_path)
        .with_context(|| format!("Failed to load trace from {:?}", options.trace_path))?;

    if options.list_events {
        listing::print_events(&trace, listing_out).context("Failed to print event listing")?;
    }

    let engine = ConversionEngine::new(config.conversion.clone());
    let conversion = engine
        .convert(&trace)
        .with_context(|| format!("Failed to convert trace {}", trace.id))?;

    let records_written = write_log(&options.output_path, &conversion.records)
        .with_context(|| format!("Failed to write log to {:?}", options.output_path))?;

    let summary = Summary {
        trace_id: conversion.trace_id,
        records_written,
        dropped_events: conversion.stats.dropped_events.len(),
        nodes: conversion.stats.nodes,
    };

    tracing::info!(
        "Wrote {} records across {} nodes to {:?} ({} events dropped)",
        summary.records_written,
        summary.nodes,
        options.output_path,
        summary.dropped_events
    );

    Ok(summary)
}
