use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use causelog::{run_conversion, ConvertOptions};
use causelog_core::Config;

#[derive(Parser)]
#[command(name = "causelog")]
#[command(about = "Convert a parent-linked event trace into a ShiViz log", long_about = None)]
struct Cli {
    /// Trace file: a JSON array holding one trace
    trace: PathBuf,

    /// Destination log file (created or overwritten)
    output: PathBuf,

    /// Path to configuration file
    #[arg(short, long, default_value = "causelog.toml")]
    config: PathBuf,

    /// Override log level from config with debug output
    #[arg(short, long)]
    verbose: bool,

    /// Print the decoded events before converting
    #[arg(long)]
    list_events: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = if cli.config.exists() {
        Config::from_file(&cli.config)?
    } else {
        Config::default()
    };

    if cli.verbose {
        config.logging.level = "debug".to_string();
    }

    config.validate()?;
    init_logging(&config);

    if cli.config.exists() {
        tracing::debug!("Loaded configuration from {:?}", cli.config);
    }

    let options = ConvertOptions {
        trace_path: cli.trace,
        output_path: cli.output,
        list_events: cli.list_events,
    };

    let mut stdout = std::io::stdout().lock();
    run_conversion(&config, &options, &mut stdout)?;

    Ok(())
}

/// `RUST_LOG` takes precedence over the configured level when set.
fn init_logging(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.logging.level.to_lowercase()));

    tracing_subscriber::fmt()
        .with_target(config.logging.include_modules)
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}
