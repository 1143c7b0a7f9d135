//! # G1K Logger
//!
//! Log flight simulator telemetry in the Garmin G1000 flight data format.
//!
//! Polls the simulator once per interval, converts the raw simulator variables
//! into G1000 properties and appends one fixed-width row per sample to a CSV
//! log that G1000 log viewers can read.
//!
//! # Examples
//!
//! Record until Ctrl+C against the built-in synthetic flight:
//! ```bash
//! cargo run --release -- record
//! ```
//!
//! Expected output:
//! ```text
//! INFO g1k_logger::simulator: Connected to synthetic simulator backend
//! INFO g1k_logger::telemetry: Writing ./logs/log_240615_143000_N36GA.csv
//! INFO g1k_logger::dumper: Sampling 45 properties every 1000 ms
//! INFO g1k_logger::dumper: local_date=2024-06-15 local_time=14:30:00 ...
//! ```

use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use std::fs::File;
use std::io::{BufReader, Write};
use std::path::{Path, PathBuf};
use tokio::time::Duration;
use tracing::info;

use g1k_logger::cli::{column_table, Cli, Command};
use g1k_logger::config::{Config, DEFAULT_CONFIG_PATH};
use g1k_logger::dumper::Dumper;
use g1k_logger::format::{required_properties, Status, G1000};
use g1k_logger::logging::init_logging;
use g1k_logger::reader::Reader;
use g1k_logger::simulator::open_backend;
use g1k_logger::telemetry::{self, create_log_file, g1000_log_path, G1000Log, RawLog, RawReplay};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = Config::resolve_path(cli.config.as_deref(), Path::new(DEFAULT_CONFIG_PATH));
    let mut config = match &config_path {
        Some(path) => Config::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => Config::default(),
    };

    let command = cli.into_command();
    if let Command::Record(args) = &command {
        args.apply(&mut config);
        config.validate().context("Invalid command-line options")?;
    }

    let _guard = init_logging(&config.logging).context("Failed to set up logging")?;
    info!("G1K Logger v{} starting...", env!("CARGO_PKG_VERSION"));
    match &config_path {
        Some(path) => info!("Loaded configuration from {}", path.display()),
        None => info!("No configuration at {}, using defaults", DEFAULT_CONFIG_PATH),
    }

    match command {
        Command::Record(_) => record(&config).await,
        Command::Render { raw, g1000 } => render(&config, raw, g1000),
        Command::Columns => {
            print!("{}", column_table(&G1000::new(config.output.airframe_name.clone())));
            Ok(())
        }
    }
}

/// Poll the simulator and write the configured logs until Ctrl+C or the
/// sample limit
async fn record(config: &Config) -> Result<()> {
    let conn = open_backend(config.simulator.backend, config.simulator.scenario.as_deref())
        .context("Failed to connect to simulator")?;

    let g1000 = G1000::new(config.output.airframe_name.clone());
    let properties = match config.property_list()? {
        Some(properties) => properties,
        None => required_properties(&[&g1000, &Status]),
    };

    let mut reader = Reader::new(conn);
    reader.set_property_list(properties);

    let mut dumper = Dumper::new(reader)
        .with_interval(Duration::from_millis(config.simulator.interval_ms))
        .with_max_samples(config.simulator.max_samples);

    let started = Local::now().naive_local();

    if config.output.g1000_enabled {
        let path = g1000_log_path(
            config.output.g1000_path.as_deref(),
            &config.output.log_dir,
            &started,
            &config.output.airframe_ident,
        );
        let file: Box<dyn Write> = Box::new(
            create_log_file(&path)
                .with_context(|| format!("Failed to create G1000 log {}", path.display()))?,
        );
        dumper = dumper.with_g1000(G1000Log::new(file, g1000)?);
    }

    if let Some(path) = &config.output.raw_path {
        let file: Box<dyn Write> = Box::new(
            create_log_file(path)
                .with_context(|| format!("Failed to create raw log {}", path.display()))?,
        );
        dumper = dumper.with_raw(RawLog::new(file));
    }

    dumper.run().await?;
    Ok(())
}

/// Re-render a raw log into a G1000 log
fn render(config: &Config, raw: PathBuf, g1000: PathBuf) -> Result<()> {
    let input = File::open(&raw)
        .with_context(|| format!("Failed to open raw log {}", raw.display()))?;
    let output = create_log_file(&g1000)
        .with_context(|| format!("Failed to create G1000 log {}", g1000.display()))?;

    let mut replay = RawReplay::new(BufReader::new(input));
    let mut log = G1000Log::new(output, G1000::new(config.output.airframe_name.clone()))?;

    telemetry::render(&mut replay, &mut log)?;
    Ok(())
}
