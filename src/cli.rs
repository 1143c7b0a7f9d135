//! Command-line interface.

use clap::{Args, Parser, Subcommand};
use std::fmt::Write as _;
use std::path::PathBuf;

use crate::config::Config;
use crate::format::G1000;
use crate::simulator::Backend;

#[derive(Parser, Debug)]
#[command(name = "g1k-logger", version)]
#[command(about = "Log simulator telemetry in the Garmin G1000 flight data format", long_about = None)]
pub struct Cli {
    /// Configuration file (defaults to config/default.toml when present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Sample the simulator and write flight logs (default)
    Record(RecordArgs),

    /// Re-render a raw JSONL log as a G1000 CSV
    Render {
        /// Raw log to read
        #[arg(long)]
        raw: PathBuf,

        /// G1000 log to write
        #[arg(long)]
        g1000: PathBuf,
    },

    /// Print the G1000 column table
    Columns,
}

impl Cli {
    /// The subcommand to run, `record` with no overrides when none was given
    pub fn into_command(self) -> Command {
        self.command
            .unwrap_or_else(|| Command::Record(RecordArgs::default()))
    }
}

/// Overrides for the `[simulator]` and `[output]` config sections
#[derive(Args, Debug, Default, Clone)]
pub struct RecordArgs {
    /// Write the G1000 log here instead of an auto-named file
    #[arg(long, conflicts_with = "no_g1000")]
    pub g1000: Option<PathBuf>,

    /// Don't write a G1000 log
    #[arg(long)]
    pub no_g1000: bool,

    /// Also write every sample to this raw JSONL log
    #[arg(long)]
    pub raw: Option<PathBuf>,

    /// Simulator backend
    #[arg(long, value_enum)]
    pub backend: Option<Backend>,

    /// Scenario file for the scripted backend (implies --backend scripted)
    #[arg(long)]
    pub scenario: Option<PathBuf>,

    /// Polling interval in milliseconds
    #[arg(long)]
    pub interval_ms: Option<u64>,

    /// Stop after this many samples
    #[arg(long)]
    pub samples: Option<u64>,
}

impl RecordArgs {
    /// Apply the overrides on top of a loaded configuration
    pub fn apply(&self, config: &mut Config) {
        if let Some(path) = &self.scenario {
            config.simulator.scenario = Some(path.clone());
            config.simulator.backend = Backend::Scripted;
        }
        if let Some(backend) = self.backend {
            config.simulator.backend = backend;
        }
        if let Some(interval_ms) = self.interval_ms {
            config.simulator.interval_ms = interval_ms;
        }
        if self.samples.is_some() {
            config.simulator.max_samples = self.samples;
        }

        if let Some(path) = &self.g1000 {
            config.output.g1000_path = Some(path.clone());
            config.output.g1000_enabled = true;
        }
        if self.no_g1000 {
            config.output.g1000_enabled = false;
        }
        if let Some(path) = &self.raw {
            config.output.raw_path = Some(path.clone());
        }
    }
}

/// The G1000 column table as printed by `columns`
pub fn column_table(format: &G1000) -> String {
    let mut out = format!("{:<10} {:<16} {:<12} {:>5}\n", "COLUMN", "PROPERTY", "UNIT", "WIDTH");
    for column in format.columns() {
        let _ = writeln!(
            out,
            "{:<10} {:<16} {:<12} {:>5}",
            column.name,
            column.property.name(),
            column.unit,
            column.width
        );
    }
    out
}
