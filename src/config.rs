//! # Configuration Module
//!
//! Handles loading and validating configuration from TOML files.
//!
//! Every field has a default, so an empty file (or no file at all) is a
//! valid configuration:
//!
//! ```toml
//! [simulator]
//! backend = "scripted"
//! scenario = "scenarios/pattern.json"
//! interval_ms = 1000
//!
//! [output]
//! log_dir = "./logs"
//! airframe_ident = "N36GA"
//!
//! [logging]
//! level = "info"
//! ```

use serde::de::Error;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{G1kError, Result};
use crate::format::g1000::DEFAULT_AIRFRAME_NAME;
use crate::property::Property;
use crate::simulator::Backend;

/// Config file used when none is given on the command line
pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// Main configuration structure
#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub simulator: SimulatorConfig,

    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Simulator connection and polling configuration
#[derive(Debug, Deserialize, Clone)]
pub struct SimulatorConfig {
    #[serde(default = "default_backend")]
    pub backend: Backend,

    /// Scenario file for the scripted backend
    #[serde(default)]
    pub scenario: Option<PathBuf>,

    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,

    /// Stop after this many samples; run until Ctrl+C when unset
    #[serde(default)]
    pub max_samples: Option<u64>,

    /// Property names to sample; the G1000 columns when unset
    #[serde(default)]
    pub properties: Option<Vec<String>>,
}

/// Log file configuration
#[derive(Debug, Deserialize, Clone)]
pub struct OutputConfig {
    #[serde(default = "default_log_dir")]
    pub log_dir: PathBuf,

    #[serde(default = "default_g1000_enabled")]
    pub g1000_enabled: bool,

    /// Explicit G1000 log path; auto-named inside `log_dir` when unset
    #[serde(default)]
    pub g1000_path: Option<PathBuf>,

    /// Raw JSONL log path; no raw log when unset
    #[serde(default)]
    pub raw_path: Option<PathBuf>,

    #[serde(default = "default_airframe_name")]
    pub airframe_name: String,

    #[serde(default = "default_airframe_ident")]
    pub airframe_ident: String,
}

/// Diagnostic logging configuration
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    /// Filter directive, overridden by `RUST_LOG`
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Also write diagnostics to this file
    #[serde(default)]
    pub file: Option<PathBuf>,
}

// Default value functions
fn default_backend() -> Backend { Backend::Synthetic }
fn default_interval_ms() -> u64 { 1000 }

fn default_log_dir() -> PathBuf { PathBuf::from("./logs") }
fn default_g1000_enabled() -> bool { true }
fn default_airframe_name() -> String { DEFAULT_AIRFRAME_NAME.to_string() }
fn default_airframe_ident() -> String { "N36GA".to_string() }

fn default_log_level() -> String { "info".to_string() }

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            scenario: None,
            interval_ms: default_interval_ms(),
            max_samples: None,
            properties: None,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            log_dir: default_log_dir(),
            g1000_enabled: default_g1000_enabled(),
            g1000_path: None,
            raw_path: None,
            airframe_name: default_airframe_name(),
            airframe_ident: default_airframe_ident(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

fn invalid(msg: impl std::fmt::Display) -> G1kError {
    G1kError::Config(toml::de::Error::custom(msg))
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration file
    ///
    /// # Returns
    ///
    /// * `Result<Config>` - Loaded and validated configuration
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - File cannot be read
    /// - TOML parsing fails
    /// - Validation fails
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use g1k_logger::config::Config;
    ///
    /// let config = Config::load("config/default.toml")?;
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Pick the file to load: the explicit path if given, otherwise
    /// `default` when it exists. `None` means run on built-in defaults.
    ///
    /// # Examples
    ///
    /// ```
    /// use g1k_logger::config::Config;
    /// use std::path::Path;
    ///
    /// let explicit = Path::new("my.toml");
    /// assert_eq!(Config::resolve_path(Some(explicit), Path::new("x")).as_deref(), Some(explicit));
    /// assert_eq!(Config::resolve_path(None, Path::new("/nonexistent/g1k.toml")), None);
    /// ```
    pub fn resolve_path(explicit: Option<&Path>, default: &Path) -> Option<PathBuf> {
        match explicit {
            Some(path) => Some(path.to_path_buf()),
            None if default.exists() => Some(default.to_path_buf()),
            None => None,
        }
    }

    /// Configured properties to sample, `None` when the logs decide
    ///
    /// # Errors
    ///
    /// Returns `UnknownProperty` naming every unrecognised entry.
    pub fn property_list(&self) -> Result<Option<Vec<Property>>> {
        self.simulator
            .properties
            .as_ref()
            .map(|names| Property::parse_list(names))
            .transpose()
    }

    /// Validate configuration values
    ///
    /// Called after loading and again after command-line overrides.
    ///
    /// # Errors
    ///
    /// Returns error if any configuration value is out of valid range or
    /// inconsistent with another.
    pub fn validate(&self) -> Result<()> {
        // Polling interval
        if self.simulator.interval_ms == 0 || self.simulator.interval_ms > 60000 {
            return Err(invalid("interval_ms must be between 1 and 60000"));
        }

        if self.simulator.backend == Backend::Scripted && self.simulator.scenario.is_none() {
            return Err(invalid("scripted backend requires a scenario file"));
        }

        if matches!(&self.simulator.properties, Some(names) if names.is_empty()) {
            return Err(invalid("properties cannot be empty (omit it to sample what the logs need)"));
        }
        self.property_list()?;

        // Output
        if self.output.g1000_enabled
            && self.output.g1000_path.is_none()
            && self.output.log_dir.as_os_str().is_empty()
        {
            return Err(invalid("log_dir cannot be empty when the G1000 log is enabled"));
        }

        if self.output.airframe_name.trim().is_empty() {
            return Err(invalid("airframe_name cannot be empty"));
        }

        // The ident ends up in file names
        let ident = &self.output.airframe_ident;
        if ident.is_empty() || !ident.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
            return Err(invalid(format!(
                "airframe_ident must be non-empty letters, digits or '-' (got {:?})",
                ident
            )));
        }

        // Logging
        if tracing_subscriber::EnvFilter::try_new(&self.logging.level).is_err() {
            return Err(invalid(format!("invalid logging level {:?}", self.logging.level)));
        }

        Ok(())
    }
}
