//! # G1K Logger Library
//!
//! Log flight simulator telemetry in the Garmin G1000 flight data format.
//!
//! This library provides the simulator connection seam, the property reader
//! with its unit conversions, the G1000 log format and the polling loop that
//! ties them together.

pub mod cli;
pub mod config;
pub mod conversions;
pub mod dumper;
pub mod error;
pub mod format;
pub mod logging;
pub mod property;
pub mod reader;
pub mod sample;
pub mod simulator;
pub mod telemetry;
