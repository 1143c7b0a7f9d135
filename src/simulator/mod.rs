//! # Simulator Module
//!
//! Abstraction over the flight simulator's telemetry API.
//!
//! The real acquisition backend is a third-party library; this crate only
//! needs two capabilities from it: finding a named variable and reading its
//! current value. Those are captured by [`SimConnection`]. Two in-tree
//! backends implement it:
//!
//! - [`SyntheticSimulator`]: deterministic cruise flight for demos
//! - [`ScriptedSimulator`]: frames replayed from a JSON scenario file

pub mod scripted;
pub mod synthetic;

use serde::Deserialize;
use std::fmt;
use std::path::Path;
use tracing::info;

use crate::error::{G1kError, Result};

pub use scripted::ScriptedSimulator;
pub use synthetic::SyntheticSimulator;

/// Handle to a simulator variable returned by [`SimConnection::find`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SimVarId(pub usize);

/// Raw value reported by the simulator
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum SimValue {
    Bool(bool),
    Number(f64),
    Text(String),
}

impl SimValue {
    /// Read the value as a number. Booleans read as 0/1.
    pub fn as_f64(&self) -> Result<f64> {
        match self {
            SimValue::Number(n) => Ok(*n),
            SimValue::Bool(b) => Ok(if *b { 1.0 } else { 0.0 }),
            SimValue::Text(_) => Err(self.malformed("number")),
        }
    }

    /// Read the value as a flag. Numbers are true when non-zero.
    pub fn as_bool(&self) -> Result<bool> {
        match self {
            SimValue::Bool(b) => Ok(*b),
            SimValue::Number(n) => Ok(*n != 0.0),
            SimValue::Text(_) => Err(self.malformed("bool")),
        }
    }

    /// Read the value as text
    pub fn as_text(&self) -> Result<&str> {
        match self {
            SimValue::Text(s) => Ok(s),
            _ => Err(self.malformed("text")),
        }
    }

    fn malformed(&self, expected: &'static str) -> G1kError {
        G1kError::MalformedValue {
            expected,
            found: self.to_string(),
        }
    }
}

impl fmt::Display for SimValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimValue::Bool(b) => write!(f, "bool {}", b),
            SimValue::Number(n) => write!(f, "number {}", n),
            SimValue::Text(s) => write!(f, "text {:?}", s),
        }
    }
}

/// Connection to a running simulator
#[cfg_attr(test, mockall::automock)]
pub trait SimConnection {
    /// Short label for logs
    fn name(&self) -> &'static str;

    /// Look up a variable by its simulator name (e.g. `AIRSPEED_INDICATED`,
    /// or `GENERAL_ENG_RPM:1` for indexed variables)
    fn find(&mut self, name: &str) -> Option<SimVarId>;

    /// Read the current value of a previously found variable
    fn read(&mut self, var: SimVarId) -> Result<SimValue>;

    /// Called once at the start of every polling round
    fn refresh(&mut self) -> Result<()> {
        Ok(())
    }
}

impl<T: SimConnection + ?Sized> SimConnection for Box<T> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn find(&mut self, name: &str) -> Option<SimVarId> {
        (**self).find(name)
    }

    fn read(&mut self, var: SimVarId) -> Result<SimValue> {
        (**self).read(var)
    }

    fn refresh(&mut self) -> Result<()> {
        (**self).refresh()
    }
}

/// Available simulator backends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// Built-in deterministic cruise flight
    Synthetic,
    /// Frames replayed from a JSON scenario file
    Scripted,
}

/// Open the configured backend
///
/// # Errors
///
/// Returns error if the scripted backend has no scenario or the scenario
/// cannot be loaded.
pub fn open_backend(backend: Backend, scenario: Option<&Path>) -> Result<Box<dyn SimConnection>> {
    let conn: Box<dyn SimConnection> = match backend {
        Backend::Synthetic => Box::new(SyntheticSimulator::new()),
        Backend::Scripted => {
            let path = scenario.ok_or_else(|| {
                G1kError::Simulator("scripted backend requires a scenario file".to_string())
            })?;
            Box::new(ScriptedSimulator::from_path(path)?)
        }
    };
    info!("Connected to {} simulator backend", conn.name());
    Ok(conn)
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_coercions() {
        assert_eq!(SimValue::Number(2.5).as_f64().unwrap(), 2.5);
        assert_eq!(SimValue::Bool(true).as_f64().unwrap(), 1.0);
        assert!(SimValue::Number(0.0).as_bool().is_ok_and(|b| !b));
        assert!(SimValue::Number(-1.0).as_bool().unwrap());
    }

    #[test]
    fn test_text_is_not_a_number() {
        let err = SimValue::Text("KDEN".to_string()).as_f64().unwrap_err();
        match err {
            G1kError::MalformedValue { expected, found } => {
                assert_eq!(expected, "number");
                assert!(found.contains("KDEN"));
            }
            other => panic!("Expected MalformedValue, got: {:?}", other),
        }
    }

    #[test]
    fn test_number_is_not_text() {
        assert!(SimValue::Number(1.0).as_text().is_err());
        assert_eq!(SimValue::Text("GPS".to_string()).as_text().unwrap(), "GPS");
    }

    #[test]
    fn test_untagged_deserialize() {
        let v: Vec<SimValue> = serde_json::from_str(r#"[true, 3, 1.5, "KBJC"]"#).unwrap();
        assert_eq!(
            v,
            vec![
                SimValue::Bool(true),
                SimValue::Number(3.0),
                SimValue::Number(1.5),
                SimValue::Text("KBJC".to_string()),
            ]
        );
    }

    #[test]
    fn test_scripted_backend_requires_scenario() {
        let result = open_backend(Backend::Scripted, None);
        assert!(matches!(result, Err(G1kError::Simulator(_))));
    }

    #[test]
    fn test_open_synthetic_backend() {
        let conn = open_backend(Backend::Synthetic, None).unwrap();
        assert_eq!(conn.name(), "synthetic");
    }

    #[test]
    fn test_boxed_connection_delegates() {
        let fake = mocks::FakeSimulator::new().with("AIRSPEED_INDICATED", SimValue::Number(120.0));
        let mut boxed: Box<dyn SimConnection> = Box::new(fake);
        let id = boxed.find("AIRSPEED_INDICATED").unwrap();
        assert_eq!(boxed.read(id).unwrap(), SimValue::Number(120.0));
        assert!(boxed.find("NOPE").is_none());
    }
}
