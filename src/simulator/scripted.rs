//! Scenario-driven simulator backend.
//!
//! A scenario is a JSON document holding a list of frames; each frame maps
//! simulator variable names to values:
//!
//! ```json
//! {
//!   "frames": [
//!     { "AIRSPEED_INDICATED": 121.5, "GPS_WP_NEXT_ID": "KBJC", "AUTOPILOT_MASTER": false },
//!     { "AIRSPEED_INDICATED": 122.0, "GPS_WP_NEXT_ID": "KBJC", "AUTOPILOT_MASTER": true }
//!   ]
//! }
//! ```
//!
//! Every [`SimConnection::refresh`] after the first advances to the next
//! frame, wrapping around at the end.

use serde::Deserialize;
use std::collections::{BTreeSet, HashMap};
use std::fs;
use std::path::Path;
use tracing::debug;

use super::{SimConnection, SimValue, SimVarId};
use crate::error::{G1kError, Result};

#[derive(Debug, Deserialize)]
struct Scenario {
    frames: Vec<HashMap<String, SimValue>>,
}

/// Simulator replaying frames from a scenario file
#[derive(Debug)]
pub struct ScriptedSimulator {
    names: Vec<String>,
    frames: Vec<HashMap<String, SimValue>>,
    current: usize,
    started: bool,
}

impl ScriptedSimulator {
    /// Load a scenario from a JSON file
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read, is not valid JSON, or has no frames
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path.as_ref())?;
        let sim = Self::from_json(&contents)?;
        debug!(
            "Loaded scenario {} ({} frames, {} variables)",
            path.as_ref().display(),
            sim.frames.len(),
            sim.names.len()
        );
        Ok(sim)
    }

    /// Parse a scenario from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        let scenario: Scenario = serde_json::from_str(json)?;
        Self::from_frames(scenario.frames)
    }

    /// Build a scenario from frames already in memory
    pub fn from_frames(frames: Vec<HashMap<String, SimValue>>) -> Result<Self> {
        if frames.is_empty() {
            return Err(G1kError::Simulator("scenario has no frames".to_string()));
        }

        let names: BTreeSet<&String> = frames.iter().flat_map(|f| f.keys()).collect();
        let names = names.into_iter().cloned().collect();

        Ok(Self {
            names,
            frames,
            current: 0,
            started: false,
        })
    }

    /// Index of the frame currently being served
    pub fn frame_index(&self) -> usize {
        self.current
    }

    /// Number of frames in the scenario
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }
}

impl SimConnection for ScriptedSimulator {
    fn name(&self) -> &'static str {
        "scripted"
    }

    fn find(&mut self, name: &str) -> Option<SimVarId> {
        self.names.iter().position(|n| n == name).map(SimVarId)
    }

    fn read(&mut self, var: SimVarId) -> Result<SimValue> {
        let name = self
            .names
            .get(var.0)
            .ok_or_else(|| G1kError::VariableNotFound(format!("#{}", var.0)))?;

        self.frames[self.current]
            .get(name)
            .cloned()
            .ok_or_else(|| G1kError::MissingValue(name.clone()))
    }

    fn refresh(&mut self) -> Result<()> {
        if self.started {
            self.current = (self.current + 1) % self.frames.len();
        } else {
            self.started = true;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SCENARIO: &str = r#"
{
  "frames": [
    { "AIRSPEED_INDICATED": 100.0, "GPS_WP_NEXT_ID": "KBJC" },
    { "AIRSPEED_INDICATED": 110.0, "AUTOPILOT_MASTER": true }
  ]
}
"#;

    #[test]
    fn test_frames_cycle_on_refresh() {
        let mut sim = ScriptedSimulator::from_json(SCENARIO).unwrap();
        let ias = sim.find("AIRSPEED_INDICATED").unwrap();

        sim.refresh().unwrap();
        assert_eq!(sim.read(ias).unwrap(), SimValue::Number(100.0));
        sim.refresh().unwrap();
        assert_eq!(sim.read(ias).unwrap(), SimValue::Number(110.0));
        sim.refresh().unwrap();
        assert_eq!(sim.frame_index(), 0);
        assert_eq!(sim.read(ias).unwrap(), SimValue::Number(100.0));
    }

    #[test]
    fn test_variable_missing_from_frame() {
        let mut sim = ScriptedSimulator::from_json(SCENARIO).unwrap();
        let wp = sim.find("GPS_WP_NEXT_ID").unwrap();
        sim.refresh().unwrap();
        assert!(sim.read(wp).is_ok());
        sim.refresh().unwrap();
        match sim.read(wp) {
            Err(G1kError::MissingValue(name)) => assert_eq!(name, "GPS_WP_NEXT_ID"),
            other => panic!("Expected MissingValue, got: {:?}", other),
        }
    }

    #[test]
    fn test_unknown_variable_not_found() {
        let mut sim = ScriptedSimulator::from_json(SCENARIO).unwrap();
        assert!(sim.find("PLANE_ALTITUDE").is_none());
        assert!(matches!(sim.read(SimVarId(99)), Err(G1kError::VariableNotFound(_))));
    }

    #[test]
    fn test_empty_scenario_rejected() {
        let result = ScriptedSimulator::from_json(r#"{"frames": []}"#);
        assert!(matches!(result, Err(G1kError::Simulator(_))));
    }

    #[test]
    fn test_invalid_json_rejected() {
        let result = ScriptedSimulator::from_json("{frames");
        assert!(matches!(result, Err(G1kError::Json(_))));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(SCENARIO.as_bytes()).unwrap();
        file.flush().unwrap();

        let sim = ScriptedSimulator::from_path(file.path()).unwrap();
        assert_eq!(sim.frame_count(), 2);
    }

    #[test]
    fn test_load_missing_file() {
        let result = ScriptedSimulator::from_path("/nonexistent/scenario.json");
        assert!(matches!(result, Err(G1kError::Io(_))));
    }

    #[test]
    fn test_bundled_scenario_loads() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/scenarios/pattern.json");
        let sim = ScriptedSimulator::from_path(path).unwrap();
        assert_eq!(sim.frame_count(), 3);
    }
}
