//! Synthetic simulator backend.
//!
//! Produces a steady autopilot cruise westbound at 8000 ft with gentle
//! oscillations so successive log rows differ. Values are a pure function of
//! the polling round, which keeps runs reproducible.

use super::{SimConnection, SimValue, SimVarId};
use crate::error::{G1kError, Result};

/// Every variable the synthetic backend can serve
const VARIABLES: &[&str] = &[
    "LOCAL_YEAR",
    "LOCAL_MONTH_OF_YEAR",
    "LOCAL_DAY_OF_MONTH",
    "LOCAL_TIME",
    "TIME_ZONE_OFFSET",
    "GPS_WP_NEXT_ID",
    "GPS_POSITION_LAT",
    "GPS_POSITION_LON",
    "GPS_POSITION_ALT",
    "INDICATED_ALTITUDE",
    "KOHLSMAN_SETTING_HG",
    "PLANE_ALTITUDE",
    "AMBIENT_TEMPERATURE",
    "AIRSPEED_INDICATED",
    "AIRSPEED_TRUE",
    "GROUND_VELOCITY",
    "VERTICAL_SPEED",
    "PLANE_PITCH_DEGREES",
    "PLANE_BANK_DEGREES",
    "ACCELERATION_BODY_X",
    "ACCELERATION_BODY_Y",
    "PLANE_HEADING_DEGREES_MAGNETIC",
    "GPS_GROUND_MAGNETIC_TRACK",
    "ELECTRICAL_BATTERY_BUS_VOLTAGE",
    "FUEL_LEFT_QUANTITY",
    "FUEL_RIGHT_QUANTITY",
    "ENG_FUEL_FLOW_GPH:1",
    "ENG_FUEL_FLOW_GPH:2",
    "ENG_OIL_TEMPERATURE:1",
    "ENG_OIL_TEMPERATURE:2",
    "ENG_OIL_PRESSURE:1",
    "ENG_OIL_PRESSURE:2",
    "RECIP_ENG_MANIFOLD_PRESSURE:1",
    "RECIP_ENG_MANIFOLD_PRESSURE:2",
    "GENERAL_ENG_RPM:1",
    "GENERAL_ENG_RPM:2",
    "RECIP_ENG_CYLINDER_HEAD_TEMPERATURE:1",
    "RECIP_ENG_CYLINDER_HEAD_TEMPERATURE:2",
    "GENERAL_ENG_EXHAUST_GAS_TEMPERATURE:1",
    "GENERAL_ENG_EXHAUST_GAS_TEMPERATURE:2",
    "AUTOPILOT_NAV_SELECTED",
    "GPS_DRIVES_NAV1",
    "GPS_WP_DESIRED_TRACK",
    "NAV_OBS:1",
    "NAV_OBS:2",
    "NAV_ACTIVE_FREQUENCY:1",
    "NAV_ACTIVE_FREQUENCY:2",
    "COM_ACTIVE_FREQUENCY:1",
    "COM_ACTIVE_FREQUENCY:2",
    "HSI_CDI_NEEDLE",
    "HSI_GSI_NEEDLE",
    "AMBIENT_WIND_VELOCITY",
    "AMBIENT_WIND_DIRECTION",
    "GPS_WP_DISTANCE",
    "GPS_WP_BEARING",
    "GPS_MAGVAR",
    "AUTOPILOT_MASTER",
    "AUTOPILOT_FLIGHT_DIRECTOR_ACTIVE",
    "AUTOPILOT_APPROACH_HOLD",
    "AUTOPILOT_NAV1_LOCK",
    "AUTOPILOT_HEADING_LOCK",
    "AUTOPILOT_WING_LEVELER",
    "AUTOPILOT_GLIDESLOPE_HOLD",
    "AUTOPILOT_FLIGHT_LEVEL_CHANGE",
    "AUTOPILOT_VERTICAL_HOLD",
    "AUTOPILOT_ALTITUDE_LOCK",
    "AUTOPILOT_FLIGHT_DIRECTOR_BANK",
    "AUTOPILOT_FLIGHT_DIRECTOR_PITCH",
];

/// Local time of the first sample, seconds since midnight (14:30:00)
const START_TIME_S: f64 = 52_200.0;

/// Course flown, degrees magnetic
const COURSE_DEG: f64 = 270.0;

/// Deterministic demo simulator
#[derive(Debug, Default)]
pub struct SyntheticSimulator {
    tick: u64,
}

impl SyntheticSimulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Polling rounds served so far
    pub fn tick(&self) -> u64 {
        self.tick
    }

    fn value(&self, name: &str) -> Option<SimValue> {
        use crate::simulator::SimValue::{Bool, Number, Text};

        let t = self.tick as f64;
        let wobble = (t / 8.0).sin();
        let heading_rad = (COURSE_DEG + 2.0 * wobble).to_radians();

        let value = match name {
            "LOCAL_YEAR" => Number(2024.0),
            "LOCAL_MONTH_OF_YEAR" => Number(6.0),
            "LOCAL_DAY_OF_MONTH" => Number(15.0),
            "LOCAL_TIME" => Number(START_TIME_S + t),
            // Mountain daylight time, positive west of UTC
            "TIME_ZONE_OFFSET" => Number(21_600.0),
            "GPS_WP_NEXT_ID" => Text("KBJC".to_string()),
            "GPS_POSITION_LAT" => Number(39.9088),
            "GPS_POSITION_LON" => Number(-104.5 - t * 0.000_8),
            "GPS_POSITION_ALT" => Number(2_441.0 + 3.0 * wobble),
            "INDICATED_ALTITUDE" => Number(8_000.0 + 20.0 * wobble),
            "KOHLSMAN_SETTING_HG" => Number(30.01),
            "PLANE_ALTITUDE" => Number(8_010.0 + 20.0 * wobble),
            "AMBIENT_TEMPERATURE" => Number(-1.0),
            "AIRSPEED_INDICATED" => Number(142.0 + wobble),
            "AIRSPEED_TRUE" => Number(163.0 + wobble),
            "GROUND_VELOCITY" => Number(151.0 + wobble),
            "VERTICAL_SPEED" => Number(0.5 * (t / 8.0).cos()),
            // Radians, nose-up and left bank negative
            "PLANE_PITCH_DEGREES" => Number(-0.035),
            "PLANE_BANK_DEGREES" => Number(0.02 * wobble),
            "ACCELERATION_BODY_X" => Number(0.1 * wobble),
            "ACCELERATION_BODY_Y" => Number(0.4 * wobble),
            "PLANE_HEADING_DEGREES_MAGNETIC" => Number(heading_rad),
            "GPS_GROUND_MAGNETIC_TRACK" => Number(heading_rad + 0.03),
            "ELECTRICAL_BATTERY_BUS_VOLTAGE" => Number(28.1),
            "FUEL_LEFT_QUANTITY" => Number(36.0 - t * 0.002),
            "FUEL_RIGHT_QUANTITY" => Number(36.0 - t * 0.002),
            "ENG_FUEL_FLOW_GPH:1" | "ENG_FUEL_FLOW_GPH:2" => Number(14.6),
            // Rankine
            "ENG_OIL_TEMPERATURE:1" | "ENG_OIL_TEMPERATURE:2" => Number(652.0),
            // Pounds per square foot
            "ENG_OIL_PRESSURE:1" | "ENG_OIL_PRESSURE:2" => Number(8_640.0),
            "RECIP_ENG_MANIFOLD_PRESSURE:1" | "RECIP_ENG_MANIFOLD_PRESSURE:2" => Number(22.4),
            "GENERAL_ENG_RPM:1" | "GENERAL_ENG_RPM:2" => Number(2_400.0),
            // Celsius
            "RECIP_ENG_CYLINDER_HEAD_TEMPERATURE:1" | "RECIP_ENG_CYLINDER_HEAD_TEMPERATURE:2" => {
                Number(182.0)
            }
            // Rankine
            "GENERAL_ENG_EXHAUST_GAS_TEMPERATURE:1" | "GENERAL_ENG_EXHAUST_GAS_TEMPERATURE:2" => {
                Number(1_860.0)
            }
            "AUTOPILOT_NAV_SELECTED" => Number(1.0),
            "GPS_DRIVES_NAV1" => Bool(true),
            "GPS_WP_DESIRED_TRACK" => Number(COURSE_DEG.to_radians()),
            "NAV_OBS:1" => Number(COURSE_DEG),
            "NAV_OBS:2" => Number(90.0),
            "NAV_ACTIVE_FREQUENCY:1" => Number(113.9),
            "NAV_ACTIVE_FREQUENCY:2" => Number(117.0),
            "COM_ACTIVE_FREQUENCY:1" => Number(118.5),
            "COM_ACTIVE_FREQUENCY:2" => Number(121.5),
            "HSI_CDI_NEEDLE" => Number(12.0 * wobble),
            "HSI_GSI_NEEDLE" => Number(0.0),
            "AMBIENT_WIND_VELOCITY" => Number(14.0),
            "AMBIENT_WIND_DIRECTION" => Number(250.0),
            "GPS_WP_DISTANCE" => Number((60_000.0 - t * 77.0).max(0.0)),
            "GPS_WP_BEARING" => Number(heading_rad),
            "GPS_MAGVAR" => Number(8.0_f64.to_radians()),
            "AUTOPILOT_MASTER" | "AUTOPILOT_FLIGHT_DIRECTOR_ACTIVE" => Bool(true),
            "AUTOPILOT_NAV1_LOCK" | "AUTOPILOT_ALTITUDE_LOCK" => Bool(true),
            "AUTOPILOT_APPROACH_HOLD"
            | "AUTOPILOT_HEADING_LOCK"
            | "AUTOPILOT_WING_LEVELER"
            | "AUTOPILOT_GLIDESLOPE_HOLD"
            | "AUTOPILOT_FLIGHT_LEVEL_CHANGE"
            | "AUTOPILOT_VERTICAL_HOLD" => Bool(false),
            "AUTOPILOT_FLIGHT_DIRECTOR_BANK" => Number(0.02 * wobble),
            "AUTOPILOT_FLIGHT_DIRECTOR_PITCH" => Number(0.035),
            _ => return None,
        };
        Some(value)
    }
}

impl SimConnection for SyntheticSimulator {
    fn name(&self) -> &'static str {
        "synthetic"
    }

    fn find(&mut self, name: &str) -> Option<SimVarId> {
        VARIABLES.iter().position(|v| *v == name).map(SimVarId)
    }

    fn read(&mut self, var: SimVarId) -> Result<SimValue> {
        let name = VARIABLES
            .get(var.0)
            .ok_or_else(|| G1kError::VariableNotFound(format!("#{}", var.0)))?;
        self.value(name)
            .ok_or_else(|| G1kError::MissingValue(name.to_string()))
    }

    fn refresh(&mut self) -> Result<()> {
        self.tick += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_variable_has_a_value() {
        let mut sim = SyntheticSimulator::new();
        for name in VARIABLES {
            let id = sim.find(name).unwrap();
            assert!(sim.read(id).is_ok(), "{} has no value", name);
        }
    }

    #[test]
    fn test_unknown_variable() {
        let mut sim = SyntheticSimulator::new();
        assert!(sim.find("TURB_ENG_N1:1").is_none());
        assert!(sim.read(SimVarId(VARIABLES.len())).is_err());
    }

    #[test]
    fn test_time_advances_per_round() {
        let mut sim = SyntheticSimulator::new();
        let id = sim.find("LOCAL_TIME").unwrap();
        sim.refresh().unwrap();
        let first = sim.read(id).unwrap().as_f64().unwrap();
        sim.refresh().unwrap();
        let second = sim.read(id).unwrap().as_f64().unwrap();
        assert_eq!(second - first, 1.0);
        assert_eq!(sim.tick(), 2);
    }

    #[test]
    fn test_deterministic() {
        let mut a = SyntheticSimulator::new();
        let mut b = SyntheticSimulator::new();
        for _ in 0..5 {
            a.refresh().unwrap();
            b.refresh().unwrap();
        }
        let id = a.find("AIRSPEED_INDICATED").unwrap();
        assert_eq!(a.read(id).unwrap(), b.read(id).unwrap());
    }
}
