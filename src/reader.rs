//! # Telemetry Reader
//!
//! Turns simulator variables into converted [`Property`] values.
//!
//! Each property names the simulator variables it depends on and how to
//! combine and convert them. A failed reading never aborts a sample: the
//! property is logged and recorded as `None`.
//!
//! ```
//! use g1k_logger::property::Property;
//! use g1k_logger::reader::Reader;
//! use g1k_logger::simulator::SyntheticSimulator;
//!
//! let mut reader = Reader::new(SyntheticSimulator::new());
//! reader.set_properties(&["ias", "alt_msl"])?;
//!
//! let sample = reader.sample()?;
//! assert!(sample.value(Property::Ias).is_some());
//! # Ok::<(), g1k_logger::error::G1kError>(())
//! ```

use chrono::NaiveTime;
use std::collections::HashMap;
use tracing::{debug, warn};

use crate::conversions::*;
use crate::error::{G1kError, Result};
use crate::property::Property;
use crate::sample::{PropValue, Sample};
use crate::simulator::{SimConnection, SimValue, SimVarId};

const SECONDS_PER_DAY: i64 = 86_400;

/// Reads converted properties from a simulator connection
pub struct Reader<C> {
    conn: C,
    lookups: HashMap<&'static str, SimVarId>,
    properties: Vec<Property>,
}

impl<C: SimConnection> Reader<C> {
    /// Create a reader sampling every known property
    pub fn new(conn: C) -> Self {
        Self {
            conn,
            lookups: HashMap::new(),
            properties: Property::ALL.to_vec(),
        }
    }

    /// Properties read by [`Reader::sample`], in order
    pub fn properties(&self) -> &[Property] {
        &self.properties
    }

    /// Restrict sampling to the named properties
    ///
    /// # Errors
    ///
    /// Returns `UnknownProperty` naming every unrecognised entry; the current
    /// list is left unchanged in that case.
    pub fn set_properties<S: AsRef<str>>(&mut self, names: &[S]) -> Result<()> {
        self.properties = Property::parse_list(names)?;
        Ok(())
    }

    /// Restrict sampling to an already-parsed property list
    pub fn set_property_list(&mut self, properties: Vec<Property>) {
        self.properties = properties;
    }

    pub fn connection(&self) -> &C {
        &self.conn
    }

    pub fn connection_mut(&mut self) -> &mut C {
        &mut self.conn
    }

    /// Start a polling round and read every configured property
    ///
    /// # Errors
    ///
    /// Only fails if the simulator cannot start a new round; individual
    /// property failures are recorded as `None`.
    pub fn sample(&mut self) -> Result<Sample> {
        self.conn.refresh()?;

        let properties = std::mem::take(&mut self.properties);
        let mut sample = Sample::new();
        for &property in &properties {
            let value = self.read(property);
            sample.insert(property, value);
        }
        self.properties = properties;
        Ok(sample)
    }

    /// Read a single property, logging and discarding any failure
    pub fn read(&mut self, property: Property) -> Option<PropValue> {
        match self.try_read(property) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("Skipping {}: {}", property, e);
                None
            }
        }
    }

    /// Read a single property
    ///
    /// # Errors
    ///
    /// Returns error if a needed variable is unknown to the simulator, has no
    /// value, has the wrong type, or converts to NaN or infinity.
    pub fn try_read(&mut self, property: Property) -> Result<PropValue> {
        use Property::*;

        let value = match property {
            LocalDate => {
                let year = self.number("LOCAL_YEAR")? as i64;
                let month = self.number("LOCAL_MONTH_OF_YEAR")? as i64;
                let day = self.number("LOCAL_DAY_OF_MONTH")? as i64;
                PropValue::Text(format!("{:4}-{:02}-{:02}", year, month, day))
            }
            LocalTime => PropValue::Text(clock(self.number("LOCAL_TIME")?, "%H:%M:%S")),
            UtcOffset => PropValue::Text(utc_offset(self.number("TIME_ZONE_OFFSET")?)),
            NextWp => PropValue::Text(self.text("GPS_WP_NEXT_ID")?),
            Lat => self.number("GPS_POSITION_LAT")?.into(),
            Lon => self.number("GPS_POSITION_LON")?.into(),
            AltIndicated => self.number("INDICATED_ALTITUDE")?.into(),
            Baro => self.number("KOHLSMAN_SETTING_HG")?.into(),
            AltMsl => self.number("PLANE_ALTITUDE")?.into(),
            Oat => self.number("AMBIENT_TEMPERATURE")?.into(),
            Ias => self.number("AIRSPEED_INDICATED")?.into(),
            Gs => self.number("GROUND_VELOCITY")?.into(),
            Vs => fps_to_fpm(self.number("VERTICAL_SPEED")?).into(),
            // Simulator reports nose-up and left bank as negative
            Pitch => rad_to_deg(-self.number("PLANE_PITCH_DEGREES")?).into(),
            Roll => rad_to_deg(-self.number("PLANE_BANK_DEGREES")?).into(),
            Latg => fps2_to_g(self.number("ACCELERATION_BODY_X")?).into(),
            Vertg => fps2_to_g(self.number("ACCELERATION_BODY_Y")?).into(),
            Hdg => rad_to_deg(self.number("PLANE_HEADING_DEGREES_MAGNETIC")?).into(),
            Trk => rad_to_deg(self.number("GPS_GROUND_MAGNETIC_TRACK")?).into(),
            Volts => self.number("ELECTRICAL_BATTERY_BUS_VOLTAGE")?.into(),
            FuelL => self.number("FUEL_LEFT_QUANTITY")?.into(),
            FuelR => self.number("FUEL_RIGHT_QUANTITY")?.into(),
            Eng1Gph => self.number("ENG_FUEL_FLOW_GPH:1")?.into(),
            Eng2Gph => self.number("ENG_FUEL_FLOW_GPH:2")?.into(),
            Eng1OilTemp => rankine_to_f(self.number("ENG_OIL_TEMPERATURE:1")?).into(),
            Eng2OilTemp => rankine_to_f(self.number("ENG_OIL_TEMPERATURE:2")?).into(),
            Eng1OilPress => psf_to_psi(self.number("ENG_OIL_PRESSURE:1")?).into(),
            Eng2OilPress => psf_to_psi(self.number("ENG_OIL_PRESSURE:2")?).into(),
            Eng1Map => self.number("RECIP_ENG_MANIFOLD_PRESSURE:1")?.into(),
            Eng2Map => self.number("RECIP_ENG_MANIFOLD_PRESSURE:2")?.into(),
            Eng1Rpm => self.number("GENERAL_ENG_RPM:1")?.into(),
            Eng2Rpm => self.number("GENERAL_ENG_RPM:2")?.into(),
            Eng1Cht => c_to_f(self.number("RECIP_ENG_CYLINDER_HEAD_TEMPERATURE:1")?).into(),
            Eng2Cht => c_to_f(self.number("RECIP_ENG_CYLINDER_HEAD_TEMPERATURE:2")?).into(),
            Eng1Egt => rankine_to_f(self.number("GENERAL_ENG_EXHAUST_GAS_TEMPERATURE:1")?).into(),
            Eng2Egt => rankine_to_f(self.number("GENERAL_ENG_EXHAUST_GAS_TEMPERATURE:2")?).into(),
            AltGps => m_to_ft(self.number("GPS_POSITION_ALT")?).into(),
            Tas => self.number("AIRSPEED_TRUE")?.into(),
            HsiSource => PropValue::Text(self.hsi_source()?),
            Course => {
                if self.flag("GPS_DRIVES_NAV1")? {
                    rad_to_deg(self.number("GPS_WP_DESIRED_TRACK")?).into()
                } else if self.number("AUTOPILOT_NAV_SELECTED")? == 1.0 {
                    self.number("NAV_OBS:1")?.into()
                } else {
                    self.number("NAV_OBS:2")?.into()
                }
            }
            Nav1 => self.number("NAV_ACTIVE_FREQUENCY:1")?.into(),
            Nav2 => self.number("NAV_ACTIVE_FREQUENCY:2")?.into(),
            Com1 => self.number("COM_ACTIVE_FREQUENCY:1")?.into(),
            Com2 => self.number("COM_ACTIVE_FREQUENCY:2")?.into(),
            Hcdi => cdi_to_fsd(self.number("HSI_CDI_NEEDLE")?).into(),
            Vcdi => cdi_to_fsd(self.number("HSI_GSI_NEEDLE")?).into(),
            WindSpd => self.number("AMBIENT_WIND_VELOCITY")?.into(),
            WindDir => self.number("AMBIENT_WIND_DIRECTION")?.into(),
            WpDist => m_to_nm(self.number("GPS_WP_DISTANCE")?).into(),
            WpBrg => rad_to_deg(self.number("GPS_WP_BEARING")?).into(),
            Magvar => rad_to_deg(self.number("GPS_MAGVAR")?).into(),
            ApMaster => self.flag("AUTOPILOT_MASTER")?.into(),
            RollMode => PropValue::Text(self.roll_mode()?),
            PitchMode => PropValue::Text(self.pitch_mode()?),
            ApRollCmd => rad_to_deg(self.number("AUTOPILOT_FLIGHT_DIRECTOR_BANK")?).into(),
            ApPitchCmd => rad_to_deg(self.number("AUTOPILOT_FLIGHT_DIRECTOR_PITCH")?).into(),
        };

        // JSON has no NaN or infinity, and the G1000 log has no use for them
        if let PropValue::Number(n) = &value {
            if !n.is_finite() {
                return Err(G1kError::MalformedValue {
                    expected: "finite number",
                    found: n.to_string(),
                });
            }
        }
        Ok(value)
    }

    fn hsi_source(&mut self) -> Result<String> {
        if self.flag("GPS_DRIVES_NAV1")? {
            Ok("GPS".to_string())
        } else {
            Ok(format!("NAV{}", self.number("AUTOPILOT_NAV_SELECTED")? as i64))
        }
    }

    /// Whether any flight guidance is engaged; modes are blank otherwise
    fn guidance_active(&mut self) -> Result<bool> {
        Ok(self.flag("AUTOPILOT_MASTER")? || self.flag("AUTOPILOT_FLIGHT_DIRECTOR_ACTIVE")?)
    }

    fn roll_mode(&mut self) -> Result<String> {
        if !self.guidance_active()? {
            return Ok(String::new());
        }

        let mode = if self.flag("AUTOPILOT_APPROACH_HOLD")? {
            "APR".to_string()
        } else if self.flag("AUTOPILOT_NAV1_LOCK")? {
            match self.hsi_source()?.as_str() {
                "GPS" => "GPS".to_string(),
                _ => "NAV".to_string(),
            }
        } else if self.flag("AUTOPILOT_HEADING_LOCK")? {
            "HDG".to_string()
        } else if self.flag("AUTOPILOT_WING_LEVELER")? {
            "LVL".to_string()
        } else {
            "ROL".to_string()
        };
        Ok(mode)
    }

    fn pitch_mode(&mut self) -> Result<String> {
        if !self.guidance_active()? {
            return Ok(String::new());
        }

        let modes = [
            ("AUTOPILOT_GLIDESLOPE_HOLD", "GS"),
            ("AUTOPILOT_FLIGHT_LEVEL_CHANGE", "FLC"),
            ("AUTOPILOT_VERTICAL_HOLD", "VS"),
            ("AUTOPILOT_ALTITUDE_LOCK", "ALT"),
        ];
        for (var, mode) in modes {
            if self.flag(var)? {
                return Ok(mode.to_string());
            }
        }
        Ok("PIT".to_string())
    }

    fn var(&mut self, name: &'static str) -> Result<SimValue> {
        let id = match self.lookups.get(name) {
            Some(id) => *id,
            None => {
                let id = self
                    .conn
                    .find(name)
                    .ok_or_else(|| G1kError::VariableNotFound(name.to_string()))?;
                debug!("Resolved simulator variable {} to {:?}", name, id);
                self.lookups.insert(name, id);
                id
            }
        };
        self.conn.read(id)
    }

    fn number(&mut self, name: &'static str) -> Result<f64> {
        self.var(name)?.as_f64()
    }

    fn flag(&mut self, name: &'static str) -> Result<bool> {
        self.var(name)?.as_bool()
    }

    fn text(&mut self, name: &'static str) -> Result<String> {
        Ok(self.var(name)?.as_text()?.to_string())
    }
}

/// Format seconds since midnight as a wall clock time, wrapping at 24 h
fn clock(seconds: f64, fmt: &str) -> String {
    let secs = (seconds.floor() as i64).rem_euclid(SECONDS_PER_DAY) as u32;
    NaiveTime::from_num_seconds_from_midnight_opt(secs, 0)
        .map(|t| t.format(fmt).to_string())
        .unwrap_or_default()
}

/// Format a simulator time zone offset (seconds, positive west of UTC) the
/// way a G1000 does (`-06:00` for six hours west)
fn utc_offset(offset_secs: f64) -> String {
    let (sign, magnitude) = if offset_secs <= 0.0 {
        ('+', -offset_secs)
    } else {
        ('-', offset_secs)
    };
    format!("{}{}", sign, clock(magnitude, "%H:%M"))
}
