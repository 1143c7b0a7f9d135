//! # Telemetry Properties
//!
//! Short names for every converted value the reader can produce. The name is
//! what appears as a key in raw logs and what the G1000 column table refers
//! to; [`Property::name`] and [`Property::from_str`] are the only mapping
//! between the two.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::G1kError;

/// A converted telemetry value the reader knows how to produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "&'static str", try_from = "String")]
pub enum Property {
    LocalDate,
    LocalTime,
    UtcOffset,
    NextWp,
    Lat,
    Lon,
    AltIndicated,
    Baro,
    AltMsl,
    Oat,
    Ias,
    Gs,
    Vs,
    Pitch,
    Roll,
    Latg,
    Vertg,
    Hdg,
    Trk,
    Volts,
    FuelL,
    FuelR,
    Eng1Gph,
    Eng2Gph,
    Eng1OilTemp,
    Eng2OilTemp,
    Eng1OilPress,
    Eng2OilPress,
    Eng1Map,
    Eng2Map,
    Eng1Rpm,
    Eng2Rpm,
    Eng1Cht,
    Eng2Cht,
    Eng1Egt,
    Eng2Egt,
    AltGps,
    Tas,
    HsiSource,
    Course,
    Nav1,
    Nav2,
    Com1,
    Com2,
    Hcdi,
    Vcdi,
    WindSpd,
    WindDir,
    WpDist,
    WpBrg,
    Magvar,
    ApMaster,
    RollMode,
    PitchMode,
    ApRollCmd,
    ApPitchCmd,
}

impl Property {
    /// Every property, in declaration order
    pub const ALL: [Property; 56] = [
        Property::LocalDate,
        Property::LocalTime,
        Property::UtcOffset,
        Property::NextWp,
        Property::Lat,
        Property::Lon,
        Property::AltIndicated,
        Property::Baro,
        Property::AltMsl,
        Property::Oat,
        Property::Ias,
        Property::Gs,
        Property::Vs,
        Property::Pitch,
        Property::Roll,
        Property::Latg,
        Property::Vertg,
        Property::Hdg,
        Property::Trk,
        Property::Volts,
        Property::FuelL,
        Property::FuelR,
        Property::Eng1Gph,
        Property::Eng2Gph,
        Property::Eng1OilTemp,
        Property::Eng2OilTemp,
        Property::Eng1OilPress,
        Property::Eng2OilPress,
        Property::Eng1Map,
        Property::Eng2Map,
        Property::Eng1Rpm,
        Property::Eng2Rpm,
        Property::Eng1Cht,
        Property::Eng2Cht,
        Property::Eng1Egt,
        Property::Eng2Egt,
        Property::AltGps,
        Property::Tas,
        Property::HsiSource,
        Property::Course,
        Property::Nav1,
        Property::Nav2,
        Property::Com1,
        Property::Com2,
        Property::Hcdi,
        Property::Vcdi,
        Property::WindSpd,
        Property::WindDir,
        Property::WpDist,
        Property::WpBrg,
        Property::Magvar,
        Property::ApMaster,
        Property::RollMode,
        Property::PitchMode,
        Property::ApRollCmd,
        Property::ApPitchCmd,
    ];

    /// Short snake_case name used in logs and configuration
    #[rustfmt::skip]
    pub fn name(self) -> &'static str {
        match self {
            Property::LocalDate    => "local_date",
            Property::LocalTime    => "local_time",
            Property::UtcOffset    => "utc_offset",
            Property::NextWp       => "next_wp",
            Property::Lat          => "lat",
            Property::Lon          => "lon",
            Property::AltIndicated => "alt_indicated",
            Property::Baro         => "baro",
            Property::AltMsl       => "alt_msl",
            Property::Oat          => "oat",
            Property::Ias          => "ias",
            Property::Gs           => "gs",
            Property::Vs           => "vs",
            Property::Pitch        => "pitch",
            Property::Roll         => "roll",
            Property::Latg         => "latg",
            Property::Vertg        => "vertg",
            Property::Hdg          => "hdg",
            Property::Trk          => "trk",
            Property::Volts        => "volts",
            Property::FuelL        => "fuel_l",
            Property::FuelR        => "fuel_r",
            Property::Eng1Gph      => "eng1_gph",
            Property::Eng2Gph      => "eng2_gph",
            Property::Eng1OilTemp  => "eng1_oil_temp",
            Property::Eng2OilTemp  => "eng2_oil_temp",
            Property::Eng1OilPress => "eng1_oil_press",
            Property::Eng2OilPress => "eng2_oil_press",
            Property::Eng1Map      => "eng1_map",
            Property::Eng2Map      => "eng2_map",
            Property::Eng1Rpm      => "eng1_rpm",
            Property::Eng2Rpm      => "eng2_rpm",
            Property::Eng1Cht      => "eng1_cht",
            Property::Eng2Cht      => "eng2_cht",
            Property::Eng1Egt      => "eng1_egt",
            Property::Eng2Egt      => "eng2_egt",
            Property::AltGps       => "alt_gps",
            Property::Tas          => "tas",
            Property::HsiSource    => "hsi_source",
            Property::Course       => "course",
            Property::Nav1         => "nav1",
            Property::Nav2         => "nav2",
            Property::Com1         => "com1",
            Property::Com2         => "com2",
            Property::Hcdi         => "hcdi",
            Property::Vcdi         => "vcdi",
            Property::WindSpd      => "wind_spd",
            Property::WindDir      => "wind_dir",
            Property::WpDist       => "wp_dist",
            Property::WpBrg        => "wp_brg",
            Property::Magvar       => "magvar",
            Property::ApMaster     => "ap_master",
            Property::RollMode     => "roll_mode",
            Property::PitchMode    => "pitch_mode",
            Property::ApRollCmd    => "ap_roll_cmd",
            Property::ApPitchCmd   => "ap_pitch_cmd",
        }
    }

    /// Parse a list of property names, reporting every unknown one at once
    ///
    /// # Errors
    ///
    /// Returns `UnknownProperty` listing all names that did not parse
    pub fn parse_list<S: AsRef<str>>(names: &[S]) -> Result<Vec<Property>, G1kError> {
        let mut props = Vec::with_capacity(names.len());
        let mut unknown = Vec::new();

        for name in names {
            match name.as_ref().parse() {
                Ok(p) => props.push(p),
                Err(_) => unknown.push(name.as_ref().to_string()),
            }
        }

        if unknown.is_empty() {
            Ok(props)
        } else {
            Err(G1kError::UnknownProperty(unknown))
        }
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Property {
    type Err = G1kError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Property::ALL
            .iter()
            .copied()
            .find(|p| p.name() == s)
            .ok_or_else(|| G1kError::UnknownProperty(vec![s.to_string()]))
    }
}

impl From<Property> for &'static str {
    fn from(p: Property) -> Self {
        p.name()
    }
}

impl TryFrom<String> for Property {
    type Error = G1kError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_names_round_trip() {
        for p in Property::ALL {
            assert_eq!(p.name().parse::<Property>().unwrap(), p);
        }
    }

    #[test]
    fn test_names_unique() {
        let names: HashSet<_> = Property::ALL.iter().map(|p| p.name()).collect();
        assert_eq!(names.len(), Property::ALL.len());
    }

    #[test]
    fn test_all_is_sorted_by_declaration() {
        let mut sorted = Property::ALL;
        sorted.sort();
        assert_eq!(sorted, Property::ALL);
    }

    #[test]
    fn test_unknown_name() {
        assert!("airspeed".parse::<Property>().is_err());
        assert!("IAS".parse::<Property>().is_err());
    }

    #[test]
    fn test_parse_list_reports_all_unknown() {
        match Property::parse_list(&["ias", "foo", "alt_msl", "bar"]) {
            Err(G1kError::UnknownProperty(names)) => assert_eq!(names, vec!["foo", "bar"]),
            other => panic!("Expected UnknownProperty, got: {:?}", other),
        }
    }

    #[test]
    fn test_parse_list_keeps_order() {
        let props = Property::parse_list(&["pitch", "ias", "lat"]).unwrap();
        assert_eq!(props, vec![Property::Pitch, Property::Ias, Property::Lat]);
    }

    #[test]
    fn test_serde_uses_short_name() {
        let json = serde_json::to_string(&Property::Eng1OilTemp).unwrap();
        assert_eq!(json, "\"eng1_oil_temp\"");
        let p: Property = serde_json::from_str("\"wp_dist\"").unwrap();
        assert_eq!(p, Property::WpDist);
        assert!(serde_json::from_str::<Property>("\"nope\"").is_err());
    }
}
