//! Short one-line summary of a sample for console logging.

use super::LogFormat;
use crate::property::Property;
use crate::sample::{PropValue, Sample};

const STATUS_PROPERTIES: [Property; 7] = [
    Property::LocalDate,
    Property::LocalTime,
    Property::UtcOffset,
    Property::Lat,
    Property::Lon,
    Property::AltMsl,
    Property::Ias,
];

/// `key=value` summary of position, altitude and airspeed
#[derive(Debug, Clone, Copy, Default)]
pub struct Status;

impl LogFormat for Status {
    fn properties(&self) -> Vec<Property> {
        STATUS_PROPERTIES.to_vec()
    }

    fn header(&self) -> String {
        String::new()
    }

    fn format(&self, sample: &Sample) -> Option<String> {
        let parts: Vec<String> = STATUS_PROPERTIES
            .iter()
            .filter_map(|&p| {
                let value = sample.get(p)?;
                let text = match (p, value) {
                    (_, None) => "-".to_string(),
                    (Property::Lat | Property::Lon, Some(PropValue::Number(n))) => format!("{:.5}", n),
                    (_, Some(PropValue::Number(n))) => format!("{:.1}", n),
                    (_, Some(v)) => v.to_string(),
                };
                Some(format!("{}={}", p, text))
            })
            .collect();
        Some(parts.join(" "))
    }
}
