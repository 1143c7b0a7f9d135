//! # Output Formats
//!
//! Renders [`Sample`]s as text.
//!
//! This module handles:
//! - The G1000 fixed-width CSV flight data log ([`G1000`])
//! - A short per-sample status line for the console ([`Status`])

pub mod g1000;
pub mod status;

pub use g1000::{Column, G1000, G1000_COLUMNS};
pub use status::Status;

use crate::property::Property;
use crate::sample::Sample;

/// A way of rendering samples as lines of text
pub trait LogFormat {
    /// Properties this format needs, in column order
    fn properties(&self) -> Vec<Property>;

    /// Text written once before the first row (may be empty)
    fn header(&self) -> String;

    /// Render one sample, or `None` if the sample cannot be rendered
    fn format(&self, sample: &Sample) -> Option<String>;
}

/// Properties needed by a set of formats, in first-use order without repeats
pub fn required_properties(formats: &[&dyn LogFormat]) -> Vec<Property> {
    let mut properties = Vec::new();
    for format in formats {
        for property in format.properties() {
            if !properties.contains(&property) {
                properties.push(property);
            }
        }
    }
    properties
}
