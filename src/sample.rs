//! # Samples
//!
//! One flat record per polling round: property name to converted value.
//! A property whose reading failed is kept with a `None` value so a raw log
//! shows it was attempted.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::property::Property;

/// Converted value of a single property
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropValue {
    Bool(bool),
    Number(f64),
    Text(String),
}

impl PropValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            PropValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            PropValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            PropValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Name of the variant, for diagnostics
    pub fn kind(&self) -> &'static str {
        match self {
            PropValue::Bool(_) => "bool",
            PropValue::Number(_) => "number",
            PropValue::Text(_) => "text",
        }
    }
}

impl fmt::Display for PropValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropValue::Bool(b) => write!(f, "{}", b),
            PropValue::Number(n) => write!(f, "{}", n),
            PropValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<f64> for PropValue {
    fn from(n: f64) -> Self {
        PropValue::Number(n)
    }
}

impl From<bool> for PropValue {
    fn from(b: bool) -> Self {
        PropValue::Bool(b)
    }
}

impl From<String> for PropValue {
    fn from(s: String) -> Self {
        PropValue::Text(s)
    }
}

impl From<&str> for PropValue {
    fn from(s: &str) -> Self {
        PropValue::Text(s.to_string())
    }
}

/// One polling round's worth of property values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Sample {
    values: BTreeMap<Property, Option<PropValue>>,
}

impl Sample {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the outcome of reading one property
    pub fn insert(&mut self, property: Property, value: Option<PropValue>) {
        self.values.insert(property, value);
    }

    /// Builder-style [`Sample::insert`] for a successful reading
    pub fn with<V: Into<PropValue>>(mut self, property: Property, value: V) -> Self {
        self.insert(property, Some(value.into()));
        self
    }

    /// Value of a property.
    ///
    /// The outer `Option` is whether the property was sampled at all, the
    /// inner one whether the reading succeeded.
    pub fn get(&self, property: Property) -> Option<Option<&PropValue>> {
        self.values.get(&property).map(Option::as_ref)
    }

    /// Value of a property, flattening "not sampled" and "failed" together
    pub fn value(&self, property: Property) -> Option<&PropValue> {
        self.get(property).flatten()
    }

    pub fn contains(&self, property: Property) -> bool {
        self.values.contains_key(&property)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of properties whose reading failed
    pub fn failed_count(&self) -> usize {
        self.values.values().filter(|v| v.is_none()).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Property, Option<&PropValue>)> {
        self.values.iter().map(|(p, v)| (*p, v.as_ref()))
    }
}
