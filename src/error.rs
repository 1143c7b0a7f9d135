//! # Error Types
//!
//! Custom error types for G1K Logger using `thiserror`.

use thiserror::Error;

/// Main error type for G1K Logger
#[derive(Debug, Error)]
pub enum G1kError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding/decoding errors (raw logs and scenario files)
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// One or more property names the reader does not know
    #[error("Unknown {}: {}", property_noun(.0), .0.join(" "))]
    UnknownProperty(Vec<String>),

    /// The simulator does not expose a variable with this name
    #[error("Simulator variable not found: {0}")]
    VariableNotFound(String),

    /// The variable exists but has no current value
    #[error("No value for simulator variable {0}")]
    MissingValue(String),

    /// The value has the wrong type for the requested conversion
    #[error("Malformed value: expected {expected}, got {found}")]
    MalformedValue {
        expected: &'static str,
        found: String,
    },

    /// Backend-specific failures
    #[error("Simulator error: {0}")]
    Simulator(String),
}

fn property_noun(names: &[String]) -> &'static str {
    if names.len() == 1 {
        "property"
    } else {
        "properties"
    }
}

/// Result type alias for G1K Logger
pub type Result<T> = std::result::Result<T, G1kError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_property_single() {
        let err = G1kError::UnknownProperty(vec!["foo".to_string()]);
        assert_eq!(err.to_string(), "Unknown property: foo");
    }

    #[test]
    fn test_unknown_property_many() {
        let err = G1kError::UnknownProperty(vec!["foo".to_string(), "bar".to_string()]);
        assert_eq!(err.to_string(), "Unknown properties: foo bar");
    }

    #[test]
    fn test_malformed_value_message() {
        let err = G1kError::MalformedValue {
            expected: "number",
            found: "text \"abc\"".to_string(),
        };
        assert_eq!(err.to_string(), "Malformed value: expected number, got text \"abc\"");
    }
}
