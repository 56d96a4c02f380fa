use std::fmt;

use serde::{Deserialize, Serialize};

/// A single scalar reading taken from a trend-data node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VitalValue {
    Number(f64),
    Text(String),
}

impl VitalValue {
    /// Numeric view of the reading, parsing text when it holds a number.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(*value),
            Self::Text(text) => text.trim().parse().ok(),
        }
    }
}

impl fmt::Display for VitalValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(value) => write!(f, "{value}"),
            Self::Text(text) => f.write_str(text),
        }
    }
}

impl From<f64> for VitalValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for VitalValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}
