//! Shape categories of JSON values
//!
//! The merge dispatches over this closed set. Records and mappings both
//! serialize to JSON objects, so they share the `Mapping` tag.

use serde_json::Value;
use std::fmt;

/// Shape category of a JSON value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Null,
    Scalar,
    Sequence,
    Mapping,
}

impl Shape {
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => Shape::Null,
            Value::Bool(_) | Value::Number(_) | Value::String(_) => Shape::Scalar,
            Value::Array(_) => Shape::Sequence,
            Value::Object(_) => Shape::Mapping,
        }
    }

    /// Whether a persisted value of shape `loaded` may be merged onto `self`.
    ///
    /// `Null` on either side is compatible with anything: an absent default
    /// (`None`) accepts any stored value, and a stored `null` leaves the
    /// default untouched.
    pub fn accepts(self, loaded: Shape) -> bool {
        self == loaded || self == Shape::Null || loaded == Shape::Null
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Shape::Null => "null",
            Shape::Scalar => "scalar",
            Shape::Sequence => "sequence",
            Shape::Mapping => "mapping",
        };
        f.write_str(name)
    }
}
