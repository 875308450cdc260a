//! Scalar test values and their equality rules

use std::fmt;

use rhai::Dynamic;
use serde::{Deserialize, Serialize};

/// A test-case input, expected value, or returned value.
///
/// Serialized untagged, so JSON `null`, `true`, `55`, `1.5` and `"abc"` map
/// straight onto the variants. Integers are tried before floats, which keeps
/// `55` an `Int` while `55.0` becomes a `Float`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

/// A returned value that cannot be reported as a scalar
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UnsupportedValue {
    #[error("Returned a value of type {0}, expected a scalar")]
    NotScalar(String),

    /// `NaN` and infinities have no JSON form
    #[error("Returned {0}, expected a finite number")]
    NonFinite(String),
}

impl Scalar {
    /// Strict equality with no coercion between kinds.
    ///
    /// Floats use IEEE comparison: no tolerance, `NaN` never matches and
    /// `0.0` matches `-0.0`.
    pub fn strict_eq(&self, other: &Scalar) -> bool {
        match (self, other) {
            (Scalar::Null, Scalar::Null) => true,
            (Scalar::Bool(a), Scalar::Bool(b)) => a == b,
            (Scalar::Int(a), Scalar::Int(b)) => a == b,
            (Scalar::Float(a), Scalar::Float(b)) => a == b,
            (Scalar::Str(a), Scalar::Str(b)) => a == b,
            _ => false,
        }
    }

    /// Kind name used in messages
    pub fn kind(&self) -> &'static str {
        match self {
            Scalar::Null => "null",
            Scalar::Bool(_) => "bool",
            Scalar::Int(_) => "int",
            Scalar::Float(_) => "float",
            Scalar::Str(_) => "string",
        }
    }

    /// Convert into an engine value for passing to a script function
    pub fn to_dynamic(&self) -> Dynamic {
        match self {
            Scalar::Null => Dynamic::UNIT,
            Scalar::Bool(b) => Dynamic::from_bool(*b),
            Scalar::Int(i) => Dynamic::from_int(*i),
            Scalar::Float(f) => Dynamic::from_float(*f),
            Scalar::Str(s) => Dynamic::from(s.clone()),
        }
    }

    /// Convert an engine value back into a scalar.
    ///
    /// Arrays, maps, function pointers and non-finite floats are rejected.
    pub fn from_dynamic(value: &Dynamic) -> Result<Self, UnsupportedValue> {
        if value.is_unit() {
            return Ok(Scalar::Null);
        }
        if let Ok(b) = value.as_bool() {
            return Ok(Scalar::Bool(b));
        }
        if let Ok(i) = value.as_int() {
            return Ok(Scalar::Int(i));
        }
        if let Ok(f) = value.as_float() {
            if !f.is_finite() {
                return Err(UnsupportedValue::NonFinite(format!("{:?}", f)));
            }
            return Ok(Scalar::Float(f));
        }
        if let Ok(c) = value.as_char() {
            return Ok(Scalar::Str(c.to_string()));
        }
        if value.is_string() {
            return value
                .clone()
                .into_string()
                .map(Scalar::Str)
                .map_err(|type_name| UnsupportedValue::NotScalar(type_name.to_string()));
        }
        Err(UnsupportedValue::NotScalar(value.type_name().to_string()))
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Null => write!(f, "null"),
            Scalar::Bool(b) => write!(f, "{}", b),
            Scalar::Int(i) => write!(f, "{}", i),
            Scalar::Float(x) => write!(f, "{:?}", x),
            Scalar::Str(s) => write!(f, "{:?}", s),
        }
    }
}
