//! Values produced by named generators.
//!
//! A named generator returns a [`Value`] without knowing the type of the field
//! it will land in. [`FromValue`] is the closed table of conversions from a
//! produced value into a destination type; anything outside the table is a
//! type mismatch.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use url::Url;

/// Value produced by a named generator.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// Boolean value
    Bool(bool),

    /// Signed integer
    Int(i64),

    /// Unsigned integer
    Uint(u64),

    /// Floating point
    Float(f64),

    /// String value
    String(String),

    /// Timestamp
    Time(DateTime<Utc>),

    /// URL
    Url(Url),
}

impl Value {
    /// Short name of the value's kind, used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Uint(_) => "uint",
            Self::Float(_) => "float",
            Self::String(_) => "string",
            Self::Time(_) => "time",
            Self::Url(_) => "url",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Uint(u) => write!(f, "{u}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::String(s) => f.write_str(s),
            Self::Time(t) => write!(f, "{}", t.to_rfc3339()),
            Self::Url(u) => f.write_str(u.as_str()),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<u64> for Value {
    fn from(u: u64) -> Self {
        Self::Uint(u)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Self::Float(x)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(t: DateTime<Utc>) -> Self {
        Self::Time(t)
    }
}

impl From<Url> for Value {
    fn from(u: Url) -> Self {
        Self::Url(u)
    }
}

/// Conversion from a produced [`Value`] into a destination type.
///
/// On failure the value is handed back so the caller can describe it.
pub trait FromValue: Sized {
    fn from_value(value: Value) -> Result<Self, Value>;
}

macro_rules! impl_from_value_numeric {
    ($($t:ty),* $(,)?) => {
        $(
            impl FromValue for $t {
                fn from_value(value: Value) -> Result<Self, Value> {
                    match value {
                        Value::Int(i) => Ok(i as $t),
                        Value::Uint(u) => Ok(u as $t),
                        Value::Float(x) => Ok(x as $t),
                        other => Err(other),
                    }
                }
            }
        )*
    };
}

impl_from_value_numeric!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);

impl FromValue for bool {
    fn from_value(value: Value) -> Result<Self, Value> {
        match value {
            Value::Bool(b) => Ok(b),
            other => Err(other),
        }
    }
}

/// Every kind converts to a string through its `Display` form.
impl FromValue for String {
    fn from_value(value: Value) -> Result<Self, Value> {
        match value {
            Value::String(s) => Ok(s),
            other => Ok(other.to_string()),
        }
    }
}

impl FromValue for DateTime<Utc> {
    fn from_value(value: Value) -> Result<Self, Value> {
        match value {
            Value::Time(t) => Ok(t),
            other => Err(other),
        }
    }
}

impl FromValue for Url {
    fn from_value(value: Value) -> Result<Self, Value> {
        match value {
            Value::Url(u) => Ok(u),
            other => Err(other),
        }
    }
}

impl<T: FromValue> FromValue for Option<T> {
    fn from_value(value: Value) -> Result<Self, Value> {
        T::from_value(value).map(Some)
    }
}

impl<T: FromValue> FromValue for Box<T> {
    fn from_value(value: Value) -> Result<Self, Value> {
        T::from_value(value).map(Box::new)
    }
}
