//! The Value type - what a folder entry decodes to.
//!
//! Every value a caller can hand to a folder, and every value an interpreter
//! can produce, is one of these variants. Interpreters pick values by their
//! variant, so the set of shapes is closed.

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::Serialize;

/// A value stored in, or loaded from, a folder entry.
///
/// The variants that built-in interpreters accept at the top level:
/// - `Bytes` - opaque binary content (binary interpreter)
/// - `String` - UTF-8 text (text interpreter)
/// - `Map` / `Array` - structured data (JSON interpreter)
///
/// Scalars are only meaningful nested inside structured data; saving one on
/// its own fails unless a custom interpreter accepts it.
///
/// # Design Notes
///
/// - Uses `BTreeMap` for deterministic ordering (important for comparison)
/// - Uses `i64` for integers, `u64` only for integers above `i64::MAX`, and
///   `f64` for everything else JSON can hold
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Value {
    /// Absence of a value.
    #[default]
    Null,
    /// Boolean value.
    Bool(bool),
    /// Signed 64-bit integer.
    Integer(i64),
    /// Unsigned integer too large for `Integer`.
    UInteger(u64),
    /// 64-bit floating point.
    Float(f64),
    /// UTF-8 string.
    String(String),
    /// Binary data.
    Bytes(Vec<u8>),
    /// Ordered sequence of values.
    Array(Vec<Value>),
    /// Key-value map with string keys.
    Map(BTreeMap<String, Value>),
}

impl Value {
    /// Create an empty map.
    pub fn map() -> Self {
        Value::Map(BTreeMap::new())
    }

    /// Create an empty array.
    pub fn array() -> Self {
        Value::Array(Vec::new())
    }

    /// Check if this value is raw bytes.
    pub fn is_bytes(&self) -> bool {
        matches!(self, Value::Bytes(_))
    }

    /// Check if this value is text.
    pub fn is_text(&self) -> bool {
        matches!(self, Value::String(_))
    }

    /// Check if this value is a map.
    pub fn is_map(&self) -> bool {
        matches!(self, Value::Map(_))
    }

    /// Check if this value is an array.
    pub fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    /// Check if this value is structured data (a map or an array).
    pub fn is_structured(&self) -> bool {
        self.is_map() || self.is_array()
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Bytes(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Name of the variant, for messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Integer(_) => "integer",
            Value::UInteger(_) => "unsigned integer",
            Value::Float(_) => "float",
            Value::String(_) => "text",
            Value::Bytes(_) => "bytes",
            Value::Array(_) => "array",
            Value::Map(_) => "map",
        }
    }

    /// A short description that doesn't dump the payload.
    pub fn describe(&self) -> String {
        match self {
            Value::Null => "null".to_string(),
            Value::Bool(b) => format!("bool ({})", b),
            Value::Integer(i) => format!("integer ({})", i),
            Value::UInteger(u) => format!("unsigned integer ({})", u),
            Value::Float(f) => format!("float ({})", f),
            Value::String(s) => format!("text ({} chars)", s.chars().count()),
            Value::Bytes(b) => format!("bytes ({} bytes)", b.len()),
            Value::Array(a) => format!("array ({} items)", a.len()),
            Value::Map(m) => format!("map ({} entries)", m.len()),
        }
    }

    /// Convert from a parsed JSON document.
    ///
    /// Integers keep their exact value up to `u64::MAX`. Numbers beyond that
    /// are already `f64` once parsed by `serde_json`.
    pub fn from_json(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Integer(i)
                } else if let Some(u) = n.as_u64() {
                    Value::UInteger(u)
                } else {
                    Value::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(arr) => {
                Value::Array(arr.into_iter().map(Value::from_json).collect())
            }
            serde_json::Value::Object(map) => Value::Map(
                map.into_iter()
                    .map(|(k, v)| (k, Value::from_json(v)))
                    .collect(),
            ),
        }
    }

    /// Convert to a JSON document.
    ///
    /// # Errors
    ///
    /// Fails if the value contains `Bytes` or a non-finite float, which JSON
    /// can't represent.
    pub fn to_json(&self) -> Result<serde_json::Value, serde_json::Error> {
        use serde::ser::Error as _;

        Ok(match self {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Integer(i) => serde_json::Value::Number((*i).into()),
            Value::UInteger(u) => serde_json::Value::Number((*u).into()),
            Value::Float(f) => match serde_json::Number::from_f64(*f) {
                Some(n) => serde_json::Value::Number(n),
                None => {
                    return Err(serde_json::Error::custom(format!(
                        "non-finite float ({}) can't be represented in JSON",
                        f
                    )));
                }
            },
            Value::String(s) => serde_json::Value::String(s.clone()),
            Value::Bytes(b) => {
                return Err(serde_json::Error::custom(format!(
                    "binary data ({} bytes) can't be represented in JSON",
                    b.len()
                )));
            }
            Value::Array(arr) => serde_json::Value::Array(
                arr.iter()
                    .map(Value::to_json)
                    .collect::<Result<_, _>>()?,
            ),
            Value::Map(map) => serde_json::Value::Object(
                map.iter()
                    .map(|(k, v)| Ok((k.clone(), v.to_json()?)))
                    .collect::<Result<_, serde_json::Error>>()?,
            ),
        })
    }

    /// Convert a Rust type to a Value via serde.
    pub fn from_serialize<T: Serialize>(data: &T) -> Result<Self, serde_json::Error> {
        Ok(Value::from_json(serde_json::to_value(data)?))
    }

    /// Convert this Value to a Rust type via serde.
    pub fn deserialize_into<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_value(self.to_json()?)
    }
}

// Conversion from common types

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Integer(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Integer(v as i64)
    }
}

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        match i64::try_from(v) {
            Ok(i) => Value::Integer(i),
            Err(_) => Value::UInteger(v),
        }
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Value::Bytes(v)
    }
}

impl From<&[u8]> for Value {
    fn from(v: &[u8]) -> Self {
        Value::Bytes(v.to_vec())
    }
}

impl<const N: usize> From<&[u8; N]> for Value {
    fn from(v: &[u8; N]) -> Self {
        Value::Bytes(v.to_vec())
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Value::Array(v)
    }
}

impl From<BTreeMap<String, Value>> for Value {
    fn from(v: BTreeMap<String, Value>) -> Self {
        Value::Map(v)
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        Value::from_json(v)
    }
}
