//! External value model exchanged with the declarative state store.
//!
//! The state store hands out dynamically typed nested maps. Rather than
//! passing untyped JSON around, this module models the shapes it can take as
//! a tagged union so the set-of-one convention is explicit: a [`Value::Set`]
//! wraps a single logical value, while a [`Value::Sequence`] is an ordered
//! list of independent values.

use std::collections::BTreeMap;

use serde::de::Error as _;
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// String-keyed record as stored by the state store.
pub type Map = BTreeMap<String, Value>;

/// A single value inside an external state map.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Signed integer scalar.
    Int(i64),
    /// Floating-point scalar.
    Float(f64),
    /// String scalar.
    Str(String),
    /// Boolean scalar.
    Bool(bool),
    /// Nested record.
    Record(Map),
    /// Set wrapper. Holds one logical value; an empty set marks a block
    /// that is present but carries nothing.
    Set(Vec<Self>),
    /// Ordered list of values.
    Sequence(Vec<Self>),
}

impl Value {
    /// Wraps `value` in a set-of-one.
    #[must_use]
    pub fn set_of_one(value: Self) -> Self {
        Self::Set(vec![value])
    }

    /// Human-readable name of the variant, used in error messages.
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Str(_) => "string",
            Self::Bool(_) => "bool",
            Self::Record(_) => "record",
            Self::Set(_) => "set",
            Self::Sequence(_) => "sequence",
        }
    }

    /// Returns the inner map when the value is a record.
    #[must_use]
    pub const fn as_record(&self) -> Option<&Map> {
        match self {
            Self::Record(map) => Some(map),
            _ => None,
        }
    }

    /// Returns the integer when the value is an integer scalar.
    #[must_use]
    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(value) => Some(*value),
            _ => None,
        }
    }

    /// Strips a set wrapper.
    ///
    /// A set yields its first member, or `None` when it is empty. Every other
    /// variant is returned unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use cdn_state::Value;
    ///
    /// let wrapped = Value::set_of_one(Value::Bool(true));
    /// assert_eq!(wrapped.unwrap_set(), Some(&Value::Bool(true)));
    /// assert_eq!(Value::Set(Vec::new()).unwrap_set(), None);
    /// assert_eq!(Value::Int(3).unwrap_set(), Some(&Value::Int(3)));
    /// ```
    #[must_use]
    pub fn unwrap_set(&self) -> Option<&Self> {
        match self {
            Self::Set(members) => members.first(),
            other => Some(other),
        }
    }

    /// Converts a JSON document into a state value.
    ///
    /// JSON has no set type, so arrays become [`Value::Sequence`]. `null`
    /// means "absent": a top-level `null` yields `None` and `null` entries
    /// inside objects and arrays are dropped.
    #[must_use]
    pub fn from_json(json: serde_json::Value) -> Option<Self> {
        match json {
            serde_json::Value::Null => None,
            serde_json::Value::Bool(flag) => Some(Self::Bool(flag)),
            serde_json::Value::Number(number) => number
                .as_i64()
                .map(Self::Int)
                .or_else(|| number.as_f64().map(Self::Float)),
            serde_json::Value::String(text) => Some(Self::Str(text)),
            serde_json::Value::Array(items) => Some(Self::Sequence(
                items.into_iter().filter_map(Self::from_json).collect(),
            )),
            serde_json::Value::Object(entries) => Some(Self::Record(
                entries
                    .into_iter()
                    .filter_map(|(key, item)| Self::from_json(item).map(|value| (key, value)))
                    .collect(),
            )),
        }
    }

    /// Converts the value into JSON. Sets and sequences both become arrays;
    /// non-finite floats become `null`.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Self::Int(value) => serde_json::Value::from(*value),
            Self::Float(value) => serde_json::Number::from_f64(*value)
                .map_or(serde_json::Value::Null, serde_json::Value::Number),
            Self::Str(text) => serde_json::Value::String(text.clone()),
            Self::Bool(flag) => serde_json::Value::Bool(*flag),
            Self::Record(map) => serde_json::Value::Object(
                map.iter()
                    .map(|(key, item)| (key.clone(), item.to_json()))
                    .collect(),
            ),
            Self::Set(items) | Self::Sequence(items) => {
                serde_json::Value::Array(items.iter().map(Self::to_json).collect())
            }
        }
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Str(value.to_owned())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<Map> for Value {
    fn from(value: Map) -> Self {
        Self::Record(value)
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Int(value) => serializer.serialize_i64(*value),
            Self::Float(value) => serializer.serialize_f64(*value),
            Self::Str(text) => serializer.serialize_str(text),
            Self::Bool(flag) => serializer.serialize_bool(*flag),
            Self::Record(map) => {
                let mut state = serializer.serialize_map(Some(map.len()))?;
                for (key, item) in map {
                    state.serialize_entry(key, item)?;
                }
                state.end()
            }
            Self::Set(items) | Self::Sequence(items) => {
                let mut state = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    state.serialize_element(item)?;
                }
                state.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let json = serde_json::Value::deserialize(deserializer)?;
        Self::from_json(json).ok_or_else(|| D::Error::custom("null is not a state value"))
    }
}
