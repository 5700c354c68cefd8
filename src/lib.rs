//! A small, hand-written recursive-descent JSON parser. Input text is scanned by a [Cursor] and
//! assembled by the [Parser] into a [JsonValue] tree.
//!
//! ```
//! use rdjson::{JsonValue, Parser};
//!
//! let parser = Parser::default();
//! let value = parser.parse_str(r#"{"name": "rdjson", "tags": [1, 2.5e+1]}"#).unwrap();
//! let value = value.unwrap();
//! assert_eq!(value.get("name").and_then(JsonValue::as_str), Some("rdjson"));
//! ```
use std::borrow::Cow;
use std::collections::HashMap;

pub mod coords;
pub mod cursor;
pub mod decoders;
pub mod errors;
pub mod parser;
#[cfg(test)]
mod test_macros;

pub use crate::cursor::Cursor;
pub use crate::errors::{Details, Error, ParserResult, Stage};
pub use crate::parser::{Parser, DEFAULT_MAX_DEPTH};

/// Basic enumeration of different Json values
#[derive(Debug, Clone, PartialEq)]
pub enum JsonValue<'a> {
    /// Map of values. Repeated keys keep the last value seen
    Object(HashMap<Cow<'a, str>, JsonValue<'a>>),
    /// Array of values
    Array(Vec<JsonValue<'a>>),
    /// Raw string value, escape sequences are validated but left as they appear in the input
    String(Cow<'a, str>),
    /// Floating point numeric value
    Float(f64),
    /// Integer numeric value
    Integer(i64),
    /// Canonical boolean value
    Boolean(bool),
    /// Canonical null value
    Null,
}

impl<'a> JsonValue<'a> {
    /// Detach the value (and all of its children) from the input it was parsed from
    pub fn into_owned(self) -> JsonValue<'static> {
        match self {
            JsonValue::Object(members) => JsonValue::Object(
                members
                    .into_iter()
                    .map(|(k, v)| (Cow::Owned(k.into_owned()), v.into_owned()))
                    .collect(),
            ),
            JsonValue::Array(values) => {
                JsonValue::Array(values.into_iter().map(JsonValue::into_owned).collect())
            }
            JsonValue::String(s) => JsonValue::String(Cow::Owned(s.into_owned())),
            JsonValue::Float(f) => JsonValue::Float(f),
            JsonValue::Integer(i) => JsonValue::Integer(i),
            JsonValue::Boolean(b) => JsonValue::Boolean(b),
            JsonValue::Null => JsonValue::Null,
        }
    }

    /// Checks whether the value is [JsonValue::Null]
    pub fn is_null(&self) -> bool {
        matches!(self, JsonValue::Null)
    }

    /// The boolean value, if this is a [JsonValue::Boolean]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            JsonValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// The integer value, if this is a [JsonValue::Integer]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            JsonValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Numeric value as a float. Integers are widened
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            JsonValue::Float(f) => Some(*f),
            JsonValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// The raw string contents, if this is a [JsonValue::String]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            JsonValue::String(s) => Some(s.as_ref()),
            _ => None,
        }
    }

    /// The elements, if this is a [JsonValue::Array]
    pub fn as_array(&self) -> Option<&[JsonValue<'a>]> {
        match self {
            JsonValue::Array(values) => Some(values.as_slice()),
            _ => None,
        }
    }

    /// The members, if this is a [JsonValue::Object]
    pub fn as_object(&self) -> Option<&HashMap<Cow<'a, str>, JsonValue<'a>>> {
        match self {
            JsonValue::Object(members) => Some(members),
            _ => None,
        }
    }

    /// Look up a member by key. Returns [None] for anything other than an object
    pub fn get(&self, key: &str) -> Option<&JsonValue<'a>> {
        self.as_object()?.get(key)
    }

    /// Number of children for arrays and objects, zero for scalars
    pub fn len(&self) -> usize {
        match self {
            JsonValue::Object(members) => members.len(),
            JsonValue::Array(values) => values.len(),
            _ => 0,
        }
    }

    /// Checks whether the value has no children. Always true for scalars
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
