//! Input accepted by the validator
//!
//! Any mapping that supports keyed lookup and key enumeration can be
//! validated. JSON strings are decoded into an object first.

use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap};

use serde_json::{Map, Value};

use super::coerce::json_type_name;
use super::errors::{ParseError, ParseResult};

/// Read-only capability the validator needs from an input mapping.
pub trait InputMapping {
    /// Looks up the raw value stored under `key`
    fn lookup(&self, key: &str) -> Option<&Value>;

    /// Enumerates every key present in the input
    fn keys(&self) -> Box<dyn Iterator<Item = &str> + '_>;
}

impl InputMapping for Map<String, Value> {
    fn lookup(&self, key: &str) -> Option<&Value> {
        self.get(key)
    }

    fn keys(&self) -> Box<dyn Iterator<Item = &str> + '_> {
        Box::new(Map::keys(self).map(String::as_str))
    }
}

impl<S: std::hash::BuildHasher> InputMapping for HashMap<String, Value, S> {
    fn lookup(&self, key: &str) -> Option<&Value> {
        self.get(key)
    }

    fn keys(&self) -> Box<dyn Iterator<Item = &str> + '_> {
        Box::new(HashMap::keys(self).map(String::as_str))
    }
}

impl InputMapping for BTreeMap<String, Value> {
    fn lookup(&self, key: &str) -> Option<&Value> {
        self.get(key)
    }

    fn keys(&self) -> Box<dyn Iterator<Item = &str> + '_> {
        Box::new(BTreeMap::keys(self).map(String::as_str))
    }
}

/// Top-level input of a validation call.
pub enum Input<'a> {
    /// An already-built mapping
    Mapping(&'a dyn InputMapping),
    /// A JSON value; must be an object
    Value(&'a Value),
    /// A string holding a JSON object
    Json(&'a str),
}

impl<'a> From<&'a str> for Input<'a> {
    fn from(s: &'a str) -> Self {
        Input::Json(s)
    }
}

impl<'a> From<&'a String> for Input<'a> {
    fn from(s: &'a String) -> Self {
        Input::Json(s.as_str())
    }
}

impl<'a> From<&'a Value> for Input<'a> {
    fn from(value: &'a Value) -> Self {
        Input::Value(value)
    }
}

impl<'a> From<&'a Map<String, Value>> for Input<'a> {
    fn from(map: &'a Map<String, Value>) -> Self {
        Input::Mapping(map)
    }
}

impl<'a, S: std::hash::BuildHasher> From<&'a HashMap<String, Value, S>> for Input<'a> {
    fn from(map: &'a HashMap<String, Value, S>) -> Self {
        Input::Mapping(map)
    }
}

impl<'a> From<&'a BTreeMap<String, Value>> for Input<'a> {
    fn from(map: &'a BTreeMap<String, Value>) -> Self {
        Input::Mapping(map)
    }
}

/// Input after decoding: either the caller's mapping or a freshly decoded object.
pub(crate) enum Normalized<'a> {
    Borrowed(&'a dyn InputMapping),
    Decoded(Cow<'a, Map<String, Value>>),
}

impl Normalized<'_> {
    pub(crate) fn mapping(&self) -> &dyn InputMapping {
        match self {
            Normalized::Borrowed(mapping) => *mapping,
            Normalized::Decoded(map) => &**map,
        }
    }
}

/// Decodes string input and rejects anything that is not a mapping.
pub(crate) fn normalize(input: Input<'_>) -> ParseResult<Normalized<'_>> {
    match input {
        Input::Mapping(mapping) => Ok(Normalized::Borrowed(mapping)),
        Input::Value(Value::Object(map)) => Ok(Normalized::Decoded(Cow::Borrowed(map))),
        Input::Value(other) => Err(ParseError::InputType {
            actual: json_type_name(other).to_string(),
        }),
        Input::Json(text) => match serde_json::from_str::<Value>(text) {
            Ok(Value::Object(map)) => Ok(Normalized::Decoded(Cow::Owned(map))),
            Ok(other) => Err(ParseError::decode(format!(
                "expected a JSON object, got {}",
                json_type_name(&other)
            ))),
            Err(e) => Err(ParseError::decode(e.to_string())),
        },
    }
}
