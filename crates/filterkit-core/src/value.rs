//! Dynamic value model shared by every filter
//!
//! Template values are a closed set of shapes: [`Value::Null`] (the absent
//! value), numbers, strings, ordered sequences and keyed mappings. Filters
//! branch on the shape they receive and fall back to `Null` for shapes they do
//! not support.
//!
//! This module also provides the coercion facade the filters are written
//! against: number and string coercion, iterability checks, length and natural
//! enumeration order.
//!
//! Mappings are stored in a [`BTreeMap`], so enumeration over a mapping always
//! follows ascending key order.
//!
//! Copyright (c) 2025 Filterkit Team
//! Licensed under the Apache-2.0 license

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::{btree_map, BTreeMap};
use std::fmt;
use std::slice;

/// Keyed mapping from string keys to values
pub type Mapping = BTreeMap<String, Value>;

/// Largest magnitude at which a whole number still renders without exponent
const MAX_EXACT_INTEGER: f64 = 1e15;

/// A dynamically-typed template value
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// Absent value, rendered as empty output
    #[default]
    Null,
    Number(f64),
    String(String),
    Sequence(Vec<Value>),
    Mapping(Mapping),
}

impl Value {
    /// Returns true for the absent value
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns true for ordered sequences
    pub fn is_sequence(&self) -> bool {
        matches!(self, Value::Sequence(_))
    }

    /// Returns true for keyed mappings
    pub fn is_mapping(&self) -> bool {
        matches!(self, Value::Mapping(_))
    }

    /// Returns true when the value can be enumerated (sequences and mappings)
    pub fn is_iterable(&self) -> bool {
        self.is_sequence() || self.is_mapping()
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[Value]> {
        match self {
            Value::Sequence(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            Value::Mapping(map) => Some(map),
            _ => None,
        }
    }

    /// Short shape name used in diagnostics
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Sequence(_) => "sequence",
            Value::Mapping(_) => "mapping",
        }
    }

    /// Coerce to a number.
    ///
    /// Strings are parsed after trimming; anything that does not parse, and
    /// every non-scalar shape, coerces to `0`.
    pub fn coerce_number(&self) -> f64 {
        match self {
            Value::Number(n) => *n,
            Value::String(s) => s.trim().parse::<f64>().unwrap_or(0.0),
            Value::Null | Value::Sequence(_) | Value::Mapping(_) => 0.0,
        }
    }

    /// Coerce to a string.
    ///
    /// Whole numbers render without a fractional part. Null and collections
    /// render as the empty string.
    pub fn coerce_string(&self) -> String {
        match self {
            Value::Null => String::new(),
            Value::Number(n) => format_number(*n),
            Value::String(s) => s.clone(),
            Value::Sequence(_) | Value::Mapping(_) => String::new(),
        }
    }

    /// Number of enumerable elements, or `None` for non-iterable shapes
    pub fn len(&self) -> Option<usize> {
        match self {
            Value::Sequence(items) => Some(items.len()),
            Value::Mapping(map) => Some(map.len()),
            _ => None,
        }
    }

    /// Enumerate element values in natural order.
    ///
    /// Sequences yield in index order, mappings in ascending key order and
    /// every other shape yields nothing.
    pub fn iter(&self) -> Iter<'_> {
        match self {
            Value::Sequence(items) => Iter::Sequence(items.iter()),
            Value::Mapping(map) => Iter::Mapping(map.values()),
            _ => Iter::Empty,
        }
    }
}

/// Render a number the way templates print it
pub(crate) fn format_number(n: f64) -> String {
    if is_exact_integer(n) {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

fn is_exact_integer(n: f64) -> bool {
    n.is_finite() && n.fract() == 0.0 && n.abs() < MAX_EXACT_INTEGER
}

/// Iterator over the element values of a [`Value`]
#[derive(Debug, Clone)]
pub enum Iter<'a> {
    Sequence(slice::Iter<'a, Value>),
    Mapping(btree_map::Values<'a, String, Value>),
    Empty,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Value;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Iter::Sequence(inner) => inner.next(),
            Iter::Mapping(inner) => inner.next(),
            Iter::Empty => None,
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self {
            Iter::Sequence(inner) => inner.size_hint(),
            Iter::Mapping(inner) => inner.size_hint(),
            Iter::Empty => (0, Some(0)),
        }
    }
}

impl DoubleEndedIterator for Iter<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        match self {
            Iter::Sequence(inner) => inner.next_back(),
            Iter::Mapping(inner) => inner.next_back(),
            Iter::Empty => None,
        }
    }
}

impl<'a> IntoIterator for &'a Value {
    type Item = &'a Value;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.coerce_string())
    }
}

// Conversion implementations

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::from(b),
            serde_json::Value::Number(n) => Value::Number(n.as_f64().unwrap_or(0.0)),
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::Sequence(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => Value::Mapping(
                map.into_iter()
                    .map(|(key, value)| (key, Value::from(value)))
                    .collect(),
            ),
        }
    }
}

impl From<&Value> for serde_json::Value {
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => serde_json::Value::Null,
            Value::Number(n) if is_exact_integer(*n) => serde_json::Value::from(*n as i64),
            Value::Number(n) => serde_json::Number::from_f64(*n)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Value::String(s) => serde_json::Value::String(s.clone()),
            Value::Sequence(items) => {
                serde_json::Value::Array(items.iter().map(serde_json::Value::from).collect())
            }
            Value::Mapping(map) => serde_json::Value::Object(
                map.iter()
                    .map(|(key, value)| (key.clone(), serde_json::Value::from(value)))
                    .collect(),
            ),
        }
    }
}

impl From<Value> for serde_json::Value {
    fn from(value: Value) -> Self {
        serde_json::Value::from(&value)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n as f64)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(f64::from(n))
    }
}

impl From<usize> for Value {
    fn from(n: usize) -> Self {
        Value::Number(n as f64)
    }
}

/// Booleans have no shape of their own and become `1` or `0`
impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Number(if b { 1.0 } else { 0.0 })
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Sequence(items)
    }
}

impl From<Mapping> for Value {
    fn from(map: Mapping) -> Self {
        Value::Mapping(map)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Value::Null)
    }
}

impl<T: Into<Value>> FromIterator<T> for Value {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Value::Sequence(iter.into_iter().map(Into::into).collect())
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Number(n) if is_exact_integer(*n) => serializer.serialize_i64(*n as i64),
            Value::Number(n) if n.is_finite() => serializer.serialize_f64(*n),
            Value::Number(_) => serializer.serialize_unit(),
            Value::String(s) => serializer.serialize_str(s),
            Value::Sequence(items) => items.serialize(serializer),
            Value::Mapping(map) => map.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        serde_json::Value::deserialize(deserializer).map(Value::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_coerce_number() {
        assert_eq!(Value::from(3.5).coerce_number(), 3.5);
        assert_eq!(Value::from(" 42 ").coerce_number(), 42.0);
        assert_eq!(Value::from("abc").coerce_number(), 0.0);
        assert_eq!(Value::Null.coerce_number(), 0.0);
        assert_eq!(Value::from(json!([1, 2])).coerce_number(), 0.0);
    }

    #[test]
    fn test_coerce_string() {
        assert_eq!(Value::from(3.0).coerce_string(), "3");
        assert_eq!(Value::from(-2.5).coerce_string(), "-2.5");
        assert_eq!(Value::from("hi").coerce_string(), "hi");
        assert_eq!(Value::Null.coerce_string(), "");
        assert_eq!(Value::from(json!({"a": 1})).coerce_string(), "");
    }

    #[test]
    fn test_iterability() {
        assert!(Value::from(json!([1])).is_iterable());
        assert!(Value::from(json!({"a": 1})).is_iterable());
        assert!(!Value::from("abc").is_iterable());
        assert!(!Value::Null.is_iterable());
        assert_eq!(Value::from("abc").len(), None);
        assert_eq!(Value::from(json!({"a": 1, "b": 2})).len(), Some(2));
    }

    #[test]
    fn test_mapping_iterates_in_key_order() {
        let value = Value::from(json!({"c": 3, "a": 1, "b": 2}));
        let numbers: Vec<f64> = value.iter().map(Value::coerce_number).collect();
        assert_eq!(numbers, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_scalar_iterates_nothing() {
        assert_eq!(Value::from(7).iter().count(), 0);
    }

    #[test]
    fn test_json_conversion() {
        let value = Value::from(json!({"n": 2, "f": 1.5, "t": true, "list": ["x", null]}));
        let mapping = value.as_mapping().unwrap();
        assert_eq!(mapping["t"], Value::Number(1.0));
        assert_eq!(serde_json::Value::from(&value), json!({"n": 2, "f": 1.5, "t": 1, "list": ["x", null]}));
    }

    #[test]
    fn test_serde_roundtrip_through_text() {
        let value: Value = serde_json::from_str(r#"{"a":[1,"two",null]}"#).unwrap();
        assert_eq!(serde_json::to_string(&value).unwrap(), r#"{"a":[1,"two",null]}"#);
    }

    #[test]
    fn test_non_finite_serializes_as_null() {
        assert_eq!(serde_json::to_string(&Value::Number(f64::NAN)).unwrap(), "null");
    }

    #[test]
    fn test_collect_into_sequence() {
        let value: Value = vec![1, 2, 3].into_iter().collect();
        assert_eq!(value, Value::from(json!([1, 2, 3])));
    }
}
