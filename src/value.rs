//! Dynamic value representation for TOON data.
//!
//! This module provides the [`Value`] enum, a closed six-variant sum type that
//! represents any TOON document: null, number, boolean, string, array, object.
//! A `Value` tree is acyclic and immutable once built; every array element and
//! object entry is a finished `Value` at construction time.
//!
//! ## Core Types
//!
//! - [`Value`]: any TOON value
//! - [`Number`]: integer or double payload of the number variant
//! - [`Type`]: the variant tag, with a fixed total order used for comparisons
//!
//! ## Usage Patterns
//!
//! ### Creating Values
//!
//! ```rust
//! use toon::{toon, Value};
//!
//! let null = Value::Null;
//! let number = Value::from(42);
//! let text = Value::from("hello");
//!
//! let obj = toon!({
//!     "name": "Alice",
//!     "age": 30
//! });
//! ```
//!
//! ### Reading Values
//!
//! Accessors never fail. Getters return a neutral default when the tag does
//! not match, and indexing returns a shared null sentinel on any miss, so call
//! sites stay branch-free:
//!
//! ```rust
//! use toon::toon;
//!
//! let doc = toon!({"user": {"name": "Alice"}, "tags": ["a", "b"]});
//! assert_eq!(doc["user"]["name"].string(), "Alice");
//! assert_eq!(doc["tags"][1].string(), "b");
//! assert!(doc["missing"][99].is_null());
//! ```

use crate::Map;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::ops;
use std::sync::LazyLock;

/// The variant tag of a [`Value`].
///
/// The declaration order fixes the total order used when comparing values of
/// different variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Type {
    Null,
    Number,
    Bool,
    String,
    Array,
    Object,
}

/// A dynamically-typed representation of any TOON value.
#[derive(Clone, Debug, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Number(Number),
    Bool(bool),
    String(String),
    Array(Vec<Value>),
    Object(Map),
}

/// The numeric payload of [`Value::Number`].
///
/// Numbers are conceptually double-precision floats, with an integral fast
/// path: values built from integer inputs keep an `i64` payload and re-emit
/// as plain integers with no fractional noise. Equality and ordering compare
/// numerically across the two representations, so `Integer(3) == Float(3.0)`.
#[derive(Clone, Copy, Debug)]
pub enum Number {
    Integer(i64),
    Float(f64),
}

static NULL: Value = Value::Null;

static EMPTY_OBJECT: LazyLock<Map> = LazyLock::new(Map::new);

impl Number {
    /// Returns `true` if this number carries the integer fast path.
    #[inline]
    #[must_use]
    pub const fn is_integer(&self) -> bool {
        matches!(self, Number::Integer(_))
    }

    /// Returns `true` if this number carries a float payload.
    #[inline]
    #[must_use]
    pub const fn is_float(&self) -> bool {
        matches!(self, Number::Float(_))
    }

    /// Converts to `i64` if the value is integral and in range.
    #[inline]
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Number::Integer(i) => Some(*i),
            Number::Float(f) => {
                if f.fract() == 0.0 && *f >= i64::MIN as f64 && *f <= i64::MAX as f64 {
                    Some(*f as i64)
                } else {
                    None
                }
            }
        }
    }

    /// Converts to `f64`. Always succeeds.
    #[inline]
    #[must_use]
    pub fn as_f64(&self) -> f64 {
        match self {
            Number::Integer(i) => *i as f64,
            Number::Float(f) => *f,
        }
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Number::Integer(a), Number::Integer(b)) => a == b,
            _ => self.as_f64() == other.as_f64(),
        }
    }
}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Number::Integer(a), Number::Integer(b)) => a.partial_cmp(b),
            _ => self.as_f64().partial_cmp(&other.as_f64()),
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Integer(i) => write!(f, "{i}"),
            Number::Float(fl) if fl.is_finite() => write!(f, "{fl}"),
            // Non-finite numbers have no TOON spelling.
            Number::Float(_) => write!(f, "null"),
        }
    }
}

macro_rules! impl_number_from_int {
    ($($ty:ty),*) => {$(
        impl From<$ty> for Number {
            fn from(value: $ty) -> Self {
                Number::Integer(value as i64)
            }
        }
    )*};
}

impl_number_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<u64> for Number {
    fn from(value: u64) -> Self {
        if value <= i64::MAX as u64 {
            Number::Integer(value as i64)
        } else {
            Number::Float(value as f64)
        }
    }
}

impl From<f32> for Number {
    fn from(value: f32) -> Self {
        Number::Float(value as f64)
    }
}

impl From<f64> for Number {
    fn from(value: f64) -> Self {
        Number::Float(value)
    }
}

impl Value {
    /// Returns the variant tag.
    #[inline]
    #[must_use]
    pub const fn value_type(&self) -> Type {
        match self {
            Value::Null => Type::Null,
            Value::Number(_) => Type::Number,
            Value::Bool(_) => Type::Bool,
            Value::String(_) => Type::String,
            Value::Array(_) => Type::Array,
            Value::Object(_) => Type::Object,
        }
    }

    /// Returns `true` if the value is null.
    #[inline]
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns `true` if the value is a number.
    #[inline]
    #[must_use]
    pub const fn is_number(&self) -> bool {
        matches!(self, Value::Number(_))
    }

    /// Returns `true` if the value is a boolean.
    #[inline]
    #[must_use]
    pub const fn is_bool(&self) -> bool {
        matches!(self, Value::Bool(_))
    }

    /// Returns `true` if the value is a string.
    #[inline]
    #[must_use]
    pub const fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    /// Returns `true` if the value is an array.
    #[inline]
    #[must_use]
    pub const fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    /// Returns `true` if the value is an object.
    #[inline]
    #[must_use]
    pub const fn is_object(&self) -> bool {
        matches!(self, Value::Object(_))
    }

    /// The numeric value, or `0.0` when the value is not a number.
    #[inline]
    #[must_use]
    pub fn number(&self) -> f64 {
        match self {
            Value::Number(n) => n.as_f64(),
            _ => 0.0,
        }
    }

    /// The numeric value truncated to `i64`, or `0` when not a number.
    #[inline]
    #[must_use]
    pub fn integer(&self) -> i64 {
        match self {
            Value::Number(Number::Integer(i)) => *i,
            Value::Number(Number::Float(f)) => *f as i64,
            _ => 0,
        }
    }

    /// The boolean value, or `false` when the value is not a boolean.
    #[inline]
    #[must_use]
    pub fn boolean(&self) -> bool {
        match self {
            Value::Bool(b) => *b,
            _ => false,
        }
    }

    /// The string value, or `""` when the value is not a string.
    #[inline]
    #[must_use]
    pub fn string(&self) -> &str {
        match self {
            Value::String(s) => s,
            _ => "",
        }
    }

    /// The array elements, or an empty slice when the value is not an array.
    #[inline]
    #[must_use]
    pub fn elements(&self) -> &[Value] {
        match self {
            Value::Array(arr) => arr,
            _ => &[],
        }
    }

    /// The object entries, or a shared empty map when not an object.
    #[inline]
    #[must_use]
    pub fn entries(&self) -> &Map {
        match self {
            Value::Object(map) => map,
            _ => &EMPTY_OBJECT,
        }
    }

    /// If the value is a boolean, returns it.
    #[inline]
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// If the value is an integral number in `i64` range, returns it.
    #[inline]
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Number(n) => n.as_i64(),
            _ => None,
        }
    }

    /// If the value is a number, returns it as `f64`.
    #[inline]
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(n.as_f64()),
            _ => None,
        }
    }

    /// If the value is a string, returns a reference to it.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// If the value is an array, returns a reference to it.
    #[inline]
    #[must_use]
    pub fn as_array(&self) -> Option<&Vec<Value>> {
        match self {
            Value::Array(arr) => Some(arr),
            _ => None,
        }
    }

    /// If the value is an object, returns a reference to it.
    #[inline]
    #[must_use]
    pub fn as_object(&self) -> Option<&Map> {
        match self {
            Value::Object(obj) => Some(obj),
            _ => None,
        }
    }

    /// Encodes this value as TOON text. Total: any tree has a textual form.
    #[must_use]
    pub fn to_toon(&self) -> String {
        let mut out = String::with_capacity(64);
        crate::ser::encode_value(&mut out, self, 0, crate::EncodeOptions::default().indent);
        out
    }
}

/// Indexed access with a shared null sentinel on any miss.
///
/// Never panics: a non-array receiver or an out-of-range index yields
/// `Value::Null`.
impl ops::Index<usize> for Value {
    type Output = Value;

    fn index(&self, index: usize) -> &Value {
        match self {
            Value::Array(arr) => arr.get(index).unwrap_or(&NULL),
            _ => &NULL,
        }
    }
}

/// Keyed access with a shared null sentinel on any miss.
///
/// Never panics: a non-object receiver or a missing key yields `Value::Null`.
impl ops::Index<&str> for Value {
    type Output = Value;

    fn index(&self, key: &str) -> &Value {
        match self {
            Value::Object(obj) => obj.get(key).unwrap_or(&NULL),
            _ => &NULL,
        }
    }
}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            // Null compares equal only to Null and is never less than it.
            (Value::Null, Value::Null) => Some(Ordering::Equal),
            (Value::Number(a), Value::Number(b)) => a.partial_cmp(b),
            (Value::Bool(a), Value::Bool(b)) => a.partial_cmp(b),
            (Value::String(a), Value::String(b)) => a.partial_cmp(b),
            (Value::Array(a), Value::Array(b)) => a.partial_cmp(b),
            (Value::Object(a), Value::Object(b)) => a.partial_cmp(b),
            _ => self.value_type().partial_cmp(&other.value_type()),
        }
    }
}

/// Displays the canonical TOON encoding. Same output as [`Value::to_toon`].
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_toon())
    }
}

impl std::str::FromStr for Value {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        crate::parse(s)
    }
}

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Value::Null
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

macro_rules! impl_value_from_number {
    ($($ty:ty),*) => {$(
        impl From<$ty> for Value {
            fn from(value: $ty) -> Self {
                Value::Number(Number::from(value))
            }
        }
    )*};
}

impl_value_from_number!(i8, i16, i32, i64, u8, u16, u32, u64, f32, f64);

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(value: Vec<T>) -> Self {
        Value::Array(value.into_iter().map(Into::into).collect())
    }
}

impl From<Map> for Value {
    fn from(value: Map) -> Self {
        Value::Object(value)
    }
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Number(Number::Integer(i)) => serializer.serialize_i64(*i),
            Value::Number(Number::Float(f)) => serializer.serialize_f64(*f),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::String(s) => serializer.serialize_str(s),
            Value::Array(arr) => {
                use serde::ser::SerializeSeq;
                let mut seq = serializer.serialize_seq(Some(arr.len()))?;
                for element in arr {
                    seq.serialize_element(element)?;
                }
                seq.end()
            }
            Value::Object(obj) => {
                use serde::ser::SerializeMap;
                let mut map = serializer.serialize_map(Some(obj.len()))?;
                for (k, v) in obj.iter() {
                    map.serialize_entry(k, v)?;
                }
                map.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::{self, Visitor};

        struct ValueVisitor;

        impl<'de> Visitor<'de> for ValueVisitor {
            type Value = Value;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("any valid TOON value")
            }

            fn visit_bool<E>(self, value: bool) -> Result<Value, E> {
                Ok(Value::Bool(value))
            }

            fn visit_i64<E>(self, value: i64) -> Result<Value, E> {
                Ok(Value::Number(Number::Integer(value)))
            }

            fn visit_u64<E>(self, value: u64) -> Result<Value, E> {
                Ok(Value::Number(Number::from(value)))
            }

            fn visit_f64<E>(self, value: f64) -> Result<Value, E> {
                Ok(Value::Number(Number::Float(value)))
            }

            fn visit_str<E>(self, value: &str) -> Result<Value, E> {
                Ok(Value::String(value.to_string()))
            }

            fn visit_string<E>(self, value: String) -> Result<Value, E> {
                Ok(Value::String(value))
            }

            fn visit_unit<E>(self) -> Result<Value, E> {
                Ok(Value::Null)
            }

            fn visit_none<E>(self) -> Result<Value, E> {
                Ok(Value::Null)
            }

            fn visit_some<D>(self, deserializer: D) -> Result<Value, D::Error>
            where
                D: Deserializer<'de>,
            {
                Deserialize::deserialize(deserializer)
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Value, A::Error>
            where
                A: de::SeqAccess<'de>,
            {
                let mut vec = Vec::new();
                while let Some(elem) = seq.next_element()? {
                    vec.push(elem);
                }
                Ok(Value::Array(vec))
            }

            fn visit_map<A>(self, mut map: A) -> Result<Value, A::Error>
            where
                A: de::MapAccess<'de>,
            {
                let mut values = Map::new();
                while let Some((key, value)) = map.next_entry()? {
                    values.insert(key, value);
                }
                Ok(Value::Object(values))
            }
        }

        deserializer.deserialize_any(ValueVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn number_equality_crosses_representations() {
        assert_eq!(Number::Integer(3), Number::Float(3.0));
        assert_ne!(Number::Integer(3), Number::Float(3.5));
        assert_eq!(Value::from(3i64), Value::from(3.0f64));
    }

    #[test]
    fn nan_is_not_equal_to_itself() {
        let nan = Value::from(f64::NAN);
        assert_ne!(nan, nan.clone());
        assert_eq!(nan.partial_cmp(&nan), None);
    }

    #[test]
    fn ordering_follows_variant_tags() {
        let null = Value::Null;
        let num = Value::from(1);
        let boolean = Value::from(true);
        let string = Value::from("a");
        assert!(null < num);
        assert!(num < boolean);
        assert!(boolean < string);
        assert_eq!(null.partial_cmp(&Value::Null), Some(Ordering::Equal));
    }

    #[test]
    fn default_valued_getters() {
        let v = Value::from("text");
        assert_eq!(v.number(), 0.0);
        assert_eq!(v.integer(), 0);
        assert!(!v.boolean());
        assert_eq!(v.string(), "text");
        assert!(v.elements().is_empty());
        assert!(v.entries().is_empty());

        let n = Value::from(2.9);
        assert_eq!(n.integer(), 2);
        assert_eq!(n.string(), "");
    }

    #[test]
    fn index_misses_return_null_sentinel() {
        let arr = Value::from(vec![1, 2]);
        assert_eq!(arr[0], Value::from(1));
        assert!(arr[5].is_null());
        assert!(arr["key"].is_null());

        let mut map = Map::new();
        map.insert("x".to_string(), Value::from(1));
        let obj = Value::Object(map);
        assert_eq!(obj["x"], Value::from(1));
        assert!(obj["y"].is_null());
        assert!(obj[0].is_null());

        assert!(Value::Null[0].is_null());
        assert!(Value::Null["anything"].is_null());
    }

    #[test]
    fn from_conversions() {
        assert_eq!(Value::from(()), Value::Null);
        assert_eq!(Value::from(true), Value::Bool(true));
        assert_eq!(Value::from(42u8), Value::Number(Number::Integer(42)));
        assert_eq!(Value::from(3.5), Value::Number(Number::Float(3.5)));
        assert_eq!(Value::from("s"), Value::String("s".to_string()));
        assert_eq!(
            Value::from(vec!["a", "b"]),
            Value::Array(vec![Value::from("a"), Value::from("b")])
        );
        // u64 beyond i64 range falls back to the float payload.
        assert!(matches!(
            Value::from(u64::MAX),
            Value::Number(Number::Float(_))
        ));
    }

    #[test]
    fn value_type_tags() {
        assert_eq!(Value::Null.value_type(), Type::Null);
        assert_eq!(Value::from(1).value_type(), Type::Number);
        assert_eq!(Value::from(true).value_type(), Type::Bool);
        assert_eq!(Value::from("x").value_type(), Type::String);
        assert_eq!(Value::Array(vec![]).value_type(), Type::Array);
        assert_eq!(Value::Object(Map::new()).value_type(), Type::Object);
    }
}
