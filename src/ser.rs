//! TOON serialization.
//!
//! Two layers live here. The bottom layer is a pure tree-walking encoder over
//! [`Value`] (`encode_value`): deterministic, total, and infallible, since
//! every `Value` tree has a textual form. The top layer is [`ValueSerializer`],
//! a [`serde::Serializer`] that lowers any `T: Serialize` into a `Value` so
//! that [`crate::to_string`] and [`crate::to_value`] work for arbitrary types.
//!
//! Encoding rules in brief:
//!
//! - Scalars print inline; strings stay bare unless they would be ambiguous.
//! - An empty array prints as `[0]:`.
//! - An array of objects sharing one key set collapses into a tabular block:
//!   a `[{k1, k2}]:` header followed by one comma-joined row per element.
//! - Any other array prints as `[N]: e1, e2, ...` on one line.
//! - Objects print one `key: value` entry per line; nested objects move the
//!   value to the following lines, one indent level deeper.

use crate::error::{Error, Result};
use crate::value::Number;
use crate::{Map, Value};
use serde::ser::{self, Serialize};

/// Characters that force a string into quoted form.
///
/// Each one is structural somewhere in the grammar, so a bare string carrying
/// it would change meaning on re-parse.
const STRUCTURAL: &[char] = &[',', ':', '\n', '[', ']', '{', '}', '#'];

/// Whether `s` must be quoted to survive a round trip as a string.
fn needs_quoting(s: &str) -> bool {
    if s.is_empty() || s == "null" || s == "true" || s == "false" {
        return true;
    }
    let first = s.as_bytes()[0];
    if (first.is_ascii_digit() || first == b'-') && s.parse::<f64>().is_ok() {
        return true;
    }
    s.contains(STRUCTURAL)
}

fn write_quoted(out: &mut String, s: &str) {
    out.push('"');
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\u{8}' => out.push_str("\\b"),
            '\u{c}' => out.push_str("\\f"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if (c as u32) < 0x20 => {
                out.push_str(&format!("\\u{:04x}", c as u32));
            }
            c => out.push(c),
        }
    }
    out.push('"');
}

fn push_indent(out: &mut String, level: usize, indent: usize) {
    for _ in 0..level * indent {
        out.push(' ');
    }
}

/// Returns the shared key set if every element is an object with the same
/// keys as the first, making the array eligible for tabular form.
fn tabular_keys(elements: &[Value]) -> Option<Vec<&str>> {
    let first = elements.first()?.as_object()?;
    let keys: Vec<&str> = first.keys().map(String::as_str).collect();
    // A headerless table has no cells to carry its rows; empty objects go
    // through the inline form instead.
    if keys.is_empty() {
        return None;
    }
    for element in &elements[1..] {
        let obj = element.as_object()?;
        if obj.len() != keys.len() || !keys.iter().all(|k| obj.contains_key(k)) {
            return None;
        }
    }
    Some(keys)
}

/// Encodes `value` into `out` at the given nesting level.
pub(crate) fn encode_value(out: &mut String, value: &Value, level: usize, indent: usize) {
    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(true) => out.push_str("true"),
        Value::Bool(false) => out.push_str("false"),
        Value::Number(n) => out.push_str(&n.to_string()),
        Value::String(s) => {
            if needs_quoting(s) {
                write_quoted(out, s);
            } else {
                out.push_str(s);
            }
        }
        Value::Array(elements) => encode_array(out, elements, level, indent),
        Value::Object(entries) => encode_object(out, entries, level, indent),
    }
}

fn encode_array(out: &mut String, elements: &[Value], level: usize, indent: usize) {
    if elements.is_empty() {
        out.push_str("[0]:");
        return;
    }
    if let Some(keys) = tabular_keys(elements) {
        out.push_str("[{");
        for (i, key) in keys.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            out.push_str(key);
        }
        out.push_str("}]:");
        for element in elements {
            out.push('\n');
            push_indent(out, level + 1, indent);
            let obj = element.entries();
            for (i, key) in keys.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                if let Some(v) = obj.get(key) {
                    encode_value(out, v, level + 1, indent);
                }
            }
        }
        return;
    }
    out.push('[');
    out.push_str(&elements.len().to_string());
    out.push_str("]: ");
    for (i, element) in elements.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        encode_value(out, element, level, indent);
    }
}

fn encode_object(out: &mut String, entries: &Map, level: usize, indent: usize) {
    for (i, (key, value)) in entries.iter().enumerate() {
        if i > 0 {
            out.push('\n');
            push_indent(out, level, indent);
        }
        out.push_str(key);
        out.push_str(": ");
        if value.is_object() {
            // Nested objects move below the key, one level deeper. Arrays
            // stay on the key's line and manage their own row layout.
            out.push('\n');
            push_indent(out, level + 1, indent);
            encode_value(out, value, level + 1, indent);
        } else {
            encode_value(out, value, level, indent);
        }
    }
}

/// Serializer that lowers any serde data model value into a [`Value`] tree.
///
/// This is what [`crate::to_value`] drives; it never touches text. The
/// textual encoding happens afterwards, over the finished tree.
pub struct ValueSerializer;

impl ser::Serializer for ValueSerializer {
    type Ok = Value;
    type Error = Error;

    type SerializeSeq = SerializeVec;
    type SerializeTuple = SerializeVec;
    type SerializeTupleStruct = SerializeVec;
    type SerializeTupleVariant = SerializeTupleVariant;
    type SerializeMap = SerializeMap;
    type SerializeStruct = SerializeMap;
    type SerializeStructVariant = SerializeStructVariant;

    fn serialize_bool(self, v: bool) -> Result<Value> {
        Ok(Value::Bool(v))
    }

    fn serialize_i8(self, v: i8) -> Result<Value> {
        self.serialize_i64(v as i64)
    }

    fn serialize_i16(self, v: i16) -> Result<Value> {
        self.serialize_i64(v as i64)
    }

    fn serialize_i32(self, v: i32) -> Result<Value> {
        self.serialize_i64(v as i64)
    }

    fn serialize_i64(self, v: i64) -> Result<Value> {
        Ok(Value::Number(Number::Integer(v)))
    }

    fn serialize_u8(self, v: u8) -> Result<Value> {
        self.serialize_i64(v as i64)
    }

    fn serialize_u16(self, v: u16) -> Result<Value> {
        self.serialize_i64(v as i64)
    }

    fn serialize_u32(self, v: u32) -> Result<Value> {
        self.serialize_i64(v as i64)
    }

    fn serialize_u64(self, v: u64) -> Result<Value> {
        Ok(Value::Number(Number::from(v)))
    }

    fn serialize_f32(self, v: f32) -> Result<Value> {
        self.serialize_f64(v as f64)
    }

    fn serialize_f64(self, v: f64) -> Result<Value> {
        Ok(Value::Number(Number::Float(v)))
    }

    fn serialize_char(self, v: char) -> Result<Value> {
        Ok(Value::String(v.to_string()))
    }

    fn serialize_str(self, v: &str) -> Result<Value> {
        Ok(Value::String(v.to_string()))
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<Value> {
        Ok(Value::Array(v.iter().map(|&b| Value::from(b)).collect()))
    }

    fn serialize_none(self) -> Result<Value> {
        Ok(Value::Null)
    }

    fn serialize_some<T>(self, value: &T) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Value> {
        Ok(Value::Null)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Value> {
        Ok(Value::Null)
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Value> {
        Ok(Value::String(variant.to_string()))
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        let mut map = Map::new();
        map.insert(variant.to_string(), value.serialize(ValueSerializer)?);
        Ok(Value::Object(map))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<Self::SerializeSeq> {
        Ok(SerializeVec {
            vec: Vec::with_capacity(len.unwrap_or(0)),
        })
    }

    fn serialize_tuple(self, len: usize) -> Result<Self::SerializeTuple> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        len: usize,
    ) -> Result<Self::SerializeTupleStruct> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<Self::SerializeTupleVariant> {
        Ok(SerializeTupleVariant {
            variant,
            vec: Vec::with_capacity(len),
        })
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap> {
        Ok(SerializeMap {
            map: Map::new(),
            next_key: None,
        })
    }

    fn serialize_struct(self, _name: &'static str, _len: usize) -> Result<Self::SerializeStruct> {
        self.serialize_map(None)
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant> {
        Ok(SerializeStructVariant {
            variant,
            map: Map::new(),
        })
    }
}

#[doc(hidden)]
pub struct SerializeVec {
    vec: Vec<Value>,
}

impl ser::SerializeSeq for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.vec.push(value.serialize(ValueSerializer)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Array(self.vec))
    }
}

impl ser::SerializeTuple for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<Value> {
        ser::SerializeSeq::end(self)
    }
}

impl ser::SerializeTupleStruct for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<Value> {
        ser::SerializeSeq::end(self)
    }
}

#[doc(hidden)]
pub struct SerializeTupleVariant {
    variant: &'static str,
    vec: Vec<Value>,
}

impl ser::SerializeTupleVariant for SerializeTupleVariant {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.vec.push(value.serialize(ValueSerializer)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        let mut map = Map::new();
        map.insert(self.variant.to_string(), Value::Array(self.vec));
        Ok(Value::Object(map))
    }
}

#[doc(hidden)]
pub struct SerializeMap {
    map: Map,
    next_key: Option<String>,
}

impl ser::SerializeMap for SerializeMap {
    type Ok = Value;
    type Error = Error;

    fn serialize_key<T>(&mut self, key: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.next_key = Some(map_key(key.serialize(ValueSerializer)?)?);
        Ok(())
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        // serialize_key is always called before serialize_value.
        let key = self
            .next_key
            .take()
            .ok_or_else(|| Error::custom("map value serialized before key"))?;
        self.map.insert(key, value.serialize(ValueSerializer)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Object(self.map))
    }
}

impl ser::SerializeStruct for SerializeMap {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.map
            .insert(key.to_string(), value.serialize(ValueSerializer)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Object(self.map))
    }
}

#[doc(hidden)]
pub struct SerializeStructVariant {
    variant: &'static str,
    map: Map,
}

impl ser::SerializeStructVariant for SerializeStructVariant {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.map
            .insert(key.to_string(), value.serialize(ValueSerializer)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        let mut outer = Map::new();
        outer.insert(self.variant.to_string(), Value::Object(self.map));
        Ok(Value::Object(outer))
    }
}

fn map_key(value: Value) -> Result<String> {
    match value {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        _ => Err(Error::custom("map key must be a string or scalar")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::toon;

    fn encode(value: &Value) -> String {
        value.to_toon()
    }

    #[test]
    fn scalars() {
        assert_eq!(encode(&Value::Null), "null");
        assert_eq!(encode(&Value::Bool(true)), "true");
        assert_eq!(encode(&Value::Bool(false)), "false");
        assert_eq!(encode(&Value::from(42)), "42");
        assert_eq!(encode(&Value::from(-7)), "-7");
        assert_eq!(encode(&Value::from(3.5)), "3.5");
        assert_eq!(encode(&Value::from(2.0)), "2");
        assert_eq!(encode(&Value::from("hello")), "hello");
    }

    #[test]
    fn non_finite_numbers_become_null() {
        assert_eq!(encode(&Value::from(f64::NAN)), "null");
        assert_eq!(encode(&Value::from(f64::INFINITY)), "null");
        assert_eq!(encode(&Value::from(f64::NEG_INFINITY)), "null");
    }

    #[test]
    fn quoting_matrix() {
        assert_eq!(encode(&Value::from("")), "\"\"");
        assert_eq!(encode(&Value::from("null")), "\"null\"");
        assert_eq!(encode(&Value::from("true")), "\"true\"");
        assert_eq!(encode(&Value::from("false")), "\"false\"");
        assert_eq!(encode(&Value::from("3.14")), "\"3.14\"");
        assert_eq!(encode(&Value::from("-12")), "\"-12\"");
        assert_eq!(encode(&Value::from("a, b")), "\"a, b\"");
        assert_eq!(encode(&Value::from("key: value")), "\"key: value\"");
        assert_eq!(encode(&Value::from("[tag]")), "\"[tag]\"");
        assert_eq!(encode(&Value::from("#comment")), "\"#comment\"");
        // Numeric-looking but not a number stays bare.
        assert_eq!(encode(&Value::from("1.2.3")), "1.2.3");
        // Digit not in first position stays bare.
        assert_eq!(encode(&Value::from("v2")), "v2");
        assert_eq!(encode(&Value::from("hello world")), "hello world");
    }

    #[test]
    fn string_escapes() {
        assert_eq!(encode(&Value::from("a\nb")), "\"a\\nb\"");
        assert_eq!(encode(&Value::from("say \"hi\", ok")), "\"say \\\"hi\\\", ok\"");
        assert_eq!(encode(&Value::from("tab\there, x")), "\"tab\\there, x\"");
        assert_eq!(encode(&Value::from("bell:\u{7}")), "\"bell:\\u0007\"");
    }

    #[test]
    fn arrays() {
        assert_eq!(encode(&Value::Array(vec![])), "[0]:");
        assert_eq!(encode(&toon!([1, 2, 3])), "[3]: 1, 2, 3");
        assert_eq!(encode(&toon!(["a", true, null])), "[3]: a, true, null");
    }

    #[test]
    fn tabular_array() {
        let value = toon!([{"x": 1, "y": 2}, {"x": 3, "y": 4}]);
        assert_eq!(encode(&value), "[{x, y}]:\n  1, 2\n  3, 4");
    }

    #[test]
    fn mixed_key_sets_stay_inline() {
        let value = toon!([{"x": 1}, {"y": 2}]);
        assert_eq!(encode(&value), "[2]: x: 1, y: 2");
        // Differing key counts likewise.
        let value = toon!([{"x": 1, "y": 2}, {"x": 3}]);
        assert!(encode(&value).starts_with("[2]: "));
    }

    #[test]
    fn empty_objects_fall_back_to_inline() {
        // Tabular form needs at least one column; a headerless table reads
        // back as an empty array, losing the elements.
        let value = toon!([{}, {}]);
        let text = encode(&value);
        assert_eq!(text, "[2]: , ");
        assert!(!text.contains("[{"));
    }

    #[test]
    fn objects() {
        let value = toon!({"name": "Alice", "age": 30});
        assert_eq!(encode(&value), "age: 30\nname: Alice");
    }

    #[test]
    fn nested_object_indents() {
        let value = toon!({"outer": {"inner": 1, "other": true}});
        assert_eq!(encode(&value), "outer: \n  inner: 1\n  other: true");
    }

    #[test]
    fn array_inside_object() {
        let value = toon!({"tags": ["a", "b"], "n": 1});
        assert_eq!(encode(&value), "n: 1\ntags: [2]: a, b");
    }

    #[test]
    fn tabular_inside_object() {
        let value = toon!({"rows": [{"x": 1, "y": 2}, {"x": 3, "y": 4}]});
        assert_eq!(encode(&value), "rows: [{x, y}]:\n  1, 2\n  3, 4");
    }

    #[test]
    fn to_value_structs_and_enums() {
        use serde::Serialize;

        #[derive(Serialize)]
        struct Point {
            x: i32,
            y: i32,
        }

        #[derive(Serialize)]
        enum Shape {
            Dot,
            Circle { radius: f64 },
            Pair(i32, i32),
        }

        let point = crate::to_value(&Point { x: 1, y: 2 }).unwrap();
        assert_eq!(point, toon!({"x": 1, "y": 2}));

        assert_eq!(crate::to_value(&Shape::Dot).unwrap(), toon!("Dot"));
        assert_eq!(
            crate::to_value(&Shape::Circle { radius: 2.5 }).unwrap(),
            toon!({"Circle": {"radius": 2.5}})
        );
        assert_eq!(
            crate::to_value(&Shape::Pair(1, 2)).unwrap(),
            toon!({"Pair": [1, 2]})
        );
        assert_eq!(crate::to_value(&Some(5)).unwrap(), toon!(5));
        assert_eq!(crate::to_value(&Option::<i32>::None).unwrap(), Value::Null);
    }
}
