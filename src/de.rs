//! TOON deserialization.
//!
//! The bottom layer is a recursive-descent [`Parser`] over a borrowed `&str`
//! that produces a [`Value`] tree. The grammar is indentation-sensitive:
//! nesting is inferred from each line's leading whitespace compared against
//! the indentation of the parent entry, never from absolute widths. The
//! parser is deliberately lenient about malformed structure (it degrades to a
//! best-effort partial tree) and strict about four lexical defects: truncated
//! input inside a token, unterminated quoted strings, unknown escapes, and
//! malformed `\uXXXX` escapes. The first such defect aborts the whole parse
//! via `?` propagation, so the surfaced error is always the earliest one.
//!
//! The top layer is [`ValueDeserializer`], a [`serde::Deserializer`] over an
//! owned `Value`, which lets [`crate::from_str`] target any `T: Deserialize`.

use crate::error::{Error, Result};
use crate::value::Number;
use crate::{Map, Value};
use serde::de::{self, IntoDeserializer, Visitor};
use serde::forward_to_deserialize_any;

/// Characters that terminate a bare string or an object key.
const fn is_structural(b: u8) -> bool {
    matches!(
        b,
        b',' | b':' | b'\n' | b'[' | b']' | b'{' | b'}' | b'#'
    )
}

/// Parses a complete TOON document into a [`Value`].
pub(crate) fn parse_str(input: &str) -> Result<Value> {
    let mut parser = Parser { input, pos: 0 };
    parser.skip_ws_and_comments();
    if parser.eof() {
        return Ok(Value::Null);
    }
    if parser.peek() == Some(b'[') {
        return parser.parse_value();
    }
    // A colon anywhere ahead means the document is a root object.
    if parser.input[parser.pos..].contains(':') {
        return parser.parse_object(None);
    }
    parser.parse_value()
}

struct Parser<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn eof(&self) -> bool {
        self.pos >= self.input.len()
    }

    fn peek(&self) -> Option<u8> {
        self.input.as_bytes().get(self.pos).copied()
    }

    fn bump(&mut self) {
        self.pos += 1;
    }

    fn next_char(&mut self) -> Option<char> {
        let c = self.input[self.pos..].chars().next()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    /// 1-based line and column of the current cursor, for error reporting.
    fn location(&self) -> (usize, usize) {
        let before = &self.input[..self.pos];
        let line = before.matches('\n').count() + 1;
        let column = self.pos - before.rfind('\n').map_or(0, |i| i + 1) + 1;
        (line, column)
    }

    fn eof_error(&self) -> Error {
        let (line, column) = self.location();
        Error::UnexpectedEof { line, column }
    }

    /// Skips horizontal whitespace only. Newlines stay put; they are
    /// structural.
    fn skip_inline_ws(&mut self) {
        while matches!(self.peek(), Some(b' ' | b'\r' | b'\t')) {
            self.bump();
        }
    }

    /// Skips whitespace, newlines, and `#` comments. Only legal at
    /// structural boundaries, where a line break carries no meaning yet.
    fn skip_ws_and_comments(&mut self) {
        loop {
            match self.peek() {
                Some(b' ' | b'\r' | b'\t' | b'\n') => self.bump(),
                Some(b'#') => {
                    while !self.eof() && self.peek() != Some(b'\n') {
                        self.bump();
                    }
                }
                _ => return,
            }
        }
    }

    /// Indentation of the line the cursor sits on: spaces weigh 1, tabs 8.
    /// Only ever compared relatively against a parent's indentation.
    fn current_indent(&self) -> usize {
        let bytes = self.input.as_bytes();
        let mut start = self.pos;
        while start > 0 && bytes[start - 1] != b'\n' {
            start -= 1;
        }
        bytes[start..self.pos]
            .iter()
            .map(|b| match b {
                b' ' => 1,
                b'\t' => 8,
                _ => 0,
            })
            .sum()
    }

    fn parse_value(&mut self) -> Result<Value> {
        match self.peek() {
            None => Err(self.eof_error()),
            Some(b'"') => self.parse_quoted(),
            Some(b'[') => self.parse_array(None),
            Some(_) if self.input[self.pos..].starts_with("null") => {
                self.pos += 4;
                Ok(Value::Null)
            }
            Some(_) if self.input[self.pos..].starts_with("true") => {
                self.pos += 4;
                Ok(Value::Bool(true))
            }
            Some(_) if self.input[self.pos..].starts_with("false") => {
                self.pos += 5;
                Ok(Value::Bool(false))
            }
            Some(b) if b.is_ascii_digit() || b == b'-' => Ok(self.parse_number()),
            Some(_) => Ok(self.parse_bare()),
        }
    }

    /// Bare string: everything up to a structural character, with trailing
    /// horizontal whitespace trimmed. May be empty.
    fn parse_bare(&mut self) -> Value {
        let start = self.pos;
        while let Some(b) = self.peek() {
            if is_structural(b) {
                break;
            }
            self.bump();
        }
        let text = self.input[start..self.pos].trim_end_matches([' ', '\t', '\r']);
        Value::String(text.to_string())
    }

    /// Number scan. Never fails: an unparseable token degrades through the
    /// longest valid prefix down to 0.
    fn parse_number(&mut self) -> Value {
        let start = self.pos;
        while let Some(b) = self.peek() {
            if b.is_ascii_digit() || matches!(b, b'.' | b'e' | b'E' | b'-') {
                self.bump();
            } else {
                break;
            }
        }
        let token = &self.input[start..self.pos];
        if !token.contains(['.', 'e', 'E']) {
            if let Ok(i) = token.parse::<i64>() {
                return Value::Number(Number::Integer(i));
            }
        }
        if let Ok(f) = token.parse::<f64>() {
            return Value::Number(Number::Float(f));
        }
        for end in (1..token.len()).rev() {
            if let Ok(f) = token[..end].parse::<f64>() {
                return Value::Number(Number::Float(f));
            }
        }
        Value::Number(Number::Float(0.0))
    }

    fn parse_quoted(&mut self) -> Result<Value> {
        self.bump();
        let mut out = String::new();
        loop {
            let Some(c) = self.next_char() else {
                let (line, column) = self.location();
                return Err(Error::UnterminatedString { line, column });
            };
            match c {
                '"' => return Ok(Value::String(out)),
                '\\' => {
                    let Some(esc) = self.next_char() else {
                        return Err(self.eof_error());
                    };
                    match esc {
                        '\\' => out.push('\\'),
                        '"' => out.push('"'),
                        'b' => out.push('\u{8}'),
                        'f' => out.push('\u{c}'),
                        'n' => out.push('\n'),
                        'r' => out.push('\r'),
                        't' => out.push('\t'),
                        'u' => out.push(self.parse_unicode_escape()?),
                        other => {
                            let (line, column) = self.location();
                            return Err(Error::InvalidEscape {
                                found: other,
                                line,
                                column,
                            });
                        }
                    }
                }
                c => out.push(c),
            }
        }
    }

    /// Four hex digits after `\u`. Surrogates and noncharacters are replaced
    /// with U+FFFD rather than rejected.
    fn parse_unicode_escape(&mut self) -> Result<char> {
        let start = self.pos;
        // get() also rejects a slice that would split a multibyte character.
        let digits = self.input.get(start..start + 4).unwrap_or("");
        if !(digits.len() == 4 && digits.bytes().all(|b| b.is_ascii_hexdigit())) {
            let (line, column) = self.location();
            return Err(Error::InvalidUnicodeEscape { line, column });
        }
        let Ok(cp) = u32::from_str_radix(digits, 16) else {
            let (line, column) = self.location();
            return Err(Error::InvalidUnicodeEscape { line, column });
        };
        self.pos += 4;
        let replaced = (0xD800..=0xDFFF).contains(&cp)
            || (0xFDD0..=0xFDEF).contains(&cp)
            || (cp & 0xFFFE) == 0xFFFE;
        if replaced {
            return Ok('\u{FFFD}');
        }
        Ok(char::from_u32(cp).unwrap_or('\u{FFFD}'))
    }

    /// Array parse, cursor on `[`. `parent_indent` bounds the rows of a
    /// tabular body; `None` means the array is the document root and rows run
    /// to end of input.
    fn parse_array(&mut self, parent_indent: Option<usize>) -> Result<Value> {
        self.bump();
        if self.peek() == Some(b'{') {
            return self.parse_tabular(parent_indent);
        }

        let digits_start = self.pos;
        while self.peek().is_some_and(|b| b.is_ascii_digit()) {
            self.bump();
        }
        let count: Option<usize> = self.input[digits_start..self.pos].parse().ok();

        self.skip_past_bracket();

        let mut elements = Vec::new();
        loop {
            if let Some(n) = count {
                if elements.len() >= n {
                    break;
                }
            }
            self.skip_ws_and_comments();
            if self.eof() {
                break;
            }
            elements.push(self.parse_value()?);
            self.skip_inline_ws();
            if self.peek() == Some(b',') {
                self.bump();
            } else if count.is_none() {
                break;
            }
        }
        Ok(Value::Array(elements))
    }

    /// Tabular body, cursor on `{`. Each row supplies one value per header
    /// key; a row that runs out of values is discarded and ends the body.
    fn parse_tabular(&mut self, parent_indent: Option<usize>) -> Result<Value> {
        self.bump();
        let keys_start = self.pos;
        while !self.eof() && self.peek() != Some(b'}') {
            self.bump();
        }
        let raw = &self.input[keys_start..self.pos];
        if self.peek() == Some(b'}') {
            self.bump();
        }
        let keys: Vec<String> = if raw.trim().is_empty() {
            Vec::new()
        } else {
            raw.split(',').map(|k| k.trim().to_string()).collect()
        };

        self.skip_past_bracket();

        // A headerless table has no row shape to fill; stop before the row
        // loop can spin without consuming input.
        if keys.is_empty() {
            return Ok(Value::Array(Vec::new()));
        }

        let mut rows = Vec::new();
        'rows: loop {
            self.skip_ws_and_comments();
            if self.eof() {
                break;
            }
            if let Some(parent) = parent_indent {
                if self.current_indent() <= parent {
                    break;
                }
            }
            let row_start = self.pos;
            let mut row = Map::with_capacity(keys.len());
            for key in &keys {
                self.skip_inline_ws();
                if self.eof() || self.peek() == Some(b'\n') {
                    break 'rows;
                }
                row.insert(key.clone(), self.parse_value()?);
                self.skip_inline_ws();
                // A comma is consumed after every column, including the
                // last, so a trailing comma never leaks into the next row.
                if self.peek() == Some(b',') {
                    self.bump();
                }
            }
            rows.push(Value::Object(row));
            if self.pos == row_start {
                break;
            }
        }
        Ok(Value::Array(rows))
    }

    /// Lenient recovery to the end of an array header: skip anything up to
    /// and past `]`, then past an optional `:`.
    fn skip_past_bracket(&mut self) {
        while !self.eof() && self.peek() != Some(b']') {
            self.bump();
        }
        if self.peek() == Some(b']') {
            self.bump();
        }
        self.skip_inline_ws();
        if self.peek() == Some(b':') {
            self.bump();
        }
    }

    /// Object parse. Each entry is `key: value`; the key is raw text up to
    /// the next `:`. Once the object has at least one entry, a line indented
    /// at or below `parent_indent` belongs to an ancestor and ends the
    /// object, leaving the cursor on that line's first token.
    fn parse_object(&mut self, parent_indent: Option<usize>) -> Result<Value> {
        let mut entries = Map::new();
        loop {
            self.skip_ws_and_comments();
            if self.eof() {
                break;
            }
            let indent = self.current_indent();
            if !entries.is_empty() {
                if let Some(parent) = parent_indent {
                    if indent <= parent {
                        break;
                    }
                }
            }

            let key_start = self.pos;
            while !self.eof() && self.peek() != Some(b':') {
                self.bump();
            }
            if self.eof() {
                // Trailing text with no colon is not an entry.
                break;
            }
            let key = self.input[key_start..self.pos].to_string();
            self.bump();
            self.skip_inline_ws();

            let value = match self.peek() {
                // A key demands a value; running out of input here is fatal.
                None => return Err(self.eof_error()),
                Some(b'\n') => {
                    self.skip_ws_and_comments();
                    if self.eof() {
                        entries.insert(key, Value::Object(Map::new()));
                        break;
                    }
                    if self.peek() == Some(b'[') {
                        self.parse_array(Some(indent))?
                    } else {
                        self.parse_object(Some(indent))?
                    }
                }
                Some(b'[') => self.parse_array(Some(indent))?,
                _ => self.parse_value()?,
            };
            entries.insert(key, value);
        }
        Ok(Value::Object(entries))
    }
}

/// Deserializer driving any `T: Deserialize` from an owned [`Value`].
///
/// [`crate::from_str`] parses text into a `Value` first and then runs this
/// over the finished tree, so serde never sees the surface syntax.
pub struct ValueDeserializer {
    value: Value,
}

impl ValueDeserializer {
    /// Wraps a value for deserialization.
    pub fn new(value: Value) -> Self {
        ValueDeserializer { value }
    }
}

impl<'de> de::Deserializer<'de> for ValueDeserializer {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        match self.value {
            Value::Null => visitor.visit_unit(),
            Value::Number(Number::Integer(i)) => visitor.visit_i64(i),
            Value::Number(Number::Float(f)) => visitor.visit_f64(f),
            Value::Bool(b) => visitor.visit_bool(b),
            Value::String(s) => visitor.visit_string(s),
            Value::Array(elements) => visitor.visit_seq(SeqDeserializer {
                iter: elements.into_iter(),
            }),
            Value::Object(entries) => visitor.visit_map(MapDeserializer {
                iter: entries.into_iter(),
                value: None,
            }),
        }
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        match self.value {
            Value::Null => visitor.visit_none(),
            _ => visitor.visit_some(self),
        }
    }

    fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_enum<V>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        match self.value {
            Value::String(s) => visitor.visit_enum(s.into_deserializer()),
            Value::Object(entries) => {
                let mut iter = entries.into_iter();
                let Some((variant, value)) = iter.next() else {
                    return Err(Error::custom("expected an object with a single key"));
                };
                if iter.next().is_some() {
                    return Err(Error::custom("expected an object with a single key"));
                }
                visitor.visit_enum(EnumDeserializer { variant, value })
            }
            other => Err(Error::custom(format!(
                "expected a string or object for an enum, found {:?}",
                other.value_type()
            ))),
        }
    }

    forward_to_deserialize_any! {
        bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64 char str string
        bytes byte_buf unit unit_struct seq tuple tuple_struct map struct
        identifier ignored_any
    }
}

struct SeqDeserializer {
    iter: std::vec::IntoIter<Value>,
}

impl<'de> de::SeqAccess<'de> for SeqDeserializer {
    type Error = Error;

    fn next_element_seed<T>(&mut self, seed: T) -> Result<Option<T::Value>>
    where
        T: de::DeserializeSeed<'de>,
    {
        match self.iter.next() {
            Some(value) => seed.deserialize(ValueDeserializer::new(value)).map(Some),
            None => Ok(None),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.iter.len())
    }
}

struct MapDeserializer {
    iter: indexmap::map::IntoIter<String, Value>,
    value: Option<Value>,
}

impl<'de> de::MapAccess<'de> for MapDeserializer {
    type Error = Error;

    fn next_key_seed<K>(&mut self, seed: K) -> Result<Option<K::Value>>
    where
        K: de::DeserializeSeed<'de>,
    {
        match self.iter.next() {
            Some((key, value)) => {
                self.value = Some(value);
                seed.deserialize(ValueDeserializer::new(Value::String(key)))
                    .map(Some)
            }
            None => Ok(None),
        }
    }

    fn next_value_seed<V>(&mut self, seed: V) -> Result<V::Value>
    where
        V: de::DeserializeSeed<'de>,
    {
        let value = self
            .value
            .take()
            .ok_or_else(|| Error::custom("value requested before key"))?;
        seed.deserialize(ValueDeserializer::new(value))
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.iter.len())
    }
}

struct EnumDeserializer {
    variant: String,
    value: Value,
}

impl<'de> de::EnumAccess<'de> for EnumDeserializer {
    type Error = Error;
    type Variant = VariantDeserializer;

    fn variant_seed<V>(self, seed: V) -> Result<(V::Value, Self::Variant)>
    where
        V: de::DeserializeSeed<'de>,
    {
        let variant = seed.deserialize(ValueDeserializer::new(Value::String(self.variant)))?;
        Ok((variant, VariantDeserializer { value: self.value }))
    }
}

struct VariantDeserializer {
    value: Value,
}

impl<'de> de::VariantAccess<'de> for VariantDeserializer {
    type Error = Error;

    fn unit_variant(self) -> Result<()> {
        match self.value {
            Value::Null => Ok(()),
            _ => Err(Error::custom("expected no payload for a unit variant")),
        }
    }

    fn newtype_variant_seed<T>(self, seed: T) -> Result<T::Value>
    where
        T: de::DeserializeSeed<'de>,
    {
        seed.deserialize(ValueDeserializer::new(self.value))
    }

    fn tuple_variant<V>(self, _len: usize, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        de::Deserializer::deserialize_any(ValueDeserializer::new(self.value), visitor)
    }

    fn struct_variant<V>(
        self,
        _fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        de::Deserializer::deserialize_any(ValueDeserializer::new(self.value), visitor)
    }
}
