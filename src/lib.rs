//! # toon
//!
//! Encoder and decoder for TOON (Token-Oriented Object Notation), a compact
//! indentation-based data format designed for efficient communication with
//! Large Language Models.
//!
//! ## What is TOON?
//!
//! TOON carries the same value model as JSON (null, numbers, booleans,
//! strings, arrays, objects) in a line-oriented surface syntax that spends far
//! fewer tokens. Nesting comes from indentation instead of braces, strings
//! stay unquoted unless they would be ambiguous, and arrays of uniform
//! objects collapse into a shared header plus one row per element:
//!
//! ```text
//! [{id, name, price}]:
//!   1, Widget, 9.99
//!   2, Gadget, 14.99
//! ```
//!
//! ## Key Features
//!
//! - **Token-Efficient**: bare strings, no braces, one `key: value` per line
//! - **Tabular Arrays**: homogeneous object arrays serialize as tables
//! - **Serde Compatible**: works with `#[derive(Serialize, Deserialize)]`
//! - **Lenient Decoding**: malformed structure degrades to a best-effort
//!   partial tree instead of failing; only lexical defects (unterminated or
//!   badly escaped strings, truncated input) are errors
//! - **No Unsafe Code**: written entirely in safe Rust
//!
//! ## Quick Start
//!
//! ```rust
//! use serde::{Deserialize, Serialize};
//! use toon::{from_str, to_string};
//!
//! #[derive(Serialize, Deserialize, PartialEq, Debug)]
//! struct User {
//!     id: u32,
//!     name: String,
//!     active: bool,
//! }
//!
//! let user = User {
//!     id: 123,
//!     name: "Alice".to_string(),
//!     active: true,
//! };
//!
//! let text = to_string(&user).unwrap();
//! assert_eq!(text, "active: true\nid: 123\nname: Alice");
//!
//! let back: User = from_str(&text).unwrap();
//! assert_eq!(user, back);
//! ```
//!
//! Object keys always serialize in sorted order, so output is deterministic
//! regardless of field declaration or insertion order.
//!
//! ## Tabular Arrays
//!
//! ```rust
//! use serde::Serialize;
//! use toon::to_string;
//!
//! #[derive(Serialize)]
//! struct Product {
//!     id: u32,
//!     name: String,
//!     price: f64,
//! }
//!
//! let products = vec![
//!     Product { id: 1, name: "Widget".to_string(), price: 9.99 },
//!     Product { id: 2, name: "Gadget".to_string(), price: 14.99 },
//! ];
//!
//! let text = to_string(&products).unwrap();
//! assert_eq!(text, "[{id, name, price}]:\n  1, Widget, 9.99\n  2, Gadget, 14.99");
//! ```
//!
//! ## Dynamic Values
//!
//! When the shape of the data is not known at compile time, [`parse`] yields
//! a [`Value`] tree and the [`toon!`] macro builds one from a literal:
//!
//! ```rust
//! use toon::{parse, toon};
//!
//! let doc = parse("name: Alice\nage: 30\n").unwrap();
//! assert_eq!(doc["name"].string(), "Alice");
//! assert_eq!(doc["age"].integer(), 30);
//!
//! let built = toon!({"age": 30, "name": "Alice"});
//! assert_eq!(doc, built);
//! ```
//!
//! Accessors on `Value` never fail: getters return neutral defaults on a
//! variant mismatch and indexing returns a null sentinel on any miss.

pub mod de;
pub mod error;
pub mod macros;
pub mod map;
pub mod options;
pub mod ser;
pub mod value;

pub use de::ValueDeserializer;
pub use error::{Error, Result};
pub use map::Map;
pub use options::EncodeOptions;
pub use ser::ValueSerializer;
pub use value::{Number, Type, Value};

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io;

/// Parse a string of TOON text into a [`Value`] tree.
///
/// Empty or comment-only input yields `Value::Null`. Structural
/// malformations degrade to a partial tree; only lexical defects error.
///
/// # Examples
///
/// ```rust
/// use toon::parse;
///
/// let doc = parse("name: Alice\nscores: [3]: 1, 2, 3").unwrap();
/// assert_eq!(doc["scores"][2].integer(), 3);
/// ```
///
/// # Errors
///
/// Returns an error for truncated input inside a token, an unterminated
/// quoted string, or an invalid escape sequence, with line and column.
pub fn parse(s: &str) -> Result<Value> {
    de::parse_str(s)
}

/// Serialize any `T: Serialize` to a TOON string.
///
/// # Examples
///
/// ```rust
/// use serde::Serialize;
/// use toon::to_string;
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// let text = to_string(&Point { x: 1, y: 2 }).unwrap();
/// assert_eq!(text, "x: 1\ny: 2");
/// ```
///
/// # Errors
///
/// Returns an error if the value cannot be represented as TOON (for
/// example, a map with a non-scalar key).
pub fn to_string<T>(value: &T) -> Result<String>
where
    T: ?Sized + Serialize,
{
    to_string_with_options(value, EncodeOptions::default())
}

/// Serialize any `T: Serialize` to a TOON string with custom layout options.
///
/// # Examples
///
/// ```rust
/// use toon::{to_string_with_options, toon, EncodeOptions};
///
/// let doc = toon!({"a": {"b": 1}});
/// let text = to_string_with_options(&doc, EncodeOptions::new().with_indent(4)).unwrap();
/// assert_eq!(text, "a: \n    b: 1");
/// ```
///
/// # Errors
///
/// Returns an error if the value cannot be represented as TOON.
pub fn to_string_with_options<T>(value: &T, options: EncodeOptions) -> Result<String>
where
    T: ?Sized + Serialize,
{
    let value = to_value(value)?;
    let mut out = String::with_capacity(128);
    ser::encode_value(&mut out, &value, 0, options.indent);
    Ok(out)
}

/// Convert any `T: Serialize` to a [`Value`].
///
/// # Examples
///
/// ```rust
/// use serde::Serialize;
/// use toon::to_value;
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// let value = to_value(&Point { x: 1, y: 2 }).unwrap();
/// assert!(value.is_object());
/// assert_eq!(value["x"].integer(), 1);
/// ```
///
/// # Errors
///
/// Returns an error if the value cannot be represented as TOON.
pub fn to_value<T>(value: &T) -> Result<Value>
where
    T: ?Sized + Serialize,
{
    value.serialize(ValueSerializer)
}

/// Serialize any `T: Serialize` to a writer in TOON format.
///
/// # Examples
///
/// ```rust
/// use serde::Serialize;
/// use toon::to_writer;
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// let mut buffer = Vec::new();
/// to_writer(&mut buffer, &Point { x: 1, y: 2 }).unwrap();
/// assert_eq!(buffer, b"x: 1\ny: 2");
/// ```
///
/// # Errors
///
/// Returns an error if serialization fails or the writer reports a failure.
pub fn to_writer<W, T>(writer: W, value: &T) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    to_writer_with_options(writer, value, EncodeOptions::default())
}

/// Serialize any `T: Serialize` to a writer with custom layout options.
///
/// # Errors
///
/// Returns an error if serialization fails or the writer reports a failure.
pub fn to_writer_with_options<W, T>(mut writer: W, value: &T, options: EncodeOptions) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    let text = to_string_with_options(value, options)?;
    writer.write_all(text.as_bytes()).map_err(Error::io)?;
    Ok(())
}

/// Deserialize an instance of type `T` from a string of TOON text.
///
/// # Examples
///
/// ```rust
/// use serde::Deserialize;
/// use toon::from_str;
///
/// #[derive(Deserialize, PartialEq, Debug)]
/// struct Point { x: i32, y: i32 }
///
/// let point: Point = from_str("x: 1\ny: 2").unwrap();
/// assert_eq!(point, Point { x: 1, y: 2 });
/// ```
///
/// # Errors
///
/// Returns an error if the input has a lexical defect or the parsed tree
/// cannot be deserialized into `T`.
pub fn from_str<T>(s: &str) -> Result<T>
where
    T: DeserializeOwned,
{
    let value = parse(s)?;
    T::deserialize(ValueDeserializer::new(value))
}

/// Deserialize an instance of type `T` from bytes of TOON text.
///
/// # Errors
///
/// Returns an error if the bytes are not valid UTF-8, the input has a
/// lexical defect, or the parsed tree cannot be deserialized into `T`.
pub fn from_slice<T>(v: &[u8]) -> Result<T>
where
    T: DeserializeOwned,
{
    let s = std::str::from_utf8(v).map_err(Error::custom)?;
    from_str(s)
}

/// Deserialize an instance of type `T` from an I/O stream of TOON.
///
/// # Examples
///
/// ```rust
/// use serde::Deserialize;
/// use std::io::Cursor;
/// use toon::from_reader;
///
/// #[derive(Deserialize, PartialEq, Debug)]
/// struct Point { x: i32, y: i32 }
///
/// let point: Point = from_reader(Cursor::new(b"x: 1\ny: 2")).unwrap();
/// assert_eq!(point, Point { x: 1, y: 2 });
/// ```
///
/// # Errors
///
/// Returns an error if reading fails, the input has a lexical defect, or the
/// parsed tree cannot be deserialized into `T`.
pub fn from_reader<R, T>(mut reader: R) -> Result<T>
where
    R: io::Read,
    T: DeserializeOwned,
{
    let mut string = String::new();
    reader.read_to_string(&mut string).map_err(Error::io)?;
    from_str(&string)
}
