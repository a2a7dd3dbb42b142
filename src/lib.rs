//! # toon_codec
//!
//! A bidirectional codec for TOON (Token-Oriented Object Notation), a
//! line-oriented, indentation-sensitive text format that encodes
//! JSON-equivalent trees with far fewer tokens — built for feeding
//! structured data to Large Language Models without JSON's syntactic
//! overhead.
//!
//! ## What is TOON?
//!
//! TOON drops braces, brackets, and most quotes in favor of indentation and
//! per-array headers:
//!
//! ```text
//! user:
//!   id: 123
//!   name: Ada
//! tags[3]: admin,ops,dev
//! items[2]{sku,qty,price}:
//!   A1,2,9.99
//!   B2,1,14.5
//! ```
//!
//! Arrays declare their length up front (`[3]`) and pick one of three
//! shapes: **inline** for primitives, **tabular** for uniform records, and
//! an **expanded list** of `- item` lines for everything else.
//!
//! ## Key Features
//!
//! - **Tree codec core**: [`encode`] and [`decode`] convert between
//!   [`Value`] trees and TOON text
//! - **Serde compatible**: [`to_string`] and [`from_str`] work with any
//!   `#[derive(Serialize, Deserialize)]` type
//! - **Strict by default**: declared counts, indentation, and row widths are
//!   validated; a lax mode accepts best-effort input
//! - **Configurable**: indent width, comma/tab/pipe delimiters, and an
//!   optional `#` length marker via [`ToonOptions`]
//!
//! ## Quick Start
//!
//! ```rust
//! use serde::{Deserialize, Serialize};
//! use toon_codec::{from_str, to_string};
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
//!     name: "Ada".to_string(),
//!     active: true,
//! };
//!
//! let text = to_string(&user).unwrap();
//! assert_eq!(text, "id: 123\nname: Ada\nactive: true");
//!
//! let back: User = from_str(&text).unwrap();
//! assert_eq!(user, back);
//! ```
//!
//! ## Dynamic Values with the toon! Macro
//!
//! ```rust
//! use toon_codec::{toon, encode, ToonOptions};
//!
//! let data = toon!({
//!     "tags": ["rust", "serde", "llm"]
//! });
//!
//! let text = encode(&data, &ToonOptions::new()).unwrap();
//! assert_eq!(text, "tags[3]: rust,serde,llm");
//! ```
//!
//! ## Number Model
//!
//! All numbers are IEEE-754 doubles. `-0` folds to `0`, NaN and infinities
//! encode as `null`, and encoded output never uses exponent notation.
//! Numeric-looking strings (`"42"`, `"05"`) are quoted on encode and stay
//! strings on decode.

pub mod de;
pub mod decode;
pub mod encode;
pub mod error;
pub mod format;
pub mod lexical;
mod macros;
pub mod map;
pub mod options;
pub mod ser;
pub mod value;

pub use de::ValueDeserializer;
pub use decode::decode;
pub use encode::encode;
pub use error::{Error, Result};
pub use map::ToonMap;
pub use options::{Delimiter, ToonOptions};
pub use ser::ToonValueSerializer;
pub use value::Value;

use serde::{Deserialize, Serialize};
use std::io;

/// Serializes any `T: Serialize` to a TOON string with default options.
///
/// # Errors
///
/// Returns an error if the value cannot be represented (e.g. a map with
/// non-string keys).
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string<T>(value: &T) -> Result<String>
where
    T: ?Sized + Serialize,
{
    to_string_with_options(value, ToonOptions::default())
}

/// Serializes any `T: Serialize` to a TOON string with custom options.
///
/// # Examples
///
/// ```rust
/// use toon_codec::{to_string_with_options, Delimiter, ToonOptions};
///
/// let options = ToonOptions::new().with_delimiter(Delimiter::Pipe);
/// let text = to_string_with_options(&vec![1, 2, 3], options).unwrap();
/// assert_eq!(text, "[3|]: 1|2|3");
/// ```
///
/// # Errors
///
/// Returns an error if the value cannot be represented.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_with_options<T>(value: &T, options: ToonOptions) -> Result<String>
where
    T: ?Sized + Serialize,
{
    let tree = to_value(value)?;
    encode(&tree, &options)
}

/// Converts any `T: Serialize` into a [`Value`] tree.
///
/// # Errors
///
/// Returns an error if the value cannot be represented.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_value<T>(value: &T) -> Result<Value>
where
    T: ?Sized + Serialize,
{
    value.serialize(ToonValueSerializer)
}

/// Deserializes a [`Value`] tree into any `T: Deserialize`.
///
/// # Errors
///
/// Returns an error when the tree does not match the target type.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_value<T>(value: Value) -> Result<T>
where
    T: for<'de> Deserialize<'de>,
{
    T::deserialize(ValueDeserializer::new(value))
}

/// Serializes any `T: Serialize` to a writer in TOON format.
///
/// # Errors
///
/// Returns an error if serialization fails or writing fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer<W, T>(writer: W, value: &T) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    to_writer_with_options(writer, value, ToonOptions::default())
}

/// Serializes any `T: Serialize` to a writer with custom options.
///
/// # Errors
///
/// Returns an error if serialization fails or writing fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer_with_options<W, T>(mut writer: W, value: &T, options: ToonOptions) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    let text = to_string_with_options(value, options)?;
    writer
        .write_all(text.as_bytes())
        .map_err(|e| Error::io(&e.to_string()))?;
    Ok(())
}

/// Deserializes an instance of type `T` from TOON text with default
/// (strict) options.
///
/// # Examples
///
/// ```rust
/// use toon_codec::from_str;
///
/// let nums: Vec<i32> = from_str("[3]: 1,2,3").unwrap();
/// assert_eq!(nums, vec![1, 2, 3]);
/// ```
///
/// # Errors
///
/// Returns an error if the input is not valid TOON or cannot be
/// deserialized to `T`. Decode errors carry 1-based line numbers.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str<T>(s: &str) -> Result<T>
where
    T: for<'de> Deserialize<'de>,
{
    from_str_with_options(s, ToonOptions::default())
}

/// Deserializes an instance of type `T` from TOON text with custom options.
///
/// # Errors
///
/// Returns an error if the input is not valid TOON or cannot be
/// deserialized to `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str_with_options<T>(s: &str, options: ToonOptions) -> Result<T>
where
    T: for<'de> Deserialize<'de>,
{
    let tree = decode(s, &options)?;
    from_value(tree)
}

/// Deserializes an instance of type `T` from TOON bytes.
///
/// # Errors
///
/// Returns an error if the bytes are not valid UTF-8 or not valid TOON.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_slice<T>(v: &[u8]) -> Result<T>
where
    T: for<'de> Deserialize<'de>,
{
    let s = std::str::from_utf8(v).map_err(|e| Error::custom(e.to_string()))?;
    from_str(s)
}

/// Deserializes an instance of type `T` from an I/O stream of TOON text.
///
/// # Errors
///
/// Returns an error if reading fails or the input is not valid TOON.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_reader<R, T>(mut reader: R) -> Result<T>
where
    R: io::Read,
    T: for<'de> Deserialize<'de>,
{
    let mut string = String::new();
    reader
        .read_to_string(&mut string)
        .map_err(|e| Error::io(&e.to_string()))?;
    from_str(&string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::toon;
    use serde::{Deserialize, Serialize};

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Point {
        x: i32,
        y: i32,
    }

    #[test]
    fn point_round_trip() {
        let point = Point { x: 1, y: -2 };
        let text = to_string(&point).unwrap();
        assert_eq!(text, "x: 1\ny: -2");
        let back: Point = from_str(&text).unwrap();
        assert_eq!(point, back);
    }

    #[test]
    fn to_value_builds_a_tree() {
        let value = to_value(&Point { x: 1, y: 2 }).unwrap();
        assert_eq!(value["x"], Value::Number(1.0));
        assert_eq!(value["y"], Value::Number(2.0));
    }

    #[test]
    fn from_value_reads_a_tree() {
        let value = toon!({ "x": 3, "y": 4 });
        let point: Point = from_value(value).unwrap();
        assert_eq!(point, Point { x: 3, y: 4 });
    }

    #[test]
    fn writer_and_slice_round_trip() {
        let point = Point { x: 7, y: 8 };
        let mut buffer = Vec::new();
        to_writer(&mut buffer, &point).unwrap();
        let back: Point = from_slice(&buffer).unwrap();
        assert_eq!(point, back);
    }

    #[test]
    fn reader_round_trip() {
        use std::io::Cursor;
        let cursor = Cursor::new(b"x: 1\ny: 2");
        let point: Point = from_reader(cursor).unwrap();
        assert_eq!(point, Point { x: 1, y: 2 });
    }
}
