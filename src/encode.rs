//! TOON encoding: value tree to text.
//!
//! The encoder walks a [`Value`] and chooses one of three shapes for each
//! array it meets:
//!
//! - **Inline** when every element is a primitive: `tags[3]: admin,ops,dev`
//! - **Tabular** when every element is an object with the same keys in the
//!   same order and primitive leaves:
//!   `items[2]{sku,qty}:` followed by one row per record
//! - **Expanded list** otherwise: one `- item` line per element
//!
//! Output never ends with a newline and never contains exponent notation.
//!
//! ## Examples
//!
//! ```rust
//! use toon_codec::{toon, encode, ToonOptions};
//!
//! let value = toon!({ "user": { "id": 123, "name": "Ada" } });
//! let text = encode(&value, &ToonOptions::new()).unwrap();
//! assert_eq!(text, "user:\n  id: 123\n  name: Ada");
//! ```

use crate::lexical::{push_key, push_number, push_string};
use crate::options::ToonOptions;
use crate::value::Value;
use crate::Result;

/// Encodes a value tree as TOON text.
///
/// The empty root object produces the empty string. Encoding never mutates
/// its input and is total over the value model.
///
/// # Errors
///
/// Reserved for future structural checks; no tree constructible through
/// [`Value`] currently fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn encode(value: &Value, options: &ToonOptions) -> Result<String> {
    let mut encoder = Encoder {
        out: String::with_capacity(256),
        options,
    };
    encoder.write_root(value);
    Ok(encoder.out)
}

struct Encoder<'a> {
    out: String,
    options: &'a ToonOptions,
}

impl Encoder<'_> {
    fn write_root(&mut self, value: &Value) {
        match value {
            Value::Object(map) => {
                for (i, (key, field)) in map.iter().enumerate() {
                    if i > 0 {
                        self.out.push('\n');
                    }
                    self.write_field(key, field, 0);
                }
            }
            Value::Array(items) => self.write_array(None, items, 0),
            primitive => self.write_primitive(primitive),
        }
    }

    fn indent(&mut self, depth: usize) {
        self.out.push_str(&" ".repeat(depth * self.options.indent));
    }

    fn write_fields(&mut self, map: &crate::ToonMap, depth: usize) {
        for (key, value) in map.iter() {
            self.out.push('\n');
            self.indent(depth);
            self.write_field(key, value, depth);
        }
    }

    /// Writes one `key: value` group. The caller has already indented;
    /// nested bodies indent one level past `depth`.
    fn write_field(&mut self, key: &str, value: &Value, depth: usize) {
        match value {
            Value::Array(items) => self.write_array(Some(key), items, depth),
            Value::Object(map) => {
                push_key(&mut self.out, key);
                self.out.push(':');
                self.write_fields(map, depth + 1);
            }
            primitive => {
                push_key(&mut self.out, key);
                self.out.push_str(": ");
                self.write_primitive(primitive);
            }
        }
    }

    fn write_header(&mut self, key: Option<&str>, count: usize, fields: Option<&[&str]>) {
        if let Some(key) = key {
            push_key(&mut self.out, key);
        }
        self.out.push('[');
        if self.options.length_marker {
            self.out.push('#');
        }
        self.out.push_str(&count.to_string());
        self.out.push_str(self.options.delimiter.header_suffix());
        self.out.push(']');
        if let Some(fields) = fields {
            self.out.push('{');
            for (i, field) in fields.iter().enumerate() {
                if i > 0 {
                    self.out.push(self.options.delimiter.as_char());
                }
                push_key(&mut self.out, field);
            }
            self.out.push('}');
        }
        self.out.push(':');
    }

    fn write_array(&mut self, key: Option<&str>, items: &[Value], depth: usize) {
        if items.is_empty() {
            self.write_header(key, 0, None);
            return;
        }
        if items.iter().all(Value::is_primitive) {
            self.write_header(key, items.len(), None);
            self.out.push(' ');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    self.out.push(self.options.delimiter.as_char());
                }
                self.write_primitive(item);
            }
            return;
        }
        if let Some(fields) = tabular_fields(items) {
            self.write_header(key, items.len(), Some(fields.as_slice()));
            for item in items {
                self.out.push('\n');
                self.indent(depth + 1);
                if let Value::Object(row) = item {
                    for (i, cell) in row.values().enumerate() {
                        if i > 0 {
                            self.out.push(self.options.delimiter.as_char());
                        }
                        self.write_primitive(cell);
                    }
                }
            }
            return;
        }
        self.write_header(key, items.len(), None);
        for item in items {
            self.out.push('\n');
            self.write_list_item(item, depth + 1);
        }
    }

    /// Writes one expanded-list item at `depth`. Object items put their
    /// first field on the hyphen line; the remaining fields follow at the
    /// same depth, distinguished from new items by the missing `- ` marker.
    fn write_list_item(&mut self, item: &Value, depth: usize) {
        self.indent(depth);
        match item {
            Value::Object(map) if map.is_empty() => {
                self.out.push('-');
            }
            Value::Object(map) => {
                self.out.push_str("- ");
                let mut entries = map.iter();
                if let Some((key, value)) = entries.next() {
                    self.write_field(key, value, depth);
                }
                for (key, value) in entries {
                    self.out.push('\n');
                    self.indent(depth);
                    self.write_field(key, value, depth);
                }
            }
            Value::Array(items) => {
                self.out.push_str("- ");
                self.write_array(None, items, depth);
            }
            primitive => {
                self.out.push_str("- ");
                self.write_primitive(primitive);
            }
        }
    }

    fn write_primitive(&mut self, value: &Value) {
        match value {
            Value::Null => self.out.push_str("null"),
            Value::Bool(true) => self.out.push_str("true"),
            Value::Bool(false) => self.out.push_str("false"),
            Value::Number(n) => push_number(&mut self.out, *n),
            Value::String(s) => push_string(&mut self.out, s, self.options.delimiter),
            // containers never reach here; shape selection routes them
            Value::Array(_) | Value::Object(_) => {}
        }
    }
}

/// Returns the shared field list when every element is an object with the
/// same keys in the same order and every leaf is a primitive.
///
/// Null leaves are primitives, so records with null cells still qualify.
fn tabular_fields(items: &[Value]) -> Option<Vec<&str>> {
    let first = match items.first() {
        Some(Value::Object(map)) if !map.is_empty() => map,
        _ => return None,
    };
    let fields: Vec<&str> = first.keys().map(String::as_str).collect();
    for item in items {
        let map = match item {
            Value::Object(map) => map,
            _ => return None,
        };
        if map.len() != fields.len() {
            return None;
        }
        for ((key, value), field) in map.iter().zip(&fields) {
            if key != field || !value.is_primitive() {
                return None;
            }
        }
    }
    Some(fields)
}
