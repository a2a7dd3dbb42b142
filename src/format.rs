//! The TOON wire format as implemented by this crate.
//!
//! TOON is a line-oriented, indentation-sensitive encoding of the JSON value
//! model (null, boolean, number, string, array, object). This module
//! documents the grammar; it contains no code.
//!
//! # Documents
//!
//! A document is one of: empty, a single primitive, an object, or a root
//! array. Lines are LF-separated with no trailing LF at the end of the
//! document. CRLF input is accepted (the CR is stripped).
//!
//! ```text
//! document := empty | primitive | object | root-array
//! ```
//!
//! # Objects
//!
//! Objects are newline-delimited `key: value` pairs. Nested objects indent
//! one level (default 2 spaces per level):
//!
//! ```text
//! name: Ada
//! profile:
//!   bio: mathematician
//!   active: true
//! ```
//!
//! Keys matching `[A-Za-z_][A-Za-z0-9_.]*` are written bare; any other key
//! is double-quoted, e.g. `"user-id"`, `"2nd"`, `""`. Field order is
//! preserved, and a key may not repeat within one object.
//!
//! An empty object is a key line with nothing after the colon and no deeper
//! lines beneath it.
//!
//! # Primitives
//!
//! | Type | Syntax | Example |
//! |------|--------|---------|
//! | Null | `null` | `value: null` |
//! | Boolean | `true` / `false` | `active: true` |
//! | Number | plain decimal, optional `-` | `price: 9.99` |
//! | String | unquoted or `"quoted"` | `name: Ada` |
//!
//! Numbers decode from `-?(0|[1-9][0-9]*)(\.[0-9]+)?([eE][+-]?[0-9]+)?`;
//! the encoder never emits exponent form. A leading-zero integer part
//! (`05`, `-007`) is not a number and stays a string.
//!
//! Strings are unquoted unless they would be ambiguous. Quoting is required
//! when a string:
//!
//! - is empty, or starts or ends with whitespace
//! - equals `true`, `false`, or `null`
//! - starts with `-` or looks like a number
//! - contains `:`, `"`, `\`, `[`, `]`, `{`, `}`, LF, CR, TAB, or the
//!   active delimiter
//!
//! Inside quotes the escapes `\\ \" \n \r \t` are recognized; everything
//! else passes through verbatim.
//!
//! # Arrays
//!
//! Every array declares its length in a header. The optional `#` marker
//! (`[#3]`) is cosmetic. A non-comma delimiter is declared after the count:
//! `[3\t]` for tab, `[3|]` for pipe.
//!
//! **Inline** — all elements primitive:
//!
//! ```text
//! tags[3]: admin,ops,dev
//! ```
//!
//! **Tabular** — uniform objects with primitive fields; the header lists
//! the field names and each record becomes one row:
//!
//! ```text
//! items[2]{sku,qty,price}:
//!   A1,2,9.99
//!   B2,1,14.5
//! ```
//!
//! **Expanded list** — everything else; one `- item` line per element. An
//! object item puts its first field on the hyphen line and its remaining
//! fields on following lines at the same depth:
//!
//! ```text
//! mixed[3]:
//!   - 1
//!   - name: Ada
//!   role: admin
//!   - [2]: 2,3
//! ```
//!
//! The empty array is just its header: `tags[0]:`.
//!
//! # Strict mode
//!
//! Strict decoding (the default) rejects: empty input, tabs in indentation,
//! indentation that is not a multiple of the indent size, counts that do
//! not match the body, tabular rows of the wrong width, blank lines inside
//! array bodies, and keys without a colon. Lax mode accepts all of these on
//! a best-effort basis; unterminated strings and malformed array headers
//! stay fatal in both modes.

// This module contains only documentation; no implementation code
