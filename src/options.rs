//! Configuration options for TOON encoding and decoding.
//!
//! This module provides types to customize the codec:
//!
//! - [`ToonOptions`]: Main configuration struct
//! - [`Delimiter`]: Choice of delimiter for arrays and tabular rows (comma, tab, or pipe)
//!
//! ## Examples
//!
//! ```rust
//! use toon_codec::{toon, encode, ToonOptions, Delimiter};
//!
//! let value = toon!({ "tags": ["a", "b"] });
//!
//! // Pipe delimiter with an explicit length marker
//! let options = ToonOptions::new()
//!     .with_delimiter(Delimiter::Pipe)
//!     .with_length_marker(true);
//! let text = encode(&value, &options).unwrap();
//! assert_eq!(text, "tags[#2|]: a|b");
//! ```

/// Delimiter choice for TOON arrays and tabular rows.
///
/// TOON supports multiple delimiters to optimize for different contexts:
///
/// - **Comma**: Default, most compact
/// - **Tab**: Best for TSV-like output
/// - **Pipe**: Readable for markdown-style tables
///
/// Non-comma delimiters are declared in the array header itself, so encoded
/// documents stay self-describing: `[3]`, `[3\t]`, `[3|]`.
///
/// # Examples
///
/// ```rust
/// use toon_codec::Delimiter;
///
/// assert_eq!(Delimiter::Comma.as_char(), ',');
/// assert_eq!(Delimiter::Tab.as_char(), '\t');
/// assert_eq!(Delimiter::Pipe.as_char(), '|');
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Delimiter {
    #[default]
    Comma,
    Tab,
    Pipe,
}

impl Delimiter {
    /// Returns the delimiter character.
    #[must_use]
    pub const fn as_char(&self) -> char {
        match self {
            Delimiter::Comma => ',',
            Delimiter::Tab => '\t',
            Delimiter::Pipe => '|',
        }
    }

    /// Returns the string representation of this delimiter.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Delimiter::Comma => ",",
            Delimiter::Tab => "\t",
            Delimiter::Pipe => "|",
        }
    }

    /// Returns the suffix written after the count inside an array header.
    ///
    /// Comma is the implicit default and has no suffix; tab and pipe write
    /// their own character, e.g. `[3\t]` and `[3|]`.
    #[must_use]
    pub const fn header_suffix(&self) -> &'static str {
        match self {
            Delimiter::Comma => "",
            Delimiter::Tab => "\t",
            Delimiter::Pipe => "|",
        }
    }
}

/// Configuration options for TOON encoding and decoding.
///
/// # Examples
///
/// ```rust
/// use toon_codec::{ToonOptions, Delimiter};
///
/// // Defaults: 2-space indent, comma delimiter, no length marker, strict decoding
/// let options = ToonOptions::new();
///
/// // Custom configuration
/// let options = ToonOptions::new()
///     .with_indent(4)
///     .with_delimiter(Delimiter::Tab)
///     .with_strict(false);
/// ```
#[derive(Clone, Debug)]
pub struct ToonOptions {
    /// Spaces per structural level, clamped to `1..=8`.
    pub indent: usize,
    /// Document-level delimiter for arrays that do not declare their own.
    pub delimiter: Delimiter,
    /// Prefix array counts with `#` (e.g. `[#3]` instead of `[3]`).
    pub length_marker: bool,
    /// Make all quantitative and structural decode checks fatal.
    pub strict: bool,
}

impl Default for ToonOptions {
    fn default() -> Self {
        ToonOptions {
            indent: 2,
            delimiter: Delimiter::default(),
            length_marker: false,
            strict: true,
        }
    }
}

impl ToonOptions {
    /// Creates the default options (2-space indent, comma delimiter, strict).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use toon_codec::ToonOptions;
    ///
    /// let options = ToonOptions::new();
    /// assert_eq!(options.indent, 2);
    /// assert!(options.strict);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates options with strict decoding disabled (best-effort parsing).
    #[must_use]
    pub fn lax() -> Self {
        ToonOptions {
            strict: false,
            ..Default::default()
        }
    }

    /// Sets the indentation size (number of spaces per level).
    ///
    /// Values outside `1..=8` are clamped to that range.
    #[must_use]
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent.clamp(1, 8);
        self
    }

    /// Sets the document-level delimiter for arrays and tabular rows.
    #[must_use]
    pub fn with_delimiter(mut self, delimiter: Delimiter) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Enables or disables the `#` length marker in array headers.
    ///
    /// The marker is semantically inert; decoders accept headers with and
    /// without it.
    #[must_use]
    pub fn with_length_marker(mut self, length_marker: bool) -> Self {
        self.length_marker = length_marker;
        self
    }

    /// Enables or disables strict decoding.
    #[must_use]
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }
}
