//! Error types for TOON encoding and decoding.
//!
//! Every decode error carries a 1-based line number; where a column is known
//! it is attached as well. Error messages name the rule that failed.
//!
//! ## Examples
//!
//! ```rust
//! use toon_codec::{decode, ToonOptions};
//!
//! let result = decode("tags[3]: admin,ops", &ToonOptions::new());
//! let err = result.unwrap_err();
//! assert_eq!(err.line(), Some(1));
//! ```

use std::fmt;
use thiserror::Error;

/// Represents all possible errors raised by the codec.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// IO error during reading or writing
    #[error("IO error: {0}")]
    Io(String),

    /// Structural or lexical error with location information
    #[error("Syntax error at line {line}, column {col}: {msg}")]
    Syntax {
        line: usize,
        col: usize,
        msg: String,
    },

    /// Leading spaces not a multiple of the configured indent size
    #[error("Indentation error at line {line}: leading spaces must be a multiple of {unit}, found {found}")]
    Indentation {
        line: usize,
        unit: usize,
        found: usize,
    },

    /// The same key appeared twice within one object
    #[error("Duplicate key \"{key}\" at line {line}")]
    DuplicateKey { line: usize, key: String },

    /// Parsed element count does not match the header count
    #[error("Array length mismatch at line {line}: header declares {declared}, found {found}")]
    LengthMismatch {
        line: usize,
        declared: usize,
        found: usize,
    },

    /// Tabular row with too few or too many cells
    #[error("Row width mismatch at line {line}: expected {expected} cells, found {found}")]
    RowWidth {
        line: usize,
        expected: usize,
        found: usize,
    },

    /// Unsupported type for serialization
    #[error("Unsupported type: {0}")]
    UnsupportedType(String),

    /// Generic message, used by the serde bridge
    #[error("{0}")]
    Message(String),
}

impl Error {
    /// Creates a syntax error with line and column information.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use toon_codec::Error;
    ///
    /// let err = Error::syntax(10, 5, "unterminated quoted string");
    /// assert!(err.to_string().contains("line 10"));
    /// ```
    pub fn syntax(line: usize, col: usize, msg: impl Into<String>) -> Self {
        Error::Syntax {
            line,
            col,
            msg: msg.into(),
        }
    }

    /// Creates an I/O error for reader/writer failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }

    /// Creates an unsupported type error for values the format cannot express.
    pub fn unsupported_type(msg: &str) -> Self {
        Error::UnsupportedType(msg.to_string())
    }

    /// Creates a generic error with a display message.
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Message(msg.to_string())
    }

    /// Returns the 1-based input line this error points at, if any.
    #[must_use]
    pub fn line(&self) -> Option<usize> {
        match self {
            Error::Syntax { line, .. }
            | Error::Indentation { line, .. }
            | Error::DuplicateKey { line, .. }
            | Error::LengthMismatch { line, .. }
            | Error::RowWidth { line, .. } => Some(*line),
            Error::Io(_) | Error::UnsupportedType(_) | Error::Message(_) => None,
        }
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Message(msg.to_string())
    }
}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Message(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
