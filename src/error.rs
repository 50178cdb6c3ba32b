//! Error types for TOON encoding and decoding.
//!
//! Decoding distinguishes two failure classes. **Fatal** errors abort the
//! whole parse and surface exactly one message: running out of input where a
//! token is mandatory, an unterminated quoted string, an unrecognized escape,
//! or a malformed `\uXXXX` escape. **Non-fatal** malformations (a tabular row
//! with missing columns, a non-numeric array count, an absent closing bracket)
//! never produce an error; the decoder degrades to a best-effort partial
//! structure instead, which keeps hand-edited or truncated documents usable.
//!
//! Encoding is total and has no error type of its own; the fallible variants
//! here beyond parsing exist for the serde integration and I/O wrappers.

use std::fmt;
use thiserror::Error;

/// All errors that can occur while decoding TOON or driving serde through it.
///
/// Parse errors carry the 1-based line and column where the problem was
/// detected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Input ran out where a token was mandatory.
    #[error("unexpected end of input at line {line}, column {column}")]
    UnexpectedEof { line: usize, column: usize },

    /// A quoted string was never closed.
    #[error("unterminated quoted string at line {line}, column {column}")]
    UnterminatedString { line: usize, column: usize },

    /// A backslash escape other than `\\ \" \b \f \n \r \t \uXXXX`.
    #[error("invalid escape sequence `\\{found}` at line {line}, column {column}")]
    InvalidEscape {
        found: char,
        line: usize,
        column: usize,
    },

    /// A `\u` escape that was truncated or contained non-hex digits.
    #[error("invalid unicode escape at line {line}, column {column}")]
    InvalidUnicodeEscape { line: usize, column: usize },

    /// Reading from or writing to an I/O stream failed.
    #[error("io error: {0}")]
    Io(String),

    /// A message produced by serde (type mismatches, custom errors).
    #[error("{0}")]
    Message(String),
}

impl Error {
    /// Creates a custom error with a display message.
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Message(msg.to_string())
    }

    /// Creates an I/O error from a display message.
    pub fn io<T: fmt::Display>(msg: T) -> Self {
        Error::Io(msg.to_string())
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
