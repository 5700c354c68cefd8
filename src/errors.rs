//! General error types for the parser

use std::fmt::{Display, Formatter};

use crate::coords::Coords;

/// Global result type used throughout the parser stages
pub type ParserResult<T> = Result<T, Error>;

/// Enumeration of the various different parser stages that can produce an error
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Stage {
    /// Sourcing and decoding of the raw input, prior to any parsing
    Input,
    /// The grammar/tree construction stage of the parser
    Parser,
}

impl Display for Stage {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Stage::Input => write!(f, "input"),
            Stage::Parser => write!(f, "parser"),
        }
    }
}

/// A global enumeration of error details. Every variant is terminal, the parser never recovers
/// from the construct that produced it
#[derive(Debug, Clone, PartialEq)]
pub enum Details {
    /// The input file couldn't be opened
    InvalidFile,
    /// Reading from the underlying input failed
    StreamFailure,
    /// Byte input contained a sequence which isn't valid UTF-8
    NonUtf8InputDetected,
    /// Byte input contained a non-ASCII byte while decoding as ASCII
    NonAsciiInputDetected,
    /// The lookahead doesn't start any value production
    UnexpectedCharacter(char),
    /// One of the fixed keywords didn't match
    UnexpectedLiteral {
        expected: &'static str,
        found: String,
    },
    /// Missing key, colon or delimiter within an object
    InvalidObject(&'static str),
    /// Missing delimiter within an array
    InvalidArray(&'static str),
    /// Unterminated string or a bad escape sequence
    InvalidString(&'static str),
    /// A lexically malformed number
    InvalidNumber(&'static str),
    /// A well-formed number which can't be represented
    NumberFormat(String),
    /// Arrays and objects were nested deeper than the parser allows
    DepthLimitExceeded(usize),
}

impl Display for Details {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Details::InvalidFile => write!(f, "invalid file"),
            Details::StreamFailure => write!(f, "failed to read input"),
            Details::NonUtf8InputDetected => write!(f, "input is not valid UTF-8"),
            Details::NonAsciiInputDetected => write!(f, "input is not valid ASCII"),
            Details::UnexpectedCharacter(c) => write!(f, "unexpected character {:?}", c),
            Details::UnexpectedLiteral { expected, found } => {
                write!(f, "expected {}, got {:?}", expected, found)
            }
            Details::InvalidObject(reason) => write!(f, "invalid object: {}", reason),
            Details::InvalidArray(reason) => write!(f, "invalid array: {}", reason),
            Details::InvalidString(reason) => write!(f, "invalid string: {}", reason),
            Details::InvalidNumber(reason) => write!(f, "invalid number: {}", reason),
            Details::NumberFormat(text) => write!(f, "number out of range: {}", text),
            Details::DepthLimitExceeded(limit) => {
                write!(f, "nesting deeper than {} levels", limit)
            }
        }
    }
}

/// The general error structure
#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    /// The originating stage for the error
    pub stage: Stage,
    /// The global error code for the error
    pub details: Details,
    /// Optional parser coordinates
    pub coords: Option<Coords>,
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.coords {
            Some(coords) => write!(f, "{} error: {} at {}", self.stage, self.details, coords),
            None => write!(f, "{} error: {}", self.stage, self.details),
        }
    }
}

impl std::error::Error for Error {}

/// Produce an `Err` for the grammar stage, positioned at some [Coords]
#[macro_export]
macro_rules! parser_error {
    ($details: expr, $coords: expr) => {
        Err($crate::errors::Error {
            stage: $crate::errors::Stage::Parser,
            details: $details,
            coords: Some($coords),
        })
    };
}

/// Produce an `Err` for the input stage. Coordinates are optional, and refer to the raw bytes
/// rather than decoded text
#[macro_export]
macro_rules! input_error {
    ($details: expr) => {
        Err($crate::errors::Error {
            stage: $crate::errors::Stage::Input,
            details: $details,
            coords: None,
        })
    };
    ($details: expr, $coords: expr) => {
        Err($crate::errors::Error {
            stage: $crate::errors::Stage::Input,
            details: $details,
            coords: Some($coords),
        })
    };
}
