//! Error types for decoding payloads. The views themselves never fail, so everything in here
//! originates from either the lexer or the parser.

use std::fmt::{Display, Formatter};

use crate::coords::Coords;
use crate::decoders::Encoding;
use crate::lexer::Token;

/// Global result type used throughout the decoding stages
pub type ParserResult<T> = Result<T, Error>;

/// Enumeration of the various different stages that can produce an error
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Stage {
    /// The lexer stage of the parser
    Lexer,
    /// The DOM construction stage of the parser
    Parser,
}

impl Display for Stage {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Stage::Lexer => write!(f, "lexer"),
            Stage::Parser => write!(f, "parser"),
        }
    }
}

/// A global enumeration of error codes
#[derive(Debug, Clone, PartialEq)]
pub enum Details {
    EndOfInput,
    ZeroLengthInput,
    InvalidFile,
    InvalidEncoding(Encoding),
    UnexpectedToken(Token),
    TrailingInput(Token),
    PairExpected,
    InvalidObject,
    InvalidArray,
    InvalidCharacter(char),
    MatchFailed(String),
    InvalidNumericRepresentation(String),
    InvalidEscapeSequence(String),
    InvalidUnicodeEscapeSequence(String),
}

impl Display for Details {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Details::EndOfInput => write!(f, "unexpected end of input"),
            Details::ZeroLengthInput => write!(f, "zero length input"),
            Details::InvalidFile => write!(f, "unable to open input file"),
            Details::InvalidEncoding(encoding) => write!(f, "input is not valid {:?}", encoding),
            Details::UnexpectedToken(token) => write!(f, "unexpected token: {:?}", token),
            Details::TrailingInput(token) => write!(f, "trailing input after value: {:?}", token),
            Details::PairExpected => write!(f, "expected a key/value pair"),
            Details::InvalidObject => write!(f, "invalid object"),
            Details::InvalidArray => write!(f, "invalid array"),
            Details::InvalidCharacter(c) => write!(f, "invalid character: {:?}", c),
            Details::MatchFailed(expected) => write!(f, "expected '{}'", expected),
            Details::InvalidNumericRepresentation(s) => write!(f, "invalid number: {}", s),
            Details::InvalidEscapeSequence(s) => write!(f, "invalid escape sequence: {}", s),
            Details::InvalidUnicodeEscapeSequence(s) => {
                write!(f, "invalid unicode escape sequence: {}", s)
            }
        }
    }
}

/// The general error structure
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{stage} error: {details}{}", at(.coords))]
pub struct Error {
    /// The originating stage for the error
    pub stage: Stage,
    /// The global error code for the error
    pub details: Details,
    /// Optional input coordinates
    pub coords: Option<Coords>,
}

fn at(coords: &Option<Coords>) -> String {
    match coords {
        Some(coords) => format!(" at {}", coords),
        None => String::new(),
    }
}

#[macro_export]
macro_rules! lexer_error {
    ($details: expr, $coords: expr) => {
        Err($crate::errors::Error {
            stage: $crate::errors::Stage::Lexer,
            details: $details,
            coords: Some($coords),
        })
    };
}

#[macro_export]
macro_rules! parser_error {
    ($details: expr, $coords: expr) => {
        Err($crate::errors::Error {
            stage: $crate::errors::Stage::Parser,
            details: $details,
            coords: Some($coords),
        })
    };
    ($details: expr) => {
        Err($crate::errors::Error {
            stage: $crate::errors::Stage::Parser,
            details: $details,
            coords: None,
        })
    };
}

#[cfg(test)]
mod tests {
    use crate::coords::Coords;
    use crate::errors::{Details, Error, ParserResult, Stage};

    #[test]
    fn errors_should_display_stage_details_and_position() {
        let result: ParserResult<()> = lexer_error!(Details::InvalidCharacter('x'), Coords::default());
        let err = result.unwrap_err();
        assert_eq!(err.stage, Stage::Lexer);
        assert_eq!(err.to_string(), "lexer error: invalid character: 'x' at [line: 1, column: 1]");
    }

    #[test]
    fn errors_without_coords_should_omit_the_position() {
        let err = Error {
            stage: Stage::Parser,
            details: Details::InvalidFile,
            coords: None,
        };
        assert_eq!(err.to_string(), "parser error: unable to open input file");
    }
}
