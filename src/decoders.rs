//! Payloads arrive as raw bytes (response bodies, fixture files). Before they can be decoded into
//! a [crate::JsonValue] they are turned into a stream of `char`s, using one of the decoders
//! supplied by `chisel-decoders`.
use chisel_decoders::{ascii::AsciiDecoder, utf8::Utf8Decoder};
use std::io::BufRead;

use crate::coords::Coords;
use crate::errors::{Details, ParserResult};
use crate::lexer_error;

/// Enumeration of different supported encoding types
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum Encoding {
    #[default]
    Utf8,
    Ascii,
}

/// Create a `char` iterator over a buffered byte source, for a given [Encoding]
pub fn decoder_for<'a, Buffer: BufRead>(
    buffer: &'a mut Buffer,
    encoding: Encoding,
) -> Box<dyn Iterator<Item = char> + 'a> {
    match encoding {
        Encoding::Ascii => Box::new(AsciiDecoder::new(buffer)),
        Encoding::Utf8 => Box::new(Utf8Decoder::new(buffer)),
    }
}

/// Check that a whole buffer is valid in a given [Encoding]. The decoders stop at the first byte
/// they can't decode, which the lexer can't tell apart from the end of the input
pub fn validate(bytes: &[u8], encoding: Encoding) -> ParserResult<()> {
    let valid_up_to = match encoding {
        Encoding::Utf8 => match std::str::from_utf8(bytes) {
            Ok(_) => return Ok(()),
            Err(err) => err.valid_up_to(),
        },
        Encoding::Ascii => match bytes.iter().position(|b| !b.is_ascii()) {
            Some(position) => position,
            None => return Ok(()),
        },
    };
    let mut coords = Coords::default();
    String::from_utf8_lossy(&bytes[..valid_up_to])
        .chars()
        .for_each(|c| coords.advance(c));
    lexer_error!(Details::InvalidEncoding(encoding), coords)
}
