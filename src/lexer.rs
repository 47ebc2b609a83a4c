//! A single-pass lexer over a stream of `char`s. Strings are unescaped as they are lexed, and
//! numbers are converted using `lexical` (integers) and `fast-float` (everything else).
use crate::coords::{Coords, Span};
use crate::errors::{Details, ParserResult};
use crate::lexer_error;

/// Default string buffer capacity
const DEFAULT_BUFFER_CAPACITY: usize = 1024;

/// Enumeration of valid JSON tokens
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    StartObject,
    EndObject,
    StartArray,
    EndArray,
    Colon,
    Comma,
    Str(String),
    Float(f64),
    Integer(i64),
    Boolean(bool),
    Null,
    EndOfInput,
}

/// A packed token consists of a [Token] and the [Span] associated with it
pub type PackedToken = (Token, Span);

/// Convenience macro for packing tokens along with their positional information
macro_rules! packed_token {
    ($t:expr, $s:expr, $e:expr) => {
        Ok(($t, Span { start: $s, end: $e }))
    };
    ($t:expr, $s:expr) => {
        Ok(($t, Span { start: $s, end: $s }))
    };
}

pub struct Lexer<'a> {
    /// The underlying source of characters
    chars: &'a mut dyn Iterator<Item = char>,
    /// A single character of lookahead
    peeked: Option<char>,
    /// The [Coords] of the next character to be consumed
    coords: Coords,
    /// Buffer used to accumulate strings and numbers
    buffer: String,
}

impl<'a> Lexer<'a> {
    pub fn new(chars: &'a mut dyn Iterator<Item = char>) -> Self {
        let peeked = chars.next();
        Lexer {
            chars,
            peeked,
            coords: Coords::default(),
            buffer: String::with_capacity(DEFAULT_BUFFER_CAPACITY),
        }
    }

    /// The coordinates of the next unconsumed character
    pub fn coords(&self) -> Coords {
        self.coords
    }

    fn peek(&self) -> Option<char> {
        self.peeked
    }

    fn advance(&mut self) -> Option<char> {
        let current = self.peeked.take();
        if let Some(c) = current {
            self.coords.advance(c);
            self.peeked = self.chars.next();
        }
        current
    }

    fn skip_whitespace(&mut self) {
        while let Some(' ' | '\t' | '\n' | '\r') = self.peek() {
            self.advance();
        }
    }

    /// Consume the next token from the input, skipping any leading whitespace
    pub fn consume(&mut self) -> ParserResult<PackedToken> {
        self.skip_whitespace();
        let start = self.coords;
        match self.peek() {
            None => packed_token!(Token::EndOfInput, start),
            Some(c) => match c {
                '{' => self.single(Token::StartObject),
                '}' => self.single(Token::EndObject),
                '[' => self.single(Token::StartArray),
                ']' => self.single(Token::EndArray),
                ':' => self.single(Token::Colon),
                ',' => self.single(Token::Comma),
                '"' => self.match_string(),
                '-' | '0'..='9' => self.match_number(),
                'n' => self.match_literal("null", Token::Null),
                't' => self.match_literal("true", Token::Boolean(true)),
                'f' => self.match_literal("false", Token::Boolean(false)),
                c => lexer_error!(Details::InvalidCharacter(c), start),
            },
        }
    }

    fn single(&mut self, token: Token) -> ParserResult<PackedToken> {
        let start = self.coords;
        self.advance();
        packed_token!(token, start)
    }

    /// Match an exact keyword such as `null` or `true`
    fn match_literal(&mut self, literal: &str, token: Token) -> ParserResult<PackedToken> {
        let start = self.coords;
        let mut end = start;
        for expected in literal.chars() {
            end = self.coords;
            match self.advance() {
                Some(c) if c == expected => (),
                Some(_) => return lexer_error!(Details::MatchFailed(literal.to_string()), end),
                None => return lexer_error!(Details::EndOfInput, end),
            }
        }
        packed_token!(token, start, end)
    }

    /// Push a run of ascii digits onto the buffer, returning how many were found
    fn match_digits(&mut self) -> usize {
        let mut count = 0;
        while let Some(c @ '0'..='9') = self.peek() {
            self.buffer.push(c);
            self.advance();
            count += 1;
        }
        count
    }

    /// Match a number, validating it against the JSON grammar before converting. Integral
    /// values that fit within an `i64` become [Token::Integer]
    fn match_number(&mut self) -> ParserResult<PackedToken> {
        self.buffer.clear();
        let start = self.coords;
        let mut integral = true;

        if self.peek() == Some('-') {
            self.buffer.push('-');
            self.advance();
        }
        let leading_zero = self.peek() == Some('0');
        let digits = self.match_digits();
        if digits == 0 || (leading_zero && digits > 1) {
            return self.invalid_number(start);
        }
        if self.peek() == Some('.') {
            integral = false;
            self.buffer.push('.');
            self.advance();
            if self.match_digits() == 0 {
                return self.invalid_number(start);
            }
        }
        if let Some(e @ ('e' | 'E')) = self.peek() {
            integral = false;
            self.buffer.push(e);
            self.advance();
            if let Some(sign @ ('+' | '-')) = self.peek() {
                self.buffer.push(sign);
                self.advance();
            }
            if self.match_digits() == 0 {
                return self.invalid_number(start);
            }
        }

        let end = self.coords;
        if integral {
            if let Some(value) = parse_integer(&self.buffer) {
                return packed_token!(Token::Integer(value), start, end);
            }
        }
        match fast_float::parse::<f64, _>(self.buffer.as_bytes()) {
            Ok(value) => packed_token!(Token::Float(value), start, end),
            Err(_) => self.invalid_number(start),
        }
    }

    fn invalid_number(&self, start: Coords) -> ParserResult<PackedToken> {
        let mut found = self.buffer.clone();
        if let Some(c) = self.peek() {
            found.push(c);
        }
        lexer_error!(Details::InvalidNumericRepresentation(found), start)
    }

    /// Match a string, translating escape sequences as we go
    fn match_string(&mut self) -> ParserResult<PackedToken> {
        self.buffer.clear();
        let start = self.coords;
        self.advance();
        loop {
            let position = self.coords;
            match self.advance() {
                None => return lexer_error!(Details::EndOfInput, position),
                Some('"') => break,
                Some('\\') => self.match_escape_sequence(position)?,
                Some(c) if (c as u32) < 0x20 => {
                    return lexer_error!(Details::InvalidCharacter(c), position)
                }
                Some(c) => self.buffer.push(c),
            }
        }
        let end = self.coords;
        packed_token!(Token::Str(self.buffer.clone()), start, end)
    }

    fn match_escape_sequence(&mut self, position: Coords) -> ParserResult<()> {
        match self.advance() {
            Some('"') => self.buffer.push('"'),
            Some('\\') => self.buffer.push('\\'),
            Some('/') => self.buffer.push('/'),
            Some('b') => self.buffer.push('\u{0008}'),
            Some('f') => self.buffer.push('\u{000c}'),
            Some('n') => self.buffer.push('\n'),
            Some('r') => self.buffer.push('\r'),
            Some('t') => self.buffer.push('\t'),
            Some('u') => self.match_unicode_escape_sequence(position)?,
            Some(c) => return lexer_error!(Details::InvalidEscapeSequence(format!("\\{}", c)), position),
            None => return lexer_error!(Details::EndOfInput, position),
        }
        Ok(())
    }

    /// Match the hex digits of a `\uXXXX` escape, pairing up surrogates where present. Lone
    /// surrogates can't be held in a Rust string and are replaced with U+FFFD
    fn match_unicode_escape_sequence(&mut self, position: Coords) -> ParserResult<()> {
        let mut high = self.match_hex_quad(position)?;
        while (0xD800..0xDC00).contains(&high) {
            if self.peek() != Some('\\') {
                self.buffer.push(char::REPLACEMENT_CHARACTER);
                return Ok(());
            }
            self.advance();
            if self.peek() != Some('u') {
                self.buffer.push(char::REPLACEMENT_CHARACTER);
                return self.match_escape_sequence(position);
            }
            self.advance();
            let next = self.match_hex_quad(position)?;
            if (0xDC00..0xE000).contains(&next) {
                let combined = 0x10000 + ((high - 0xD800) << 10) + (next - 0xDC00);
                self.buffer
                    .push(char::from_u32(combined).unwrap_or(char::REPLACEMENT_CHARACTER));
                return Ok(());
            }
            // the pending high surrogate is unpaired, but the escape after it may still open a pair
            self.buffer.push(char::REPLACEMENT_CHARACTER);
            high = next;
        }
        self.buffer
            .push(char::from_u32(high).unwrap_or(char::REPLACEMENT_CHARACTER));
        Ok(())
    }

    fn match_hex_quad(&mut self, position: Coords) -> ParserResult<u32> {
        let mut value = 0;
        let mut seen = String::with_capacity(4);
        for _ in 0..4 {
            match self.advance() {
                Some(c) if c.is_ascii_hexdigit() => {
                    seen.push(c);
                    value = value * 16 + c.to_digit(16).unwrap_or(0);
                }
                Some(c) => {
                    seen.push(c);
                    return lexer_error!(
                        Details::InvalidUnicodeEscapeSequence(format!("\\u{}", seen)),
                        position
                    );
                }
                None => return lexer_error!(Details::EndOfInput, position),
            }
        }
        Ok(value)
    }
}

#[cfg(feature = "mixed_numerics")]
fn parse_integer(digits: &str) -> Option<i64> {
    lexical::parse::<i64, _>(digits.as_bytes()).ok()
}

#[cfg(not(feature = "mixed_numerics"))]
fn parse_integer(_digits: &str) -> Option<i64> {
    None
}
