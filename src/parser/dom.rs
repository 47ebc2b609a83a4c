//! The DOM parser
//!
//! Builds a complete [JsonValue] from the input. Nesting is tracked on an explicit stack rather
//! than through recursion, so the depth of a document is only bounded by memory.
use std::borrow::Cow;
use std::collections::HashMap;
use std::fs;
use std::io::BufReader;
use std::path::Path;

use crate::decoders::{decoder_for, validate, Encoding};
use crate::errors::{Details, ParserResult};
use crate::lexer::{Lexer, Token};
use crate::parser_error;
use crate::JsonValue;

/// A partially constructed composite, waiting on its next child
enum Frame {
    Array(Vec<JsonValue<'static>>),
    Object(PendingObject),
}

/// The pairs of an object so far, along with the key of the pair currently being parsed
struct PendingObject {
    pairs: Vec<(Cow<'static, str>, JsonValue<'static>)>,
    /// Position of each key within `pairs`
    positions: HashMap<String, usize>,
    key: String,
}

impl PendingObject {
    fn new(key: String) -> Self {
        Self {
            pairs: vec![],
            positions: HashMap::new(),
            key,
        }
    }

    /// Complete the current pair. Repeated keys keep the position of their first occurrence and
    /// the value of their last
    fn insert(&mut self, value: JsonValue<'static>) {
        let key = std::mem::take(&mut self.key);
        match self.positions.get(&key) {
            Some(&position) => self.pairs[position].1 = value,
            None => {
                self.positions.insert(key.clone(), self.pairs.len());
                self.pairs.push((Cow::Owned(key), value));
            }
        }
    }
}

/// Main JSON parser struct
#[derive(Debug, Default, Copy, Clone)]
pub struct Parser {
    encoding: Encoding,
}

impl Parser {
    /// Create a new instance of the parser using a specific [Encoding]
    pub fn with_encoding(encoding: Encoding) -> Self {
        Self { encoding }
    }

    pub fn parse_file<PathLike: AsRef<Path>>(
        &self,
        path: PathLike,
    ) -> ParserResult<JsonValue<'static>> {
        match fs::read(&path) {
            Ok(bytes) => self.parse_bytes(&bytes),
            Err(_) => parser_error!(Details::InvalidFile),
        }
    }

    /// Parse a complete buffer, which must be valid throughout in the parser's [Encoding]
    pub fn parse_bytes(&self, bytes: &[u8]) -> ParserResult<JsonValue<'static>> {
        if bytes.is_empty() {
            return parser_error!(Details::ZeroLengthInput);
        }
        validate(bytes, self.encoding)?;
        let mut reader = BufReader::new(bytes);
        let mut chars = decoder_for(&mut reader, self.encoding);
        self.parse(&mut chars)
    }

    pub fn parse_str(&self, str: &str) -> ParserResult<JsonValue<'static>> {
        if str.is_empty() {
            return parser_error!(Details::ZeroLengthInput);
        }
        self.parse(&mut str.chars())
    }

    pub fn parse(&self, chars: &mut dyn Iterator<Item = char>) -> ParserResult<JsonValue<'static>> {
        let mut lexer = Lexer::new(chars);
        let mut stack: Vec<Frame> = vec![];

        let mut token = lexer.consume()?;
        if token.0 == Token::EndOfInput {
            return parser_error!(Details::ZeroLengthInput, token.1.start);
        }

        loop {
            let mut completed = match token {
                (Token::StartObject, _) => match lexer.consume()? {
                    (Token::EndObject, _) => JsonValue::Object(vec![]),
                    (Token::Str(key), _) => {
                        Self::match_colon(&mut lexer)?;
                        stack.push(Frame::Object(PendingObject::new(key)));
                        token = lexer.consume()?;
                        continue;
                    }
                    (_, span) => return parser_error!(Details::InvalidObject, span.start),
                },
                (Token::StartArray, _) => match lexer.consume()? {
                    (Token::EndArray, _) => JsonValue::Array(vec![]),
                    next => {
                        stack.push(Frame::Array(vec![]));
                        token = next;
                        continue;
                    }
                },
                (Token::Str(str), _) => JsonValue::String(Cow::Owned(str)),
                (Token::Float(value), _) => JsonValue::Float(value),
                (Token::Integer(value), _) => JsonValue::Integer(value),
                (Token::Boolean(value), _) => JsonValue::Boolean(value),
                (Token::Null, _) => JsonValue::Null,
                (Token::EndOfInput, span) => return parser_error!(Details::EndOfInput, span.start),
                (token, span) => {
                    return parser_error!(Details::UnexpectedToken(token), span.start)
                }
            };

            // hand the completed value up to its parent, closing off any composites that end here
            loop {
                match stack.pop() {
                    None => return Self::match_end(&mut lexer, completed),
                    Some(Frame::Array(mut values)) => {
                        values.push(completed);
                        match lexer.consume()? {
                            (Token::Comma, _) => {
                                stack.push(Frame::Array(values));
                                break;
                            }
                            (Token::EndArray, _) => completed = JsonValue::Array(values),
                            (_, span) => return parser_error!(Details::InvalidArray, span.start),
                        }
                    }
                    Some(Frame::Object(mut object)) => {
                        object.insert(completed);
                        match lexer.consume()? {
                            (Token::Comma, _) => {
                                object.key = Self::match_key(&mut lexer)?;
                                stack.push(Frame::Object(object));
                                break;
                            }
                            (Token::EndObject, _) => completed = JsonValue::Object(object.pairs),
                            (_, span) => return parser_error!(Details::InvalidObject, span.start),
                        }
                    }
                }
            }
            token = lexer.consume()?;
        }
    }

    /// Match the `"key" :` prefix of a pair
    fn match_key(lexer: &mut Lexer) -> ParserResult<String> {
        match lexer.consume()? {
            (Token::Str(key), _) => {
                Self::match_colon(lexer)?;
                Ok(key)
            }
            (_, span) => parser_error!(Details::InvalidObject, span.start),
        }
    }

    fn match_colon(lexer: &mut Lexer) -> ParserResult<()> {
        match lexer.consume()? {
            (Token::Colon, _) => Ok(()),
            (_, span) => parser_error!(Details::PairExpected, span.start),
        }
    }

    /// Only whitespace may follow the root value
    fn match_end(lexer: &mut Lexer, root: JsonValue<'static>) -> ParserResult<JsonValue<'static>> {
        match lexer.consume()? {
            (Token::EndOfInput, _) => Ok(root),
            (token, span) => parser_error!(Details::TrailingInput(token), span.start),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::decoders::Encoding;
    use crate::errors::{Details, Stage};
    use crate::parser::Parser;
    use crate::relative_file;
    use crate::JsonValue;
    use std::borrow::Cow;

    #[test]
    fn should_parse_char_iterators_directly() {
        let source = r#"{
            "test" : 1232.0,
            "some other" : "thasdasd",
            "a bool" : true,
            "an array" : [1,2,3,4,5.8,6,7.2,7,8,10]
        }"#;
        let parsed = Parser::default().parse(&mut source.chars()).unwrap();
        assert_eq!(parsed.len(), Some(4));
        assert_eq!(parsed.get("an array").unwrap().len(), Some(10));
        assert_eq!(parsed.get("a bool"), Some(&JsonValue::Boolean(true)));
    }

    #[test]
    fn should_preserve_key_order() {
        let parsed = Parser::default().parse_str(r#"{"z":1,"a":2,"m":3}"#).unwrap();
        let keys: Vec<&str> = parsed.as_object().unwrap().iter().map(|(k, _)| &**k).collect();
        assert_eq!(keys, ["z", "a", "m"]);
    }

    #[test]
    fn repeated_keys_should_keep_the_last_value() {
        let parsed = Parser::default().parse_str(r#"{"a":1,"b":2,"a":3}"#).unwrap();
        let pairs = parsed.as_object().unwrap();
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[0].0, Cow::Borrowed("a"));
        assert_eq!(pairs[0].1, JsonValue::Integer(3));
    }

    #[test]
    fn wide_objects_should_parse_with_their_duplicates_folded() {
        let width = 50_000;
        let mut source = String::from("{");
        for i in 0..width {
            source.push_str(&format!("\"k{}\":{},", i, i));
        }
        source.push_str("\"k0\":-1}");
        let parsed = Parser::default().parse_str(&source).unwrap();
        let pairs = parsed.as_object().unwrap();
        assert_eq!(pairs.len(), width);
        assert_eq!(pairs[0].1, JsonValue::Integer(-1));
        assert_eq!(pairs[width - 1].0, Cow::Borrowed("k49999"));
        assert_eq!(parsed, parsed.clone());
    }

    #[test]
    fn bytes_should_be_valid_utf8_throughout() {
        let parser = Parser::default();
        let err = parser.parse_bytes(b"[1] \xff garbage").unwrap_err();
        assert_eq!(err.stage, Stage::Lexer);
        assert_eq!(err.details, Details::InvalidEncoding(Encoding::Utf8));
        assert_eq!(err.coords.unwrap().column, 5);

        let err = parser.parse_bytes(b"{\"a\":\"x\xffy\"}").unwrap_err();
        assert_eq!(err.details, Details::InvalidEncoding(Encoding::Utf8));
        assert_eq!(err.coords.unwrap().column, 8);
    }

    #[test]
    fn ascii_parsers_should_reject_multibyte_bytes() {
        let parser = Parser::with_encoding(Encoding::Ascii);
        assert_eq!(parser.parse_bytes(b"[1]").unwrap(), JsonValue::Array(vec![JsonValue::Integer(1)]));
        let err = parser.parse_bytes("[\"é\"]".as_bytes()).unwrap_err();
        assert_eq!(err.details, Details::InvalidEncoding(Encoding::Ascii));
    }

    #[test]
    fn should_accept_scalar_roots() {
        let parser = Parser::default();
        assert_eq!(parser.parse_str(" null ").unwrap(), JsonValue::Null);
        assert_eq!(parser.parse_str("\"x\"").unwrap(), JsonValue::String(Cow::Borrowed("x")));
        assert_eq!(parser.parse_str("[]").unwrap(), JsonValue::Array(vec![]));
        assert_eq!(parser.parse_str("{}").unwrap(), JsonValue::Object(vec![]));
    }

    #[test]
    fn should_parse_from_bytes() {
        let parsed = Parser::default().parse_bytes(br#"{"data":[{"id":"1"}]}"#).unwrap();
        assert_eq!(parsed.get("data").unwrap().len(), Some(1));
    }

    #[test]
    fn should_parse_fixture_files() {
        let parsed = Parser::default()
            .parse_file(relative_file!("fixtures/json/articles.json"))
            .unwrap();
        assert!(parsed.get("data").is_some());
    }

    #[test]
    fn should_successfully_bail() {
        let parser = Parser::default();
        let cases = [
            ("", Details::ZeroLengthInput),
            ("   ", Details::ZeroLengthInput),
            ("[1,]", Details::UnexpectedToken(crate::lexer::Token::EndArray)),
            ("[1 2]", Details::InvalidArray),
            ("{\"a\" 1}", Details::PairExpected),
            ("{\"a\":1,}", Details::InvalidObject),
            ("{1:2}", Details::InvalidObject),
            ("[1", Details::InvalidArray),
            ("{} []", Details::TrailingInput(crate::lexer::Token::StartArray)),
        ];
        for (input, expected) in cases {
            let err = parser.parse_str(input).unwrap_err();
            assert_eq!(err.stage, Stage::Parser, "{}", input);
            assert_eq!(err.details, expected, "{}", input);
        }
    }

    #[test]
    fn missing_files_should_fail() {
        let err = Parser::default().parse_file("fixtures/json/missing.json").unwrap_err();
        assert_eq!(err.details, Details::InvalidFile);
    }

    #[test]
    fn deep_nesting_should_not_exhaust_the_stack() {
        let depth = 100_000;
        let source = format!("{}{}", "[".repeat(depth), "]".repeat(depth));
        let mut parsed = &Parser::default().parse_str(&source).unwrap();
        let mut seen = 1;
        while let Some(inner) = parsed.index(0) {
            parsed = inner;
            seen += 1;
        }
        assert_eq!(seen, depth);
    }
}
