//! The DOM parser
//!
//! A recursive-descent parser with one routine per JSON production. Each routine is entered with
//! the [Cursor] positioned on the first byte of its production and leaves it on the first byte
//! after it. Nothing is ever backtracked, and the first malformed construct aborts the parse.
use std::borrow::Cow;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use tracing::{debug, trace};

use crate::cursor::Cursor;
use crate::decoders::{DecoderSelector, Encoding};
use crate::errors::{Details, ParserResult};
use crate::{input_error, parser_error, JsonValue};

/// Bytes which may legally follow a backslash within a string
const RECOGNISED_ESCAPES: &[u8] = b"\"\\/bfnrtu";

/// Lookup table for [RECOGNISED_ESCAPES], indexed by byte
static ESCAPES: [bool; 256] = escape_table();

const fn escape_table() -> [bool; 256] {
    let mut table = [false; 256];
    let mut index = 0;
    while index < RECOGNISED_ESCAPES.len() {
        table[RECOGNISED_ESCAPES[index] as usize] = true;
        index += 1;
    }
    table
}

/// Default bound on how deeply arrays and objects may nest
pub const DEFAULT_MAX_DEPTH: usize = 512;

/// Main JSON parser struct
///
/// Every nested array or object costs one level of recursion, so nesting is bounded by
/// [Parser::max_depth] (by default [DEFAULT_MAX_DEPTH]). Going past it fails with
/// [Details::DepthLimitExceeded] instead of exhausting the stack.
#[derive(Debug, Copy, Clone)]
pub struct Parser {
    decoders: DecoderSelector,
    encoding: Encoding,
    max_depth: usize,
}

impl Default for Parser {
    fn default() -> Self {
        Self::with_encoding(Encoding::default())
    }
}

impl Parser {
    /// Create a new instance of the parser using a specific [Encoding] for byte oriented input
    pub fn with_encoding(encoding: Encoding) -> Self {
        Self {
            decoders: Default::default(),
            encoding,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Replace the bound on how deeply arrays and objects may nest. Raising it means the calling
    /// thread needs a correspondingly larger stack
    pub fn with_max_depth(self, max_depth: usize) -> Self {
        Self { max_depth, ..self }
    }

    /// The [Encoding] used to decode byte oriented input
    pub fn encoding(&self) -> Encoding {
        self.encoding
    }

    /// The deepest nesting of arrays and objects the parser accepts
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Parse a file, decoding its contents with the configured [Encoding]
    pub fn parse_file<PathLike: AsRef<Path>>(
        &self,
        path: PathLike,
    ) -> ParserResult<Option<JsonValue<'static>>> {
        match File::open(&path) {
            Ok(f) => self.parse_reader(BufReader::new(f)),
            Err(err) => {
                debug!(path = %path.as_ref().display(), error = %err, "unable to open input");
                input_error!(Details::InvalidFile)
            }
        }
    }

    /// Read the whole of a reader and parse its contents, decoding with the configured
    /// [Encoding]
    pub fn parse_reader<R: Read>(&self, mut reader: R) -> ParserResult<Option<JsonValue<'static>>> {
        let mut bytes = vec![];
        if let Err(err) = reader.read_to_end(&mut bytes) {
            debug!(error = %err, "unable to read input");
            return input_error!(Details::StreamFailure);
        }
        self.parse_bytes(&bytes)
    }

    /// Parse a byte buffer, decoding it with the configured [Encoding]. The parsed value owns
    /// all of its strings
    pub fn parse_bytes(&self, bytes: &[u8]) -> ParserResult<Option<JsonValue<'static>>> {
        let text = self.decoders.decode(bytes, self.encoding)?;
        let value = self.parse_str(&text)?;
        Ok(value.map(JsonValue::into_owned))
    }

    /// Parse a complete document held in a string. Strings within the returned value borrow
    /// from `text`.
    ///
    /// Returns `Ok(None)` when the input is empty or whitespace only. Anything other than
    /// whitespace after the root value is an error.
    pub fn parse_str<'a>(&self, text: &'a str) -> ParserResult<Option<JsonValue<'a>>> {
        debug!(bytes = text.len(), "parsing document");
        let mut cursor = Cursor::new(text);
        let result = self.parse_document(&mut cursor);
        if let Err(err) = &result {
            debug!(error = %err, "failed to parse document");
        }
        result
    }

    /// Parse a single value starting at the current position of the cursor, leaving the cursor
    /// after any trailing whitespace. Returns `Ok(None)` if the cursor is already at the end of
    /// the input.
    pub fn parse<'a>(&self, cursor: &mut Cursor<'a>) -> ParserResult<Option<JsonValue<'a>>> {
        self.parse_value(cursor, 0)
    }

    fn parse_document<'a>(&self, cursor: &mut Cursor<'a>) -> ParserResult<Option<JsonValue<'a>>> {
        let value = self.parse(cursor)?;
        match cursor.current_char() {
            None => Ok(value),
            Some(c) => parser_error!(Details::UnexpectedCharacter(c), cursor.coords()),
        }
    }

    /// `depth` is the number of arrays and objects enclosing the value
    fn parse_value<'a>(
        &self,
        cursor: &mut Cursor<'a>,
        depth: usize,
    ) -> ParserResult<Option<JsonValue<'a>>> {
        cursor.skip_whitespace();
        let lookahead = match cursor.peek() {
            Some(b) => b,
            None => return Ok(None),
        };
        trace!(
            position = cursor.position(),
            lookahead = %char::from(lookahead),
            "parsing value"
        );
        let value = match lookahead {
            b'"' => JsonValue::String(self.parse_string(cursor)?),
            b'[' => self.parse_array(cursor, depth + 1)?,
            b'{' => self.parse_object(cursor, depth + 1)?,
            b't' => self.parse_true(cursor)?,
            b'f' => self.parse_false(cursor)?,
            b'n' => self.parse_null(cursor)?,
            b'-' | b'0'..=b'9' => self.parse_number(cursor)?,
            b => {
                let c = cursor.current_char().unwrap_or(char::from(b));
                return parser_error!(Details::UnexpectedCharacter(c), cursor.coords());
            }
        };
        cursor.skip_whitespace();
        Ok(Some(value))
    }

    /// An object is a brace delimited list of comma separated `"key": value` pairs
    fn parse_object<'a>(
        &self,
        cursor: &mut Cursor<'a>,
        depth: usize,
    ) -> ParserResult<JsonValue<'a>> {
        self.check_depth(cursor, depth)?;
        cursor.advance();
        let mut members = HashMap::new();
        cursor.skip_whitespace();
        if cursor.peek() == Some(b'}') {
            cursor.advance();
            return Ok(JsonValue::Object(members));
        }
        loop {
            cursor.skip_whitespace();
            if cursor.peek() != Some(b'"') {
                return parser_error!(
                    Details::InvalidObject("expected string key"),
                    cursor.coords()
                );
            }
            let key = self.parse_string(cursor)?;

            cursor.skip_whitespace();
            if cursor.peek() != Some(b':') {
                return parser_error!(Details::InvalidObject("expected colon"), cursor.coords());
            }
            cursor.advance();

            match self.parse_value(cursor, depth)? {
                Some(value) => {
                    members.insert(key, value);
                }
                None => {
                    return parser_error!(
                        Details::InvalidObject("expected closing brace or comma"),
                        cursor.coords()
                    )
                }
            }

            match cursor.peek() {
                Some(b',') => {
                    cursor.advance();
                }
                Some(b'}') => {
                    cursor.advance();
                    return Ok(JsonValue::Object(members));
                }
                _ => {
                    return parser_error!(
                        Details::InvalidObject("expected closing brace or comma"),
                        cursor.coords()
                    )
                }
            }
        }
    }

    /// An array is a bracket delimited list of comma separated values
    fn parse_array<'a>(
        &self,
        cursor: &mut Cursor<'a>,
        depth: usize,
    ) -> ParserResult<JsonValue<'a>> {
        self.check_depth(cursor, depth)?;
        cursor.advance();
        let mut values: Vec<JsonValue> = vec![];
        cursor.skip_whitespace();
        if cursor.peek() == Some(b']') {
            cursor.advance();
            return Ok(JsonValue::Array(values));
        }
        loop {
            match self.parse_value(cursor, depth)? {
                Some(value) => values.push(value),
                None => {
                    return parser_error!(
                        Details::InvalidArray("expected closing bracket or comma"),
                        cursor.coords()
                    )
                }
            }

            match cursor.peek() {
                Some(b',') => {
                    cursor.advance();
                }
                Some(b']') => {
                    cursor.advance();
                    return Ok(JsonValue::Array(values));
                }
                _ => {
                    return parser_error!(
                        Details::InvalidArray("expected closing bracket or comma"),
                        cursor.coords()
                    )
                }
            }
        }
    }

    /// Fail on the opening delimiter of a container nested past [Parser::max_depth]
    fn check_depth(&self, cursor: &Cursor, depth: usize) -> ParserResult<()> {
        if depth > self.max_depth {
            return parser_error!(Details::DepthLimitExceeded(self.max_depth), cursor.coords());
        }
        Ok(())
    }

    /// Match a string and return its raw contents. Escape sequences are validated but *not*
    /// translated, so the returned slice is exactly what appears between the quotes
    fn parse_string<'a>(&self, cursor: &mut Cursor<'a>) -> ParserResult<Cow<'a, str>> {
        cursor.advance();
        let start = cursor.position();
        loop {
            match cursor.peek() {
                None => {
                    return parser_error!(Details::InvalidString("unterminated"), cursor.coords())
                }
                Some(b'"') => break,
                Some(b'\\') => match cursor.advance() {
                    None => {
                        return parser_error!(
                            Details::InvalidString("unterminated"),
                            cursor.coords()
                        )
                    }
                    Some(b'u') => {
                        return parser_error!(
                            Details::InvalidString("unicode escape sequences are not supported"),
                            cursor.coords()
                        )
                    }
                    Some(escape) if ESCAPES[escape as usize] => {
                        cursor.advance();
                    }
                    Some(_) => {
                        return parser_error!(
                            Details::InvalidString("unknown escape sequence"),
                            cursor.coords()
                        )
                    }
                },
                Some(_) => {
                    cursor.advance();
                }
            }
        }
        let end = cursor.position();
        cursor.advance();
        Ok(Cow::Borrowed(cursor.slice(start, end)))
    }

    /// Match a number. Fractions and exponents produce a [JsonValue::Float], anything else a
    /// [JsonValue::Integer]. An exponent is only accepted after a fraction, and must carry an
    /// explicit sign
    fn parse_number<'a>(&self, cursor: &mut Cursor<'a>) -> ParserResult<JsonValue<'a>> {
        let start = cursor.position();
        if cursor.peek() == Some(b'-') {
            cursor.advance();
        }
        let integer_start = cursor.position();
        match cursor.peek() {
            Some(b'0'..=b'9') => {
                cursor.advance();
            }
            _ => {
                return parser_error!(
                    Details::InvalidNumber("minus must be followed by digit"),
                    cursor.coords()
                )
            }
        }

        let mut fraction = false;
        let mut exponent = false;
        loop {
            match cursor.peek() {
                Some(b'0'..=b'9') => {
                    cursor.advance();
                }
                Some(b'.') => {
                    if fraction {
                        return parser_error!(Details::InvalidNumber("double dot"), cursor.coords());
                    }
                    fraction = true;
                    if !matches!(cursor.advance(), Some(b'0'..=b'9')) {
                        return parser_error!(
                            Details::InvalidNumber("dot must be followed by digit"),
                            cursor.coords()
                        );
                    }
                    cursor.advance();
                }
                Some(b'e' | b'E') => {
                    if !fraction {
                        return parser_error!(
                            Details::InvalidNumber("exponent before fraction"),
                            cursor.coords()
                        );
                    }
                    if exponent {
                        return parser_error!(
                            Details::InvalidNumber("double exponent"),
                            cursor.coords()
                        );
                    }
                    exponent = true;
                    if !matches!(cursor.advance(), Some(b'+' | b'-')) {
                        return parser_error!(
                            Details::InvalidNumber("exponent sign required"),
                            cursor.coords()
                        );
                    }
                    if !matches!(cursor.advance(), Some(b'0'..=b'9')) {
                        return parser_error!(
                            Details::InvalidNumber("exponent digit required"),
                            cursor.coords()
                        );
                    }
                    cursor.advance();
                }
                _ => break,
            }
        }

        let token = cursor.slice(start, cursor.position());
        let integer = &token.as_bytes()[integer_start - start..];
        if integer.len() > 1 && integer[0] == b'0' && integer[1].is_ascii_digit() {
            return parser_error!(
                Details::InvalidNumber("leading zero"),
                cursor.coords_at(integer_start)
            );
        }

        if fraction || exponent {
            match fast_float::parse::<f64, _>(token) {
                Ok(value) if value.is_finite() => Ok(JsonValue::Float(value)),
                _ => parser_error!(
                    Details::NumberFormat(token.to_string()),
                    cursor.coords_at(start)
                ),
            }
        } else {
            match lexical::parse::<i64, _>(token) {
                Ok(value) => Ok(JsonValue::Integer(value)),
                Err(_) => parser_error!(
                    Details::NumberFormat(token.to_string()),
                    cursor.coords_at(start)
                ),
            }
        }
    }

    fn parse_true<'a>(&self, cursor: &mut Cursor<'a>) -> ParserResult<JsonValue<'a>> {
        self.parse_literal(cursor, "true", JsonValue::Boolean(true))
    }

    fn parse_false<'a>(&self, cursor: &mut Cursor<'a>) -> ParserResult<JsonValue<'a>> {
        self.parse_literal(cursor, "false", JsonValue::Boolean(false))
    }

    fn parse_null<'a>(&self, cursor: &mut Cursor<'a>) -> ParserResult<JsonValue<'a>> {
        self.parse_literal(cursor, "null", JsonValue::Null)
    }

    /// Consume exactly as many bytes as the keyword and check they match
    fn parse_literal<'a>(
        &self,
        cursor: &mut Cursor<'a>,
        keyword: &'static str,
        value: JsonValue<'a>,
    ) -> ParserResult<JsonValue<'a>> {
        let start = cursor.position();
        let token = cursor.read_n(keyword.len());
        if token == keyword.as_bytes() {
            Ok(value)
        } else {
            parser_error!(
                Details::UnexpectedLiteral {
                    expected: keyword,
                    found: String::from_utf8_lossy(token).into_owned(),
                },
                cursor.coords_at(start)
            )
        }
    }
}
