//! The parser operates over borrowed text. When it's handed raw bytes instead (a byte slice, a
//! reader or a file) those bytes are first decoded into a `String` using one of the decoders from
//! `chisel-decoders`.
//!
//! The [DecoderSelector] implemented within this module is used to instantiate new `char`
//! iterators, based on different encodings. (Currently only ASCII and UTF-8 are supported).
//! Input containing a byte sequence that isn't valid for the selected encoding is rejected, with
//! the coordinates of the first offending byte.
use chisel_decoders::{ascii::AsciiDecoder, utf8::Utf8Decoder};
use std::io::BufRead;
use tracing::debug;

use crate::coords::Coords;
use crate::errors::{Details, ParserResult};
use crate::input_error;

/// Enumeration of different supported encoding types
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Encoding {
    Utf8,
    Ascii,
}

impl Default for Encoding {
    fn default() -> Self {
        Self::Utf8
    }
}

/// A struct that is essentially a factory for creating new instances of [char] iterators,
/// based on a specified encoding type
#[derive(Debug, Default, Copy, Clone)]
pub(crate) struct DecoderSelector {}

impl DecoderSelector {
    /// Create and return an instance of a given byte decoder / char iterator based on a specific
    /// encoding
    pub fn new_decoder<'a, Buffer: BufRead>(
        &'a self,
        buffer: &'a mut Buffer,
        encoding: Encoding,
    ) -> Box<dyn Iterator<Item = char> + 'a> {
        match encoding {
            Encoding::Ascii => Box::new(AsciiDecoder::new(buffer)),
            Encoding::Utf8 => Box::new(Utf8Decoder::new(buffer)),
        }
    }

    /// Decode a complete byte buffer into text. Both supported encodings map valid input onto
    /// identical UTF-8 bytes, so anything the decoder didn't reproduce exactly is an error
    pub fn decode(&self, bytes: &[u8], encoding: Encoding) -> ParserResult<String> {
        let mut reader = bytes;
        let text: String = self.new_decoder(&mut reader, encoding).collect();
        match first_invalid_offset(bytes, &text, encoding) {
            None => Ok(text),
            Some(offset) => {
                debug!(offset, ?encoding, "input is not valid for the selected encoding");
                let details = match encoding {
                    Encoding::Utf8 => Details::NonUtf8InputDetected,
                    Encoding::Ascii => Details::NonAsciiInputDetected,
                };
                input_error!(details, Coords::at_offset(bytes, offset))
            }
        }
    }
}

/// Offset of the first input byte which the decoded text doesn't reproduce
fn first_invalid_offset(bytes: &[u8], text: &str, encoding: Encoding) -> Option<usize> {
    let decoded = text.as_bytes();
    let mismatch = bytes
        .iter()
        .zip(decoded)
        .position(|(input, output)| input != output)
        .or_else(|| (bytes.len() != decoded.len()).then(|| bytes.len().min(decoded.len())));
    match encoding {
        Encoding::Utf8 => mismatch,
        Encoding::Ascii => {
            let non_ascii = bytes.iter().position(|b| !b.is_ascii());
            mismatch.into_iter().chain(non_ascii).min()
        }
    }
}
