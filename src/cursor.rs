//! Byte-level cursor over a borrowed input buffer. The cursor knows nothing about the JSON
//! grammar, it just provides single byte lookahead, consumption and zero-copy slicing for the
//! parser to build on.
//!
//! A cursor is *not* intended to be shared, each parse builds its own.

use crate::coords::Coords;

/// A cursor over some input text, with a single byte of lookahead.
///
/// The position is always within `0..=len`, where `len` marks the end of input.
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    /// The underlying input
    text: &'a str,
    /// The current byte offset into the input
    position: usize,
}

impl<'a> Cursor<'a> {
    /// Create a new cursor positioned at the start of the input
    pub fn new(text: &'a str) -> Self {
        Cursor { text, position: 0 }
    }

    /// The current byte offset
    #[inline]
    pub fn position(&self) -> usize {
        self.position
    }

    /// The total length of the input in bytes
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Checks whether the underlying input is empty
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Checks whether the cursor has reached the end of the input
    #[inline]
    pub fn is_eof(&self) -> bool {
        self.position >= self.text.len()
    }

    /// Get the byte at the current position without advancing. Returns [None] at the end of the
    /// input
    #[inline]
    pub fn peek(&self) -> Option<u8> {
        self.text.as_bytes().get(self.position).copied()
    }

    /// Move forward by a single byte and return the new lookahead.
    ///
    /// # Panics
    ///
    /// Advancing when already at the end of input is a contract violation. Callers must check
    /// [Cursor::peek] first.
    #[inline]
    pub fn advance(&mut self) -> Option<u8> {
        assert!(!self.is_eof(), "cannot advance past the end of input");
        self.position += 1;
        self.peek()
    }

    /// Consume (at most) the next `n` bytes and return them. Stops short at the end of the input
    /// rather than advancing past it, so the returned slice may be shorter than `n`.
    pub fn read_n(&mut self, n: usize) -> &'a [u8] {
        let start = self.position;
        for _ in 0..n {
            if self.peek().is_none() {
                break;
            }
            self.advance();
        }
        &self.text.as_bytes()[start..self.position]
    }

    /// Extract the input between two previously recorded positions without copying. Both
    /// positions must fall on character boundaries, which holds for any position recorded next to
    /// an ASCII delimiter.
    pub fn slice(&self, start: usize, end: usize) -> &'a str {
        &self.text[start..end]
    }

    /// Skip over any run of JSON whitespace (space, tab, newline, carriage return). Other Unicode
    /// whitespace is left alone.
    pub fn skip_whitespace(&mut self) {
        while let Some(b' ' | b'\t' | b'\n' | b'\r') = self.peek() {
            self.advance();
        }
    }

    /// Compute the [Coords] of the current position
    pub fn coords(&self) -> Coords {
        self.coords_at(self.position)
    }

    /// Compute the [Coords] of a previously recorded position
    pub fn coords_at(&self, offset: usize) -> Coords {
        Coords::at_offset(self.text.as_bytes(), offset)
    }

    /// The (possibly multibyte) character at the current position, if any
    pub(crate) fn current_char(&self) -> Option<char> {
        self.text.get(self.position..)?.chars().next()
    }
}

#[cfg(test)]
mod tests {
    use super::Cursor;

    #[test]
    fn should_handle_empty_input() {
        let cursor = Cursor::new("");
        assert!(cursor.is_empty());
        assert!(cursor.is_eof());
        assert_eq!(cursor.peek(), None);
    }

    #[test]
    fn advance_should_return_the_new_lookahead() {
        let mut cursor = Cursor::new("ab");
        assert_eq!(cursor.peek(), Some(b'a'));
        assert_eq!(cursor.advance(), Some(b'b'));
        assert_eq!(cursor.advance(), None);
        assert_eq!(cursor.position(), 2);
        assert!(cursor.is_eof());
    }

    #[should_panic]
    #[test]
    fn advancing_past_the_end_should_panic() {
        let mut cursor = Cursor::new("x");
        cursor.advance();
        cursor.advance();
    }

    #[test]
    fn read_n_should_stop_at_the_end_of_input() {
        let mut cursor = Cursor::new("tru");
        assert_eq!(cursor.read_n(4), b"tru");
        assert!(cursor.is_eof());
    }

    #[test]
    fn read_n_should_consume_exactly_n_bytes() {
        let mut cursor = Cursor::new("falsey");
        assert_eq!(cursor.read_n(5), b"false");
        assert_eq!(cursor.peek(), Some(b'y'));
    }

    #[test]
    fn should_only_skip_json_whitespace() {
        let mut cursor = Cursor::new(" \t\r\n\u{a0}x");
        cursor.skip_whitespace();
        assert_eq!(cursor.position(), 4);
        assert_eq!(cursor.current_char(), Some('\u{a0}'));
    }

    #[test]
    fn slices_should_borrow_from_the_input() {
        let text = String::from("\"héllo\"");
        let mut cursor = Cursor::new(&text);
        cursor.advance();
        let start = cursor.position();
        while cursor.peek() != Some(b'"') {
            cursor.advance();
        }
        assert_eq!(cursor.slice(start, cursor.position()), "héllo");
    }

    #[test]
    fn should_report_coords_of_the_current_position() {
        let mut cursor = Cursor::new("[\n  1]");
        for _ in 0..4 {
            cursor.advance();
        }
        let coords = cursor.coords();
        assert_eq!(coords.line, 2);
        assert_eq!(coords.column, 3);
    }
}
