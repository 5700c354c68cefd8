//! Coordinate structure used to reference specific locations within parser input

use std::cmp::Ordering;
use std::fmt::{Display, Formatter};

/// A [Coords] represents a single location within the parser input
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Coords {
    /// The absolute byte offset
    pub absolute: usize,
    /// The row position, starting at 1
    pub line: usize,
    /// The column position (in bytes), starting at 1
    pub column: usize,
}

impl Coords {
    /// Compute the coordinates of a given byte offset within some input, by counting the newlines
    /// that precede it. Offsets past the end of the input are clamped to the end.
    pub fn at_offset(input: &[u8], offset: usize) -> Self {
        let offset = offset.min(input.len());
        input[..offset]
            .iter()
            .fold(Coords::default(), |coords, &b| match b {
                b'\n' => Coords {
                    absolute: coords.absolute + 1,
                    line: coords.line + 1,
                    column: 1,
                },
                _ => Coords {
                    absolute: coords.absolute + 1,
                    line: coords.line,
                    column: coords.column + 1,
                },
            })
    }
}

impl Display for Coords {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[abs: {}, line: {}, column: {}]",
            self.absolute, self.line, self.column
        )
    }
}

impl Default for Coords {
    /// The default set of coordinates are positioned at the start of the first row
    fn default() -> Self {
        Coords {
            absolute: 0,
            line: 1,
            column: 1,
        }
    }
}

impl Eq for Coords {}

impl PartialOrd<Self> for Coords {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Coords {
    fn cmp(&self, other: &Self) -> Ordering {
        self.absolute.cmp(&other.absolute)
    }
}
