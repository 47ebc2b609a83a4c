//! Coordinates used to report where in a payload a decoding failure occurred
#![allow(clippy::len_without_is_empty)]

use std::fmt::{Display, Formatter};

/// A character position within the input. Ordering follows the absolute position
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Coords {
    /// The absolute character position
    pub absolute: usize,
    /// The line, starting from 1
    pub line: usize,
    /// The column within the line, starting from 1
    pub column: usize,
}

impl Coords {
    /// Move the coordinates on past a given character
    pub fn advance(&mut self, c: char) {
        self.absolute += 1;
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
    }
}

impl Default for Coords {
    /// The default set of coordinates are positioned at the start of the first line
    fn default() -> Self {
        Coords {
            absolute: 0,
            line: 1,
            column: 1,
        }
    }
}

impl Display for Coords {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "[line: {}, column: {}]", self.line, self.column)
    }
}

/// The stretch of input a token was read from, inclusive at both ends
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct Span {
    pub start: Coords,
    pub end: Coords,
}

impl Span {
    /// Number of characters covered, counting both ends
    pub fn len(&self) -> usize {
        self.start.absolute.abs_diff(self.end.absolute) + 1
    }
}

impl Display for Span {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::{Coords, Span};

    #[test]
    fn newlines_should_move_to_the_next_line() {
        let mut coords = Coords::default();
        "ab\nc".chars().for_each(|c| coords.advance(c));
        assert_eq!(coords.absolute, 4);
        assert_eq!(coords.line, 2);
        assert_eq!(coords.column, 2);
    }

    #[test]
    fn spans_should_have_a_minimum_length_of_one() {
        let span = Span::default();
        assert_eq!(span.len(), 1);
        let mut end = Coords::default();
        "true".chars().skip(1).for_each(|c| end.advance(c));
        assert_eq!(Span { start: Coords::default(), end }.len(), 4);
    }

    #[test]
    fn spans_should_display_both_ends() {
        let mut end = Coords::default();
        end.advance('x');
        let span = Span { start: Coords::default(), end };
        assert_eq!(span.to_string(), "[line: 1, column: 1] to [line: 1, column: 2]");
        assert!(span.start < span.end);
    }
}
