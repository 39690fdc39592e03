// This file is part of the polychess library.
// Copyright (C) 2026 The polychess developers
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program. If not, see <http://www.gnu.org/licenses/>.

use std::{error::Error, fmt, str::FromStr};

/// Largest supported number of files or ranks.
pub const MAX_SIDE: u8 = 16;

/// A square identified by zero-based file and rank.
///
/// Squares are not tied to a board size. Whether a square lies on a
/// particular board is answered by [`SquareGrid::contains`](crate::SquareGrid::contains).
///
/// # Display
///
/// Files are lowercase letters starting at `a`, ranks are one-based decimal
/// numbers which may have two digits on tall boards:
///
/// ```
/// use polychess::Square;
///
/// assert_eq!(Square::new(4, 1).to_string(), "e2");
/// assert_eq!(Square::new(0, 9).to_string(), "a10");
/// assert_eq!("i10".parse::<Square>(), Ok(Square::new(8, 9)));
/// ```
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub struct Square {
    rank: u8,
    file: u8,
}

impl Square {
    #[inline]
    pub const fn new(file: u8, rank: u8) -> Square {
        Square { file, rank }
    }

    #[inline]
    pub const fn file(self) -> u8 {
        self.file
    }

    #[inline]
    pub const fn rank(self) -> u8 {
        self.rank
    }

    #[inline]
    pub fn file_char(self) -> char {
        char::from(b'a' + self.file)
    }

    /// Moves the square by the given deltas, or `None` if a coordinate would
    /// become negative or too large.
    pub fn offset(self, df: i32, dr: i32) -> Option<Square> {
        let file = i32::from(self.file) + df;
        let rank = i32::from(self.rank) + dr;
        if (0..i32::from(MAX_SIDE)).contains(&file) && (0..i32::from(MAX_SIDE)).contains(&rank) {
            Some(Square::new(file as u8, rank as u8))
        } else {
            None
        }
    }

    /// Parses a square at the start of `s` and returns the unconsumed rest.
    ///
    /// The rank is read greedily, but never with a leading zero, so `a10`
    /// and `a1a2` both split as expected.
    pub fn parse_prefix(s: &[u8]) -> Option<(Square, &[u8])> {
        let (&file, rest) = s.split_first()?;
        if !(b'a'..b'a' + MAX_SIDE).contains(&file) {
            return None;
        }
        let digits = rest.iter().take_while(|ch| ch.is_ascii_digit()).count();
        let digits = match rest.first() {
            Some(b'1') if digits >= 2 => 2,
            Some(b'1'..=b'9') => 1,
            _ => return None,
        };
        let rank: u8 = btoi::btou(&rest[..digits]).ok()?;
        if rank == 0 || rank > MAX_SIDE {
            return None;
        }
        Some((Square::new(file - b'a', rank - 1), &rest[digits..]))
    }

    /// Parses a square name such as `e4` or `c10`.
    ///
    /// # Errors
    ///
    /// Returns [`ParseSquareError`] if `s` is not exactly one square name.
    pub fn from_ascii(s: &[u8]) -> Result<Square, ParseSquareError> {
        match Square::parse_prefix(s) {
            Some((sq, [])) => Ok(sq),
            _ => Err(ParseSquareError),
        }
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file_char(), u32::from(self.rank) + 1)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Square {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Square {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Square, D::Error> {
        let s = <&str>::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Error when parsing an invalid square name.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParseSquareError;

impl fmt::Display for ParseSquareError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid square name")
    }
}

impl Error for ParseSquareError {}

impl FromStr for Square {
    type Err = ParseSquareError;

    fn from_str(s: &str) -> Result<Square, ParseSquareError> {
        Square::from_ascii(s.as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_square_names() {
        assert_eq!("a1".parse::<Square>(), Ok(Square::new(0, 0)));
        assert_eq!("h8".parse::<Square>(), Ok(Square::new(7, 7)));
        assert_eq!("j10".parse::<Square>(), Ok(Square::new(9, 9)));
        assert_eq!(Square::new(15, 15).to_string(), "p16");
        assert_eq!("a0".parse::<Square>(), Err(ParseSquareError));
        assert_eq!("a17".parse::<Square>(), Err(ParseSquareError));
        assert_eq!("q1".parse::<Square>(), Err(ParseSquareError));
        assert_eq!("e".parse::<Square>(), Err(ParseSquareError));
        assert_eq!("e01".parse::<Square>(), Err(ParseSquareError));
    }

    #[test]
    fn test_parse_prefix() {
        let (from, rest) = Square::parse_prefix(b"e2e4").expect("square");
        assert_eq!(from, Square::new(4, 1));
        assert_eq!(Square::from_ascii(rest), Ok(Square::new(4, 3)));

        let (from, rest) = Square::parse_prefix(b"a10a9").expect("square");
        assert_eq!(from, Square::new(0, 9));
        assert_eq!(rest, b"a9");

        let (to, rest) = Square::parse_prefix(b"b1q").expect("square");
        assert_eq!(to, Square::new(1, 0));
        assert_eq!(rest, b"q");
    }

    #[test]
    fn test_offset() {
        let e4 = Square::new(4, 3);
        assert_eq!(e4.offset(1, 2), Some(Square::new(5, 5)));
        assert_eq!(e4.offset(-5, 0), None);
        assert_eq!(Square::new(15, 0).offset(1, 0), None);
    }
}
