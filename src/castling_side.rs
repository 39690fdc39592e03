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

use std::ops;

use crate::{color::ByColor, square::Square};

/// `KingSide` (O-O) or `QueenSide` (O-O-O).
///
/// The king side is the wing towards the last file, regardless of where
/// the king actually stands.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum CastlingSide {
    KingSide,
    QueenSide,
}

impl CastlingSide {
    #[inline]
    pub const fn is_king_side(self) -> bool {
        matches!(self, CastlingSide::KingSide)
    }

    #[inline]
    pub const fn is_queen_side(self) -> bool {
        matches!(self, CastlingSide::QueenSide)
    }

    /// Wing of a rook on `rook_file` relative to a king on `king_file`.
    #[inline]
    pub const fn from_files(king_file: u8, rook_file: u8) -> CastlingSide {
        if rook_file > king_file {
            CastlingSide::KingSide
        } else {
            CastlingSide::QueenSide
        }
    }

    /// Destination file of the king on a board with `width` files.
    pub const fn king_to_file(self, width: u8) -> u8 {
        match self {
            CastlingSide::KingSide => width - 2,
            CastlingSide::QueenSide => 2,
        }
    }

    /// Destination file of the rook on a board with `width` files.
    pub const fn rook_to_file(self, width: u8) -> u8 {
        match self {
            CastlingSide::KingSide => width - 3,
            CastlingSide::QueenSide => 3,
        }
    }

    #[must_use]
    #[inline]
    pub const fn other(self) -> CastlingSide {
        match self {
            CastlingSide::KingSide => CastlingSide::QueenSide,
            CastlingSide::QueenSide => CastlingSide::KingSide,
        }
    }

    /// `KingSide` and `QueenSide`, in this order.
    pub const ALL: [CastlingSide; 2] = [CastlingSide::KingSide, CastlingSide::QueenSide];
}

impl ops::Not for CastlingSide {
    type Output = CastlingSide;

    #[inline]
    fn not(self) -> CastlingSide {
        self.other()
    }
}

/// Container with values for each [`CastlingSide`].
#[derive(Copy, Clone, Default, Eq, PartialEq, Debug, Hash)]
pub struct ByCastlingSide<T> {
    pub king_side: T,
    pub queen_side: T,
}

impl<T> ByCastlingSide<T> {
    #[inline]
    pub fn new_with<F>(mut init: F) -> ByCastlingSide<T>
    where
        F: FnMut(CastlingSide) -> T,
    {
        ByCastlingSide {
            king_side: init(CastlingSide::KingSide),
            queen_side: init(CastlingSide::QueenSide),
        }
    }

    #[inline]
    pub const fn get(&self, side: CastlingSide) -> &T {
        match side {
            CastlingSide::KingSide => &self.king_side,
            CastlingSide::QueenSide => &self.queen_side,
        }
    }

    #[inline]
    pub fn get_mut(&mut self, side: CastlingSide) -> &mut T {
        match side {
            CastlingSide::KingSide => &mut self.king_side,
            CastlingSide::QueenSide => &mut self.queen_side,
        }
    }
}

/// For each color and wing, the square of the rook that may still castle.
pub type CastlingRights = ByColor<ByCastlingSide<Option<Square>>>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_destinations() {
        assert_eq!(CastlingSide::KingSide.king_to_file(8), 6);
        assert_eq!(CastlingSide::KingSide.rook_to_file(8), 5);
        assert_eq!(CastlingSide::QueenSide.king_to_file(8), 2);
        assert_eq!(CastlingSide::QueenSide.rook_to_file(8), 3);
        // Capablanca: king f1 to i1, rook j1 to h1.
        assert_eq!(CastlingSide::KingSide.king_to_file(10), 8);
        assert_eq!(CastlingSide::KingSide.rook_to_file(10), 7);
    }

    #[test]
    fn test_from_files() {
        assert_eq!(CastlingSide::from_files(4, 7), CastlingSide::KingSide);
        assert_eq!(CastlingSide::from_files(1, 0), CastlingSide::QueenSide);
        assert_eq!(!CastlingSide::KingSide, CastlingSide::QueenSide);
    }
}
