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

use crate::{color::Color, role::Role, square::Square};

/// A piece with [`Color`] and [`Role`].
///
/// `promoted` marks pieces that were created by promotion in variants with
/// drops, where they return to the hand as pawns when captured.
#[allow(missing_docs)]
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub struct Piece {
    pub color: Color,
    pub role: Role,
    pub promoted: bool,
}

impl Piece {
    #[inline]
    pub const fn new(color: Color, role: Role) -> Piece {
        role.of(color)
    }

    /// Compares color and role, ignoring the promotion flag.
    #[inline]
    pub fn is(self, color: Color, role: Role) -> bool {
        self.color == color && self.role == role
    }
}

/// Largest number of pieces of one role that fit into a hand.
pub const MAX_POCKET: u8 = 64;

/// Pieces in hand of one side.
#[derive(Copy, Clone, Default, Eq, PartialEq, Debug, Hash)]
pub struct Pocket {
    counts: [u8; Role::COUNT],
}

impl Pocket {
    #[inline]
    pub fn get(&self, role: Role) -> u8 {
        self.counts[role.index()]
    }

    #[inline]
    pub(crate) fn set(&mut self, role: Role, count: u8) {
        self.counts[role.index()] = count;
    }

    pub fn is_empty(&self) -> bool {
        self.counts.iter().all(|&n| n == 0)
    }

    pub fn count(&self) -> usize {
        self.counts.iter().map(|&n| usize::from(n)).sum()
    }

    /// Roles with at least one piece in hand, with their counts.
    pub fn iter(&self) -> impl Iterator<Item = (Role, u8)> + '_ {
        Role::ALL
            .into_iter()
            .zip(self.counts)
            .filter(|&(_, n)| n > 0)
    }
}

/// En passant state after a double pawn step.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub struct EnPassant {
    /// The square that was skipped. Capturing pawns move here.
    pub square: Square,
    /// The pawn that can be captured.
    pub target: Square,
}

/// State of the Makruk counting rules.
///
/// A count starts once no pawns are left. When one side is reduced to
/// fewer than two pieces the stricter count by pieces' honour replaces it.
#[derive(Copy, Clone, Default, Eq, PartialEq, Debug, Hash)]
pub struct Counting {
    /// Ply at which the game is drawn, or zero while no count runs.
    pub limit: u32,
    /// Plies counted so far.
    pub plies: u32,
    /// The count is by pieces' honour.
    pub pieces_honour: bool,
}

impl Counting {
    /// Tests if the count ran out.
    #[inline]
    pub fn is_expired(&self) -> bool {
        self.limit > 0 && self.plies >= self.limit
    }
}
