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

use crate::{color::Color, types::Piece};

/// Piece types of all supported variants.
///
/// Which roles exist in a game, their notation letters and how they move
/// is decided by the [`PieceTable`](crate::PieceTable) of the variant.
///
/// # Examples
///
/// ```
/// use polychess::Role;
///
/// // Piece types are indexed from 1.
/// assert_eq!(u32::from(Role::Pawn), 1);
/// assert_eq!(Role::Amazon.index(), Role::COUNT - 1);
/// ```
#[allow(missing_docs)]
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Role {
    Pawn = 1,
    Knight = 2,
    Bishop = 3,
    Rook = 4,
    Queen = 5,
    King = 6,
    /// Bishop and knight compound.
    Archbishop = 7,
    /// Rook and knight compound.
    Chancellor = 8,
    /// One diagonal step.
    Ferz = 9,
    /// Diagonal leap over one square.
    Alfil = 10,
    Advisor = 11,
    Elephant = 12,
    Horse = 13,
    Cannon = 14,
    Soldier = 15,
    /// Makruk khon: one step diagonally or straight forward.
    Khon = 16,
    /// Non-royal piece with the moves of a king.
    Mann = 17,
    /// Queen and knight compound.
    Amazon = 18,
}

impl Role {
    pub const COUNT: usize = 18;

    /// Zero-based index, suitable for lookup tables.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize - 1
    }

    #[inline]
    pub const fn of(self, color: Color) -> Piece {
        Piece {
            color,
            role: self,
            promoted: false,
        }
    }

    /// The six roles of orthodox chess.
    #[inline]
    pub const fn is_orthodox(self) -> bool {
        (self as u8) <= (Role::King as u8)
    }

    /// Default uppercase letter, used where no piece table is at hand
    /// (e.g. [`Move`](crate::Move) debug output). Letters are not unique
    /// across all roles.
    pub const fn upper_char(self) -> char {
        match self {
            Role::Pawn => 'P',
            Role::Knight => 'N',
            Role::Bishop => 'B',
            Role::Rook => 'R',
            Role::Queen => 'Q',
            Role::King => 'K',
            Role::Archbishop | Role::Advisor => 'A',
            Role::Chancellor | Role::Cannon => 'C',
            Role::Ferz => 'F',
            Role::Alfil => 'L',
            Role::Elephant => 'E',
            Role::Horse => 'H',
            Role::Soldier | Role::Khon => 'S',
            Role::Mann => 'M',
            Role::Amazon => 'Z',
        }
    }

    /// All roles, ordered by index.
    pub const ALL: [Role; Role::COUNT] = [
        Role::Pawn,
        Role::Knight,
        Role::Bishop,
        Role::Rook,
        Role::Queen,
        Role::King,
        Role::Archbishop,
        Role::Chancellor,
        Role::Ferz,
        Role::Alfil,
        Role::Advisor,
        Role::Elephant,
        Role::Horse,
        Role::Cannon,
        Role::Soldier,
        Role::Khon,
        Role::Mann,
        Role::Amazon,
    ];
}

macro_rules! int_from_role_impl {
    ($($t:ty)+) => {
        $(impl From<Role> for $t {
            #[inline]
            fn from(role: Role) -> $t {
                role as $t
            }
        })+
    }
}

int_from_role_impl! { u8 u16 u32 u64 usize }

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_indices() {
        for (i, role) in Role::ALL.into_iter().enumerate() {
            assert_eq!(role.index(), i);
            assert_eq!(usize::from(role), i + 1);
        }
        assert!(Role::King.is_orthodox());
        assert!(!Role::Archbishop.is_orthodox());
    }
}
