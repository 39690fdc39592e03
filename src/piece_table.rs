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

//! Registry of the piece types used by a variant.

use bitflags::bitflags;

use crate::{color::Color, role::Role, types::Piece, variant::ConfigurationError};

bitflags! {
    /// Movement capabilities of a piece type. Compound pieces combine bits.
    #[derive(Copy, Clone, Eq, PartialEq, Debug, Hash, Default)]
    pub struct Movement: u16 {
        /// Slides along ranks and files.
        const ROOK = 1 << 0;
        /// Slides along diagonals.
        const BISHOP = 1 << 1;
        /// Leaps one square orthogonally and one diagonally.
        const KNIGHT = 1 << 2;
        /// Steps to any adjacent square.
        const KING = 1 << 3;
        /// Steps one square diagonally.
        const FERZ = 1 << 4;
        /// Leaps two squares diagonally.
        const ALFIL = 1 << 5;
        /// Slides orthogonally to move and captures over exactly one screen.
        const CANNON = 1 << 6;
        /// Moves according to the pawn step table of the variant.
        const PAWN = 1 << 7;
        /// Knight leap that is blocked by a piece on the orthogonal leg.
        const HORSE = 1 << 8;
        /// Alfil leap that is blocked by a piece in between and may not
        /// cross the river.
        const ELEPHANT = 1 << 9;
        /// Ferz confined to the palace.
        const ADVISOR = 1 << 10;
        /// Orthogonal step confined to the palace. Faces the opposing
        /// general along open files.
        const GENERAL = 1 << 11;
        /// Steps forward, and sideways once across the river.
        const SOLDIER = 1 << 12;
        /// Steps one square diagonally or straight forward.
        const SILVER = 1 << 13;

        const QUEEN = Self::ROOK.bits() | Self::BISHOP.bits();

        /// Movements that need palace and river geometry.
        const EASTERN = Self::HORSE.bits()
            | Self::ELEPHANT.bits()
            | Self::ADVISOR.bits()
            | Self::GENERAL.bits()
            | Self::SOLDIER.bits();
    }
}

/// Registration data of one piece type.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub struct PieceType {
    pub role: Role,
    pub name: &'static str,
    /// Uppercase notation letter.
    pub letter: char,
    pub movement: Movement,
}

/// Piece types of a variant, indexed by role and by notation letter.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct PieceTable {
    types: [Option<PieceType>; Role::COUNT],
    union: Movement,
}

impl PieceTable {
    pub fn new() -> PieceTable {
        PieceTable::default()
    }

    /// Registers a piece type.
    ///
    /// # Errors
    ///
    /// Fails if the role or the letter is already registered, or if the
    /// letter is not an ASCII letter.
    pub fn register(
        &mut self,
        role: Role,
        name: &'static str,
        letter: char,
        movement: Movement,
    ) -> Result<(), ConfigurationError> {
        let letter = letter.to_ascii_uppercase();
        if !letter.is_ascii_alphabetic() {
            return Err(ConfigurationError::InvalidLetter(letter));
        }
        if self.role_from_letter(letter).is_some() {
            return Err(ConfigurationError::DuplicateLetter(letter));
        }
        let slot = &mut self.types[role.index()];
        if slot.is_some() {
            return Err(ConfigurationError::DuplicateRole(role));
        }
        *slot = Some(PieceType {
            role,
            name,
            letter,
            movement,
        });
        self.union |= movement;
        Ok(())
    }

    #[inline]
    pub fn get(&self, role: Role) -> Option<&PieceType> {
        self.types[role.index()].as_ref()
    }

    #[inline]
    pub fn contains(&self, role: Role) -> bool {
        self.types[role.index()].is_some()
    }

    /// Movement of a role, empty if the role is not registered.
    #[inline]
    pub fn movement(&self, role: Role) -> Movement {
        self.types[role.index()].map_or(Movement::empty(), |t| t.movement)
    }

    /// Union of the movements of all registered types.
    #[inline]
    pub fn movements(&self) -> Movement {
        self.union
    }

    pub fn role_from_letter(&self, letter: char) -> Option<Role> {
        let letter = letter.to_ascii_uppercase();
        self.iter().find(|t| t.letter == letter).map(|t| t.role)
    }

    /// Uppercase letter of a role.
    pub fn letter(&self, role: Role) -> Option<char> {
        self.get(role).map(|t| t.letter)
    }

    /// Parses a FEN piece letter. Uppercase is White.
    pub fn piece_from_char(&self, ch: char) -> Option<Piece> {
        let role = self.role_from_letter(ch)?;
        Some(role.of(Color::from_white(ch.is_ascii_uppercase())))
    }

    pub fn piece_char(&self, piece: Piece) -> Option<char> {
        let letter = self.letter(piece.role)?;
        Some(piece.color.fold(letter, letter.to_ascii_lowercase()))
    }

    /// Registered types, ordered by role.
    pub fn iter(&self) -> impl Iterator<Item = &PieceType> {
        self.types.iter().flatten()
    }

    pub fn roles(&self) -> impl Iterator<Item = Role> + '_ {
        self.iter().map(|t| t.role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register() {
        let mut table = PieceTable::new();
        table
            .register(Role::Knight, "knight", 'N', Movement::KNIGHT)
            .expect("fresh role");
        table
            .register(Role::Queen, "queen", 'q', Movement::QUEEN)
            .expect("fresh role");

        assert_eq!(table.role_from_letter('n'), Some(Role::Knight));
        assert_eq!(table.letter(Role::Queen), Some('Q'));
        assert_eq!(
            table.piece_from_char('q'),
            Some(Role::Queen.of(Color::Black))
        );
        assert_eq!(table.piece_char(Role::Knight.of(Color::White)), Some('N'));
        assert_eq!(table.movement(Role::Rook), Movement::empty());
        assert!(table.movements().contains(Movement::ROOK | Movement::KNIGHT));
        assert_eq!(
            table.roles().collect::<Vec<_>>(),
            [Role::Knight, Role::Queen]
        );
    }

    #[test]
    fn test_duplicates() {
        let mut table = PieceTable::new();
        table
            .register(Role::Knight, "knight", 'N', Movement::KNIGHT)
            .expect("fresh role");
        assert_eq!(
            table.register(Role::Horse, "horse", 'N', Movement::HORSE),
            Err(ConfigurationError::DuplicateLetter('N'))
        );
        assert_eq!(
            table.register(Role::Knight, "knight", 'H', Movement::KNIGHT),
            Err(ConfigurationError::DuplicateRole(Role::Knight))
        );
        assert_eq!(
            table.register(Role::Ferz, "ferz", '~', Movement::FERZ),
            Err(ConfigurationError::InvalidLetter('~'))
        );
    }
}
