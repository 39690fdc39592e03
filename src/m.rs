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

use std::{
    fmt,
    fmt::{Display, Write as _},
};

use arrayvec::ArrayVec;

use crate::{castling_side::CastlingSide, role::Role, square::Square};

/// Information about a move.
///
/// # Display
///
/// `Move` implements [`Display`] using long algebraic notation with default
/// role letters. If a position is available for context, prefer
/// [SAN](crate::san) or [coordinate notation](crate::uci), which use the
/// letters of the variant.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Move {
    /// A normal move, e.g., `Bd3xh7`.
    Normal {
        role: Role,
        from: Square,
        capture: Option<Role>,
        to: Square,
        promotion: Option<Role>,
    },
    /// An en passant capture, e.g., `e5xd6`.
    EnPassant { from: Square, to: Square },
    /// A castling move, `O-O` or `O-O-O`, encoded as king takes own rook.
    Castle { king: Square, rook: Square },
    /// A piece drop, e.g., `Q@g8`.
    Put { role: Role, to: Square },
}

impl Move {
    /// Gets the role of the moved piece.
    pub const fn role(self) -> Role {
        match self {
            Move::Normal { role, .. } | Move::Put { role, .. } => role,
            Move::EnPassant { .. } => Role::Pawn,
            Move::Castle { .. } => Role::King,
        }
    }

    /// Gets the origin square or `None` for drops.
    pub const fn from(self) -> Option<Square> {
        match self {
            Move::Normal { from, .. } | Move::EnPassant { from, .. } => Some(from),
            Move::Castle { king, .. } => Some(king),
            Move::Put { .. } => None,
        }
    }

    /// Gets the target square. For castling moves this is the corresponding
    /// rook square.
    pub const fn to(self) -> Square {
        match self {
            Move::Normal { to, .. } | Move::EnPassant { to, .. } | Move::Put { to, .. } => to,
            Move::Castle { rook, .. } => rook,
        }
    }

    /// Gets the role of the captured piece or `None`.
    pub const fn capture(self) -> Option<Role> {
        match self {
            Move::Normal { capture, .. } => capture,
            Move::EnPassant { .. } => Some(Role::Pawn),
            _ => None,
        }
    }

    /// Checks if the move is a capture.
    pub const fn is_capture(self) -> bool {
        matches!(
            self,
            Move::Normal {
                capture: Some(_),
                ..
            } | Move::EnPassant { .. }
        )
    }

    /// Checks if the move is en passant.
    pub const fn is_en_passant(self) -> bool {
        matches!(self, Move::EnPassant { .. })
    }

    /// Checks if the move resets the reversible-move counter: captures,
    /// pawn and soldier moves, and pawn drops.
    pub const fn is_zeroing(self) -> bool {
        matches!(
            self,
            Move::Normal {
                role: Role::Pawn | Role::Soldier,
                ..
            } | Move::Normal {
                capture: Some(_),
                ..
            } | Move::EnPassant { .. }
                | Move::Put {
                    role: Role::Pawn,
                    ..
                }
        )
    }

    /// Gets the castling side.
    pub const fn castling_side(self) -> Option<CastlingSide> {
        match self {
            Move::Castle { king, rook } => Some(CastlingSide::from_files(king.file(), rook.file())),
            _ => None,
        }
    }

    /// Checks if the move is a castling move.
    pub const fn is_castle(self) -> bool {
        matches!(self, Move::Castle { .. })
    }

    /// Gets the promotion role.
    pub const fn promotion(self) -> Option<Role> {
        match self {
            Move::Normal { promotion, .. } => promotion,
            _ => None,
        }
    }

    /// Checks if the move is a promotion.
    pub const fn is_promotion(self) -> bool {
        matches!(
            self,
            Move::Normal {
                promotion: Some(_),
                ..
            }
        )
    }
}

impl Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Move::Normal {
                role,
                from,
                capture,
                to,
                promotion,
            } => {
                if role != Role::Pawn {
                    f.write_char(role.upper_char())?;
                }

                write!(
                    f,
                    "{}{}{}",
                    from,
                    if capture.is_some() { 'x' } else { '-' },
                    to
                )?;

                if let Some(p) = promotion {
                    write!(f, "={}", p.upper_char())?;
                }

                Ok(())
            }
            Move::EnPassant { from, to, .. } => write!(f, "{from}x{to}"),
            Move::Castle { king, rook } => f.write_str(if king.file() < rook.file() {
                "O-O"
            } else {
                "O-O-O"
            }),
            Move::Put { role, to } => {
                f.write_char(role.upper_char())?;
                write!(f, "@{to}")
            }
        }
    }
}

/// A container for moves that can be stored inline on the stack.
///
/// The capacity is enough for the pseudo-legal moves of any position of the
/// supported variants, including drops with a full hand.
///
/// # Example
///
/// ```
/// use polychess::{Position, Role, Variant};
///
/// let pos = Position::new(Variant::Standard)?;
/// let mut moves = pos.legal_moves();
/// moves.retain(|m| m.role() == Role::Pawn);
/// assert_eq!(moves.len(), 16);
/// # Ok::<_, polychess::ParseFenError>(())
/// ```
pub type MoveList = ArrayVec<Move, 768>;

#[cfg(test)]
mod tests {
    use std::mem;

    use super::*;

    #[test]
    fn test_move_size() {
        assert!(mem::size_of::<Move>() <= 12);
    }

    #[test]
    fn test_display() {
        let m = Move::Normal {
            role: Role::Pawn,
            from: Square::new(4, 6),
            capture: Some(Role::Rook),
            to: Square::new(3, 7),
            promotion: Some(Role::Queen),
        };
        assert_eq!(m.to_string(), "e7xd8=Q");
        assert!(m.is_zeroing());

        let castle = Move::Castle {
            king: Square::new(4, 0),
            rook: Square::new(0, 0),
        };
        assert_eq!(castle.to_string(), "O-O-O");
        assert_eq!(castle.castling_side(), Some(CastlingSide::QueenSide));
        assert!(!castle.is_zeroing());

        let drop = Move::Put {
            role: Role::Knight,
            to: Square::new(5, 2),
        };
        assert_eq!(drop.to_string(), "N@f3");
        assert_eq!(drop.from(), None);
        assert!(!drop.is_zeroing());
    }

    #[test]
    fn test_zeroing() {
        let soldier = Move::Normal {
            role: Role::Soldier,
            from: Square::new(4, 3),
            capture: None,
            to: Square::new(4, 4),
            promotion: None,
        };
        assert!(soldier.is_zeroing());

        let pawn_drop = Move::Put {
            role: Role::Pawn,
            to: Square::new(3, 3),
        };
        assert!(pawn_drop.is_zeroing());

        let horse = Move::Normal {
            role: Role::Horse,
            from: Square::new(1, 0),
            capture: None,
            to: Square::new(2, 2),
            promotion: None,
        };
        assert!(!horse.is_zeroing());
        assert!(Move::EnPassant {
            from: Square::new(4, 4),
            to: Square::new(3, 5),
        }
        .is_zeroing());
    }
}
