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

//! Read and write moves in coordinate notation, as used by the UCI and
//! XBoard protocols.
//!
//! Castling is written as the king moving to its destination, except in
//! variants with random setups, where the king captures its own rook.
//! Both forms are accepted when reading.
//!
//! # Examples
//!
//! ```
//! use polychess::{uci::Uci, Position, Square, Variant};
//!
//! let uci: Uci = "h3h10".parse()?;
//! assert_eq!(uci, Uci::Normal {
//!     from: Square::new(7, 2),
//!     to: Square::new(7, 9),
//!     promotion: None,
//! });
//!
//! let pos = Position::new(Variant::Xiangqi)?;
//! let m = uci.to_move(&pos)?;
//! assert!(m.is_capture());
//! assert_eq!(Uci::from_move(&pos, m).to_string(), "h3h10");
//! # Ok::<_, Box<dyn std::error::Error>>(())
//! ```

use std::{fmt, str::FromStr};

use crate::{
    castling_side::CastlingSide,
    m::Move,
    notation::IllegalNotation,
    position::Position,
    role::Role,
    square::Square,
};

/// A move in coordinate notation. Letters are uppercase.
#[derive(Clone, Copy, Eq, PartialEq, Debug, Hash)]
pub enum Uci {
    Normal {
        from: Square,
        to: Square,
        promotion: Option<char>,
    },
    Put {
        letter: char,
        to: Square,
    },
    Null,
}

impl Uci {
    /// Parses a move like `e2e4`, `e7e8q`, `N@f3` or `0000`.
    ///
    /// # Errors
    ///
    /// Returns [`IllegalNotation::Unparsable`] if `uci` is not
    /// syntactically valid.
    pub fn from_ascii(uci: &[u8]) -> Result<Uci, IllegalNotation> {
        if uci == b"0000" {
            return Ok(Uci::Null);
        }

        if let [letter, b'@', to @ ..] = uci {
            if !letter.is_ascii_alphabetic() {
                return Err(IllegalNotation::Unparsable);
            }
            return Ok(Uci::Put {
                letter: char::from(letter.to_ascii_uppercase()),
                to: Square::from_ascii(to).map_err(|_| IllegalNotation::Unparsable)?,
            });
        }

        let (from, rest) = Square::parse_prefix(uci).ok_or(IllegalNotation::Unparsable)?;
        let (to, rest) = Square::parse_prefix(rest).ok_or(IllegalNotation::Unparsable)?;
        let promotion = match rest {
            [] => None,
            [letter] if letter.is_ascii_alphabetic() => Some(char::from(letter.to_ascii_uppercase())),
            _ => return Err(IllegalNotation::Unparsable),
        };
        Ok(Uci::Normal {
            from,
            to,
            promotion,
        })
    }

    /// Converts a move to coordinate notation in the context of its
    /// position.
    pub fn from_move(pos: &Position, m: Move) -> Uci {
        let letter = |role: Role| {
            pos.rules()
                .pieces()
                .letter(role)
                .unwrap_or(role.upper_char())
        };
        match m {
            Move::Normal {
                from,
                to,
                promotion,
                ..
            } => Uci::Normal {
                from,
                to,
                promotion: promotion.map(letter),
            },
            Move::EnPassant { from, to } => Uci::Normal {
                from,
                to,
                promotion: None,
            },
            Move::Castle { king, rook } if pos.variant().is_random() => Uci::Normal {
                from: king,
                to: rook,
                promotion: None,
            },
            Move::Castle { king, rook } => {
                let side = CastlingSide::from_files(king.file(), rook.file());
                Uci::Normal {
                    from: king,
                    to: Square::new(side.king_to_file(pos.rules().grid().width()), king.rank()),
                    promotion: None,
                }
            }
            Move::Put { role, to } => Uci::Put {
                letter: letter(role),
                to,
            },
        }
    }

    /// Finds the legal move denoted by the `Uci`.
    ///
    /// # Errors
    ///
    /// Returns [`IllegalNotation::Illegal`] if no legal move matches.
    pub fn to_move(&self, pos: &Position) -> Result<Move, IllegalNotation> {
        let rules = pos.rules();
        let width = rules.grid().width();
        let moves = pos.legal_moves();
        let letter_of = |role| rules.pieces().letter(role);

        let found = match *self {
            Uci::Normal {
                from,
                to,
                promotion,
            } => moves
                .iter()
                .find(|m| {
                    !m.is_castle()
                        && m.from() == Some(from)
                        && m.to() == to
                        && m.promotion().and_then(letter_of) == promotion
                })
                .or_else(|| {
                    moves.iter().find(|m| match **m {
                        Move::Castle { king, rook } => {
                            let side = CastlingSide::from_files(king.file(), rook.file());
                            promotion.is_none()
                                && king == from
                                && (rook == to
                                    || Square::new(side.king_to_file(width), king.rank()) == to)
                        }
                        _ => false,
                    })
                }),
            Uci::Put { letter, to } => moves.iter().find(|m| match **m {
                Move::Put { role, to: t } => t == to && letter_of(role) == Some(letter),
                _ => false,
            }),
            Uci::Null => None,
        };
        found.copied().ok_or(IllegalNotation::Illegal)
    }
}

impl FromStr for Uci {
    type Err = IllegalNotation;

    fn from_str(uci: &str) -> Result<Uci, IllegalNotation> {
        Uci::from_ascii(uci.as_bytes())
    }
}

impl fmt::Display for Uci {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Uci::Normal {
                from,
                to,
                promotion: None,
            } => write!(f, "{from}{to}"),
            Uci::Normal {
                from,
                to,
                promotion: Some(promotion),
            } => write!(f, "{from}{to}{}", promotion.to_ascii_lowercase()),
            Uci::Put { letter, to } => write!(f, "{letter}@{to}"),
            Uci::Null => f.write_str("0000"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::variant::Variant;

    #[test]
    fn test_read_write() {
        for uci in ["e2e4", "e7e8q", "N@f3", "0000", "a10j10", "i1i10"] {
            assert_eq!(uci.parse::<Uci>().expect("valid uci").to_string(), uci);
        }
        for invalid in ["e2", "e2e4qq", "e0e1", "@e4", "q2e4", ""] {
            assert_eq!(invalid.parse::<Uci>(), Err(IllegalNotation::Unparsable), "{invalid}");
        }
    }

    #[test]
    fn test_castling_forms() {
        let fen = "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1";
        let pos = Position::from_fen(Variant::Standard, fen).expect("valid fen");
        let castle = Move::Castle {
            king: Square::new(4, 0),
            rook: Square::new(7, 0),
        };
        assert_eq!(Uci::from_move(&pos, castle).to_string(), "e1g1");
        assert_eq!("e1g1".parse::<Uci>().and_then(|u| u.to_move(&pos)), Ok(castle));
        assert_eq!("e1h1".parse::<Uci>().and_then(|u| u.to_move(&pos)), Ok(castle));

        let pos = Position::from_fen(Variant::Chess960, fen).expect("valid fen");
        assert_eq!(Uci::from_move(&pos, castle).to_string(), "e1h1");
    }

    #[test]
    fn test_null_is_illegal() {
        let pos = Position::new(Variant::Standard).expect("start position");
        assert_eq!(Uci::Null.to_move(&pos), Err(IllegalNotation::Illegal));
    }
}
