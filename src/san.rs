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

//! Read and write Standard Algebraic Notation.
//!
//! Piece letters are those of the variant, so the same text can denote
//! different roles in different variants (`Q` is a ferz in Shatranj). Every
//! role except the western pawn is written with its letter.
//!
//! # Examples
//!
//! ```
//! use polychess::{san::San, Position, Variant};
//!
//! let pos = Position::new(Variant::Standard)?;
//! let san: San = "Nf3".parse()?;
//! let m = san.to_move(&pos)?;
//! assert_eq!(San::from_move(&pos, m).to_string(), "Nf3");
//! # Ok::<_, Box<dyn std::error::Error>>(())
//! ```

use std::{fmt, str::FromStr};

use crate::{
    castling_side::CastlingSide,
    m::Move,
    notation::IllegalNotation,
    position::Position,
    role::Role,
    square::{Square, MAX_SIDE},
    variant::RuleSet,
};

/// A move in Standard Algebraic Notation.
///
/// Pieces are named by letter. `None` stands for a pawn.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum San {
    Normal {
        letter: Option<char>,
        file: Option<u8>,
        rank: Option<u8>,
        capture: bool,
        to: Square,
        promotion: Option<char>,
    },
    Castle(CastlingSide),
    Put {
        letter: Option<char>,
        to: Square,
    },
}

fn parse_letter(ch: u8) -> Result<char, IllegalNotation> {
    if ch.is_ascii_alphabetic() {
        Ok(char::from(ch.to_ascii_uppercase()))
    } else {
        Err(IllegalNotation::Unparsable)
    }
}

fn is_file(ch: u8) -> bool {
    (b'a'..b'a' + MAX_SIDE).contains(&ch)
}

/// Splits a trailing square name off `s`.
fn split_square(s: &[u8]) -> Result<(&[u8], Square), IllegalNotation> {
    let digits = s.iter().rev().take_while(|ch| ch.is_ascii_digit()).count();
    let start = s
        .len()
        .checked_sub(digits + 1)
        .ok_or(IllegalNotation::Unparsable)?;
    // Ranks have at most two digits.
    if digits == 0 || digits > 2 || !is_file(s[start]) {
        return Err(IllegalNotation::Unparsable);
    }
    let to = Square::from_ascii(&s[start..]).map_err(|_| IllegalNotation::Unparsable)?;
    Ok((&s[..start], to))
}

impl San {
    /// Parses a SAN without suffixes.
    ///
    /// # Errors
    ///
    /// Returns [`IllegalNotation::Unparsable`] if `san` is not
    /// syntactically valid.
    pub fn from_ascii(san: &[u8]) -> Result<San, IllegalNotation> {
        match san {
            b"O-O" | b"0-0" => return Ok(San::Castle(CastlingSide::KingSide)),
            b"O-O-O" | b"0-0-0" => return Ok(San::Castle(CastlingSide::QueenSide)),
            _ => (),
        }

        if let Some(at) = san.iter().position(|&ch| ch == b'@') {
            let letter = match san[..at] {
                [] => None,
                [ch] => Some(parse_letter(ch)?),
                _ => return Err(IllegalNotation::Unparsable),
            };
            let to = Square::from_ascii(&san[at + 1..]).map_err(|_| IllegalNotation::Unparsable)?;
            return Ok(San::Put { letter, to });
        }

        let (san, promotion) = match san.iter().rposition(|&ch| ch == b'=') {
            Some(eq) => match san[eq + 1..] {
                [ch] => (&san[..eq], Some(parse_letter(ch)?)),
                _ => return Err(IllegalNotation::Unparsable),
            },
            None => (san, None),
        };

        let (letter, san) = match san.split_first() {
            Some((&ch, rest)) if ch.is_ascii_uppercase() => (Some(char::from(ch)), rest),
            _ => (None, san),
        };

        let (mut rest, to) = split_square(san)?;
        if let Some(stripped) = rest.strip_suffix(b"-") {
            rest = stripped;
        }
        let capture = match rest.strip_suffix(b"x") {
            Some(stripped) => {
                rest = stripped;
                true
            }
            None => false,
        };

        let file = match rest.split_first() {
            Some((&ch, tail)) if is_file(ch) => {
                rest = tail;
                Some(ch - b'a')
            }
            _ => None,
        };
        let rank = if rest.is_empty() {
            None
        } else {
            let rank: u8 = btoi::btou(rest).map_err(|_| IllegalNotation::Unparsable)?;
            if rank == 0 || rank > MAX_SIDE || rest[0] == b'0' {
                return Err(IllegalNotation::Unparsable);
            }
            Some(rank - 1)
        };

        Ok(San::Normal {
            letter,
            file,
            rank,
            capture,
            to,
            promotion,
        })
    }

    /// Converts a move to Standard Algebraic Notation, disambiguated among
    /// the legal moves of the position.
    pub fn from_move(pos: &Position, m: Move) -> San {
        let rules = pos.rules();
        match m {
            Move::Normal {
                role: Role::Pawn,
                from,
                capture,
                to,
                promotion,
            } => {
                let full = rules.pawns_ambiguous();
                San::Normal {
                    letter: None,
                    file: (capture.is_some() || full).then_some(from.file()),
                    rank: full.then_some(from.rank()),
                    capture: capture.is_some(),
                    to,
                    promotion: promotion.map(|role| role_letter(rules, role)),
                }
            }
            Move::Normal {
                role,
                from,
                capture,
                to,
                promotion,
            } => {
                let (mut same_file, mut same_rank, mut ambiguous) = (false, false, false);
                for candidate in pos.legal_moves() {
                    if let Move::Normal {
                        role: r,
                        from: f,
                        to: t,
                        promotion: p,
                        ..
                    } = candidate
                    {
                        if r == role && t == to && p == promotion && f != from {
                            ambiguous = true;
                            same_file |= f.file() == from.file();
                            same_rank |= f.rank() == from.rank();
                        }
                    }
                }
                let (file, rank) = match (ambiguous, same_file, same_rank) {
                    (false, _, _) => (None, None),
                    (true, false, _) => (Some(from.file()), None),
                    (true, true, false) => (None, Some(from.rank())),
                    (true, true, true) => (Some(from.file()), Some(from.rank())),
                };
                San::Normal {
                    letter: Some(role_letter(rules, role)),
                    file,
                    rank,
                    capture: capture.is_some(),
                    to,
                    promotion: promotion.map(|role| role_letter(rules, role)),
                }
            }
            Move::EnPassant { from, to } => San::Normal {
                letter: None,
                file: Some(from.file()),
                rank: rules.pawns_ambiguous().then_some(from.rank()),
                capture: true,
                to,
                promotion: None,
            },
            Move::Castle { king, rook } => {
                San::Castle(CastlingSide::from_files(king.file(), rook.file()))
            }
            Move::Put { role, to } => San::Put {
                letter: Some(role_letter(rules, role)),
                to,
            },
        }
    }

    /// Tests if the `San` can denote `m` under the piece letters of
    /// `rules`.
    pub fn matches(&self, rules: &RuleSet, m: Move) -> bool {
        match *self {
            San::Normal {
                letter,
                file,
                rank,
                capture,
                to,
                promotion,
            } => {
                let from = match m.from() {
                    Some(from) => from,
                    None => return false,
                };
                let promotes_as = m.promotion().map(|role| role_letter(rules, role));
                !m.is_castle()
                    && denotes(rules, letter, m.role())
                    && file.is_none_or(|f| f == from.file())
                    && rank.is_none_or(|r| r == from.rank())
                    && capture == m.is_capture()
                    && to == m.to()
                    && promotion == promotes_as
            }
            San::Castle(side) => m.castling_side() == Some(side),
            San::Put { letter, to } => match m {
                Move::Put { role, to: t } => denotes(rules, letter, role) && to == t,
                _ => false,
            },
        }
    }

    /// Finds the unique legal move denoted by the `San`.
    ///
    /// # Errors
    ///
    /// Returns [`IllegalNotation::Illegal`] if no legal move matches and
    /// [`IllegalNotation::Ambiguous`] if several do.
    pub fn to_move(&self, pos: &Position) -> Result<Move, IllegalNotation> {
        let moves = pos.legal_moves();
        let mut matching = moves.iter().filter(|&&m| self.matches(pos.rules(), m));
        match (matching.next(), matching.next()) {
            (Some(&m), None) => Ok(m),
            (Some(_), Some(_)) => Err(IllegalNotation::Ambiguous),
            (None, _) => Err(IllegalNotation::Illegal),
        }
    }
}

fn role_letter(rules: &RuleSet, role: Role) -> char {
    rules.pieces().letter(role).unwrap_or(role.upper_char())
}

fn denotes(rules: &RuleSet, letter: Option<char>, role: Role) -> bool {
    match letter {
        None => role == Role::Pawn,
        Some(letter) => role_letter(rules, role) == letter,
    }
}

impl FromStr for San {
    type Err = IllegalNotation;

    fn from_str(san: &str) -> Result<San, IllegalNotation> {
        San::from_ascii(san.as_bytes())
    }
}

impl fmt::Display for San {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            San::Normal {
                letter,
                file,
                rank,
                capture,
                to,
                promotion,
            } => {
                if let Some(letter) = letter {
                    write!(f, "{letter}")?;
                }
                if let Some(file) = file {
                    write!(f, "{}", char::from(b'a' + file))?;
                }
                if let Some(rank) = rank {
                    write!(f, "{}", u32::from(rank) + 1)?;
                }
                if capture {
                    f.write_str("x")?;
                }
                write!(f, "{to}")?;
                if let Some(promotion) = promotion {
                    write!(f, "={promotion}")?;
                }
                Ok(())
            }
            San::Castle(CastlingSide::KingSide) => f.write_str("O-O"),
            San::Castle(CastlingSide::QueenSide) => f.write_str("O-O-O"),
            San::Put { letter, to } => write!(f, "{}@{}", letter.unwrap_or('P'), to),
        }
    }
}

/// Check (`+`) or checkmate (`#`) suffix.
#[derive(Debug, PartialEq, Eq, Copy, Clone, Hash)]
pub enum Suffix {
    Check,
    Checkmate,
}

impl Suffix {
    pub const fn char(self) -> char {
        match self {
            Suffix::Check => '+',
            Suffix::Checkmate => '#',
        }
    }

    pub const fn from_char(ch: char) -> Option<Suffix> {
        match ch {
            '+' => Some(Suffix::Check),
            '#' => Some(Suffix::Checkmate),
            _ => None,
        }
    }

    pub fn from_position(pos: &Position) -> Option<Suffix> {
        if !pos.is_check() {
            None
        } else if pos.legal_moves().is_empty() {
            Some(Suffix::Checkmate)
        } else {
            Some(Suffix::Check)
        }
    }
}

impl fmt::Display for Suffix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.char())
    }
}

/// A [`San`] and possible check and checkmate suffixes.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub struct SanPlus {
    pub san: San,
    pub suffix: Option<Suffix>,
}

impl SanPlus {
    /// Parses a SAN with an optional check or checkmate suffix. Annotations
    /// like `!?` are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`IllegalNotation::Unparsable`] if `san` is not
    /// syntactically valid.
    pub fn from_ascii(mut san: &[u8]) -> Result<SanPlus, IllegalNotation> {
        while let Some(rest) = san.strip_suffix(b"!").or_else(|| san.strip_suffix(b"?")) {
            san = rest;
        }
        let suffix = san
            .last()
            .and_then(|&ch| Suffix::from_char(char::from(ch)));
        if suffix.is_some() {
            san = &san[..san.len() - 1];
        }
        Ok(SanPlus {
            san: San::from_ascii(san)?,
            suffix,
        })
    }

    /// Converts a legal move to SAN, including the check or checkmate
    /// suffix.
    pub fn from_move(pos: &Position, m: Move) -> SanPlus {
        let san = San::from_move(pos, m);
        let mut after = pos.scratch();
        after.make_move(m);
        SanPlus {
            san,
            suffix: Suffix::from_position(&after),
        }
    }
}

impl FromStr for SanPlus {
    type Err = IllegalNotation;

    fn from_str(san: &str) -> Result<SanPlus, IllegalNotation> {
        SanPlus::from_ascii(san.as_bytes())
    }
}

impl fmt::Display for SanPlus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.san)?;
        if let Some(suffix) = self.suffix {
            write!(f, "{suffix}")?;
        }
        Ok(())
    }
}
