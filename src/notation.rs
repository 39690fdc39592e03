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

//! Move notation, chosen at runtime.
//!
//! # Examples
//!
//! ```
//! use polychess::{move_from_text, move_to_text, Notation, Position, Variant};
//!
//! let pos = Position::new(Variant::Standard)?;
//! let m = move_from_text(&pos, "Nf3", Notation::San)?;
//! assert_eq!(move_to_text(&pos, m, Notation::Lan), "g1f3");
//! # Ok::<_, Box<dyn std::error::Error>>(())
//! ```

use std::{error::Error, fmt, str::FromStr};

use crate::{m::Move, position::Position, san::SanPlus, uci::Uci};

/// Text formats for moves.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Notation {
    /// Standard algebraic notation, like `Nxe4+`.
    #[default]
    San,
    /// Long algebraic (coordinate) notation, like `e7e8q`.
    Lan,
}

/// Error when converting text to a move.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum IllegalNotation {
    /// The text is not syntactically valid.
    Unparsable,
    /// The text does not describe a legal move.
    Illegal,
    /// The text matches more than one legal move.
    Ambiguous,
}

impl fmt::Display for IllegalNotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            IllegalNotation::Unparsable => "unparsable move notation",
            IllegalNotation::Illegal => "illegal move",
            IllegalNotation::Ambiguous => "ambiguous move",
        })
    }
}

impl Error for IllegalNotation {}

/// Converts text to a legal move of the side to move.
///
/// # Errors
///
/// Returns [`IllegalNotation`] if the text cannot be parsed or does not
/// denote exactly one legal move.
pub fn move_from_text(pos: &Position, text: &str, notation: Notation) -> Result<Move, IllegalNotation> {
    let result = match notation {
        Notation::San => SanPlus::from_str(text).and_then(|san| san.san.to_move(pos)),
        Notation::Lan => Uci::from_str(text).and_then(|uci| uci.to_move(pos)),
    };
    if let Err(err) = &result {
        log::debug!("cannot decode {text:?} as {notation:?} in {}: {err}", pos.to_fen());
    }
    result
}

/// Writes a legal move.
pub fn move_to_text(pos: &Position, m: Move, notation: Notation) -> String {
    match notation {
        Notation::San => SanPlus::from_move(pos, m).to_string(),
        Notation::Lan => Uci::from_move(pos, m).to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::variant::Variant;

    #[test]
    fn test_every_legal_move_roundtrips() {
        for (variant, fen) in [
            (Variant::Standard, "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1"),
            (Variant::Standard, "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1"),
            (Variant::Chess960, "bqnb1rkr/pp3ppp/3ppn2/2p5/5P2/P2P4/NPP1P1PP/BQ1BNRKR w HFhf - 2 9"),
            (Variant::Capablanca, "r1b2k2nr/p1ppq1ppbp/n1Pcpa2p1/5p4/5P4/1p1PBCPN2/PP1QP1BPPP/RN3KA2R w KQkq - 6 12"),
            (Variant::Berolina, "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"),
            (Variant::Crazyhouse, "r1bqk2r/pppp1ppp/2n5/4p3/1bP1P3/2N2N2/PP1P1PPP/R2QKB1R[Bn] b KQkq - 0 5"),
            (Variant::Xiangqi, "rnbakabnr/9/1c5c1/p1p1p1p1p/9/9/P1P1P1P1P/1C5C1/9/RNBAKABNR w - - 0 1"),
            (Variant::Shatranj, "rnbkqbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBKQBNR w - - 0 1"),
        ] {
            let pos = Position::from_fen(variant, fen).expect("valid fen");
            for m in pos.legal_moves() {
                for notation in [Notation::San, Notation::Lan] {
                    let text = move_to_text(&pos, m, notation);
                    assert_eq!(move_from_text(&pos, &text, notation), Ok(m), "{variant} {fen} {text}");
                }
            }
        }
    }

    #[test]
    fn test_errors() {
        let pos = Position::new(Variant::Standard).expect("start position");
        assert_eq!(move_from_text(&pos, "Zz9", Notation::San), Err(IllegalNotation::Unparsable));
        assert_eq!(move_from_text(&pos, "Nf5", Notation::San), Err(IllegalNotation::Illegal));
        assert_eq!(move_from_text(&pos, "e2e5", Notation::Lan), Err(IllegalNotation::Illegal));
        assert_eq!(move_from_text(&pos, "e2", Notation::Lan), Err(IllegalNotation::Unparsable));

        let pos = Position::from_fen(Variant::Standard, "4k3/8/8/8/8/8/8/N3K2N w - - 0 1").expect("valid fen");
        assert_eq!(move_from_text(&pos, "Ne3", Notation::San), Err(IllegalNotation::Illegal));
        let pos = Position::from_fen(Variant::Standard, "4k3/8/8/8/8/8/8/1N1K1N2 w - - 0 1").expect("valid fen");
        assert_eq!(move_from_text(&pos, "Nd2", Notation::San), Err(IllegalNotation::Ambiguous));
        assert!(move_from_text(&pos, "Nbd2", Notation::San).is_ok());
    }
}
