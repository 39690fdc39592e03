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

use crate::{color::Color, position::Position};

/// Why a game ended.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Reason {
    Checkmate,
    Stalemate,
    /// A rule particular to the variant, like reaching the hill or the
    /// goal rank.
    VariantEnd,
    InsufficientMaterial,
    /// Too many plies without capture or pawn move, or the Makruk count
    /// ran out.
    MoveLimit,
    Repetition,
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Reason::Checkmate => "checkmate",
            Reason::Stalemate => "stalemate",
            Reason::VariantEnd => "variant end",
            Reason::InsufficientMaterial => "insufficient material",
            Reason::MoveLimit => "move limit",
            Reason::Repetition => "repetition",
        })
    }
}

/// Result of a game, or [`GameResult::Ongoing`].
///
/// # Examples
///
/// ```
/// use polychess::{Color, GameResult, Reason};
///
/// let result = GameResult::Decisive {
///     winner: Color::White,
///     reason: Reason::Checkmate,
/// };
/// assert_eq!(result.to_string(), "1-0");
/// assert_eq!(result.winner(), Some(Color::White));
/// ```
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GameResult {
    Ongoing,
    Decisive { winner: Color, reason: Reason },
    Draw { reason: Reason },
}

impl GameResult {
    pub const fn winner(self) -> Option<Color> {
        match self {
            GameResult::Decisive { winner, .. } => Some(winner),
            GameResult::Ongoing | GameResult::Draw { .. } => None,
        }
    }

    pub const fn reason(self) -> Option<Reason> {
        match self {
            GameResult::Decisive { reason, .. } | GameResult::Draw { reason } => Some(reason),
            GameResult::Ongoing => None,
        }
    }

    pub const fn is_draw(self) -> bool {
        matches!(self, GameResult::Draw { .. })
    }

    pub const fn is_ongoing(self) -> bool {
        matches!(self, GameResult::Ongoing)
    }
}

impl fmt::Display for GameResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match *self {
            GameResult::Decisive {
                winner: Color::White,
                ..
            } => "1-0",
            GameResult::Decisive {
                winner: Color::Black,
                ..
            } => "0-1",
            GameResult::Draw { .. } => "1/2-1/2",
            GameResult::Ongoing => "*",
        })
    }
}

/// Error when parsing a [`GameResult`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParseGameResultError;

impl fmt::Display for ParseGameResultError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid game result")
    }
}

impl Error for ParseGameResultError {}

impl FromStr for GameResult {
    type Err = ParseGameResultError;

    /// Parses a PGN result token. The reason is not part of the token,
    /// decisive results read as checkmate and draws as repetition.
    fn from_str(s: &str) -> Result<GameResult, ParseGameResultError> {
        match s {
            "1-0" => Ok(GameResult::Decisive {
                winner: Color::White,
                reason: Reason::Checkmate,
            }),
            "0-1" => Ok(GameResult::Decisive {
                winner: Color::Black,
                reason: Reason::Checkmate,
            }),
            "1/2-1/2" => Ok(GameResult::Draw {
                reason: Reason::Repetition,
            }),
            "*" => Ok(GameResult::Ongoing),
            _ => Err(ParseGameResultError),
        }
    }
}

/// Evaluates a position. Checked in order: variant rules, mate and
/// stalemate, insufficient material, the move limit and repetition.
pub(crate) fn result(pos: &Position) -> GameResult {
    let variant = pos.variant();
    if let Some(result) = variant.variant_end(pos) {
        return result;
    }

    if pos.legal_moves().is_empty() {
        return variant.no_moves_result(pos);
    }

    if variant.is_insufficient_material(pos) {
        return GameResult::Draw {
            reason: Reason::InsufficientMaterial,
        };
    }

    let exhausted = if pos.rules().counting() {
        pos.counting().is_expired()
    } else {
        pos.halfmoves() >= pos.rules().move_limit()
    };
    if exhausted {
        return GameResult::Draw {
            reason: Reason::MoveLimit,
        };
    }

    if pos.repetitions() >= 2 {
        return GameResult::Draw {
            reason: Reason::Repetition,
        };
    }

    GameResult::Ongoing
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::variant::Variant;

    fn result_of(variant: Variant, fen: &str) -> GameResult {
        Position::from_fen(variant, fen)
            .expect("valid fen")
            .result()
    }

    #[test]
    fn test_mate_and_stalemate() {
        assert_eq!(
            result_of(Variant::Standard, "R5k1/5ppp/8/8/8/8/8/6K1 b - - 0 1"),
            GameResult::Decisive {
                winner: Color::White,
                reason: Reason::Checkmate,
            }
        );
        assert_eq!(
            result_of(Variant::Standard, "7k/5Q2/8/8/8/8/8/6K1 b - - 0 1"),
            GameResult::Draw {
                reason: Reason::Stalemate,
            }
        );
    }

    #[test]
    fn test_black_wins_and_bare_stalemate() {
        assert_eq!(
            result_of(Variant::Standard, "2K1r3/8/2k5/8/8/8/8/8 w - - 0 1"),
            GameResult::Decisive {
                winner: Color::Black,
                reason: Reason::Checkmate,
            }
        );
        assert_eq!(
            result_of(Variant::Standard, "k7/8/K7/8/1R6/8/8/8 b - - 0 1"),
            GameResult::Draw {
                reason: Reason::Stalemate,
            }
        );
    }

    #[test]
    fn test_xiangqi_stalemate_loses() {
        // The black general has no square left and nothing else can move.
        assert_eq!(
            result_of(Variant::Xiangqi, "3k5/4R4/9/9/9/9/9/9/9/5K3 b - - 0 1"),
            GameResult::Decisive {
                winner: Color::White,
                reason: Reason::Stalemate,
            }
        );
    }

    #[test]
    fn test_insufficient_material() {
        assert_eq!(
            result_of(Variant::Standard, "8/8/4k3/8/8/2B5/8/4K3 w - - 0 1"),
            GameResult::Draw {
                reason: Reason::InsufficientMaterial,
            }
        );
        assert!(result_of(Variant::Standard, "8/8/4k3/8/8/2R5/8/4K3 w - - 0 1").is_ongoing());
        assert!(result_of(Variant::Xiangqi, "3k5/9/9/9/9/9/9/9/4A4/5K3 w - - 0 1").is_draw());
    }

    #[test]
    fn test_move_limit() {
        assert_eq!(
            result_of(Variant::Standard, "8/8/4k3/8/8/2R5/8/4K3 w - - 100 80"),
            GameResult::Draw {
                reason: Reason::MoveLimit,
            }
        );
        assert!(result_of(Variant::Standard, "8/8/4k3/8/8/2R5/8/4K3 w - - 99 80").is_ongoing());
        assert!(result_of(Variant::Shatranj, "8/8/4k3/4p3/8/2R5/8/4K3 w - - 100 80").is_ongoing());
    }

    #[test]
    fn test_king_of_the_hill() {
        assert_eq!(
            result_of(Variant::KingOfTheHill, "8/8/8/3K4/8/8/8/k7 b - - 0 1").winner(),
            Some(Color::White)
        );
    }

    #[test]
    fn test_racing_kings() {
        // Black can still reach the goal rank and draw.
        assert!(result_of(Variant::RacingKings, "6K1/k7/8/8/8/8/8/8 b - - 0 1").is_ongoing());
        assert_eq!(
            result_of(Variant::RacingKings, "6K1/8/8/8/k7/8/8/8 b - - 0 1").winner(),
            Some(Color::White)
        );
        assert!(result_of(Variant::RacingKings, "K5k1/8/8/8/8/8/8/8 w - - 0 1").is_draw());
    }

    #[test]
    fn test_makruk_counting() {
        assert_eq!(
            result_of(Variant::Makruk, "4k3/8/8/8/8/8/8/R3K3 w - 32 32 40"),
            GameResult::Draw {
                reason: Reason::MoveLimit,
            }
        );
        assert!(result_of(Variant::Makruk, "4k3/8/8/8/8/8/8/R3K3 w - 32 31 40").is_ongoing());
        assert!(result_of(Variant::Makruk, "4k3/8/8/8/8/8/8/R3K3 w - - 120 40").is_ongoing());
        assert_eq!(
            result_of(Variant::Makruk, "4k3/8/8/8/8/8/8/N3K3 w - - 0 1"),
            GameResult::Draw {
                reason: Reason::InsufficientMaterial,
            }
        );
    }

    #[test]
    fn test_horde_extinction() {
        assert_eq!(
            result_of(Variant::Horde, "4k3/8/8/8/8/8/8/8 w - - 0 1"),
            GameResult::Decisive {
                winner: Color::Black,
                reason: Reason::VariantEnd,
            }
        );
        assert!(result_of(Variant::Horde, "4k3/8/8/8/8/8/P7/8 w - - 0 1").is_ongoing());
    }

    #[test]
    fn test_three_kings_first_loss() {
        assert_eq!(
            result_of(Variant::ThreeKings, "kk6/8/8/8/8/8/8/K7 w - - 0 1"),
            GameResult::Decisive {
                winner: Color::Black,
                reason: Reason::VariantEnd,
            }
        );
        assert!(result_of(Variant::ThreeKings, "kk6/p7/8/8/8/8/P7/KK6 w - - 0 1").is_ongoing());
        assert!(Position::new(Variant::ThreeKings)
            .expect("start position")
            .result()
            .is_ongoing());
    }

    #[test]
    fn test_shatranj_bare_king() {
        assert_eq!(
            result_of(Variant::Shatranj, "4k3/8/8/8/8/8/8/R3K3 b - - 0 1"),
            GameResult::Decisive {
                winner: Color::White,
                reason: Reason::VariantEnd,
            }
        );
        // The bare king can take the last piece and draw.
        assert!(result_of(Variant::Shatranj, "4k3/4R3/8/8/8/8/8/4K3 b - - 0 1").is_ongoing());
        assert_eq!(
            result_of(Variant::Shatranj, "4k3/8/8/8/8/8/8/4K3 w - - 0 1"),
            GameResult::Draw {
                reason: Reason::VariantEnd,
            }
        );
    }

    #[test]
    fn test_shatranj_stalemate_wins() {
        let fen = "k7/p7/P7/8/8/8/8/1R4K1 b - - 0 1";
        assert_eq!(
            result_of(Variant::Shatranj, fen),
            GameResult::Decisive {
                winner: Color::White,
                reason: Reason::Stalemate,
            }
        );
        assert_eq!(
            result_of(Variant::Standard, fen),
            GameResult::Draw {
                reason: Reason::Stalemate,
            }
        );
    }

    #[test]
    fn test_losing_variants() {
        // No pieces left means no moves, which wins.
        assert_eq!(
            result_of(Variant::Antichess, "8/8/8/8/8/8/8/k7 w - - 0 1"),
            GameResult::Decisive {
                winner: Color::White,
                reason: Reason::Stalemate,
            }
        );
        // A blocked side wins in suicide only with fewer pieces.
        let blocked = "8/8/8/8/p7/P7/8/k7 w - - 0 1";
        assert_eq!(result_of(Variant::Giveaway, blocked).winner(), Some(Color::White));
        assert_eq!(result_of(Variant::Suicide, blocked).winner(), Some(Color::White));
        assert_eq!(
            result_of(Variant::Suicide, "8/8/8/8/p7/P7/8/8 w - - 0 1"),
            GameResult::Draw {
                reason: Reason::Stalemate,
            }
        );
    }

    #[test]
    fn test_extinction() {
        assert_eq!(
            result_of(
                Variant::Extinction,
                "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNB1KBNR w KQkq - 0 1"
            ),
            GameResult::Decisive {
                winner: Color::Black,
                reason: Reason::VariantEnd,
            }
        );
        assert!(result_of(Variant::Extinction, Variant::Extinction.start_fen()).is_ongoing());
        assert_eq!(
            result_of(Variant::Kinglet, "4k3/p7/8/8/8/8/8/4K3 w - - 0 1").winner(),
            Some(Color::Black)
        );
    }

    #[test]
    fn test_check_limit() {
        assert_eq!(
            result_of(Variant::ThreeCheck, "4k3/8/8/8/8/8/8/4K2R b - - 0+3 0 1"),
            GameResult::Decisive {
                winner: Color::White,
                reason: Reason::VariantEnd,
            }
        );
        assert!(result_of(Variant::ThreeCheck, "4k3/8/8/8/8/8/8/4K2R b - - 1+3 0 1").is_ongoing());
        assert_eq!(
            result_of(Variant::ThreeCheck, "8/8/4k3/8/8/8/8/4K3 w - - 1+1 0 1"),
            GameResult::Draw {
                reason: Reason::InsufficientMaterial,
            }
        );
    }

    #[test]
    fn test_display_roundtrip() {
        for token in ["1-0", "0-1", "1/2-1/2", "*"] {
            let result: GameResult = token.parse().expect("valid token");
            assert_eq!(result.to_string(), token);
        }
        assert_eq!("2-0".parse::<GameResult>(), Err(ParseGameResultError));
    }
}
