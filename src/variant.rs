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

//! Chess variants and their rule sets.
//!
//! A [`Variant`] names a game. Its [`RuleSet`] holds everything that
//! parameterizes the generic [`Position`]: board geometry, piece table,
//! pawn steps, promotion roles, castling and drop flags and counting rules.
//! The few rules with no generic representation are hook methods on
//! [`Variant`], consulted by move generation and result evaluation.

use std::{error::Error, fmt, str::FromStr};

use rand::Rng;

use crate::{
    color::Color,
    grid::SquareGrid,
    outcome::{GameResult, Reason},
    piece_table::{Movement, PieceTable},
    position::Position,
    role::Role,
    square::Square,
};

/// Supported games.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Variant {
    /// Orthodox chess.
    #[default]
    Standard,
    /// Fischer random chess. Castling rights are tracked by rook square.
    Chess960,
    /// 10x8 board with archbishop and chancellor.
    Capablanca,
    /// Capablanca pieces in the Gothic starting setup.
    Gothic,
    /// Pawns move diagonally and capture straight ahead.
    Berolina,
    /// Bringing the king to one of the four central squares wins.
    KingOfTheHill,
    /// No checks. The first king to reach the last rank wins.
    RacingKings,
    /// White has 36 pawns and no king. Losing all pieces loses.
    Horde,
    /// One to three kings each, no check. Losing the first king loses.
    ThreeKings,
    /// Captured pieces can be dropped back onto the board.
    Crazyhouse,
    /// Medieval chess with ferz and alfil.
    Shatranj,
    /// Chinese chess.
    Xiangqi,
    /// Xiangqi on a 7x7 board without river, elephants and advisors.
    MiniXiangqi,
    /// Giving the third check wins.
    #[cfg_attr(feature = "serde", serde(rename = "3check"))]
    ThreeCheck,
    /// Giving the fifth check wins.
    #[cfg_attr(feature = "serde", serde(rename = "5check"))]
    FiveCheck,
    /// Losing chess. Captures are compulsory, kings have no royal powers
    /// and the side without legal moves wins.
    Antichess,
    /// Antichess with castling.
    Giveaway,
    /// Antichess where a blocked side wins only with fewer pieces left.
    Suicide,
    /// Losing every piece of one kind loses. No check, pawns may promote
    /// to king.
    Extinction,
    /// Losing all pawns loses. Pawns promote to king only.
    Kinglet,
    /// Thai chess with khon and met, promotion on the sixth rank and
    /// counting rules for the endgame.
    Makruk,
    /// The king moves like a knight. Knights are replaced by manns.
    Knightmate,
    /// Queens are replaced by chancellors.
    Almost,
    /// Queens are replaced by amazons.
    Amazon,
}

impl Variant {
    pub const ALL: [Variant; 24] = [
        Variant::Standard,
        Variant::Chess960,
        Variant::Capablanca,
        Variant::Gothic,
        Variant::Berolina,
        Variant::KingOfTheHill,
        Variant::RacingKings,
        Variant::Horde,
        Variant::ThreeKings,
        Variant::Crazyhouse,
        Variant::Shatranj,
        Variant::Xiangqi,
        Variant::MiniXiangqi,
        Variant::ThreeCheck,
        Variant::FiveCheck,
        Variant::Antichess,
        Variant::Giveaway,
        Variant::Suicide,
        Variant::Extinction,
        Variant::Kinglet,
        Variant::Makruk,
        Variant::Knightmate,
        Variant::Almost,
        Variant::Amazon,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Variant::Standard => "standard",
            Variant::Chess960 => "chess960",
            Variant::Capablanca => "capablanca",
            Variant::Gothic => "gothic",
            Variant::Berolina => "berolina",
            Variant::KingOfTheHill => "kingofthehill",
            Variant::RacingKings => "racingkings",
            Variant::Horde => "horde",
            Variant::ThreeKings => "threekings",
            Variant::Crazyhouse => "crazyhouse",
            Variant::Shatranj => "shatranj",
            Variant::Xiangqi => "xiangqi",
            Variant::MiniXiangqi => "minixiangqi",
            Variant::ThreeCheck => "3check",
            Variant::FiveCheck => "5check",
            Variant::Antichess => "antichess",
            Variant::Giveaway => "giveaway",
            Variant::Suicide => "suicide",
            Variant::Extinction => "extinction",
            Variant::Kinglet => "kinglet",
            Variant::Makruk => "makruk",
            Variant::Knightmate => "knightmate",
            Variant::Almost => "almost",
            Variant::Amazon => "amazon",
        }
    }

    /// Selects a variant by name. Also accepts a few common aliases.
    pub fn from_name(name: &str) -> Option<Variant> {
        let name = name.to_ascii_lowercase();
        Some(match name.as_str() {
            "standard" | "chess" => Variant::Standard,
            "chess960" | "fischerandom" | "frc" => Variant::Chess960,
            "koth" => Variant::KingOfTheHill,
            "threecheck" => Variant::ThreeCheck,
            "fivecheck" => Variant::FiveCheck,
            "losingchess" => Variant::Antichess,
            other => return Variant::ALL.into_iter().find(|v| v.name() == other),
        })
    }

    pub const fn start_fen(self) -> &'static str {
        match self {
            Variant::Standard
            | Variant::Chess960
            | Variant::Berolina
            | Variant::KingOfTheHill
            | Variant::Giveaway
            | Variant::Extinction
            | Variant::Kinglet => "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
            Variant::ThreeCheck => "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 3+3 0 1",
            Variant::FiveCheck => "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 5+5 0 1",
            Variant::Antichess | Variant::Suicide => {
                "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w - - 0 1"
            }
            Variant::Makruk => "rnsmksnr/8/pppppppp/8/8/PPPPPPPP/8/RNSKMSNR w - 0 0 1",
            Variant::Knightmate => "rmbqkbmr/pppppppp/8/8/8/8/PPPPPPPP/RMBQKBMR w KQkq - 0 1",
            Variant::Almost => "rnbckbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBCKBNR w KQkq - 0 1",
            Variant::Amazon => "rnbakbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBAKBNR w KQkq - 0 1",
            Variant::Capablanca => {
                "rnabqkbcnr/pppppppppp/10/10/10/10/PPPPPPPPPP/RNABQKBCNR w KQkq - 0 1"
            }
            Variant::Gothic => {
                "rnbqckabnr/pppppppppp/10/10/10/10/PPPPPPPPPP/RNBQCKABNR w KQkq - 0 1"
            }
            Variant::RacingKings => "8/8/8/8/8/8/krbnNBRK/qrbnNBRQ w - - 0 1",
            Variant::Horde => {
                "rnbqkbnr/pppppppp/8/1PP2PP1/PPPPPPPP/PPPPPPPP/PPPPPPPP/PPPPPPPP w kq - 0 1"
            }
            Variant::ThreeKings => "knbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/KNBQKBNK w - - 0 1",
            Variant::Crazyhouse => {
                "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR[-] w KQkq - 0 1"
            }
            Variant::Shatranj => "rnbkqbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBKQBNR w - - 0 1",
            Variant::Xiangqi => {
                "rnbakabnr/9/1c5c1/p1p1p1p1p/9/9/P1P1P1P1P/1C5C1/9/RNBAKABNR w - - 0 1"
            }
            Variant::MiniXiangqi => "rcnkncr/p1ppp1p/7/7/7/P1PPP1P/RCNKNCR w - - 0 1",
        }
    }

    /// Tests if the variant starts from random setups. Random variants write
    /// castling moves in coordinate notation as king takes rook.
    pub const fn is_random(self) -> bool {
        matches!(self, Variant::Chess960)
    }

    /// Builds the rule set of the variant.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError`] if the piece table or board of the
    /// variant is inconsistent.
    pub fn rules(self) -> Result<RuleSet, ConfigurationError> {
        RuleSet::new(self)
    }

    /// Generates a starting position. Random variants draw the setup from
    /// `rng`, all others return [`Variant::start_fen()`].
    ///
    /// # Examples
    ///
    /// ```
    /// use polychess::{Position, Variant};
    /// use rand::SeedableRng as _;
    /// use rand_xoshiro::Xoshiro256PlusPlus;
    ///
    /// let mut rng = Xoshiro256PlusPlus::seed_from_u64(960);
    /// let fen = Variant::Chess960.random_start_fen(&mut rng);
    /// let pos = Position::from_fen(Variant::Chess960, &fen)?;
    /// assert_eq!(pos.legal_moves().len() >= 18, true);
    /// # Ok::<_, polychess::ParseFenError>(())
    /// ```
    pub fn random_start_fen<R: Rng + ?Sized>(self, rng: &mut R) -> String {
        if !self.is_random() {
            return self.start_fen().to_owned();
        }

        let mut rank: [Option<char>; 8] = [None; 8];
        rank[2 * rng.random_range(0..4)] = Some('B');
        rank[2 * rng.random_range(0..4) + 1] = Some('B');
        for piece in ['Q', 'N', 'N'] {
            let free = rank.iter().filter(|p| p.is_none()).count();
            let nth = rng.random_range(0..free);
            if let Some(slot) = rank.iter_mut().filter(|p| p.is_none()).nth(nth) {
                *slot = Some(piece);
            }
        }
        for (slot, piece) in rank.iter_mut().filter(|p| p.is_none()).zip(['R', 'K', 'R']) {
            *slot = Some(piece);
        }

        let white: String = rank.iter().flatten().collect();
        let black = white.to_ascii_lowercase();
        format!("{black}/pppppppp/8/8/8/8/PPPPPPPP/{white} w KQkq - 0 1")
    }

    /// Checks the number of royal pieces of each side.
    pub(crate) fn kings_valid(self, white: usize, black: usize) -> bool {
        match self {
            Variant::Horde => white == 0 && black == 1,
            Variant::ThreeKings => (1..=3).contains(&white) && (1..=3).contains(&black),
            Variant::Antichess
            | Variant::Giveaway
            | Variant::Suicide
            | Variant::Extinction
            | Variant::Kinglet => true,
            _ => white == 1 && black == 1,
        }
    }

    /// Piece types that a side must keep on the board.
    fn vital_roles(self) -> &'static [Role] {
        match self {
            Variant::Extinction => &[
                Role::King,
                Role::Queen,
                Role::Rook,
                Role::Bishop,
                Role::Knight,
                Role::Pawn,
            ],
            Variant::Kinglet => &[Role::Pawn],
            _ => &[],
        }
    }

    /// Immediate wins and losses that take precedence over mate and
    /// counting rules.
    pub(crate) fn variant_end(self, pos: &Position) -> Option<GameResult> {
        let turn = pos.turn();
        match self {
            Variant::KingOfTheHill => {
                let hill = [(3, 3), (4, 3), (3, 4), (4, 4)];
                [!turn, turn].into_iter().find_map(|color| {
                    hill.iter()
                        .any(|&(file, rank)| {
                            pos.piece_at(Square::new(file, rank))
                                .is_some_and(|p| p.is(color, Role::King))
                        })
                        .then_some(GameResult::Decisive {
                            winner: color,
                            reason: Reason::VariantEnd,
                        })
                })
            }
            Variant::RacingKings => {
                let goal = pos.rules().grid().height() - 1;
                let finished = |color: Color| {
                    pos.king_square(color).is_some_and(|sq| sq.rank() == goal)
                };
                match (finished(Color::White), finished(Color::Black)) {
                    (true, true) => Some(GameResult::Draw {
                        reason: Reason::VariantEnd,
                    }),
                    (_, true) => Some(GameResult::Decisive {
                        winner: Color::Black,
                        reason: Reason::VariantEnd,
                    }),
                    (true, false) => {
                        // Black gets one move to draw the race.
                        let black_can_finish = turn == Color::Black
                            && pos.legal_moves().iter().any(|m| {
                                m.role() == Role::King && m.to().rank() == goal
                            });
                        (!black_can_finish).then_some(GameResult::Decisive {
                            winner: Color::White,
                            reason: Reason::VariantEnd,
                        })
                    }
                    (false, false) => None,
                }
            }
            Variant::Horde => (pos.material(turn) == 0).then_some(GameResult::Decisive {
                winner: !turn,
                reason: Reason::VariantEnd,
            }),
            Variant::ThreeKings => {
                // The first king lost decides the game.
                let kings = |color| pos.count(color, Role::King);
                let (white, black) = (kings(Color::White), kings(Color::Black));
                (white != black).then(|| GameResult::Decisive {
                    winner: Color::from_white(white > black),
                    reason: Reason::VariantEnd,
                })
            }
            Variant::ThreeCheck | Variant::FiveCheck => [!turn, turn]
                .into_iter()
                .find(|&color| pos.remaining_checks(color) == 0)
                .map(|winner| GameResult::Decisive {
                    winner,
                    reason: Reason::VariantEnd,
                }),
            Variant::Extinction | Variant::Kinglet => {
                let extinct = |color| {
                    self.vital_roles()
                        .iter()
                        .any(|&role| pos.count(color, role) == 0)
                };
                // Captures extinguish the side to move, promotions the
                // side that just moved.
                [turn, !turn]
                    .into_iter()
                    .find(|&color| extinct(color))
                    .map(|loser| GameResult::Decisive {
                        winner: !loser,
                        reason: Reason::VariantEnd,
                    })
            }
            Variant::Shatranj => {
                let bare = |color| pos.material(color) < 2;
                if bare(turn) {
                    if bare(!turn) {
                        return Some(GameResult::Draw {
                            reason: Reason::VariantEnd,
                        });
                    }
                    // The bare side may still draw by capturing the last
                    // piece of the opponent with its king.
                    let can_bare_opponent = pos.material(!turn) == 2
                        && pos
                            .legal_moves()
                            .iter()
                            .any(|m| m.role() == Role::King && m.is_capture());
                    if !can_bare_opponent {
                        return Some(GameResult::Decisive {
                            winner: !turn,
                            reason: Reason::VariantEnd,
                        });
                    }
                } else if bare(!turn) {
                    return Some(GameResult::Decisive {
                        winner: turn,
                        reason: Reason::VariantEnd,
                    });
                }
                None
            }
            _ => None,
        }
    }

    /// Result when the side to move has no legal moves.
    pub(crate) fn no_moves_result(self, pos: &Position) -> GameResult {
        let turn = pos.turn();
        match self {
            Variant::Antichess | Variant::Giveaway => {
                return GameResult::Decisive {
                    winner: turn,
                    reason: Reason::Stalemate,
                };
            }
            Variant::Suicide => {
                let (ours, theirs) = (pos.material(turn), pos.material(!turn));
                return if ours == theirs {
                    GameResult::Draw {
                        reason: Reason::Stalemate,
                    }
                } else {
                    GameResult::Decisive {
                        winner: if ours < theirs { turn } else { !turn },
                        reason: Reason::Stalemate,
                    }
                };
            }
            _ => (),
        }

        if pos.is_check() {
            GameResult::Decisive {
                winner: !turn,
                reason: Reason::Checkmate,
            }
        } else if matches!(
            self,
            Variant::Shatranj | Variant::Xiangqi | Variant::MiniXiangqi
        ) {
            GameResult::Decisive {
                winner: !turn,
                reason: Reason::Stalemate,
            }
        } else {
            GameResult::Draw {
                reason: Reason::Stalemate,
            }
        }
    }

    /// Tests if neither side has enough material left to win.
    pub(crate) fn is_insufficient_material(self, pos: &Position) -> bool {
        match self {
            Variant::Standard
            | Variant::Chess960
            | Variant::Capablanca
            | Variant::Gothic
            | Variant::Berolina
            | Variant::ThreeKings
            | Variant::Knightmate
            | Variant::Almost
            | Variant::Amazon => {
                // Knights count one, bishops count one per square color,
                // everything else is enough on its own.
                let mut material = 0;
                let mut bishop_colors = [false; 2];
                for (sq, piece) in pos.pieces() {
                    match piece.role {
                        Role::King => (),
                        Role::Bishop => {
                            let color = usize::from((sq.file() + sq.rank()) % 2);
                            if !bishop_colors[color] {
                                bishop_colors[color] = true;
                                material += 1;
                            }
                        }
                        Role::Knight => material += 1,
                        _ => material += 2,
                    }
                }
                material <= 1
            }
            Variant::Xiangqi | Variant::MiniXiangqi => {
                let attackers =
                    Movement::ROOK | Movement::HORSE | Movement::CANNON | Movement::SOLDIER;
                !pos.pieces().any(|(_, piece)| {
                    pos.rules().pieces().movement(piece.role).intersects(attackers)
                })
            }
            Variant::ThreeCheck | Variant::FiveCheck => {
                pos.pieces().all(|(_, piece)| piece.role == Role::King)
            }
            Variant::Makruk => {
                // Kings, pawns, khons and rooks count nine, knights four.
                // Mets count one and two more for the first one on each
                // square color.
                let mut material = 0;
                let mut met_colors = [false; 2];
                for (sq, piece) in pos.pieces() {
                    match piece.role {
                        Role::Ferz => {
                            material += 1;
                            let color = usize::from((sq.file() + sq.rank()) % 2);
                            if !met_colors[color] {
                                met_colors[color] = true;
                                material += 2;
                            }
                        }
                        Role::Knight => material += 4,
                        _ => material += 9,
                    }
                }
                material < 25
            }
            Variant::KingOfTheHill
            | Variant::RacingKings
            | Variant::Horde
            | Variant::Crazyhouse
            | Variant::Shatranj
            | Variant::Antichess
            | Variant::Giveaway
            | Variant::Suicide
            | Variant::Extinction
            | Variant::Kinglet => false,
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error when parsing an unknown variant name.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParseVariantError;

impl fmt::Display for ParseVariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("unknown variant")
    }
}

impl Error for ParseVariantError {}

impl FromStr for Variant {
    type Err = ParseVariantError;

    fn from_str(s: &str) -> Result<Variant, ParseVariantError> {
        Variant::from_name(s).ok_or(ParseVariantError)
    }
}

/// Error in the definition of a variant. Raised only while building a
/// [`RuleSet`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ConfigurationError {
    BoardSize { width: u8, height: u8 },
    DuplicateRole(Role),
    DuplicateLetter(char),
    InvalidLetter(char),
    /// The variant has no king.
    MissingRoyal,
    /// A promotion role that is not in the piece table.
    UnknownPromotion(Role),
}

impl fmt::Display for ConfigurationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            ConfigurationError::BoardSize { width, height } => {
                write!(f, "unsupported board size {width}x{height}")
            }
            ConfigurationError::DuplicateRole(role) => {
                write!(f, "piece type {role:?} registered twice")
            }
            ConfigurationError::DuplicateLetter(letter) => {
                write!(f, "notation letter {letter} registered twice")
            }
            ConfigurationError::InvalidLetter(letter) => {
                write!(f, "invalid notation letter {letter:?}")
            }
            ConfigurationError::MissingRoyal => f.write_str("variant has no king"),
            ConfigurationError::UnknownPromotion(role) => {
                write!(f, "promotion to unregistered piece type {role:?}")
            }
        }
    }
}

impl Error for ConfigurationError {}

/// Kind of a pawn step.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum StepKind {
    /// Moves to an empty square.
    Free,
    /// Captures an enemy piece.
    Capture,
}

/// One forward step of a pawn, `file` files to the side.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub struct PawnStep {
    pub kind: StepKind,
    pub file: i8,
}

impl PawnStep {
    const fn free(file: i8) -> PawnStep {
        PawnStep {
            kind: StepKind::Free,
            file,
        }
    }

    const fn capture(file: i8) -> PawnStep {
        PawnStep {
            kind: StepKind::Capture,
            file,
        }
    }
}

/// Orthodox pawns: straight pushes, diagonal captures.
pub const WESTERN_PAWN_STEPS: [PawnStep; 3] = [
    PawnStep::capture(-1),
    PawnStep::free(0),
    PawnStep::capture(1),
];

/// Berolina pawns: diagonal pushes, straight captures.
pub const BEROLINA_PAWN_STEPS: [PawnStep; 3] = [
    PawnStep::free(-1),
    PawnStep::capture(0),
    PawnStep::free(1),
];

/// Palace of the Xiangqi family, inclusive file and rank bounds.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub struct Palace {
    pub files: (u8, u8),
    pub white_ranks: (u8, u8),
    pub black_ranks: (u8, u8),
}

impl Palace {
    pub fn contains(&self, color: Color, sq: Square) -> bool {
        let (lo, hi) = color.fold(self.white_ranks, self.black_ranks);
        (self.files.0..=self.files.1).contains(&sq.file()) && (lo..=hi).contains(&sq.rank())
    }
}

/// Everything that distinguishes one variant from another.
///
/// Built once per game and shared by all positions of that game.
#[derive(Clone, Debug)]
pub struct RuleSet {
    variant: Variant,
    grid: SquareGrid,
    pieces: PieceTable,
    pawn_steps: Vec<PawnStep>,
    double_step: bool,
    promotions: Vec<Role>,
    promotion_rank: Option<u8>,
    castling: bool,
    drops: bool,
    king_capture: bool,
    forced_capture: bool,
    forbid_checks: bool,
    check_limit: Option<u8>,
    move_limit: u32,
    counting: bool,
    palace: Option<Palace>,
    river: Option<u8>,
}

impl RuleSet {
    /// Builds the rule set of a variant.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError`] if the definition is inconsistent.
    pub fn new(variant: Variant) -> Result<RuleSet, ConfigurationError> {
        let mut pieces = PieceTable::new();
        let western_roles = |pieces: &mut PieceTable| -> Result<(), ConfigurationError> {
            pieces.register(Role::Pawn, "pawn", 'P', Movement::PAWN)?;
            pieces.register(Role::Knight, "knight", 'N', Movement::KNIGHT)?;
            pieces.register(Role::Bishop, "bishop", 'B', Movement::BISHOP)?;
            pieces.register(Role::Rook, "rook", 'R', Movement::ROOK)?;
            pieces.register(Role::Queen, "queen", 'Q', Movement::QUEEN)?;
            pieces.register(Role::King, "king", 'K', Movement::KING)
        };

        let mut rules = RuleSet {
            variant,
            grid: SquareGrid::new(8, 8)?,
            pieces: PieceTable::new(),
            pawn_steps: WESTERN_PAWN_STEPS.to_vec(),
            double_step: true,
            promotions: vec![Role::Queen, Role::Rook, Role::Bishop, Role::Knight],
            promotion_rank: None,
            castling: true,
            drops: false,
            king_capture: false,
            forced_capture: false,
            forbid_checks: false,
            check_limit: None,
            move_limit: 100,
            counting: false,
            palace: None,
            river: None,
        };

        match variant {
            Variant::Standard
            | Variant::Chess960
            | Variant::KingOfTheHill
            | Variant::Horde => western_roles(&mut pieces)?,
            Variant::Berolina => {
                western_roles(&mut pieces)?;
                rules.pawn_steps = BEROLINA_PAWN_STEPS.to_vec();
            }
            Variant::Crazyhouse => {
                western_roles(&mut pieces)?;
                rules.drops = true;
            }
            Variant::RacingKings => {
                western_roles(&mut pieces)?;
                rules.castling = false;
                rules.forbid_checks = true;
            }
            Variant::ThreeKings => {
                western_roles(&mut pieces)?;
                rules.castling = false;
                rules.king_capture = true;
            }
            Variant::ThreeCheck | Variant::FiveCheck => {
                western_roles(&mut pieces)?;
                rules.check_limit = Some(if variant == Variant::ThreeCheck { 3 } else { 5 });
            }
            Variant::Antichess | Variant::Giveaway | Variant::Suicide => {
                western_roles(&mut pieces)?;
                rules.castling = variant == Variant::Giveaway;
                rules.king_capture = true;
                rules.forced_capture = true;
                rules.promotions.push(Role::King);
            }
            Variant::Extinction => {
                western_roles(&mut pieces)?;
                rules.king_capture = true;
                rules.promotions.push(Role::King);
            }
            Variant::Kinglet => {
                western_roles(&mut pieces)?;
                rules.king_capture = true;
                rules.promotions = vec![Role::King];
            }
            Variant::Knightmate => {
                pieces.register(Role::Pawn, "pawn", 'P', Movement::PAWN)?;
                pieces.register(Role::Mann, "mann", 'M', Movement::KING)?;
                pieces.register(Role::Bishop, "bishop", 'B', Movement::BISHOP)?;
                pieces.register(Role::Rook, "rook", 'R', Movement::ROOK)?;
                pieces.register(Role::Queen, "queen", 'Q', Movement::QUEEN)?;
                pieces.register(Role::King, "king", 'K', Movement::KNIGHT)?;
                rules.promotions = vec![Role::Queen, Role::Rook, Role::Bishop, Role::Mann];
            }
            Variant::Almost => {
                pieces.register(Role::Pawn, "pawn", 'P', Movement::PAWN)?;
                pieces.register(Role::Knight, "knight", 'N', Movement::KNIGHT)?;
                pieces.register(Role::Bishop, "bishop", 'B', Movement::BISHOP)?;
                pieces.register(Role::Rook, "rook", 'R', Movement::ROOK)?;
                pieces.register(
                    Role::Chancellor,
                    "chancellor",
                    'C',
                    Movement::ROOK | Movement::KNIGHT,
                )?;
                pieces.register(Role::King, "king", 'K', Movement::KING)?;
                rules.promotions = vec![Role::Chancellor, Role::Rook, Role::Bishop, Role::Knight];
            }
            Variant::Amazon => {
                pieces.register(Role::Pawn, "pawn", 'P', Movement::PAWN)?;
                pieces.register(Role::Knight, "knight", 'N', Movement::KNIGHT)?;
                pieces.register(Role::Bishop, "bishop", 'B', Movement::BISHOP)?;
                pieces.register(Role::Rook, "rook", 'R', Movement::ROOK)?;
                pieces.register(Role::Amazon, "amazon", 'A', Movement::QUEEN | Movement::KNIGHT)?;
                pieces.register(Role::King, "king", 'K', Movement::KING)?;
                rules.promotions = vec![Role::Amazon, Role::Rook, Role::Bishop, Role::Knight];
            }
            Variant::Makruk => {
                pieces.register(Role::Pawn, "pawn", 'P', Movement::PAWN)?;
                pieces.register(Role::Knight, "ma", 'N', Movement::KNIGHT)?;
                pieces.register(Role::Khon, "khon", 'S', Movement::SILVER)?;
                pieces.register(Role::Rook, "rua", 'R', Movement::ROOK)?;
                pieces.register(Role::Ferz, "met", 'M', Movement::FERZ)?;
                pieces.register(Role::King, "khun", 'K', Movement::KING)?;
                rules.double_step = false;
                rules.castling = false;
                rules.promotions = vec![Role::Ferz];
                rules.promotion_rank = Some(5);
                rules.counting = true;
            }
            Variant::Capablanca | Variant::Gothic => {
                western_roles(&mut pieces)?;
                pieces.register(
                    Role::Archbishop,
                    "archbishop",
                    'A',
                    Movement::BISHOP | Movement::KNIGHT,
                )?;
                pieces.register(
                    Role::Chancellor,
                    "chancellor",
                    'C',
                    Movement::ROOK | Movement::KNIGHT,
                )?;
                rules.grid = SquareGrid::new(10, 8)?;
                rules.promotions = vec![
                    Role::Queen,
                    Role::Chancellor,
                    Role::Archbishop,
                    Role::Rook,
                    Role::Bishop,
                    Role::Knight,
                ];
            }
            Variant::Shatranj => {
                pieces.register(Role::Pawn, "pawn", 'P', Movement::PAWN)?;
                pieces.register(Role::Knight, "knight", 'N', Movement::KNIGHT)?;
                pieces.register(Role::Alfil, "alfil", 'B', Movement::ALFIL)?;
                pieces.register(Role::Rook, "rook", 'R', Movement::ROOK)?;
                pieces.register(Role::Ferz, "ferz", 'Q', Movement::FERZ)?;
                pieces.register(Role::King, "king", 'K', Movement::KING)?;
                rules.double_step = false;
                rules.castling = false;
                rules.promotions = vec![Role::Ferz];
                rules.move_limit = 140;
            }
            Variant::Xiangqi | Variant::MiniXiangqi => {
                pieces.register(Role::Rook, "chariot", 'R', Movement::ROOK)?;
                pieces.register(Role::Horse, "horse", 'N', Movement::HORSE)?;
                pieces.register(Role::Cannon, "cannon", 'C', Movement::CANNON)?;
                pieces.register(Role::King, "general", 'K', Movement::GENERAL)?;
                pieces.register(Role::Soldier, "soldier", 'P', Movement::SOLDIER)?;
                rules.pawn_steps.clear();
                rules.double_step = false;
                rules.promotions.clear();
                rules.castling = false;
                if variant == Variant::Xiangqi {
                    pieces.register(Role::Elephant, "elephant", 'B', Movement::ELEPHANT)?;
                    pieces.register(Role::Advisor, "advisor", 'A', Movement::ADVISOR)?;
                    rules.grid = SquareGrid::new(9, 10)?;
                    rules.river = Some(5);
                    rules.palace = Some(Palace {
                        files: (3, 5),
                        white_ranks: (0, 2),
                        black_ranks: (7, 9),
                    });
                } else {
                    rules.grid = SquareGrid::new(7, 7)?;
                    rules.palace = Some(Palace {
                        files: (2, 4),
                        white_ranks: (0, 2),
                        black_ranks: (4, 6),
                    });
                }
            }
        }

        if !pieces.contains(Role::King) {
            return Err(ConfigurationError::MissingRoyal);
        }
        if let Some(&role) = rules.promotions.iter().find(|&&r| !pieces.contains(r)) {
            return Err(ConfigurationError::UnknownPromotion(role));
        }
        rules.pieces = pieces;

        log::debug!(
            "initialized {} rules: {}x{} board, {} piece types",
            variant,
            rules.grid.width(),
            rules.grid.height(),
            rules.pieces.iter().count()
        );
        Ok(rules)
    }

    #[inline]
    pub fn variant(&self) -> Variant {
        self.variant
    }

    #[inline]
    pub fn grid(&self) -> SquareGrid {
        self.grid
    }

    #[inline]
    pub fn pieces(&self) -> &PieceTable {
        &self.pieces
    }

    #[inline]
    pub fn pawn_steps(&self) -> &[PawnStep] {
        &self.pawn_steps
    }

    /// Pawns may advance two squares from their first two ranks.
    #[inline]
    pub fn double_step(&self) -> bool {
        self.double_step
    }

    #[inline]
    pub fn promotions(&self) -> &[Role] {
        &self.promotions
    }

    /// First rank, counted from the own side, on which pawns promote.
    #[inline]
    pub fn promotion_rank(&self) -> u8 {
        self.promotion_rank
            .unwrap_or_else(|| self.grid.height() - 1)
    }

    #[inline]
    pub fn castling(&self) -> bool {
        self.castling
    }

    /// Captured pieces go to the hand of the capturer.
    #[inline]
    pub fn drops(&self) -> bool {
        self.drops
    }

    /// Kings may be left in or moved into attack.
    #[inline]
    pub fn king_capture(&self) -> bool {
        self.king_capture
    }

    /// Captures are compulsory whenever one is available.
    #[inline]
    pub fn forced_capture(&self) -> bool {
        self.forced_capture
    }

    /// Number of checks that wins the game.
    #[inline]
    pub fn check_limit(&self) -> Option<u8> {
        self.check_limit
    }

    /// Makruk counting rules replace the reversible move limit.
    #[inline]
    pub fn counting(&self) -> bool {
        self.counting
    }

    /// Moves that give check are illegal.
    #[inline]
    pub fn forbid_checks(&self) -> bool {
        self.forbid_checks
    }

    /// Number of reversible plies after which the game is drawn.
    #[inline]
    pub fn move_limit(&self) -> u32 {
        self.move_limit
    }

    #[inline]
    pub fn palace(&self) -> Option<&Palace> {
        self.palace.as_ref()
    }

    /// First rank of Black's half of the board, if the board has a river.
    #[inline]
    pub fn river(&self) -> Option<u8> {
        self.river
    }

    /// Tests if `sq` lies on the own side of the river for `color`. Boards
    /// without a river have no own side.
    pub fn is_own_half(&self, color: Color, sq: Square) -> bool {
        self.river
            .is_some_and(|river| color.fold(sq.rank() < river, sq.rank() >= river))
    }

    /// More than one free pawn step may reach the same square, so en
    /// passant and notation must name the moving pawn explicitly.
    pub fn pawns_ambiguous(&self) -> bool {
        self.pawn_steps
            .iter()
            .filter(|s| s.kind == StepKind::Free)
            .count()
            > 1
    }
}
