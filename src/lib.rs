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

//! A library for chess variants on rectangular boards, from 8x8 chess over
//! 10x8 Capablanca to 9x10 Xiangqi.
//!
//! Every variant is described by a [`RuleSet`]: a board size, a table of
//! piece types with their [`Movement`] bits, pawn steps and flags for
//! castling, drops, king capture, compulsory captures, check limits and
//! Makruk counting. A [`Position`] keeps a shared rule set
//! and a padded mailbox board, generates legal moves, makes and undoes them
//! and maintains a Zobrist key incrementally.
//!
//! # Examples
//!
//! Generate legal moves in the starting position:
//!
//! ```
//! use polychess::{Position, Variant};
//!
//! let pos = Position::new(Variant::Capablanca)?;
//! assert_eq!(pos.legal_moves().len(), 28);
//! # Ok::<_, Box<dyn std::error::Error>>(())
//! ```
//!
//! Play moves and take them back:
//!
//! ```
//! use polychess::{move_from_text, GameResult, Notation, Position, Variant};
//!
//! let mut pos = Position::new(Variant::Standard)?;
//! for san in ["f3", "e5", "g4", "Qh4#"] {
//!     let m = move_from_text(&pos, san, Notation::San)?;
//!     pos.play(m)?;
//! }
//! assert!(pos.is_check());
//! assert_eq!(pos.result().winner(), Some(polychess::Color::Black));
//!
//! pos.undo_move()?;
//! assert_eq!(pos.result(), GameResult::Ongoing);
//! # Ok::<_, Box<dyn std::error::Error>>(())
//! ```
//!
//! Also supports [FEN](fen), [SAN](san) and [coordinate notation](uci) for
//! positions and moves.
//!
//! # Feature flags
//!
//! * `serde`: Implements [`serde::Serialize`](https://docs.rs/serde/1/serde/trait.Serialize.html)
//!   and [`serde::Deserialize`](https://docs.rs/serde/1/serde/trait.Deserialize.html) for
//!   types with unique natural representations.
//! * `nohash-hasher`: Implements
//!   [`nohash_hasher::IsEnabled`](https://docs.rs/nohash-hasher/0.2/nohash_hasher/trait.IsEnabled.html)
//!   for sensible types.
//! * `rayon`: Adds `perft_parallel`, which splits perft over root moves.

#![doc(html_root_url = "https://docs.rs/polychess/0.1.0")]
#![forbid(unsafe_code)]
#![warn(missing_debug_implementations)]
#![cfg_attr(docs_rs, feature(doc_auto_cfg))]

mod castling_side;
mod color;
mod grid;
mod m;
mod movegen;
mod notation;
mod outcome;
mod perft;
mod piece_table;
mod position;
mod role;
mod square;
mod types;
mod xiangqi;

pub mod fen;
pub mod san;
pub mod uci;
pub mod variant;
pub mod zobrist;

pub use castling_side::{ByCastlingSide, CastlingRights, CastlingSide};
pub use color::{ByColor, Color, ParseColorError};
pub use fen::{FenFormat, ParseFenError};
pub use grid::{Cell, SquareGrid};
pub use m::{Move, MoveList};
pub use notation::{move_from_text, move_to_text, IllegalNotation, Notation};
pub use outcome::{GameResult, ParseGameResultError, Reason};
#[cfg(feature = "rayon")]
pub use perft::perft_parallel;
pub use perft::{debug_perft, perft};
pub use piece_table::{Movement, PieceTable, PieceType};
pub use position::{IllegalMove, InvalidState, MoveRecord, Position};
pub use role::Role;
pub use square::{ParseSquareError, Square, MAX_SIDE};
pub use types::{Counting, EnPassant, Piece, Pocket, MAX_POCKET};
pub use variant::{ConfigurationError, ParseVariantError, RuleSet, Variant};

#[cfg(feature = "nohash-hasher")]
impl nohash_hasher::IsEnabled for Square {}

#[cfg(feature = "nohash-hasher")]
impl nohash_hasher::IsEnabled for Role {}

#[cfg(feature = "nohash-hasher")]
impl nohash_hasher::IsEnabled for Color {}
