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

//! Count legal move paths.
//!
//! # Examples
//!
//! ```
//! use polychess::{perft, Position, Variant};
//!
//! let pos = Position::new(Variant::Standard)?;
//! assert_eq!(perft(&pos, 1), 20);
//! assert_eq!(perft(&pos, 2), 400);
//! assert_eq!(perft(&pos, 3), 8902);
//! # Ok::<_, Box<dyn std::error::Error>>(())
//! ```

use crate::{position::Position, uci::Uci};

/// Counts legal move paths of a given length.
///
/// Paths with mate or stalemate are not counted unless it occurs in the final
/// position. Game ends by variant rules, like a king reaching the hill, do not
/// stop the count either. Useful for comparing, testing and debugging move
/// generation correctness and performance.
pub fn perft(pos: &Position, depth: u32) -> u64 {
    if depth < 1 {
        return 1;
    }
    let mut pos = pos.scratch();
    walk(&mut pos, depth)
}

/// Like [`perft()`], but also logs the count below each root move at trace
/// level.
pub fn debug_perft(pos: &Position, depth: u32) -> u64 {
    if depth < 1 {
        return 1;
    }
    let mut scratch = pos.scratch();
    scratch
        .legal_moves()
        .iter()
        .map(|&m| {
            scratch.make_move(m);
            let nodes = if depth > 1 { walk(&mut scratch, depth - 1) } else { 1 };
            let undone = scratch.undo_move();
            debug_assert_eq!(undone, Ok(m));
            log::trace!("{} {}: {}", Uci::from_move(pos, m), depth - 1, nodes);
            nodes
        })
        .sum()
}

/// Like [`perft()`], but splits the work over root moves with `rayon`.
#[cfg(feature = "rayon")]
pub fn perft_parallel(pos: &Position, depth: u32) -> u64 {
    use rayon::prelude::*;

    if depth <= 1 {
        return perft(pos, depth);
    }
    pos.legal_moves()
        .par_iter()
        .map(|&m| {
            let mut child = pos.scratch();
            child.make_move(m);
            walk(&mut child, depth - 1)
        })
        .sum()
}

fn walk(pos: &mut Position, depth: u32) -> u64 {
    let moves = pos.legal_moves();
    if depth == 1 {
        return moves.len() as u64;
    }
    moves
        .iter()
        .map(|&m| {
            pos.make_move(m);
            let nodes = walk(pos, depth - 1);
            let undone = pos.undo_move();
            debug_assert_eq!(undone, Ok(m));
            nodes
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::variant::Variant;

    #[test]
    fn test_depth_zero() {
        let pos = Position::new(Variant::Xiangqi).expect("start position");
        assert_eq!(perft(&pos, 0), 1);
        assert_eq!(debug_perft(&pos, 0), 1);
    }

    #[test]
    fn test_position_untouched() {
        let pos = Position::new(Variant::Crazyhouse).expect("start position");
        let key = pos.key();
        assert_eq!(perft(&pos, 2), 400);
        assert_eq!(debug_perft(&pos, 2), 400);
        assert_eq!(pos.key(), key);
        assert!(pos.history().is_empty());
    }

    #[test]
    fn test_kiwipete() {
        let pos = Position::from_fen(
            Variant::Standard,
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        )
        .expect("valid fen");
        assert_eq!(perft(&pos, 1), 48);
        assert_eq!(perft(&pos, 2), 2039);
    }

    #[cfg(feature = "rayon")]
    #[test]
    fn test_parallel() {
        let pos = Position::new(Variant::Capablanca).expect("start position");
        assert_eq!(perft_parallel(&pos, 3), perft(&pos, 3));
    }
}
