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

use std::{error::Error, fmt, mem, sync::Arc};

use arrayvec::ArrayVec;

use crate::{
    castling_side::{CastlingRights, CastlingSide},
    color::{ByColor, Color},
    fen::{self, FenFormat, ParseFenError},
    grid::{step, Cell},
    m::{Move, MoveList},
    movegen,
    outcome::{self, GameResult},
    piece_table::Movement,
    role::Role,
    square::Square,
    types::{Counting, EnPassant, Piece, Pocket, MAX_POCKET},
    variant::{RuleSet, StepKind, Variant},
    zobrist::ZobristHasher,
};

/// Error when playing an illegal move.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct IllegalMove {
    pub m: Move,
}

impl fmt::Display for IllegalMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "illegal move {}", self.m)
    }
}

impl Error for IllegalMove {}

/// Error when undoing a move although no move has been made.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InvalidState;

impl fmt::Display for InvalidState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("no move to undo")
    }
}

impl Error for InvalidState {}

/// Everything needed to take back one move.
#[derive(Clone, Debug)]
pub struct MoveRecord {
    m: Move,
    captured: Option<Piece>,
    castles: CastlingRights,
    ep: Option<EnPassant>,
    halfmoves: u32,
    key: u64,
    kings: ByColor<Option<usize>>,
    pockets: ByColor<Pocket>,
    checks: ByColor<u8>,
    counting: Counting,
    changed: ArrayVec<(usize, Cell), 4>,
}

impl MoveRecord {
    #[inline]
    pub fn m(&self) -> Move {
        self.m
    }

    /// The piece removed from the board by the move.
    #[inline]
    pub fn captured(&self) -> Option<Piece> {
        self.captured
    }

    /// Key of the position before the move.
    #[inline]
    pub fn key(&self) -> u64 {
        self.key
    }
}

/// A game state.
///
/// Positions are built from a [`Variant`] and a FEN, and then changed only
/// through [`Position::make_move()`] and [`Position::undo_move()`]. The
/// Zobrist key is kept up to date incrementally.
///
/// Cloning is the way to explore a position from several threads. A clone
/// includes the move history.
///
/// # Examples
///
/// ```
/// use polychess::{Position, Variant};
///
/// let mut pos = Position::new(Variant::Standard)?;
/// let fen = pos.to_fen();
/// let key = pos.key();
///
/// for m in pos.legal_moves() {
///     pos.make_move(m);
///     pos.undo_move()?;
///     assert_eq!(pos.to_fen(), fen);
///     assert_eq!(pos.key(), key);
/// }
/// # Ok::<_, Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Debug)]
pub struct Position {
    pub(crate) rules: Arc<RuleSet>,
    pub(crate) cells: Box<[Cell]>,
    pub(crate) turn: Color,
    pub(crate) castles: CastlingRights,
    pub(crate) ep: Option<EnPassant>,
    pub(crate) halfmoves: u32,
    pub(crate) ply: u32,
    pub(crate) kings: ByColor<Option<usize>>,
    pub(crate) pockets: ByColor<Pocket>,
    pub(crate) checks: ByColor<u8>,
    pub(crate) counting: Counting,
    pub(crate) key: u64,
    pub(crate) history: Vec<MoveRecord>,
}

impl Position {
    /// Starting position of a variant.
    ///
    /// # Errors
    ///
    /// Fails only if the rule set of the variant is inconsistent.
    pub fn new(variant: Variant) -> Result<Position, ParseFenError> {
        Position::from_fen(variant, variant.start_fen())
    }

    /// Parses a FEN in the context of a variant.
    ///
    /// # Errors
    ///
    /// Returns [`ParseFenError`] naming the offending field. Nothing is
    /// built from a partially valid FEN.
    pub fn from_fen(variant: Variant, fen: &str) -> Result<Position, ParseFenError> {
        let rules = variant.rules()?;
        Position::from_fen_with_rules(Arc::new(rules), fen)
    }

    /// Parses a FEN, sharing an existing rule set.
    ///
    /// # Errors
    ///
    /// Returns [`ParseFenError`] naming the offending field.
    pub fn from_fen_with_rules(rules: Arc<RuleSet>, fen: &str) -> Result<Position, ParseFenError> {
        fen::parse(rules, fen)
    }

    /// An empty board with default state, to be filled by the FEN parser.
    pub(crate) fn empty(rules: Arc<RuleSet>) -> Position {
        let cells = rules.grid().empty_cells();
        Position {
            rules,
            cells,
            turn: Color::White,
            castles: CastlingRights::default(),
            ep: None,
            halfmoves: 0,
            ply: 0,
            kings: ByColor::default(),
            pockets: ByColor::default(),
            checks: ByColor::default(),
            counting: Counting::default(),
            key: 0,
            history: Vec::new(),
        }
    }

    /// Copy without history, for tentative moves.
    pub(crate) fn scratch(&self) -> Position {
        Position {
            rules: Arc::clone(&self.rules),
            cells: self.cells.clone(),
            turn: self.turn,
            castles: self.castles,
            ep: self.ep,
            halfmoves: self.halfmoves,
            ply: self.ply,
            kings: self.kings,
            pockets: self.pockets,
            checks: self.checks,
            counting: self.counting,
            key: self.key,
            history: Vec::with_capacity(1),
        }
    }

    #[inline]
    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Shared handle to the rule set, for building further positions of the
    /// same variant.
    pub fn shared_rules(&self) -> Arc<RuleSet> {
        Arc::clone(&self.rules)
    }

    #[inline]
    pub fn variant(&self) -> Variant {
        self.rules.variant()
    }

    #[inline]
    pub(crate) fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Side to move.
    #[inline]
    pub fn turn(&self) -> Color {
        self.turn
    }

    /// Piece on a square, or `None` if the square is empty or off the board.
    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        let grid = self.rules.grid();
        if grid.contains(sq) {
            self.cells[grid.index(sq)].piece()
        } else {
            None
        }
    }

    /// All pieces on the board with their squares.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        let grid = self.rules.grid();
        grid.squares()
            .filter_map(move |sq| self.cells[grid.index(sq)].piece().map(|piece| (sq, piece)))
    }

    /// Number of pieces of a color and role on the board.
    pub fn count(&self, color: Color, role: Role) -> usize {
        self.pieces().filter(|&(_, p)| p.is(color, role)).count()
    }

    /// Number of pieces of a color on the board, including kings.
    pub fn material(&self, color: Color) -> usize {
        self.pieces().filter(|&(_, p)| p.color == color).count()
    }

    /// Square of the king of `color`, if that side has exactly one.
    pub fn king_square(&self, color: Color) -> Option<Square> {
        let grid = self.rules.grid();
        self.kings.get(color).map(|index| grid.square_unchecked(index))
    }

    #[inline]
    pub fn castling_rights(&self) -> &CastlingRights {
        &self.castles
    }

    /// Square of the rook that may castle to `side`.
    #[inline]
    pub fn castling_right(&self, color: Color, side: CastlingSide) -> Option<Square> {
        *self.castles.get(color).get(side)
    }

    #[inline]
    pub fn ep(&self) -> Option<EnPassant> {
        self.ep
    }

    /// Pieces in hand.
    #[inline]
    pub fn pocket(&self, color: Color) -> &Pocket {
        self.pockets.get(color)
    }

    /// Checks that `color` still has to give to win a check variant.
    #[inline]
    pub fn remaining_checks(&self, color: Color) -> u8 {
        *self.checks.get(color)
    }

    /// State of the Makruk counting rules.
    #[inline]
    pub fn counting(&self) -> Counting {
        self.counting
    }

    /// Reversible plies since the last capture or pawn move.
    #[inline]
    pub fn halfmoves(&self) -> u32 {
        self.halfmoves
    }

    #[inline]
    pub fn fullmoves(&self) -> u32 {
        self.ply / 2 + 1
    }

    /// Plies since the start of the game, derived from the full-move counter
    /// of the FEN.
    #[inline]
    pub fn ply(&self) -> u32 {
        self.ply
    }

    /// Zobrist key.
    #[inline]
    pub fn key(&self) -> u64 {
        self.key
    }

    #[inline]
    pub fn history(&self) -> &[MoveRecord] {
        &self.history
    }

    pub fn last_move(&self) -> Option<Move> {
        self.history.last().map(MoveRecord::m)
    }

    /// Number of earlier occurrences of the current position since the last
    /// irreversible move.
    pub fn repetitions(&self) -> usize {
        self.history
            .iter()
            .rev()
            .take(self.halfmoves as usize)
            .filter(|record| record.key == self.key)
            .count()
    }

    /// Tests if the side to move is in check.
    pub fn is_check(&self) -> bool {
        movegen::in_check(self, self.turn)
    }

    /// Tests if the king of `color` is attacked.
    pub fn in_check(&self, color: Color) -> bool {
        movegen::in_check(self, color)
    }

    /// Tests if `sq` is attacked by pieces of color `by`.
    pub fn is_attacked(&self, sq: Square, by: Color) -> bool {
        let grid = self.rules.grid();
        grid.contains(sq) && movegen::is_attacked(self, grid.index(sq), by)
    }

    pub fn legal_moves(&self) -> MoveList {
        movegen::legal_moves(self)
    }

    pub fn is_legal(&self, m: Move) -> bool {
        self.legal_moves().contains(&m)
    }

    pub fn result(&self) -> GameResult {
        outcome::result(self)
    }

    pub fn to_fen(&self) -> String {
        fen::to_fen(self, FenFormat::XFen)
    }

    pub fn to_fen_with(&self, format: FenFormat) -> String {
        fen::to_fen(self, format)
    }

    /// FEN without the halfmove clock and fullmove number.
    pub fn to_epd(&self) -> String {
        fen::to_epd(self, FenFormat::XFen)
    }

    /// Plays a move after checking that it is legal.
    ///
    /// # Errors
    ///
    /// Returns [`IllegalMove`] if `m` is not in [`Position::legal_moves()`].
    pub fn play(&mut self, m: Move) -> Result<(), IllegalMove> {
        if self.is_legal(m) {
            self.make_move(m);
            Ok(())
        } else {
            Err(IllegalMove { m })
        }
    }

    /// Plays a move without checking legality.
    ///
    /// The move must be legal (or at least pseudo-legal) in this position,
    /// otherwise the resulting state is unspecified. Use
    /// [`Position::play()`] for untrusted input.
    pub fn make_move(&mut self, m: Move) {
        let grid = self.rules.grid();
        let us = self.turn;
        let mut record = MoveRecord {
            m,
            captured: None,
            castles: self.castles,
            ep: self.ep,
            halfmoves: self.halfmoves,
            key: self.key,
            kings: self.kings,
            pockets: self.pockets,
            checks: self.checks,
            counting: self.counting,
            changed: ArrayVec::new(),
        };

        self.set_ep(None);

        match m {
            Move::Normal {
                role,
                from,
                to,
                promotion,
                ..
            } => {
                let from_index = grid.index(from);
                let to_index = grid.index(to);
                record.changed.push((from_index, self.cells[from_index]));
                record.changed.push((to_index, self.cells[to_index]));

                let moved = self.cells[from_index].piece().unwrap_or(role.of(us));
                let captured = self.cells[to_index].piece();
                self.set_cell(from_index, Cell::Empty);
                if let Some(captured) = captured {
                    self.capture(us, captured);
                    record.captured = Some(captured);
                }
                let placed = match promotion {
                    Some(role) => Piece {
                        color: us,
                        role,
                        promoted: self.rules.drops(),
                    },
                    None => moved,
                };
                self.set_cell(to_index, Cell::Piece(placed));

                if moved.role == Role::King {
                    if *self.kings.get(us) == Some(from_index) {
                        *self.kings.get_mut(us) = Some(to_index);
                    }
                    self.discard_castling_rights(us);
                }
                self.discard_castling_right_at(from);
                self.discard_castling_right_at(to);

                if from.rank().abs_diff(to.rank()) == 2
                    && self
                        .rules
                        .pieces()
                        .movement(moved.role)
                        .contains(Movement::PAWN)
                {
                    self.set_double_step_ep(from_index, to_index);
                }
            }
            Move::EnPassant { from, to } => {
                let target = record
                    .ep
                    .map_or(Square::new(to.file(), from.rank()), |ep| ep.target);
                let from_index = grid.index(from);
                let to_index = grid.index(to);
                let target_index = grid.index(target);
                record.changed.push((from_index, self.cells[from_index]));
                record.changed.push((to_index, self.cells[to_index]));
                record.changed.push((target_index, self.cells[target_index]));

                let moved = self.cells[from_index]
                    .piece()
                    .unwrap_or(Role::Pawn.of(us));
                let captured = self.cells[target_index].piece();
                self.set_cell(from_index, Cell::Empty);
                self.set_cell(target_index, Cell::Empty);
                self.set_cell(to_index, Cell::Piece(moved));
                if let Some(captured) = captured {
                    self.capture(us, captured);
                    record.captured = Some(captured);
                }
            }
            Move::Castle { king, rook } => {
                let side = CastlingSide::from_files(king.file(), rook.file());
                let king_to = Square::new(side.king_to_file(grid.width()), king.rank());
                let rook_to = Square::new(side.rook_to_file(grid.width()), rook.rank());
                let indices = [king, rook, king_to, rook_to].map(|sq| grid.index(sq));
                for index in indices {
                    record.changed.push((index, self.cells[index]));
                }
                let [king_index, rook_index, king_to_index, rook_to_index] = indices;

                let king_piece = self.cells[king_index]
                    .piece()
                    .unwrap_or(Role::King.of(us));
                let rook_piece = self.cells[rook_index]
                    .piece()
                    .unwrap_or(Role::Rook.of(us));
                self.set_cell(king_index, Cell::Empty);
                self.set_cell(rook_index, Cell::Empty);
                self.set_cell(king_to_index, Cell::Piece(king_piece));
                self.set_cell(rook_to_index, Cell::Piece(rook_piece));

                *self.kings.get_mut(us) = Some(king_to_index);
                self.discard_castling_rights(us);
            }
            Move::Put { role, to } => {
                let to_index = grid.index(to);
                record.changed.push((to_index, self.cells[to_index]));
                let count = self.pockets.get(us).get(role);
                self.set_pocket(us, role, count.saturating_sub(1));
                self.set_cell(to_index, Cell::Piece(role.of(us)));
            }
        }

        if record.captured.is_some_and(|p| p.role == Role::King)
            || m.promotion() == Some(Role::King)
        {
            self.kings = ByColor::new_with(|color| self.sole_king(color));
        }

        if self.rules.check_limit().is_some() && movegen::in_check(self, !us) {
            let remaining = self.remaining_checks(us).saturating_sub(1);
            self.set_remaining_checks(us, remaining);
        }
        if self.rules.counting() {
            self.update_counting(us);
        }

        self.halfmoves = if m.is_zeroing() {
            0
        } else {
            self.halfmoves.saturating_add(1)
        };
        self.ply += 1;
        self.turn = !us;
        self.key ^= ZobristHasher::turn();
        self.history.push(record);
    }

    /// Takes back the last move.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidState`] if no move has been made.
    pub fn undo_move(&mut self) -> Result<Move, InvalidState> {
        let record = self.history.pop().ok_or(InvalidState)?;
        for &(index, cell) in record.changed.iter().rev() {
            self.cells[index] = cell;
        }
        self.castles = record.castles;
        self.ep = record.ep;
        self.halfmoves = record.halfmoves;
        self.key = record.key;
        self.kings = record.kings;
        self.pockets = record.pockets;
        self.checks = record.checks;
        self.counting = record.counting;
        self.turn = !self.turn;
        self.ply = self.ply.saturating_sub(1);
        Ok(record.m)
    }

    fn set_cell(&mut self, index: usize, cell: Cell) {
        let old = mem::replace(&mut self.cells[index], cell);
        if old.piece().is_none() && cell.piece().is_none() {
            return;
        }
        let grid = self.rules.grid();
        let sq = grid.square_unchecked(index);
        if let Some(piece) = old.piece() {
            self.key ^= ZobristHasher::piece(grid, sq, piece);
        }
        if let Some(piece) = cell.piece() {
            self.key ^= ZobristHasher::piece(grid, sq, piece);
        }
    }

    fn set_castling_right(&mut self, color: Color, side: CastlingSide, rook: Option<Square>) {
        let slot = self.castles.get_mut(color).get_mut(side);
        if slot.is_some() != rook.is_some() {
            self.key ^= ZobristHasher::castling(color, side);
        }
        *slot = rook;
    }

    fn discard_castling_rights(&mut self, color: Color) {
        for side in CastlingSide::ALL {
            self.set_castling_right(color, side, None);
        }
    }

    fn discard_castling_right_at(&mut self, sq: Square) {
        for color in Color::ALL {
            for side in CastlingSide::ALL {
                if self.castling_right(color, side) == Some(sq) {
                    self.set_castling_right(color, side, None);
                }
            }
        }
    }

    fn set_ep(&mut self, ep: Option<EnPassant>) {
        if let Some(old) = self.ep {
            self.key ^= ZobristHasher::en_passant(old.square.file());
        }
        if let Some(new) = ep {
            self.key ^= ZobristHasher::en_passant(new.square.file());
        }
        self.ep = ep;
    }

    fn set_pocket(&mut self, color: Color, role: Role, count: u8) {
        let old = self.pockets.get(color).get(role);
        self.key ^= ZobristHasher::pocket(color, role, old);
        self.key ^= ZobristHasher::pocket(color, role, count);
        self.pockets.get_mut(color).set(role, count);
    }

    pub(crate) fn set_remaining_checks(&mut self, color: Color, remaining: u8) {
        if let Some(limit) = self.rules.check_limit() {
            self.key ^= ZobristHasher::remaining_checks(color, self.remaining_checks(color), limit);
            self.key ^= ZobristHasher::remaining_checks(color, remaining, limit);
        }
        *self.checks.get_mut(color) = remaining;
    }

    /// Index of the king of `color`, if it has exactly one.
    fn sole_king(&self, color: Color) -> Option<usize> {
        let grid = self.rules.grid();
        let mut kings = grid
            .squares()
            .map(|sq| grid.index(sq))
            .filter(|&index| {
                self.cells[index]
                    .piece()
                    .is_some_and(|p| p.is(color, Role::King))
            });
        match (kings.next(), kings.next()) {
            (Some(index), None) => Some(index),
            _ => None,
        }
    }

    /// Advances the Makruk counts after a move by `us`.
    fn update_counting(&mut self, us: Color) {
        let mut counting = self.counting;
        if counting.limit > 0 {
            counting.plies += 1;
        }
        let no_pawns = !self.pieces().any(|(_, p)| p.role == Role::Pawn);
        if no_pawns
            && !counting.pieces_honour
            && (self.material(us) < 2 || self.material(!us) < 2)
        {
            counting.pieces_honour = true;
            counting.plies = 2 * self.pieces().count() as u32;
            counting.limit = 2 * self.honour_limit(us);
        }
        if no_pawns && !counting.pieces_honour && counting.limit == 0 {
            counting.plies = 0;
            counting.limit = 2 * 64;
        }
        self.counting = counting;
    }

    /// Pieces' honour limit in moves, from the material of `color`.
    fn honour_limit(&self, color: Color) -> u32 {
        let rooks = self.count(color, Role::Rook);
        let khons = self.count(color, Role::Khon);
        if rooks > 1 {
            8
        } else if rooks == 1 {
            16
        } else if khons > 1 {
            22
        } else if self.count(color, Role::Knight) > 1 {
            32
        } else if khons == 1 {
            44
        } else {
            64
        }
    }

    fn capture(&mut self, us: Color, captured: Piece) {
        if self.rules.drops() {
            let role = if captured.promoted {
                Role::Pawn
            } else {
                captured.role
            };
            let count = self.pockets.get(us).get(role);
            self.set_pocket(us, role, count.saturating_add(1).min(MAX_POCKET));
        }
    }

    /// Records the skipped square after a double step, if an enemy pawn
    /// could capture into it.
    fn set_double_step_ep(&mut self, from_index: usize, to_index: usize) {
        let grid = self.rules.grid();
        let ep_index = (from_index + to_index) / 2;
        let square = grid.square_unchecked(ep_index);
        if self.variant() == Variant::Horde
            && square.rank() != 2
            && square.rank() != grid.height() - 3
        {
            return;
        }

        let them = !self.turn;
        let forward = grid.forward(them);
        let capturable = self
            .rules
            .pawn_steps()
            .iter()
            .filter(|s| s.kind == StepKind::Capture)
            .any(|s| {
                let source = step(ep_index, -(forward + isize::from(s.file)));
                self.cells[source].piece().is_some_and(|p| {
                    p.color == them && self.rules.pieces().movement(p.role).contains(Movement::PAWN)
                })
            });
        if capturable {
            self.set_ep(Some(EnPassant {
                square,
                target: grid.square_unchecked(to_index),
            }));
        }
    }

    /// Fills in derived state after the FEN parser placed pieces: king
    /// squares and the key. Checks the king count and that the side not to
    /// move is not in check.
    pub(crate) fn finish_setup(&mut self) -> Result<(), &'static str> {
        let kings = ByColor::new_with(|color| self.count(color, Role::King));
        if !self.variant().kings_valid(kings.white, kings.black) {
            return Err("invalid number of kings");
        }
        self.kings = ByColor::new_with(|color| self.sole_king(color));

        if !self.rules.king_capture() {
            if self.in_check(!self.turn) {
                return Err("side not to move is in check");
            }
            if self.rules.forbid_checks() && self.in_check(self.turn) {
                return Err("checks are not allowed");
            }
        }

        self.key = ZobristHasher::hash(self);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(name: &str) -> Square {
        name.parse().expect("valid square")
    }

    #[test]
    fn test_undo_empty_history() {
        let mut pos = Position::new(Variant::Standard).expect("start position");
        assert_eq!(pos.undo_move(), Err(InvalidState));
    }

    #[test]
    fn test_make_undo_restores_everything() {
        let mut pos = Position::from_fen(
            Variant::Standard,
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        )
        .expect("valid fen");
        let fen = pos.to_fen();
        let key = pos.key();
        for m in pos.legal_moves() {
            pos.make_move(m);
            assert_eq!(pos.key(), ZobristHasher::hash(&pos), "{m}");
            for reply in pos.legal_moves() {
                pos.make_move(reply);
                assert_eq!(pos.key(), ZobristHasher::hash(&pos), "{m} {reply}");
                pos.undo_move().expect("undo reply");
            }
            assert_eq!(pos.undo_move(), Ok(m));
            assert_eq!(pos.to_fen(), fen);
            assert_eq!(pos.key(), key);
        }
        assert!(pos.history().is_empty());
    }

    #[test]
    fn test_castling_rights_update() {
        let mut pos = Position::from_fen(Variant::Standard, "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1")
            .expect("valid fen");
        pos.play(Move::Normal {
            role: Role::Rook,
            from: sq("h1"),
            capture: Some(Role::Rook),
            to: sq("h8"),
            promotion: None,
        })
        .expect("legal capture");
        assert_eq!(pos.castling_right(Color::White, CastlingSide::KingSide), None);
        assert_eq!(pos.castling_right(Color::Black, CastlingSide::KingSide), None);
        assert_eq!(
            pos.castling_right(Color::White, CastlingSide::QueenSide),
            Some(sq("a1"))
        );
        assert_eq!(pos.to_fen(), "r3k2R/8/8/8/8/8/8/R3K3 b Qq - 0 1");
    }

    #[test]
    fn test_castle_move() {
        let mut pos = Position::from_fen(Variant::Standard, "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 3 10")
            .expect("valid fen");
        pos.play(Move::Castle {
            king: sq("e1"),
            rook: sq("a1"),
        })
        .expect("legal castle");
        assert_eq!(pos.to_fen(), "r3k2r/8/8/8/8/8/8/2KR3R b kq - 4 10");
        assert_eq!(pos.king_square(Color::White), Some(sq("c1")));
        pos.undo_move().expect("undo");
        assert_eq!(pos.king_square(Color::White), Some(sq("e1")));
    }

    #[test]
    fn test_en_passant_only_when_capturable() {
        let mut pos = Position::new(Variant::Standard).expect("start position");
        let e4 = Move::Normal {
            role: Role::Pawn,
            from: sq("e2"),
            capture: None,
            to: sq("e4"),
            promotion: None,
        };
        pos.play(e4).expect("legal");
        assert_eq!(pos.ep(), None);

        let mut pos = Position::from_fen(Variant::Standard, "4k3/8/8/8/3p4/8/4P3/4K3 w - - 0 1")
            .expect("valid fen");
        pos.play(e4).expect("legal");
        assert_eq!(
            pos.ep(),
            Some(EnPassant {
                square: sq("e3"),
                target: sq("e4"),
            })
        );
        let capture = Move::EnPassant {
            from: sq("d4"),
            to: sq("e3"),
        };
        pos.play(capture).expect("legal en passant");
        assert_eq!(pos.to_fen(), "4k3/8/8/8/8/4p3/8/4K3 w - - 0 2");
        assert_eq!(pos.last_move(), Some(capture));
        assert_eq!(
            pos.history().last().and_then(MoveRecord::captured),
            Some(Role::Pawn.of(Color::White))
        );
    }

    #[test]
    fn test_halfmove_counter() {
        let mut pos = Position::from_fen(Variant::Standard, "4k3/8/8/8/8/8/4P3/4K1N1 w - - 7 30")
            .expect("valid fen");
        pos.play(Move::Normal {
            role: Role::Knight,
            from: sq("g1"),
            capture: None,
            to: sq("f3"),
            promotion: None,
        })
        .expect("legal");
        assert_eq!(pos.halfmoves(), 8);
        assert_eq!(pos.fullmoves(), 30);
        pos.play(Move::Normal {
            role: Role::King,
            from: sq("e8"),
            capture: None,
            to: sq("d7"),
            promotion: None,
        })
        .expect("legal");
        assert_eq!(pos.halfmoves(), 9);
        assert_eq!(pos.fullmoves(), 31);
        pos.play(Move::Normal {
            role: Role::Pawn,
            from: sq("e2"),
            capture: None,
            to: sq("e3"),
            promotion: None,
        })
        .expect("legal");
        assert_eq!(pos.halfmoves(), 0);
    }

    #[test]
    fn test_soldier_move_resets_halfmoves() {
        let mut pos = Position::from_fen(
            Variant::Xiangqi,
            "rnbakabnr/9/1c5c1/p1p1p1p1p/9/9/P1P1P1P1P/1C5C1/9/RNBAKABNR w - - 7 1",
        )
        .expect("valid fen");
        pos.play(Move::Normal {
            role: Role::Soldier,
            from: sq("e4"),
            capture: None,
            to: sq("e5"),
            promotion: None,
        })
        .expect("legal");
        assert_eq!(pos.halfmoves(), 0);
        pos.undo_move().expect("undo");
        assert_eq!(pos.halfmoves(), 7);
    }

    #[test]
    fn test_captured_promoted_piece_goes_to_hand_as_pawn() {
        let mut pos = Position::from_fen(Variant::Crazyhouse, "4k3/3Q~4/8/8/8/8/8/4K3[] b - - 0 1")
            .expect("valid fen");
        pos.play(Move::Normal {
            role: Role::King,
            from: sq("e8"),
            capture: Some(Role::Queen),
            to: sq("d7"),
            promotion: None,
        })
        .expect("legal capture");
        assert_eq!(pos.pocket(Color::Black).get(Role::Pawn), 1);
        assert_eq!(pos.pocket(Color::Black).get(Role::Queen), 0);
        assert_eq!(pos.to_fen(), "8/3k4/8/8/8/8/8/4K3[p] w - - 0 2");
        assert_eq!(pos.key(), ZobristHasher::hash(&pos));
    }

    #[test]
    fn test_checks_are_counted() {
        let mut pos = Position::from_fen(Variant::ThreeCheck, "4k3/8/8/8/8/8/8/4K2R w - - 3+3 0 1")
            .expect("valid fen");
        let key = pos.key();
        pos.play(Move::Normal {
            role: Role::Rook,
            from: sq("h1"),
            capture: None,
            to: sq("h8"),
            promotion: None,
        })
        .expect("legal check");
        assert_eq!(pos.remaining_checks(Color::White), 2);
        assert_eq!(pos.remaining_checks(Color::Black), 3);
        assert_eq!(pos.key(), ZobristHasher::hash(&pos));
        assert_eq!(pos.to_epd(), "4k2R/8/8/8/8/8/8/4K3 b - - 2+3");
        pos.undo_move().expect("undo");
        assert_eq!(pos.remaining_checks(Color::White), 3);
        assert_eq!(pos.key(), key);
    }

    #[test]
    fn test_king_captures_update_king_square() {
        let mut pos = Position::from_fen(Variant::ThreeKings, "kk6/8/8/8/8/8/8/KK5q b - - 0 1")
            .expect("valid fen");
        assert_eq!(pos.king_square(Color::White), None);
        pos.play(Move::Normal {
            role: Role::Queen,
            from: sq("h1"),
            capture: Some(Role::King),
            to: sq("b1"),
            promotion: None,
        })
        .expect("legal capture");
        assert_eq!(pos.king_square(Color::White), Some(sq("a1")));
        pos.undo_move().expect("undo");
        assert_eq!(pos.king_square(Color::White), None);
    }

    #[test]
    fn test_makruk_counting() {
        let mut pos = Position::from_fen(Variant::Makruk, "4k3/8/8/8/8/8/8/R3K3 w - - 0 1")
            .expect("valid fen");
        assert_eq!(pos.counting(), Counting::default());
        pos.play(Move::Normal {
            role: Role::Rook,
            from: sq("a1"),
            capture: None,
            to: sq("a2"),
            promotion: None,
        })
        .expect("legal");
        // Pieces' honour with a rook: sixteen moves, counted from the
        // number of pieces on the board.
        assert_eq!(
            pos.counting(),
            Counting {
                limit: 32,
                plies: 6,
                pieces_honour: true,
            }
        );
        pos.play(Move::Normal {
            role: Role::King,
            from: sq("e8"),
            capture: None,
            to: sq("d8"),
            promotion: None,
        })
        .expect("legal");
        assert_eq!(pos.counting().plies, 7);
        assert_eq!(pos.to_fen(), "3k4/8/8/8/8/8/R7/4K3 w - 32 7 2");
        pos.undo_move().expect("undo");
        pos.undo_move().expect("undo");
        assert_eq!(pos.counting(), Counting::default());

        // Without pawns but with material on both sides, the board's
        // honour count of sixty-four moves starts.
        let mut pos = Position::from_fen(Variant::Makruk, "r3k3/8/8/8/8/8/8/R3K3 w - - 0 1")
            .expect("valid fen");
        pos.play(Move::Normal {
            role: Role::Rook,
            from: sq("a1"),
            capture: None,
            to: sq("a2"),
            promotion: None,
        })
        .expect("legal");
        assert_eq!(
            pos.counting(),
            Counting {
                limit: 128,
                plies: 0,
                pieces_honour: false,
            }
        );
    }

    #[test]
    fn test_play_illegal() {
        let mut pos = Position::new(Variant::Standard).expect("start position");
        let m = Move::Normal {
            role: Role::Pawn,
            from: sq("e2"),
            capture: None,
            to: sq("e5"),
            promotion: None,
        };
        assert_eq!(pos.play(m), Err(IllegalMove { m }));
        assert!(pos.history().is_empty());
    }

    #[test]
    fn test_repetitions() {
        let mut pos = Position::new(Variant::Standard).expect("start position");
        let shuffle = [("g1", "f3"), ("g8", "f6"), ("f3", "g1"), ("f6", "g8")];
        for _ in 0..2 {
            for (from, to) in shuffle {
                pos.play(Move::Normal {
                    role: Role::Knight,
                    from: sq(from),
                    capture: None,
                    to: sq(to),
                    promotion: None,
                })
                .expect("legal");
            }
        }
        assert_eq!(pos.repetitions(), 2);
        assert_eq!(pos.halfmoves(), 8);
    }
}
