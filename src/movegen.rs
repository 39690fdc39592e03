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

//! Move generation and attack detection on the padded cell buffer.
//!
//! Pseudo-legal moves come from the movement flags of each piece type.
//! Legality is decided by playing each candidate on a scratch copy of the
//! position and inspecting the result, which covers pins, discovered
//! checks, en passant subtleties and facing generals alike.

use crate::{
    castling_side::CastlingSide,
    color::Color,
    grid::{step, Cell},
    m::{Move, MoveList},
    piece_table::Movement,
    position::Position,
    role::Role,
    square::Square,
    variant::StepKind,
    xiangqi,
};

/// Generates all legal moves of the side to move.
pub(crate) fn legal_moves(pos: &Position) -> MoveList {
    let mut moves = MoveList::new();
    pseudo_legal_moves(pos, &mut moves);
    let mut scratch = pos.scratch();
    moves.retain(|m| is_legal(&mut scratch, *m));
    if pos.rules().forced_capture() && moves.iter().any(|m| m.is_capture()) {
        moves.retain(|m| m.is_capture());
    }
    moves
}

/// Plays `m` on `scratch` and tests if the mover's king survived, then
/// takes the move back.
pub(crate) fn is_legal(scratch: &mut Position, m: Move) -> bool {
    if scratch.rules().king_capture() {
        return true;
    }
    let us = scratch.turn();
    scratch.make_move(m);
    let legal = !in_check(scratch, us) && !(scratch.rules().forbid_checks() && in_check(scratch, !us));
    scratch.undo_move().is_ok() && legal
}

pub(crate) fn pseudo_legal_moves(pos: &Position, moves: &mut MoveList) {
    let grid = pos.rules().grid();
    let table = pos.rules().pieces();
    let us = pos.turn();

    for from_sq in grid.squares() {
        let from = grid.index(from_sq);
        let piece = match pos.cells()[from].piece() {
            Some(piece) if piece.color == us => piece,
            _ => continue,
        };
        let movement = table.movement(piece.role);

        if movement.contains(Movement::KNIGHT) {
            gen_leaps(pos, piece.role, from, &grid.knight(), moves);
        }
        if movement.contains(Movement::KING) {
            gen_leaps(pos, piece.role, from, &grid.king(), moves);
        }
        if movement.contains(Movement::FERZ) {
            gen_leaps(pos, piece.role, from, &grid.diagonal(), moves);
        }
        if movement.contains(Movement::ALFIL) {
            gen_leaps(pos, piece.role, from, &grid.alfil(), moves);
        }
        if movement.contains(Movement::SILVER) {
            gen_leaps(pos, piece.role, from, &grid.diagonal(), moves);
            push_step(pos, piece.role, from, step(from, grid.forward(us)), moves);
        }
        if movement.contains(Movement::ROOK) {
            gen_slides(pos, piece.role, from, &grid.orthogonal(), moves);
        }
        if movement.contains(Movement::BISHOP) {
            gen_slides(pos, piece.role, from, &grid.diagonal(), moves);
        }
        if movement.contains(Movement::CANNON) {
            gen_cannon(pos, piece.role, from, moves);
        }
        if movement.contains(Movement::PAWN) {
            gen_pawn_moves(pos, piece.role, from, moves);
        }
        if movement.intersects(Movement::EASTERN) {
            xiangqi::gen_moves(pos, piece.role, from, movement, moves);
        }
    }

    if pos.rules().castling() {
        gen_castling_moves(pos, moves);
    }
    if pos.rules().drops() {
        gen_drops(pos, moves);
    }
}

/// Pushes a move to `to` unless it is occupied by a friendly piece or a
/// wall. Returns the target cell.
pub(crate) fn push_step(pos: &Position, role: Role, from: usize, to: usize, moves: &mut MoveList) -> Cell {
    let grid = pos.rules().grid();
    let cell = pos.cells()[to];
    let capture = match cell {
        Cell::Wall => return cell,
        Cell::Empty => None,
        Cell::Piece(piece) if piece.color != pos.turn() => Some(piece.role),
        Cell::Piece(_) => return cell,
    };
    moves.push(Move::Normal {
        role,
        from: grid.square_unchecked(from),
        capture,
        to: grid.square_unchecked(to),
        promotion: None,
    });
    cell
}

fn gen_leaps(pos: &Position, role: Role, from: usize, offsets: &[isize], moves: &mut MoveList) {
    for &offset in offsets {
        push_step(pos, role, from, step(from, offset), moves);
    }
}

fn gen_slides(pos: &Position, role: Role, from: usize, directions: &[isize], moves: &mut MoveList) {
    for &direction in directions {
        let mut to = step(from, direction);
        while push_step(pos, role, from, to, moves).is_empty() {
            to = step(to, direction);
        }
    }
}

fn gen_cannon(pos: &Position, role: Role, from: usize, moves: &mut MoveList) {
    let grid = pos.rules().grid();
    let cells = pos.cells();
    for direction in grid.orthogonal() {
        let mut to = step(from, direction);
        while cells[to].is_empty() {
            push_step(pos, role, from, to, moves);
            to = step(to, direction);
        }
        if cells[to].is_wall() {
            continue;
        }
        // Jump the screen and capture the next piece, if it is an enemy.
        to = step(to, direction);
        while cells[to].is_empty() {
            to = step(to, direction);
        }
        if cells[to].is_color(!pos.turn()) {
            push_step(pos, role, from, to, moves);
        }
    }
}

fn push_pawn_moves(pos: &Position, role: Role, from: usize, to: usize, capture: Option<Role>, moves: &mut MoveList) {
    let grid = pos.rules().grid();
    let from_sq = grid.square_unchecked(from);
    let to_sq = grid.square_unchecked(to);
    let rank = pos.turn().fold(to_sq.rank(), grid.height() - 1 - to_sq.rank());
    if rank >= pos.rules().promotion_rank() {
        for &promotion in pos.rules().promotions() {
            moves.push(Move::Normal {
                role,
                from: from_sq,
                capture,
                to: to_sq,
                promotion: Some(promotion),
            });
        }
    } else {
        moves.push(Move::Normal {
            role,
            from: from_sq,
            capture,
            to: to_sq,
            promotion: None,
        });
    }
}

fn gen_pawn_moves(pos: &Position, role: Role, from: usize, moves: &mut MoveList) {
    let grid = pos.rules().grid();
    let cells = pos.cells();
    let us = pos.turn();
    let forward = grid.forward(us);
    // Pawns that have not left their first two ranks may advance twice.
    let may_double = pos.rules().double_step() && cells[step(from, -2 * forward)].is_wall();

    for pawn_step in pos.rules().pawn_steps() {
        let direction = forward + isize::from(pawn_step.file);
        let to = step(from, direction);
        match pawn_step.kind {
            StepKind::Free => {
                if !cells[to].is_empty() {
                    continue;
                }
                push_pawn_moves(pos, role, from, to, None, moves);
                let twice = step(to, direction);
                if may_double && cells[twice].is_empty() {
                    push_pawn_moves(pos, role, from, twice, None, moves);
                }
            }
            StepKind::Capture => match cells[to] {
                Cell::Piece(piece) if piece.color != us => {
                    push_pawn_moves(pos, role, from, to, Some(piece.role), moves);
                }
                Cell::Empty => {
                    if pos.ep().is_some_and(|ep| grid.index(ep.square) == to) {
                        moves.push(Move::EnPassant {
                            from: grid.square_unchecked(from),
                            to: grid.square_unchecked(to),
                        });
                    }
                }
                _ => (),
            },
        }
    }
}

fn gen_castling_moves(pos: &Position, moves: &mut MoveList) {
    let us = pos.turn();
    let grid = pos.rules().grid();
    let Some(king) = pos.king_square(us) else {
        return;
    };

    for side in CastlingSide::ALL {
        let Some(rook) = pos.castling_right(us, side) else {
            continue;
        };
        if rook.rank() != king.rank() || CastlingSide::from_files(king.file(), rook.file()) != side {
            continue;
        }
        let king_to = side.king_to_file(grid.width());
        let rook_to = side.rook_to_file(grid.width());

        let files = [king.file(), rook.file(), king_to, rook_to];
        let (Some(&min), Some(&max)) = (files.iter().min(), files.iter().max()) else {
            continue;
        };
        let blocked = (min..=max).any(|file| {
            file != king.file()
                && file != rook.file()
                && pos.piece_at(Square::new(file, king.rank())).is_some()
        });
        if blocked {
            continue;
        }

        // The king may not castle out of or through check. The destination
        // is verified by the legality test.
        let transit_attacked = !pos.rules().king_capture()
            && (king.file().min(king_to)..=king.file().max(king_to))
                .any(|file| pos.is_attacked(Square::new(file, king.rank()), !us));
        if transit_attacked {
            continue;
        }

        moves.push(Move::Castle { king, rook });
    }
}

fn gen_drops(pos: &Position, moves: &mut MoveList) {
    let us = pos.turn();
    let grid = pos.rules().grid();
    let last_rank = grid.height() - 1;
    for (role, _) in pos.pocket(us).iter() {
        for to in grid.squares() {
            if role == Role::Pawn && (to.rank() == 0 || to.rank() == last_rank) {
                continue;
            }
            if pos.cells()[grid.index(to)].is_empty() {
                moves.push(Move::Put { role, to });
            }
        }
    }
}

/// Tests if the king of `color` is attacked. Sides without exactly one
/// king and variants without royal kings are never in check.
pub(crate) fn in_check(pos: &Position, color: Color) -> bool {
    !pos.rules().king_capture()
        && pos
            .kings
            .get(color)
            .is_some_and(|king| is_attacked(pos, king, !color))
}

/// Tests if a piece of color `by` attacks the cell `target`.
pub(crate) fn is_attacked(pos: &Position, target: usize, by: Color) -> bool {
    let grid = pos.rules().grid();
    let table = pos.rules().pieces();
    let cells = pos.cells();
    let present = table.movements();
    let attacker = |index: usize, movement: Movement| {
        cells[index]
            .piece()
            .is_some_and(|p| p.color == by && table.movement(p.role).intersects(movement))
    };

    if present.contains(Movement::PAWN) {
        let forward = grid.forward(by);
        let pawn = pos
            .rules()
            .pawn_steps()
            .iter()
            .filter(|s| s.kind == StepKind::Capture)
            .any(|s| attacker(step(target, -(forward + isize::from(s.file))), Movement::PAWN));
        if pawn {
            return true;
        }
    }

    let (knight, king, ferz, alfil) = (grid.knight(), grid.king(), grid.diagonal(), grid.alfil());
    let leapers: [(Movement, &[isize]); 4] = [
        (Movement::KNIGHT, &knight),
        (Movement::KING, &king),
        (Movement::FERZ, &ferz),
        (Movement::ALFIL, &alfil),
    ];
    for (movement, offsets) in leapers {
        if present.contains(movement)
            && offsets
                .iter()
                .any(|&offset| attacker(step(target, offset), movement))
        {
            return true;
        }
    }

    if present.contains(Movement::SILVER)
        && (ferz
            .iter()
            .any(|&offset| attacker(step(target, offset), Movement::SILVER))
            || attacker(step(target, -grid.forward(by)), Movement::SILVER))
    {
        return true;
    }

    let sliders = [
        (Movement::ROOK | Movement::CANNON, grid.orthogonal()),
        (Movement::BISHOP, grid.diagonal()),
    ];
    for (movement, directions) in sliders {
        if !present.intersects(movement) {
            continue;
        }
        for direction in directions {
            let mut index = step(target, direction);
            while cells[index].is_empty() {
                index = step(index, direction);
            }
            if cells[index].is_wall() {
                continue;
            }
            if attacker(index, movement & !Movement::CANNON) {
                return true;
            }
            if movement.contains(Movement::CANNON) {
                index = step(index, direction);
                while cells[index].is_empty() {
                    index = step(index, direction);
                }
                if attacker(index, Movement::CANNON) {
                    return true;
                }
            }
        }
    }

    present.intersects(Movement::EASTERN) && xiangqi::is_attacked(pos, target, by)
}
