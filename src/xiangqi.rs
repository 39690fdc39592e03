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

//! Pieces confined by palace and river.

use crate::{
    color::Color,
    grid::{step, Cell},
    m::MoveList,
    movegen::push_step,
    piece_table::Movement,
    position::Position,
    role::Role,
};

fn in_palace(pos: &Position, index: usize, color: Color) -> bool {
    let rules = pos.rules();
    match (rules.palace(), rules.grid().square(index)) {
        (Some(palace), Some(sq)) => palace.contains(color, sq),
        _ => false,
    }
}

fn on_own_half(pos: &Position, index: usize, color: Color) -> bool {
    pos.rules()
        .grid()
        .square(index)
        .is_some_and(|sq| pos.rules().is_own_half(color, sq))
}

pub(crate) fn gen_moves(pos: &Position, role: Role, from: usize, movement: Movement, moves: &mut MoveList) {
    let grid = pos.rules().grid();
    let cells = pos.cells();
    let us = pos.turn();

    if movement.contains(Movement::HORSE) {
        for (leg, leap) in grid.horse() {
            if cells[step(from, leg)].is_empty() {
                push_step(pos, role, from, step(from, leap), moves);
            }
        }
    }

    if movement.contains(Movement::ELEPHANT) {
        for direction in grid.diagonal() {
            let to = step(from, 2 * direction);
            if cells[step(from, direction)].is_empty() && on_own_half(pos, to, us) {
                push_step(pos, role, from, to, moves);
            }
        }
    }

    if movement.contains(Movement::ADVISOR) {
        for direction in grid.diagonal() {
            let to = step(from, direction);
            if in_palace(pos, to, us) {
                push_step(pos, role, from, to, moves);
            }
        }
    }

    if movement.contains(Movement::GENERAL) {
        for direction in grid.orthogonal() {
            let to = step(from, direction);
            if in_palace(pos, to, us) {
                push_step(pos, role, from, to, moves);
            }
        }
    }

    if movement.contains(Movement::SOLDIER) {
        push_step(pos, role, from, step(from, grid.forward(us)), moves);
        if !on_own_half(pos, from, us) {
            push_step(pos, role, from, step(from, 1), moves);
            push_step(pos, role, from, step(from, -1), moves);
        }
    }
}

/// Attacks by horses, elephants, advisors, generals and soldiers.
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

    if present.contains(Movement::HORSE) {
        let horse = grid.horse().into_iter().any(|(leg, leap)| {
            let from = step(target, -leap);
            attacker(from, Movement::HORSE) && cells[step(from, leg)].is_empty()
        });
        if horse {
            return true;
        }
    }

    if present.contains(Movement::SOLDIER) {
        let forward = step(target, -grid.forward(by));
        if attacker(forward, Movement::SOLDIER) {
            return true;
        }
        for side in [step(target, 1), step(target, -1)] {
            if attacker(side, Movement::SOLDIER) && !on_own_half(pos, side, by) {
                return true;
            }
        }
    }

    if present.contains(Movement::GENERAL) {
        // Generals may not face each other on an open file.
        let target_is_general = cells[target]
            .piece()
            .is_some_and(|p| table.movement(p.role).contains(Movement::GENERAL));
        if target_is_general {
            for direction in [grid.forward(Color::White), grid.forward(Color::Black)] {
                let mut index = step(target, direction);
                while cells[index].is_empty() {
                    index = step(index, direction);
                }
                if attacker(index, Movement::GENERAL) {
                    return true;
                }
            }
        }
        if in_palace(pos, target, by)
            && grid
                .orthogonal()
                .into_iter()
                .any(|direction| attacker(step(target, direction), Movement::GENERAL))
        {
            return true;
        }
    }

    if present.contains(Movement::ADVISOR)
        && in_palace(pos, target, by)
        && grid
            .diagonal()
            .into_iter()
            .any(|direction| attacker(step(target, direction), Movement::ADVISOR))
    {
        return true;
    }

    present.contains(Movement::ELEPHANT)
        && on_own_half(pos, target, by)
        && grid.diagonal().into_iter().any(|direction| {
            cells[step(target, direction)] == Cell::Empty
                && attacker(step(target, 2 * direction), Movement::ELEPHANT)
        })
}

#[cfg(test)]
mod tests {
    use crate::{color::Color, position::Position, square::Square, variant::Variant};

    fn targets(pos: &Position, from: &str) -> Vec<String> {
        let from: Square = from.parse().expect("valid square");
        let mut targets: Vec<String> = pos
            .legal_moves()
            .iter()
            .filter(|m| m.from() == Some(from))
            .map(|m| m.to().to_string())
            .collect();
        targets.sort();
        targets
    }

    #[test]
    fn test_horse_leg() {
        let pos = Position::from_fen(Variant::Xiangqi, "4k4/9/9/9/9/9/9/9/4P4/3K1N3 w - - 0 1")
            .expect("valid fen");
        // All legs are free, only the board edge limits the horse.
        assert_eq!(targets(&pos, "f1"), ["d2", "e3", "g3", "h2"]);

        let pos = Position::from_fen(Variant::Xiangqi, "4k4/9/9/9/9/9/9/9/5P3/3K1N3 w - - 0 1")
            .expect("valid fen");
        assert_eq!(targets(&pos, "f1"), ["d2", "h2"]);
    }

    #[test]
    fn test_soldier_crosses_river() {
        let pos = Position::from_fen(Variant::Xiangqi, "3k5/9/9/9/9/4P4/9/9/9/4K4 w - - 0 1")
            .expect("valid fen");
        assert_eq!(targets(&pos, "e5"), ["e6"]);

        let pos = Position::from_fen(Variant::Xiangqi, "3k5/9/9/9/4P4/9/9/9/9/4K4 w - - 0 1")
            .expect("valid fen");
        assert_eq!(targets(&pos, "e6"), ["d6", "e7", "f6"]);
    }

    #[test]
    fn test_palace_and_river() {
        let pos = Position::from_fen(Variant::Xiangqi, "4k4/9/9/9/9/9/9/2B6/4A4/3K5 w - - 0 1")
            .expect("valid fen");
        assert_eq!(targets(&pos, "e2"), ["d3", "f1", "f3"]);
        assert_eq!(targets(&pos, "c3"), ["a1", "a5", "e1", "e5"]);
        assert_eq!(targets(&pos, "d1"), ["d2", "e1"]);
    }

    #[test]
    fn test_mini_xiangqi_palace() {
        let pos = Position::from_fen(Variant::MiniXiangqi, "2k4/7/7/7/7/7/4K2 w - - 0 1")
            .expect("valid fen");
        // The palace spans files c to e, so f1 is out of reach.
        assert_eq!(targets(&pos, "e1"), ["d1", "e2"]);
    }

    #[test]
    fn test_mini_xiangqi_soldier_without_river() {
        let pos = Position::from_fen(Variant::MiniXiangqi, Variant::MiniXiangqi.start_fen())
            .expect("valid fen");
        assert_eq!(targets(&pos, "a2"), ["a3", "b2"]);
        assert_eq!(targets(&pos, "c2"), ["b2", "c3"]);

        let pos = Position::from_fen(Variant::MiniXiangqi, "3k3/7/3P3/7/7/7/2K4 w - - 0 1")
            .expect("valid fen");
        assert_eq!(targets(&pos, "d5"), ["c5", "d6", "e5"]);
        assert!(pos.is_attacked(Square::new(2, 4), Color::White));
        assert!(!pos.is_attacked(Square::new(3, 3), Color::White));
    }

    #[test]
    fn test_flying_general() {
        let pos = Position::from_fen(Variant::Xiangqi, "4k4/9/9/9/9/9/9/9/9/3K5 w - - 0 1")
            .expect("valid fen");
        // Stepping onto the open e-file would face the other general.
        assert_eq!(targets(&pos, "d1"), ["d2"]);
        assert!(!pos.is_attacked(Square::new(4, 9), Color::White));
    }
}
