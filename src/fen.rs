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

//! Parse and write Forsyth-Edwards-Notation.
//!
//! The board part generalizes to any board size: empty runs may have
//! several digits, promoted pieces of drop variants carry a `~` suffix, and
//! pieces in hand follow in brackets. The halfmove clock and the fullmove
//! number may be omitted.
//!
//! Check variants add the remaining checks of both sides after the en
//! passant field, like `3+3`. Forward counters like `+0+0` are read as
//! well. Makruk writes its counting limit in place of the en passant
//! square and the counted plies in place of the halfmove clock.
//!
//! # Examples
//!
//! ```
//! use polychess::{Position, Variant};
//!
//! let pos = Position::from_fen(
//!     Variant::Xiangqi,
//!     "rnbakabnr/9/1c5c1/p1p1p1p1p/9/9/P1P1P1P1P/1C5C1/9/RNBAKABNR w",
//! )?;
//! assert_eq!(pos.legal_moves().len(), 44);
//! assert_eq!(
//!     pos.to_fen(),
//!     "rnbakabnr/9/1c5c1/p1p1p1p1p/9/9/P1P1P1P1P/1C5C1/9/RNBAKABNR w - - 0 1"
//! );
//! # Ok::<_, polychess::ParseFenError>(())
//! ```

use std::{error::Error, fmt, sync::Arc};

use crate::{
    castling_side::CastlingSide,
    color::{ByColor, Color},
    grid::{step, Cell},
    piece_table::Movement,
    position::Position,
    role::Role,
    square::Square,
    types::{EnPassant, MAX_POCKET},
    variant::{ConfigurationError, RuleSet, StepKind},
};

/// How castling rights are written.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash, Default)]
pub enum FenFormat {
    /// `KQkq` for the outermost rooks, file letters otherwise.
    #[default]
    XFen,
    /// Always file letters, like `HAha`.
    Shredder,
}

/// Errors that can occur when parsing a FEN.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ParseFenError {
    InvalidBoard,
    InvalidPocket,
    InvalidTurn,
    InvalidCastling,
    InvalidEpSquare,
    InvalidHalfmoveClock,
    InvalidFullmoves,
    InvalidRemainingChecks,
    /// The FEN is well formed, but describes an impossible position, like
    /// a wrong number of kings or a king in check when it is not its turn.
    IllegalPosition,
    /// The rules of the variant could not be built.
    Configuration(ConfigurationError),
}

impl fmt::Display for ParseFenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseFenError::InvalidBoard => f.write_str("invalid board part in fen"),
            ParseFenError::InvalidPocket => f.write_str("invalid pocket in fen"),
            ParseFenError::InvalidTurn => f.write_str("invalid turn part in fen"),
            ParseFenError::InvalidCastling => f.write_str("invalid castling part in fen"),
            ParseFenError::InvalidEpSquare => f.write_str("invalid en passant part in fen"),
            ParseFenError::InvalidHalfmoveClock => f.write_str("invalid halfmove clock in fen"),
            ParseFenError::InvalidFullmoves => f.write_str("invalid fullmove part in fen"),
            ParseFenError::InvalidRemainingChecks => {
                f.write_str("invalid remaining checks in fen")
            }
            ParseFenError::IllegalPosition => f.write_str("illegal position"),
            ParseFenError::Configuration(err) => err.fmt(f),
        }
    }
}

impl Error for ParseFenError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ParseFenError::Configuration(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ConfigurationError> for ParseFenError {
    fn from(err: ConfigurationError) -> ParseFenError {
        ParseFenError::Configuration(err)
    }
}

fn parse_board(pos: &mut Position, board: &str) -> Result<(), ParseFenError> {
    let rules = Arc::clone(&pos.rules);
    let grid = rules.grid();
    let mut ranks = 0;

    for (row, line) in board.split('/').enumerate() {
        let rank = u8::try_from(row)
            .ok()
            .and_then(|row| (grid.height() - 1).checked_sub(row))
            .ok_or(ParseFenError::InvalidBoard)?;
        ranks += 1;

        let mut file: u8 = 0;
        let mut empty: u8 = 0;
        let mut last = None;
        for ch in line.chars() {
            if let Some(digit) = ch.to_digit(10) {
                empty = empty
                    .checked_mul(10)
                    .and_then(|n| n.checked_add(digit as u8))
                    .ok_or(ParseFenError::InvalidBoard)?;
                if empty == 0 {
                    return Err(ParseFenError::InvalidBoard);
                }
                last = None;
                continue;
            }
            file = file.checked_add(empty).ok_or(ParseFenError::InvalidBoard)?;
            empty = 0;

            if ch == '~' {
                let index = last.take().ok_or(ParseFenError::InvalidBoard)?;
                if !rules.drops() {
                    return Err(ParseFenError::InvalidBoard);
                }
                if let Cell::Piece(piece) = &mut pos.cells[index] {
                    piece.promoted = true;
                }
                continue;
            }

            let piece = rules
                .pieces()
                .piece_from_char(ch)
                .ok_or(ParseFenError::InvalidBoard)?;
            if file >= grid.width() {
                return Err(ParseFenError::InvalidBoard);
            }
            let index = grid.index(Square::new(file, rank));
            pos.cells[index] = Cell::Piece(piece);
            last = Some(index);
            file += 1;
        }
        file = file.checked_add(empty).ok_or(ParseFenError::InvalidBoard)?;
        if file != grid.width() {
            return Err(ParseFenError::InvalidBoard);
        }
    }

    if ranks == grid.height() {
        Ok(())
    } else {
        Err(ParseFenError::InvalidBoard)
    }
}

fn parse_pocket(pos: &mut Position, pocket: &str) -> Result<(), ParseFenError> {
    if !pos.rules.drops() {
        return Err(ParseFenError::InvalidPocket);
    }
    for ch in pocket.chars() {
        if ch == '-' {
            continue;
        }
        let piece = pos
            .rules
            .pieces()
            .piece_from_char(ch)
            .ok_or(ParseFenError::InvalidPocket)?;
        let pocket = pos.pockets.get_mut(piece.color);
        let count = pocket.get(piece.role);
        if count >= MAX_POCKET {
            return Err(ParseFenError::InvalidPocket);
        }
        pocket.set(piece.role, count + 1);
    }
    Ok(())
}

fn back_rank(pos: &Position, color: Color) -> u8 {
    color.fold(0, pos.rules.grid().height() - 1)
}

fn back_rank_king(pos: &Position, color: Color) -> Option<Square> {
    let rank = back_rank(pos, color);
    (0..pos.rules.grid().width())
        .map(|file| Square::new(file, rank))
        .find(|&sq| pos.piece_at(sq).is_some_and(|p| p.is(color, Role::King)))
}

fn back_rank_rooks(pos: &Position, color: Color) -> impl Iterator<Item = Square> + '_ {
    let rank = back_rank(pos, color);
    (0..pos.rules.grid().width())
        .map(move |file| Square::new(file, rank))
        .filter(move |&sq| pos.piece_at(sq).is_some_and(|p| p.is(color, Role::Rook)))
}

/// The rook farthest from the king on one side.
fn outermost_rook(pos: &Position, color: Color, king: Square, side: CastlingSide) -> Option<Square> {
    let mut rooks = back_rank_rooks(pos, color)
        .filter(|rook| CastlingSide::from_files(king.file(), rook.file()) == side && rook.file() != king.file());
    match side {
        CastlingSide::KingSide => rooks.last(),
        CastlingSide::QueenSide => rooks.next(),
    }
}

fn parse_castling(pos: &mut Position, castling: &str) -> Result<(), ParseFenError> {
    if castling == "-" {
        return Ok(());
    }
    if !pos.rules.castling() {
        return Err(ParseFenError::InvalidCastling);
    }

    for ch in castling.chars() {
        let color = Color::from_white(ch.is_ascii_uppercase());
        let king = back_rank_king(pos, color).ok_or(ParseFenError::InvalidCastling)?;
        let rook = match ch.to_ascii_lowercase() {
            'k' => outermost_rook(pos, color, king, CastlingSide::KingSide),
            'q' => outermost_rook(pos, color, king, CastlingSide::QueenSide),
            file @ 'a'..='p' => {
                let file = file as u8 - b'a';
                back_rank_rooks(pos, color).find(|sq| sq.file() == file)
            }
            _ => None,
        }
        .ok_or(ParseFenError::InvalidCastling)?;

        let side = CastlingSide::from_files(king.file(), rook.file());
        let slot = pos.castles.get_mut(color).get_mut(side);
        if slot.is_some() {
            return Err(ParseFenError::InvalidCastling);
        }
        *slot = Some(rook);
    }
    Ok(())
}

fn is_pawn(rules: &RuleSet, cell: Cell, color: Color) -> bool {
    cell.piece()
        .is_some_and(|p| p.color == color && rules.pieces().movement(p.role).contains(Movement::PAWN))
}

fn parse_ep(pos: &mut Position, ep: &str) -> Result<(), ParseFenError> {
    if ep == "-" {
        return Ok(());
    }
    let rules = Arc::clone(&pos.rules);
    let grid = rules.grid();
    let them = !pos.turn;

    let (square, rest) = Square::parse_prefix(ep.as_bytes()).ok_or(ParseFenError::InvalidEpSquare)?;
    let target = if rest.is_empty() {
        if rules.pawns_ambiguous() {
            return Err(ParseFenError::InvalidEpSquare);
        }
        square.offset(0, them.fold(1, -1))
    } else {
        Square::from_ascii(rest).ok()
    }
    .ok_or(ParseFenError::InvalidEpSquare)?;

    if !grid.contains(square)
        || !grid.contains(target)
        || !pos.cells[grid.index(square)].is_empty()
        || !is_pawn(&rules, pos.cells[grid.index(target)], them)
    {
        return Err(ParseFenError::InvalidEpSquare);
    }

    // Keep the square only if it matters, so that keys agree with
    // positions reached by playing moves.
    let ep_index = grid.index(square);
    let forward = grid.forward(pos.turn);
    let capturable = rules
        .pawn_steps()
        .iter()
        .filter(|s| s.kind == StepKind::Capture)
        .any(|s| is_pawn(&rules, pos.cells[step(ep_index, -(forward + isize::from(s.file)))], pos.turn));
    if capturable {
        pos.ep = Some(EnPassant { square, target });
    }
    Ok(())
}

/// Parses `3+3` as remaining checks or `+0+0` as checks given.
fn parse_remaining_checks(field: &str, limit: u8) -> Result<(u8, u8), ParseFenError> {
    let (given, field) = match field.strip_prefix('+') {
        Some(field) => (true, field),
        None => (false, field),
    };
    let (white, black) = field
        .split_once('+')
        .ok_or(ParseFenError::InvalidRemainingChecks)?;
    let count = |part: &str| -> Result<u8, ParseFenError> {
        let count: u8 = btoi::btou(part.as_bytes()).map_err(|_| ParseFenError::InvalidRemainingChecks)?;
        Ok(if given {
            limit.saturating_sub(count)
        } else {
            count.min(limit)
        })
    };
    Ok((count(white)?, count(black)?))
}

pub(crate) fn parse(rules: Arc<RuleSet>, fen: &str) -> Result<Position, ParseFenError> {
    let mut pos = Position::empty(rules);
    let mut parts: Vec<&str> = fen.split_ascii_whitespace().collect();

    let check_limit = pos.rules.check_limit();
    let mut checks = None;
    if let Some(limit) = check_limit {
        let field = parts.iter().skip(1).position(|part| part.contains('+'));
        if let Some(index) = field {
            checks = Some(parse_remaining_checks(parts.remove(index + 1), limit)?);
        }
    }
    let mut parts = parts.into_iter();

    let board = parts.next().ok_or(ParseFenError::InvalidBoard)?;
    let board = match board.split_once('[') {
        Some((board, pocket)) => {
            let pocket = pocket.strip_suffix(']').ok_or(ParseFenError::InvalidPocket)?;
            parse_pocket(&mut pos, pocket)?;
            board
        }
        None => board,
    };
    parse_board(&mut pos, board)?;

    pos.turn = match parts.next() {
        Some("w") | None => Color::White,
        Some("b") => Color::Black,
        Some(_) => return Err(ParseFenError::InvalidTurn),
    };

    if let Some(castling) = parts.next() {
        parse_castling(&mut pos, castling)?;
    }

    let mut counting = false;
    if let Some(ep) = parts.next() {
        if pos.rules.counting() && ep != "-" {
            pos.counting.limit = btoi::btou(ep.as_bytes()).map_err(|_| ParseFenError::InvalidEpSquare)?;
            counting = true;
        } else {
            parse_ep(&mut pos, ep)?;
        }
    }

    if let Some(halfmoves) = parts.next() {
        let halfmoves = btoi::btou(halfmoves.as_bytes()).map_err(|_| ParseFenError::InvalidHalfmoveClock)?;
        if counting {
            pos.counting.plies = halfmoves;
        } else {
            pos.halfmoves = halfmoves;
        }
    }

    let fullmoves: u32 = match parts.next() {
        Some(fullmoves) => btoi::btou(fullmoves.as_bytes()).map_err(|_| ParseFenError::InvalidFullmoves)?,
        None => 1,
    };
    pos.ply = fullmoves
        .max(1)
        .saturating_sub(1)
        .saturating_mul(2)
        .saturating_add(pos.turn.fold(0, 1));

    if parts.next().is_some() {
        return Err(ParseFenError::InvalidFullmoves);
    }

    if let Some(limit) = check_limit {
        let (white, black) = checks.unwrap_or((limit, limit));
        pos.checks = ByColor { white, black };
    }

    pos.finish_setup().map_err(|reason| {
        log::debug!("illegal position {fen:?}: {reason}");
        ParseFenError::IllegalPosition
    })?;

    // Without counters, a side in check has already received one.
    if check_limit.is_some() && checks.is_none() && pos.is_check() {
        let checker = !pos.turn;
        let remaining = pos.remaining_checks(checker).saturating_sub(1);
        pos.set_remaining_checks(checker, remaining);
    }

    if counting {
        let no_pawns = !pos.pieces().any(|(_, piece)| piece.role == Role::Pawn);
        pos.counting.pieces_honour =
            no_pawns && (pos.material(Color::White) < 2 || pos.material(Color::Black) < 2);
    }
    Ok(pos)
}

fn board_fen(pos: &Position) -> String {
    let grid = pos.rules.grid();
    let mut fen = String::with_capacity(usize::from(grid.width()) * usize::from(grid.height()) + 16);

    for rank in (0..grid.height()).rev() {
        let mut empty = 0;
        for file in 0..grid.width() {
            match pos.piece_at(Square::new(file, rank)) {
                Some(piece) => {
                    if empty > 0 {
                        fen.push_str(&empty.to_string());
                        empty = 0;
                    }
                    let ch = pos.rules.pieces().piece_char(piece).unwrap_or_else(|| {
                        piece
                            .color
                            .fold(piece.role.upper_char(), piece.role.upper_char().to_ascii_lowercase())
                    });
                    fen.push(ch);
                    if piece.promoted && pos.rules.drops() {
                        fen.push('~');
                    }
                }
                None => empty += 1,
            }
        }
        if empty > 0 {
            fen.push_str(&empty.to_string());
        }
        if rank > 0 {
            fen.push('/');
        }
    }

    if pos.rules.drops() {
        fen.push('[');
        let start = fen.len();
        for color in Color::ALL {
            for (role, count) in pos.pocket(color).iter() {
                let piece = role.of(color);
                if let Some(ch) = pos.rules.pieces().piece_char(piece) {
                    for _ in 0..count {
                        fen.push(ch);
                    }
                }
            }
        }
        if fen.len() == start {
            fen.push('-');
        }
        fen.push(']');
    }

    fen
}

fn castling_fen(pos: &Position, format: FenFormat) -> String {
    let mut fen = String::with_capacity(4);
    for color in Color::ALL {
        let king = back_rank_king(pos, color);
        for side in CastlingSide::ALL {
            let Some(rook) = pos.castling_right(color, side) else {
                continue;
            };
            let outermost = king.and_then(|king| outermost_rook(pos, color, king, side)) == Some(rook);
            let ch = match (format, side) {
                (FenFormat::XFen, CastlingSide::KingSide) if outermost => 'K',
                (FenFormat::XFen, CastlingSide::QueenSide) if outermost => 'Q',
                _ => rook.file_char().to_ascii_uppercase(),
            };
            fen.push(color.fold(ch, ch.to_ascii_lowercase()));
        }
    }
    if fen.is_empty() {
        fen.push('-');
    }
    fen
}

fn ep_fen(pos: &Position) -> String {
    match pos.ep() {
        Some(ep) if pos.rules.pawns_ambiguous() => format!("{}{}", ep.square, ep.target),
        Some(ep) => ep.square.to_string(),
        None => "-".to_owned(),
    }
}

/// Writes the placement, pockets, turn, castling rights and en passant
/// square, without counters.
pub(crate) fn to_epd(pos: &Position, format: FenFormat) -> String {
    let mut epd = format!(
        "{} {} {} {}",
        board_fen(pos),
        pos.turn().char(),
        castling_fen(pos, format),
        ep_fen(pos)
    );
    if pos.rules.check_limit().is_some() {
        epd.push_str(&format!(
            " {}+{}",
            pos.remaining_checks(Color::White),
            pos.remaining_checks(Color::Black)
        ));
    }
    epd
}

pub(crate) fn to_fen(pos: &Position, format: FenFormat) -> String {
    if pos.rules.counting() {
        let counting = pos.counting();
        return format!(
            "{} {} {} {} {} {}",
            board_fen(pos),
            pos.turn().char(),
            castling_fen(pos, format),
            counting.limit,
            counting.plies,
            pos.fullmoves()
        );
    }
    format!(
        "{} {} {}",
        to_epd(pos, format),
        pos.halfmoves(),
        pos.fullmoves()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::variant::Variant;

    fn roundtrip(variant: Variant, fen: &str) {
        let pos = Position::from_fen(variant, fen).expect("valid fen");
        assert_eq!(pos.to_fen(), fen);
    }

    #[test]
    fn test_start_positions_roundtrip() {
        for variant in Variant::ALL {
            roundtrip(variant, variant.start_fen());
        }
    }

    #[test]
    fn test_multi_digit_runs() {
        roundtrip(Variant::Capablanca, "r1b1c2rk1/p4a1ppp/1ppq2pn2/3p1p4/3A1Pn3/1PN3PN2/P1PQP1BPPP/3RC2RK1 w - - 0 15");
        let pos = Position::from_fen(Variant::Capablanca, "4k5/10/10/10/10/10/10/4K5 w - - 0 1")
            .expect("valid fen");
        assert_eq!(pos.piece_at(Square::new(4, 0)), Some(Role::King.of(Color::White)));
        assert_eq!(
            Position::from_fen(Variant::Capablanca, "4k5/11/10/10/10/10/10/4K5 w - - 0 1").err(),
            Some(ParseFenError::InvalidBoard)
        );
    }

    #[test]
    fn test_optional_counters() {
        let pos = Position::from_fen(Variant::Standard, "4k3/8/8/8/8/8/8/4K3 b -").expect("valid fen");
        assert_eq!(pos.to_fen(), "4k3/8/8/8/8/8/8/4K3 b - - 0 1");
        assert_eq!(pos.ply(), 1);
    }

    #[test]
    fn test_pockets() {
        roundtrip(Variant::Crazyhouse, "r1bqk2r/pppp1ppp/2n5/4p3/1bP1P3/2N2N2/PP1P1PPP/R2QKB1R[Bn] b KQkq - 0 5");
        roundtrip(Variant::Crazyhouse, "4k3/8/8/8/8/8/8/3QK3[PPnn] w - - 0 30");
        let pos = Position::from_fen(Variant::Crazyhouse, "4k3/8/8/8/8/8/8/3Q~K3[] w - - 0 1")
            .expect("valid fen");
        assert_eq!(pos.to_fen(), "4k3/8/8/8/8/8/8/3Q~K3[-] w - - 0 1");
        assert_eq!(
            Position::from_fen(Variant::Standard, "4k3/8/8/8/8/8/8/4K3[Q] w - - 0 1").err(),
            Some(ParseFenError::InvalidPocket)
        );
    }

    #[test]
    fn test_castling_formats() {
        let fen = "bqnb1rkr/pp3ppp/3ppn2/2p5/5P2/P2P4/NPP1P1PP/BQ1BNRKR w HFhf - 2 9";
        let pos = Position::from_fen(Variant::Chess960, fen).expect("valid fen");
        assert_eq!(
            pos.to_fen(),
            "bqnb1rkr/pp3ppp/3ppn2/2p5/5P2/P2P4/NPP1P1PP/BQ1BNRKR w KQkq - 2 9"
        );
        assert_eq!(pos.to_fen_with(FenFormat::Shredder), fen);

        let pos = Position::from_fen(Variant::Chess960, "4k3/8/8/8/8/8/8/RR2K3 w B - 0 1")
            .expect("valid fen");
        assert_eq!(pos.castling_right(Color::White, CastlingSide::QueenSide), Some(Square::new(1, 0)));
        assert_eq!(pos.to_fen(), "4k3/8/8/8/8/8/8/RR2K3 w B - 0 1");

        assert_eq!(
            Position::from_fen(Variant::Standard, "4k3/8/8/8/8/8/8/4K3 w K - 0 1").err(),
            Some(ParseFenError::InvalidCastling)
        );
    }

    #[test]
    fn test_en_passant() {
        // Kept only if a pawn can capture.
        let pos = Position::from_fen(Variant::Standard, "4k3/8/8/8/4P3/8/8/4K3 b - e3 0 1")
            .expect("valid fen");
        assert_eq!(pos.ep(), None);
        roundtrip(Variant::Standard, "4k3/8/8/8/3pP3/8/8/4K3 b - e3 0 1");
        roundtrip(Variant::Berolina, "4k3/8/8/8/3pP3/8/8/4K3 b - d3e4 0 1");
        assert_eq!(
            Position::from_fen(Variant::Standard, "4k3/8/8/8/8/8/8/4K3 b - e3 0 1").err(),
            Some(ParseFenError::InvalidEpSquare)
        );
    }

    #[test]
    fn test_illegal_positions() {
        for fen in [
            "8/8/8/8/8/8/8/4K3 w - - 0 1",
            "4k3/8/8/8/8/8/8/3KK3 w - - 0 1",
            "4k3/4R3/8/8/8/8/8/4K3 w - - 0 1",
        ] {
            assert_eq!(
                Position::from_fen(Variant::Standard, fen).err(),
                Some(ParseFenError::IllegalPosition),
                "{fen}"
            );
        }
        assert!(Position::from_fen(Variant::ThreeKings, "4k3/8/8/8/8/8/8/3KK3 w - - 0 1").is_ok());
        assert_eq!(
            Position::from_fen(Variant::ThreeKings, "8/8/8/8/8/8/8/3KK3 w - - 0 1").err(),
            Some(ParseFenError::IllegalPosition)
        );
        assert_eq!(
            Position::from_fen(Variant::ThreeKings, "kkkk4/8/8/8/8/8/8/K7 w - - 0 1").err(),
            Some(ParseFenError::IllegalPosition)
        );
        assert!(Position::from_fen(Variant::Antichess, "8/8/8/8/8/8/8/1NN5 w - - 0 1").is_ok());
    }

    #[test]
    fn test_check_counters() {
        roundtrip(Variant::ThreeCheck, "4k3/8/8/8/8/8/8/4K2R w - - 1+3 0 1");
        let pos = Position::from_fen(Variant::ThreeCheck, "4k3/8/8/8/8/8/8/4K2R w - - 0 1 +1+2")
            .expect("valid fen");
        assert_eq!(pos.remaining_checks(Color::White), 2);
        assert_eq!(pos.remaining_checks(Color::Black), 1);
        assert_eq!(pos.to_fen(), "4k3/8/8/8/8/8/8/4K2R w - - 2+1 0 1");

        // A check on the board without counters has been given already.
        let pos = Position::from_fen(Variant::FiveCheck, "4k2R/8/8/8/8/8/8/4K3 b - - 0 1")
            .expect("valid fen");
        assert_eq!(pos.remaining_checks(Color::White), 4);
        assert_eq!(pos.to_epd(), "4k2R/8/8/8/8/8/8/4K3 b - - 4+5");

        assert_eq!(
            Position::from_fen(Variant::ThreeCheck, "4k3/8/8/8/8/8/8/4K2R w - - x+3 0 1").err(),
            Some(ParseFenError::InvalidRemainingChecks)
        );
    }

    #[test]
    fn test_makruk_counting_fields() {
        let fen = "8/8/2m5/s7/8/1k6/1s6/1K6 w - 44 38 182";
        roundtrip(Variant::Makruk, fen);
        let pos = Position::from_fen(Variant::Makruk, fen).expect("valid fen");
        assert_eq!(pos.counting().limit, 44);
        assert_eq!(pos.counting().plies, 38);
        assert!(pos.counting().pieces_honour);
        assert_eq!(pos.halfmoves(), 0);

        let pos = Position::from_fen(Variant::Makruk, "4k3/8/8/8/8/8/8/R3K3 w - - 3 20")
            .expect("valid fen");
        assert_eq!(pos.to_fen(), "4k3/8/8/8/8/8/8/R3K3 w - 0 0 20");
    }

    #[test]
    fn test_field_errors() {
        assert_eq!(
            Position::from_fen(Variant::Standard, "4k3/8/8/8/8/8/8/4K3 x - - 0 1").err(),
            Some(ParseFenError::InvalidTurn)
        );
        assert_eq!(
            Position::from_fen(Variant::Standard, "4k3/8/8/8/8/8/8/4K3 w - - x 1").err(),
            Some(ParseFenError::InvalidHalfmoveClock)
        );
        assert_eq!(
            Position::from_fen(Variant::Standard, "4k3/8/8/8/8/8/8/4K3 w - - 0 -1").err(),
            Some(ParseFenError::InvalidFullmoves)
        );
        assert_eq!(
            Position::from_fen(Variant::Standard, "4k3/8/8/8/8/8/8/4X3 w - - 0 1").err(),
            Some(ParseFenError::InvalidBoard)
        );
    }
}
