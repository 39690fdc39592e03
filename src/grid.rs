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

//! Board geometry.
//!
//! Cells are stored in one flat buffer that surrounds the playing area with
//! sentinel walls: one column on the left and right, two rows above and
//! below, and one extra cell at each end of the buffer. Adding any king,
//! knight or alfil offset to an on-board index yields another index inside
//! the buffer, so move loops never need bounds checks. Walls fail every
//! occupancy test.
//!
//! ```text
//!   # # # # # # # # # #      row 0
//!   # # # # # # # # # #      row 1
//!   # r n b q k b n r #      rank 8
//!   # . . . . . . . . #
//!   ...
//!   # R N B Q K B N R #      rank 1
//!   # # # # # # # # # #
//!   # # # # # # # # # #      row height + 3
//! ```

use crate::{
    color::Color,
    square::{Square, MAX_SIDE},
    types::Piece,
    variant::ConfigurationError,
};

/// Content of one cell of the padded buffer.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum Cell {
    /// Off-board sentinel.
    Wall,
    Empty,
    Piece(Piece),
}

impl Cell {
    #[inline]
    pub const fn is_wall(self) -> bool {
        matches!(self, Cell::Wall)
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        matches!(self, Cell::Empty)
    }

    #[inline]
    pub const fn piece(self) -> Option<Piece> {
        match self {
            Cell::Piece(piece) => Some(piece),
            Cell::Wall | Cell::Empty => None,
        }
    }

    /// Tests if the cell holds a piece of the given color.
    #[inline]
    pub fn is_color(self, color: Color) -> bool {
        matches!(self, Cell::Piece(piece) if piece.color == color)
    }
}

const PAD_FILES: usize = 1;
const PAD_RANKS: usize = 2;
const PAD_ENDS: usize = 1;

/// Dimensions and index arithmetic of a rectangular board.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub struct SquareGrid {
    width: u8,
    height: u8,
}

impl SquareGrid {
    /// Creates a grid with the given number of files and ranks.
    ///
    /// # Errors
    ///
    /// Both dimensions must be between 1 and 16.
    pub fn new(width: u8, height: u8) -> Result<SquareGrid, ConfigurationError> {
        if (1..=MAX_SIDE).contains(&width) && (1..=MAX_SIDE).contains(&height) {
            Ok(SquareGrid { width, height })
        } else {
            Err(ConfigurationError::BoardSize { width, height })
        }
    }

    #[inline]
    pub const fn width(self) -> u8 {
        self.width
    }

    #[inline]
    pub const fn height(self) -> u8 {
        self.height
    }

    /// Distance between vertically adjacent cells.
    #[inline]
    pub const fn stride(self) -> usize {
        self.width as usize + 2 * PAD_FILES
    }

    /// Number of cells in the padded buffer.
    #[inline]
    pub const fn len(self) -> usize {
        self.stride() * (self.height as usize + 2 * PAD_RANKS) + 2 * PAD_ENDS
    }

    #[inline]
    pub fn contains(self, sq: Square) -> bool {
        sq.file() < self.width && sq.rank() < self.height
    }

    /// Tests if `index` is outside the board. Indices beyond the buffer
    /// count as walls.
    #[inline]
    pub fn is_wall(self, cells: &[Cell], index: usize) -> bool {
        cells.get(index).is_none_or(|cell| cell.is_wall())
    }

    /// Flat index of a square. The square must be on the board.
    #[inline]
    pub fn index(self, sq: Square) -> usize {
        debug_assert!(self.contains(sq));
        PAD_ENDS
            + (usize::from(self.height - 1 - sq.rank()) + PAD_RANKS) * self.stride()
            + PAD_FILES
            + usize::from(sq.file())
    }

    /// Square of an on-board index, or `None` for walls and indices beyond
    /// the buffer.
    pub fn square(self, index: usize) -> Option<Square> {
        let index = index.checked_sub(PAD_ENDS)?;
        let row = index / self.stride();
        let col = index % self.stride();
        if col < PAD_FILES
            || col >= PAD_FILES + usize::from(self.width)
            || row < PAD_RANKS
            || row >= PAD_RANKS + usize::from(self.height)
        {
            return None;
        }
        Some(Square::new(
            (col - PAD_FILES) as u8,
            self.height - 1 - (row - PAD_RANKS) as u8,
        ))
    }

    /// Square of an index known to be on the board.
    #[inline]
    pub(crate) fn square_unchecked(self, index: usize) -> Square {
        let index = index - PAD_ENDS;
        let row = index / self.stride() - PAD_RANKS;
        let col = index % self.stride() - PAD_FILES;
        Square::new(col as u8, self.height - 1 - row as u8)
    }

    /// All squares, rank by rank starting at the first file of the first
    /// rank.
    pub fn squares(self) -> impl Iterator<Item = Square> {
        (0..self.height).flat_map(move |rank| (0..self.width).map(move |file| Square::new(file, rank)))
    }

    /// Fresh buffer with walls around an empty board.
    pub fn empty_cells(self) -> Box<[Cell]> {
        (0..self.len())
            .map(|index| match self.square(index) {
                Some(_) => Cell::Empty,
                None => Cell::Wall,
            })
            .collect()
    }

    /// Offset of one step towards the opponent of `color`.
    #[inline]
    pub fn forward(self, color: Color) -> isize {
        let stride = self.stride() as isize;
        color.fold(-stride, stride)
    }

    /// Offset for a step of `df` files and `dr` ranks, seen from White.
    #[inline]
    pub fn offset(self, df: isize, dr: isize) -> isize {
        df - dr * self.stride() as isize
    }

    pub fn orthogonal(self) -> [isize; 4] {
        [
            self.offset(0, 1),
            self.offset(1, 0),
            self.offset(0, -1),
            self.offset(-1, 0),
        ]
    }

    pub fn diagonal(self) -> [isize; 4] {
        [
            self.offset(1, 1),
            self.offset(1, -1),
            self.offset(-1, -1),
            self.offset(-1, 1),
        ]
    }

    pub fn knight(self) -> [isize; 8] {
        [
            self.offset(1, 2),
            self.offset(2, 1),
            self.offset(2, -1),
            self.offset(1, -2),
            self.offset(-1, -2),
            self.offset(-2, -1),
            self.offset(-2, 1),
            self.offset(-1, 2),
        ]
    }

    pub fn alfil(self) -> [isize; 4] {
        self.diagonal().map(|d| 2 * d)
    }

    pub fn king(self) -> [isize; 8] {
        let [n, e, s, w] = self.orthogonal();
        let [ne, se, sw, nw] = self.diagonal();
        [n, ne, e, se, s, sw, w, nw]
    }

    /// Knight leaps paired with the orthogonally adjacent square that must
    /// be empty for a Xiangqi horse (the leg).
    pub fn horse(self) -> [(isize, isize); 8] {
        let [n, e, s, w] = self.orthogonal();
        [
            (n, self.offset(-1, 2)),
            (n, self.offset(1, 2)),
            (e, self.offset(2, 1)),
            (e, self.offset(2, -1)),
            (s, self.offset(1, -2)),
            (s, self.offset(-1, -2)),
            (w, self.offset(-2, -1)),
            (w, self.offset(-2, 1)),
        ]
    }
}

/// Applies an offset to a flat index.
#[inline]
pub(crate) fn step(index: usize, offset: isize) -> usize {
    index.wrapping_add_signed(offset)
}
