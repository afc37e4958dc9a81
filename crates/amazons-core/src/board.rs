//! Amazons board representation.

use std::fmt;

use crate::cell::Cell;
use crate::constants::BOARD_SQUARES;
use crate::side::Side;
use crate::square::{BOARD_SIZE, Direction, Square};

/// Exact 64-byte snapshot of a board, one cell code per square.
///
/// Used as the key of visited-position sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoardKey(pub [u8; BOARD_SQUARES]);

/// Represents an 8x8 Amazons board.
///
/// The board is nothing but the grid of cells. Whose turn it is lives in
/// [`crate::game_state::GameState`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [Cell; BOARD_SQUARES],
}

impl Default for Board {
    /// Creates a board with the standard starting layout.
    ///
    /// - Black queens on C1, F1, A3 and H3
    /// - White queens on A6, H6, C8 and F8
    fn default() -> Self {
        let mut board = Board::empty();
        for sq in [Square::C1, Square::F1, Square::A3, Square::H3] {
            board.set(sq, Cell::Piece(Side::Black));
        }
        for sq in [Square::A6, Square::H6, Square::C8, Square::F8] {
            board.set(sq, Cell::Piece(Side::White));
        }
        board
    }
}

impl Board {
    /// Creates a new `Board` with the starting layout.
    pub fn new() -> Board {
        Default::default()
    }

    /// Creates a board with no pieces and no blocks.
    pub fn empty() -> Board {
        Board {
            cells: [Cell::Empty; BOARD_SQUARES],
        }
    }

    /// Creates a `Board` from its 64-character text form.
    ///
    /// Squares are listed row by row from A1 to H8. Whitespace is ignored so
    /// the string may be split into lines. Characters are interpreted as:
    /// - `-` empty square
    /// - `#` block
    /// - `W` / `B` white / black queen
    ///
    /// # Returns
    /// `None` if the string has the wrong length or an unknown character.
    pub fn from_string(board_string: &str) -> Option<Board> {
        let mut board = Board::empty();
        let mut count = 0;
        for c in board_string.chars().filter(|c| !c.is_whitespace()) {
            if count == BOARD_SQUARES {
                return None;
            }
            board.cells[count] = Cell::from_char(c)?;
            count += 1;
        }
        (count == BOARD_SQUARES).then_some(board)
    }

    /// Creates a board from rows of persisted cell codes.
    ///
    /// # Returns
    /// `None` if a code is outside `0..=3`.
    pub fn from_codes(rows: &[[u8; BOARD_SIZE]; BOARD_SIZE]) -> Option<Board> {
        let mut board = Board::empty();
        for (row, codes) in rows.iter().enumerate() {
            for (col, &code) in codes.iter().enumerate() {
                board.cells[row * BOARD_SIZE + col] = Cell::from_code(code)?;
            }
        }
        Some(board)
    }

    /// Returns the board as rows of persisted cell codes.
    pub fn to_codes(&self) -> [[u8; BOARD_SIZE]; BOARD_SIZE] {
        let mut rows = [[0; BOARD_SIZE]; BOARD_SIZE];
        for sq in Square::iter() {
            rows[sq.row()][sq.col()] = self.get(sq).code();
        }
        rows
    }

    /// Returns the cell at `sq`.
    #[inline(always)]
    pub fn get(&self, sq: Square) -> Cell {
        self.cells[sq.index()]
    }

    /// Overwrites the cell at `sq`.
    #[inline(always)]
    pub fn set(&mut self, sq: Square, cell: Cell) {
        self.cells[sq.index()] = cell;
    }

    #[inline(always)]
    pub fn is_empty(&self, sq: Square) -> bool {
        self.get(sq).is_empty()
    }

    /// Returns the squares holding pieces of `side` in row-major order.
    pub fn pieces(&self, side: Side) -> impl Iterator<Item = Square> + '_ {
        Square::iter().filter(move |&sq| self.get(sq) == Cell::Piece(side))
    }

    /// Counts the cells equal to `cell`.
    pub fn count(&self, cell: Cell) -> usize {
        self.cells.iter().filter(|&&c| c == cell).count()
    }

    /// Returns the exact byte snapshot of this board.
    #[inline]
    pub fn key(&self) -> BoardKey {
        let mut bytes = [0; BOARD_SQUARES];
        for (byte, cell) in bytes.iter_mut().zip(self.cells.iter()) {
            *byte = cell.code();
        }
        BoardKey(bytes)
    }

    /// Checks whether a queen standing on `from` could reach `to`.
    ///
    /// The line must be straight or diagonal and every square after `from`
    /// up to and including `to` must be empty. `ignored` is treated as empty,
    /// which lets the arrow fly over the square the queen just left.
    pub fn is_path_clear(&self, from: Square, to: Square, ignored: Square) -> bool {
        let Some((dir, distance)) = Direction::between(from, to) else {
            return false;
        };
        (1..=distance).all(|step| {
            from.offset(dir, step)
                .is_some_and(|sq| sq == ignored || self.is_empty(sq))
        })
    }

    /// Checks whether any of the eight neighbours of `sq` is empty.
    ///
    /// This one-step test is all the termination scan needs: a queen with an
    /// empty neighbour can always move there and shoot back at its origin.
    #[inline]
    pub fn can_move(&self, sq: Square) -> bool {
        Direction::ALL
            .into_iter()
            .any(|dir| sq.offset(dir, 1).is_some_and(|n| self.is_empty(n)))
    }

    /// Checks whether at least one piece of `side` has an empty neighbour.
    pub fn has_mobile_piece(&self, side: Side) -> bool {
        self.pieces(side).any(|sq| self.can_move(sq))
    }

    /// Rotates the board 180 degrees.
    pub fn rotate_180(&self) -> Board {
        let mut rotated = Board::empty();
        for sq in Square::iter() {
            rotated.set(sq.rotate_180(), self.get(sq));
        }
        rotated
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..BOARD_SIZE {
            for col in 0..BOARD_SIZE {
                let sq = Square::from_usize_unchecked(row * BOARD_SIZE + col);
                write!(f, "{}", self.get(sq).to_char())?;
            }
            if row + 1 < BOARD_SIZE {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}
