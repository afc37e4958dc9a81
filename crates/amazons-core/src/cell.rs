use crate::side::Side;

/// Content of a single board square.
///
/// The numeric codes (`Empty = 0`, `Block = 1`, `White = 2`, `Black = 3`)
/// are the ones used by persisted boards and by [`crate::board::BoardKey`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Empty,
    /// A square hit by an arrow. Blocks are permanent.
    Block,
    /// A queen owned by one of the sides.
    Piece(Side),
}

impl Cell {
    /// Returns the persisted code of this cell.
    #[inline]
    pub fn code(self) -> u8 {
        match self {
            Cell::Empty => 0,
            Cell::Block => 1,
            Cell::Piece(Side::White) => 2,
            Cell::Piece(Side::Black) => 3,
        }
    }

    /// Decodes a persisted cell code.
    ///
    /// # Returns
    ///
    /// `None` for codes outside `0..=3`.
    #[inline]
    pub fn from_code(code: u8) -> Option<Cell> {
        match code {
            0 => Some(Cell::Empty),
            1 => Some(Cell::Block),
            2 => Some(Cell::Piece(Side::White)),
            3 => Some(Cell::Piece(Side::Black)),
            _ => None,
        }
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }

    /// Returns the owner if this cell holds a piece.
    #[inline]
    pub fn side(self) -> Option<Side> {
        match self {
            Cell::Piece(side) => Some(side),
            _ => None,
        }
    }

    /// Converts the cell to its board text character.
    ///
    /// # Returns
    ///
    /// * `'-'` for `Cell::Empty`
    /// * `'#'` for `Cell::Block`
    /// * `'W'` / `'B'` for pieces
    pub fn to_char(self) -> char {
        match self {
            Cell::Empty => '-',
            Cell::Block => '#',
            Cell::Piece(side) => side.to_char(),
        }
    }

    /// Parses a board text character.
    pub fn from_char(c: char) -> Option<Cell> {
        match c {
            '-' => Some(Cell::Empty),
            '#' => Some(Cell::Block),
            'W' => Some(Cell::Piece(Side::White)),
            'B' => Some(Cell::Piece(Side::Black)),
            _ => None,
        }
    }
}
