use std::fmt;
use std::str::FromStr;

/// Represents a square on the 8x8 Amazons board, ranging from A1 to H8.
///
/// Squares are addressed by `(row, col)`. The column maps to the file letter
/// and the row to the rank number, so row 0 is rank 1:
///
/// ```text
///        A  B  C  D  E  F  G  H
/// row 0 00 01 02 03 04 05 06 07
/// row 1 08 09 10 11 12 13 14 15
/// row 2 16 17 18 19 20 21 22 23
/// row 3 24 25 26 27 28 29 30 31
/// row 4 32 33 34 35 36 37 38 39
/// row 5 40 41 42 43 44 45 46 47
/// row 6 48 49 50 51 52 53 54 55
/// row 7 56 57 58 59 60 61 62 63
/// ```
///
/// The extra `None` variant stands for a field of a move that has not been
/// determined yet.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
#[rustfmt::skip]
pub enum Square {
    A1, B1, C1, D1, E1, F1, G1, H1,
    A2, B2, C2, D2, E2, F2, G2, H2,
    A3, B3, C3, D3, E3, F3, G3, H3,
    A4, B4, C4, D4, E4, F4, G4, H4,
    A5, B5, C5, D5, E5, F5, G5, H5,
    A6, B6, C6, D6, E6, F6, G6, H6,
    A7, B7, C7, D7, E7, F7, G7, H7,
    A8, B8, C8, D8, E8, F8, G8, H8,
    None,
}

/// Constants for board dimensions
pub const BOARD_SIZE: usize = 8;
pub const TOTAL_SQUARES: usize = BOARD_SIZE * BOARD_SIZE;

impl Square {
    /// Converts the `Square` into a `usize` index.
    ///
    /// # Returns
    ///
    /// `row * 8 + col` for board squares, 64 for `Square::None`.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Converts a `usize` value into a `Square` enum without bounds checking.
    ///
    /// # Panics
    ///
    /// Panics in debug mode if `index` > 64.
    #[inline]
    pub fn from_usize_unchecked(index: usize) -> Square {
        debug_assert!(
            index <= 64,
            "Index out of bounds for Square enum. index: {index:?}"
        );
        unsafe { std::mem::transmute(index as u8) }
    }

    /// Creates a square from signed row/column coordinates.
    ///
    /// # Returns
    ///
    /// `Some(Square)` when both coordinates lie in `0..8`, `None` otherwise.
    #[inline]
    pub fn from_coords(row: i32, col: i32) -> Option<Square> {
        if (0..BOARD_SIZE as i32).contains(&row) && (0..BOARD_SIZE as i32).contains(&col) {
            Some(Square::from_usize_unchecked(
                row as usize * BOARD_SIZE + col as usize,
            ))
        } else {
            None
        }
    }

    /// Returns the row of this square (0-7, row 0 is rank 1).
    ///
    /// # Panics
    ///
    /// Panics if called on `Square::None`.
    #[inline]
    pub fn row(self) -> usize {
        assert!(self != Square::None, "Square::row called on Square::None");
        self.index() / BOARD_SIZE
    }

    /// Returns the column of this square (0-7, column 0 is file A).
    ///
    /// # Panics
    ///
    /// Panics if called on `Square::None`.
    #[inline]
    pub fn col(self) -> usize {
        assert!(self != Square::None, "Square::col called on Square::None");
        self.index() % BOARD_SIZE
    }

    /// Returns `(row, col)` as signed integers, `(-1, -1)` for `Square::None`.
    ///
    /// This is the encoding used by persisted move history.
    #[inline]
    pub fn coords(self) -> (i32, i32) {
        if self == Square::None {
            (-1, -1)
        } else {
            (self.row() as i32, self.col() as i32)
        }
    }

    /// Returns the square `steps` squares away in direction `dir`.
    ///
    /// # Returns
    ///
    /// `None` if the walk leaves the board or `self` is `Square::None`.
    #[inline]
    pub fn offset(self, dir: Direction, steps: i32) -> Option<Square> {
        if self == Square::None {
            return None;
        }
        let (dr, dc) = dir.delta();
        Square::from_coords(
            self.row() as i32 + dr * steps,
            self.col() as i32 + dc * steps,
        )
    }

    /// Returns the square reached by rotating the board 180 degrees.
    #[inline]
    pub fn rotate_180(self) -> Square {
        if self == Square::None {
            return Square::None;
        }
        Square::from_usize_unchecked(TOTAL_SQUARES - 1 - self.index())
    }

    /// Returns an iterator over all 64 valid squares in row-major order.
    #[inline]
    pub fn iter() -> impl Iterator<Item = Square> {
        (0..TOTAL_SQUARES).map(Square::from_usize_unchecked)
    }
}

// We want Square::None as the default value, not the first variant (A1)
// which would be chosen by #[derive(Default)]
#[allow(clippy::derivable_impls)]
impl Default for Square {
    fn default() -> Self {
        Square::None
    }
}

/// One of the eight queen-move directions.
///
/// The discriminant order (N, NE, E, SE, S, SW, W, NW) is the order in which
/// move generation walks directions. North decreases the row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Direction {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl Direction {
    /// All directions in generation order.
    pub const ALL: [Direction; 8] = [
        Direction::North,
        Direction::NorthEast,
        Direction::East,
        Direction::SouthEast,
        Direction::South,
        Direction::SouthWest,
        Direction::West,
        Direction::NorthWest,
    ];

    /// Returns the `(row, col)` step of this direction.
    #[inline]
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Direction::North => (-1, 0),
            Direction::NorthEast => (-1, 1),
            Direction::East => (0, 1),
            Direction::SouthEast => (1, 1),
            Direction::South => (1, 0),
            Direction::SouthWest => (1, -1),
            Direction::West => (0, -1),
            Direction::NorthWest => (-1, -1),
        }
    }

    /// Returns the direction pointing the other way.
    #[inline]
    pub const fn opposite(self) -> Direction {
        Direction::ALL[(self as usize + 4) % 8]
    }

    /// Returns the direction leading from `from` to `to` along a queen line.
    ///
    /// # Returns
    ///
    /// `Some((direction, distance))` if `to` lies on a straight or diagonal
    /// line from `from` at distance >= 1, `None` otherwise.
    pub fn between(from: Square, to: Square) -> Option<(Direction, i32)> {
        if from == Square::None || to == Square::None {
            return None;
        }
        let dr = to.row() as i32 - from.row() as i32;
        let dc = to.col() as i32 - from.col() as i32;
        if dr == 0 && dc == 0 {
            return None;
        }
        if dr != 0 && dc != 0 && dr.abs() != dc.abs() {
            return None;
        }
        let step = (dr.signum(), dc.signum());
        let dir = Direction::ALL.into_iter().find(|d| d.delta() == step)?;
        Some((dir, dr.abs().max(dc.abs())))
    }
}

/// Error type for square-related operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SquareError {
    /// Invalid square string format (must be 2 characters)
    InvalidFormat,
    /// Invalid file character (must be a-h or A-H)
    InvalidFile(char),
    /// Invalid rank character (must be 1-8)
    InvalidRank(char),
}

impl fmt::Display for SquareError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SquareError::InvalidFormat => write!(
                f,
                "Invalid square format: must be 2 characters (e.g., 'a1')"
            ),
            SquareError::InvalidFile(c) => write!(f, "Invalid file '{c}': must be a-h or A-H"),
            SquareError::InvalidRank(c) => write!(f, "Invalid rank '{c}': must be 1-8"),
        }
    }
}

impl std::error::Error for SquareError {}

impl FromStr for Square {
    type Err = SquareError;

    /// Parses a string in algebraic notation (e.g., "a1", "h8").
    ///
    /// Both uppercase and lowercase letters are accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let chars: Vec<char> = s.chars().collect();
        if chars.len() != 2 {
            return Err(SquareError::InvalidFormat);
        }

        let file_char = chars[0].to_ascii_lowercase();
        let rank_char = chars[1];

        if !('a'..='h').contains(&file_char) {
            return Err(SquareError::InvalidFile(chars[0]));
        }

        if !('1'..='8').contains(&rank_char) {
            return Err(SquareError::InvalidRank(rank_char));
        }

        let col = file_char as u8 - b'a';
        let row = rank_char as u8 - b'1';
        Ok(Square::from_usize_unchecked(
            row as usize * BOARD_SIZE + col as usize,
        ))
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if *self == Square::None {
            return write!(f, "None");
        }

        let file = self.col() as u8 + b'a';
        let rank = self.row() as u8 + b'1';

        write!(f, "{}{}", file as char, rank as char)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_usize() {
        assert_eq!(Square::from_usize_unchecked(0), Square::A1);
        assert_eq!(Square::from_usize_unchecked(7), Square::H1);
        assert_eq!(Square::from_usize_unchecked(8), Square::A2);
        assert_eq!(Square::from_usize_unchecked(63), Square::H8);
        assert_eq!(Square::from_usize_unchecked(64), Square::None);
    }

    #[test]
    fn test_coords() {
        assert_eq!(Square::from_coords(5, 0), Some(Square::A6));
        assert_eq!(Square::from_coords(5, 3), Some(Square::D6));
        assert_eq!(Square::from_coords(2, 3), Some(Square::D3));
        assert_eq!(Square::from_coords(-1, 0), None);
        assert_eq!(Square::from_coords(0, 8), None);
        assert_eq!(Square::D6.row(), 5);
        assert_eq!(Square::D6.col(), 3);
        assert_eq!(Square::D6.coords(), (5, 3));
        assert_eq!(Square::None.coords(), (-1, -1));
    }

    #[test]
    fn test_offset() {
        assert_eq!(Square::D4.offset(Direction::North, 1), Some(Square::D3));
        assert_eq!(Square::D4.offset(Direction::SouthEast, 2), Some(Square::F6));
        assert_eq!(Square::A1.offset(Direction::West, 1), None);
        assert_eq!(Square::H8.offset(Direction::SouthEast, 1), None);
        assert_eq!(Square::None.offset(Direction::East, 1), None);
    }

    #[test]
    fn test_direction_between() {
        assert_eq!(
            Direction::between(Square::A6, Square::D6),
            Some((Direction::East, 3))
        );
        assert_eq!(
            Direction::between(Square::D6, Square::D3),
            Some((Direction::North, 3))
        );
        assert_eq!(
            Direction::between(Square::C3, Square::A1),
            Some((Direction::NorthWest, 2))
        );
        assert_eq!(Direction::between(Square::A1, Square::B3), None);
        assert_eq!(Direction::between(Square::A1, Square::A1), None);
    }

    #[test]
    fn test_direction_opposite() {
        for dir in Direction::ALL {
            let (dr, dc) = dir.delta();
            assert_eq!(dir.opposite().delta(), (-dr, -dc));
        }
    }

    #[test]
    fn test_rotate_180() {
        assert_eq!(Square::A1.rotate_180(), Square::H8);
        assert_eq!(Square::C6.rotate_180(), Square::F3);
        assert_eq!(Square::None.rotate_180(), Square::None);
    }

    #[test]
    fn test_square_from_str() {
        assert_eq!(Square::from_str("a1").unwrap(), Square::A1);
        assert_eq!(Square::from_str("H8").unwrap(), Square::H8);
        assert_eq!(Square::from_str("d6").unwrap(), Square::D6);
        assert!(Square::from_str("i1").is_err());
        assert!(Square::from_str("a9").is_err());
        assert!(Square::from_str("").is_err());

        match Square::from_str("abc").unwrap_err() {
            SquareError::InvalidFormat => (),
            _ => panic!("Expected InvalidFormat error"),
        }
        match Square::from_str("z1").unwrap_err() {
            SquareError::InvalidFile('z') => (),
            _ => panic!("Expected InvalidFile error"),
        }
        match Square::from_str("a0").unwrap_err() {
            SquareError::InvalidRank('0') => (),
            _ => panic!("Expected InvalidRank error"),
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(Square::A6.to_string(), "a6");
        assert_eq!(Square::H1.to_string(), "h1");
        assert_eq!(Square::None.to_string(), "None");
    }
}
