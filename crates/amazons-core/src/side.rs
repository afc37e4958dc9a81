use std::fmt;

/// One of the two players. White moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    White,
    Black,
}

impl Side {
    /// Returns the opposite side.
    #[inline]
    pub fn opposite(self) -> Side {
        match self {
            Side::White => Side::Black,
            Side::Black => Side::White,
        }
    }

    /// Converts the side to the character used by the board text form.
    ///
    /// # Returns
    ///
    /// * `'W'` for `Side::White`
    /// * `'B'` for `Side::Black`
    pub fn to_char(self) -> char {
        match self {
            Side::White => 'W',
            Side::Black => 'B',
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::White => write!(f, "White"),
            Side::Black => write!(f, "Black"),
        }
    }
}

/// Outcome of a finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Winner {
    White,
    Black,
    Tie,
}

impl From<Side> for Winner {
    fn from(side: Side) -> Self {
        match side {
            Side::White => Winner::White,
            Side::Black => Winner::Black,
        }
    }
}

impl fmt::Display for Winner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Winner::White => write!(f, "White wins"),
            Winner::Black => write!(f, "Black wins"),
            Winner::Tie => write!(f, "Tie"),
        }
    }
}
