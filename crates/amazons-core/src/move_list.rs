//! Legal move generation.
//!
//! A ply in Amazons is a compound action: slide a queen, then fire an arrow
//! from the landing square. Generation enumerates the full cross product of
//! destinations and arrow squares without mutating the board.

use std::fmt;
use std::str::FromStr;

use arrayvec::ArrayVec;

use crate::board::Board;
use crate::constants::MAX_MOVES;
use crate::side::Side;
use crate::square::{Direction, Square, SquareError};

/// One complete ply: relocate a queen and shoot an arrow.
///
/// Fields that are not determined yet hold `Square::None`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Move {
    /// Square the queen starts on.
    pub start: Square,
    /// Square the queen lands on.
    pub target: Square,
    /// Square the arrow blocks.
    pub shoot: Square,
}

impl Move {
    #[inline]
    pub fn new(start: Square, target: Square, shoot: Square) -> Move {
        Move {
            start,
            target,
            shoot,
        }
    }

    /// Whether every field of the move is determined.
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.start != Square::None && self.target != Square::None && self.shoot != Square::None
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}/{}", self.start, self.target, self.shoot)
    }
}

impl FromStr for Move {
    type Err = SquareError;

    /// Parses `a6-d6/d3`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (start, rest) = s.trim().split_once('-').ok_or(SquareError::InvalidFormat)?;
        let (target, shoot) = rest.split_once('/').ok_or(SquareError::InvalidFormat)?;
        Ok(Move::new(start.parse()?, target.parse()?, shoot.parse()?))
    }
}

/// Container for all legal moves of one side.
#[derive(Clone, Debug, Default)]
pub struct MoveList {
    moves: ArrayVec<Move, MAX_MOVES>,
}

impl MoveList {
    /// Generates all legal moves for `side`.
    ///
    /// Unless `include_enclosed` is set, pieces whose region no longer
    /// touches the opponent are skipped; their play is left to the endgame
    /// solver.
    ///
    /// # Arguments
    ///
    /// * `board` - Position to generate moves for
    /// * `side` - Side to move
    /// * `include_enclosed` - Whether enclosed pieces contribute moves
    pub fn new(board: &Board, side: Side, include_enclosed: bool) -> MoveList {
        let mut list = MoveList {
            moves: ArrayVec::new(),
        };
        for sq in board.pieces(side) {
            if !include_enclosed && board.piece_range(sq).in_closed_region() {
                continue;
            }
            list.push_piece_moves(board, sq);
        }
        list
    }

    /// Generates the moves of the single piece on `start`.
    ///
    /// Enclosed pieces are never skipped here.
    pub fn for_piece(board: &Board, start: Square) -> MoveList {
        let mut list = MoveList {
            moves: ArrayVec::new(),
        };
        if board.get(start).side().is_some() {
            list.push_piece_moves(board, start);
        }
        list
    }

    fn push_piece_moves(&mut self, board: &Board, start: Square) {
        let range = board.range_from(start);
        for dir in Direction::ALL {
            for step in 1..=range.get(dir) as i32 {
                let Some(target) = start.offset(dir, step) else {
                    break;
                };
                let shoot_range = board.range_from_ignoring(target, start);
                for shoot_dir in Direction::ALL {
                    for shoot_step in 1..=shoot_range.get(shoot_dir) as i32 {
                        let Some(shoot) = target.offset(shoot_dir, shoot_step) else {
                            break;
                        };
                        debug_assert!(self.moves.len() < self.moves.capacity());
                        self.moves.push(Move::new(start, target, shoot));
                    }
                }
            }
        }
    }

    /// Returns the number of moves.
    #[inline]
    pub fn count(&self) -> usize {
        self.moves.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// Returns the first move in generation order.
    #[inline]
    pub fn first(&self) -> Option<&Move> {
        self.moves.first()
    }

    #[inline]
    pub fn contains(&self, mv: &Move) -> bool {
        self.moves.contains(mv)
    }

    /// Returns an iterator over the moves in generation order.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Move> {
        self.moves.iter()
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.moves.iter()
    }
}
