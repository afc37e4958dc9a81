//! Directional reach and territory analysis.
//!
//! A queen's options are fully described by how far it can slide in each of
//! the eight directions. Closed positions additionally need the size of the
//! region a piece owns, which is found with a flood fill over a caller-owned
//! working copy of the board.

use crate::board::Board;
use crate::cell::Cell;
use crate::side::Side;
use crate::square::{Direction, Square};

/// Per-square directional reach.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveRange {
    /// Empty squares reachable in each direction, indexed by `Direction as usize`.
    pub reach: [u8; 8],
    /// Size of the enclosed region the piece sits in, or -1 if the region
    /// touches an enemy piece or was not analysed.
    pub territory_area: i32,
}

impl Default for MoveRange {
    fn default() -> Self {
        MoveRange {
            reach: [0; 8],
            territory_area: -1,
        }
    }
}

impl MoveRange {
    /// Returns the reach in direction `dir`.
    #[inline]
    pub fn get(&self, dir: Direction) -> u8 {
        self.reach[dir as usize]
    }

    /// Total number of destinations over all directions.
    #[inline]
    pub fn total_moves(&self) -> u32 {
        self.reach.iter().map(|&n| n as u32).sum()
    }

    #[inline]
    pub fn can_move(&self) -> bool {
        self.total_moves() > 0
    }

    /// Whether the region around the piece is closed to the opponent.
    #[inline]
    pub fn in_closed_region(&self) -> bool {
        self.territory_area >= 0
    }
}

impl Board {
    /// Computes how far a queen on `sq` could slide in each direction.
    ///
    /// The territory field is left at -1.
    pub fn range_from(&self, sq: Square) -> MoveRange {
        self.reach_with(sq, Square::None)
    }

    /// Same as [`Board::range_from`] but treats `ignored` as empty.
    ///
    /// This answers "where could the arrow fly after the queen left
    /// `ignored` and landed on `sq`" without touching the board.
    pub fn range_from_ignoring(&self, sq: Square, ignored: Square) -> MoveRange {
        self.reach_with(sq, ignored)
    }

    /// Computes the range of the piece on `sq` including its territory.
    ///
    /// Squares that do not hold a piece get a plain range.
    pub fn piece_range(&self, sq: Square) -> MoveRange {
        let mut range = self.range_from(sq);
        if let Some(side) = self.get(sq).side() {
            range.territory_area = self.territory_area(sq, side);
        }
        range
    }

    /// Measures the closed region around `sq` for `side` on a private copy.
    pub fn territory_area(&self, sq: Square, side: Side) -> i32 {
        let mut work = *self;
        territory_area(&mut work, sq, side)
    }

    fn reach_with(&self, sq: Square, ignored: Square) -> MoveRange {
        let mut range = MoveRange::default();
        if sq == Square::None {
            return range;
        }
        for dir in Direction::ALL {
            let mut n = 0;
            while let Some(next) = sq.offset(dir, n + 1) {
                if next != ignored && !self.is_empty(next) {
                    break;
                }
                n += 1;
            }
            range.reach[dir as usize] = n as u8;
        }
        range
    }
}

/// Flood-fills the region around `sq` on the working board `work`.
///
/// Empty squares count 1, pieces of `side` count 0 and are filled through,
/// blocks stop the fill. Reaching any enemy piece aborts with -1. Visited
/// squares are overwritten with blocks, so `work` must be a copy the caller
/// is prepared to discard.
pub fn territory_area(work: &mut Board, sq: Square, side: Side) -> i32 {
    let mut area = match work.get(sq) {
        Cell::Piece(owner) if owner != side => return -1,
        Cell::Block => return 0,
        Cell::Empty => 1,
        Cell::Piece(_) => 0,
    };
    work.set(sq, Cell::Block);

    for dir in Direction::ALL {
        if let Some(next) = sq.offset(dir, 1) {
            let delta = territory_area(work, next, side);
            if delta == -1 {
                return -1;
            }
            area += delta;
        }
    }
    area
}
