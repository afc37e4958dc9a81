//! Per-side mobility snapshot.

use arrayvec::ArrayVec;

use crate::board::Board;
use crate::constants::PIECES_PER_SIDE;
use crate::range::MoveRange;
use crate::side::Side;
use crate::square::{Direction, Square};

/// Mobility summary of one side, consumed by the evaluator and the endgame
/// trigger.
#[derive(Debug, Clone, Default)]
pub struct AllMoves {
    /// Piece squares in row-major order.
    pub positions: ArrayVec<Square, PIECES_PER_SIDE>,
    /// Range of each piece, territory included.
    pub ranges: ArrayVec<MoveRange, PIECES_PER_SIDE>,
    /// Number of queen destinations over the counted pieces.
    pub move_opts: u32,
    /// Number of arrow squares summed over every counted destination.
    pub shoot_opts: u32,
}

impl AllMoves {
    /// Builds the snapshot of `side` on `board`.
    ///
    /// Enclosed pieces are still listed with their ranges but only add to
    /// the option counts when `include_enclosed` is set.
    pub fn new(board: &Board, side: Side, include_enclosed: bool) -> AllMoves {
        let mut all = AllMoves::default();
        for sq in board.pieces(side).take(PIECES_PER_SIDE) {
            let range = board.piece_range(sq);
            all.positions.push(sq);
            all.ranges.push(range);

            if !include_enclosed && range.in_closed_region() {
                continue;
            }

            all.move_opts += range.total_moves();
            for dir in Direction::ALL {
                for step in 1..=range.get(dir) as i32 {
                    if let Some(target) = sq.offset(dir, step) {
                        all.shoot_opts += board.range_from_ignoring(target, sq).total_moves();
                    }
                }
            }
        }
        all
    }

    /// Whether every piece is enclosed or unable to move.
    pub fn is_endgame(&self) -> bool {
        self.ranges
            .iter()
            .all(|range| range.in_closed_region() || !range.can_move())
    }

    /// Sum of the territories of the enclosed pieces.
    pub fn territory(&self) -> i32 {
        self.ranges
            .iter()
            .filter(|range| range.in_closed_region())
            .map(|range| range.territory_area)
            .sum()
    }

    /// Returns the first piece with at least one destination.
    pub fn first_mobile(&self) -> Option<(Square, MoveRange)> {
        self.positions
            .iter()
            .zip(self.ranges.iter())
            .find(|(_, range)| range.can_move())
            .map(|(&sq, &range)| (sq, range))
    }
}
