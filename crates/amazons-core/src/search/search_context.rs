//! Search context for maintaining state during game tree search.

use crate::board::Board;
use crate::cell::Cell;
use crate::eval::Eval;
use crate::move_list::Move;
use crate::side::Side;
use crate::square::Square;
use crate::types::Score;

/// Private copy of the board that the search mutates and restores in place.
///
/// Turn order is not tracked here: callers pass the side explicitly and the
/// side of a ply is read from the piece on its start square.
#[derive(Debug, Clone)]
pub struct ScratchBoard {
    board: Board,
}

impl ScratchBoard {
    pub fn new(board: &Board) -> ScratchBoard {
        ScratchBoard { board: *board }
    }

    /// Overwrites the scratch copy with `board`.
    pub fn reset(&mut self, board: &Board) {
        self.board = *board;
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Plays `mv` for whichever side owns the piece on its start square.
    ///
    /// # Returns
    ///
    /// `false`, with the board unchanged, if the move is incomplete, the start
    /// square holds no piece or a leg of the ply is obstructed.
    pub fn apply(&mut self, mv: &Move) -> bool {
        if !mv.is_complete() {
            return false;
        }
        let piece = self.board.get(mv.start);
        if piece.side().is_none()
            || !self.board.is_path_clear(mv.start, mv.target, Square::None)
            || !self.board.is_path_clear(mv.target, mv.shoot, mv.start)
        {
            return false;
        }
        self.board.set(mv.start, Cell::Empty);
        self.board.set(mv.target, piece);
        self.board.set(mv.shoot, Cell::Block);
        true
    }

    /// Undoes a ply previously made with [`ScratchBoard::apply`].
    ///
    /// The arrow square is cleared first because the arrow may have landed
    /// on the vacated origin.
    pub fn revert(&mut self, mv: &Move) -> bool {
        if !mv.is_complete() {
            return false;
        }
        let piece = self.board.get(mv.target);
        if piece.side().is_none() {
            return false;
        }
        self.board.set(mv.shoot, Cell::Empty);
        self.board.set(mv.target, Cell::Empty);
        self.board.set(mv.start, piece);
        true
    }
}

/// The search context that maintains all state during one search call.
pub struct SearchContext {
    /// Number of plies applied on the scratch board.
    pub n_nodes: u64,
    /// Side the search is maximizing for.
    pub side: Side,
    /// Scratch copy of the position being searched.
    pub scratch: ScratchBoard,
    eval: Eval,
}

impl SearchContext {
    /// Creates a new search context for the given board position.
    ///
    /// # Arguments
    /// * `board` - Authoritative position, copied into the scratch board.
    /// * `side` - Side to find a move for.
    /// * `eval` - Evaluator bound to that side's weights.
    pub fn new(board: &Board, side: Side, eval: Eval) -> SearchContext {
        SearchContext {
            n_nodes: 0,
            side,
            scratch: ScratchBoard::new(board),
            eval,
        }
    }

    /// Applies `mv` on the scratch board and counts the node.
    #[inline]
    pub fn apply(&mut self, mv: &Move) -> bool {
        let applied = self.scratch.apply(mv);
        if applied {
            self.n_nodes += 1;
        }
        applied
    }

    #[inline]
    pub fn revert(&mut self, mv: &Move) {
        self.scratch.revert(mv);
    }

    /// Scores the scratch board for the searching side.
    #[inline]
    pub fn evaluate(&self) -> Score {
        self.eval.evaluate(self.scratch.board(), self.side, false)
    }
}
