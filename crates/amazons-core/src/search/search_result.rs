//! Search result types.

use crate::move_list::Move;
use crate::types::{Depth, Score};

/// Result of a search operation.
#[derive(Clone, Debug, PartialEq)]
pub struct SearchResult {
    pub best_move: Option<Move>,
    /// Root score from the searching side's point of view. Zero for
    /// endgame plans, which are not scored.
    pub score: Score,
    pub depth: Depth,
    pub n_nodes: u64,
    /// Whether the move comes from the endgame solver.
    pub is_endgame: bool,
}

impl SearchResult {
    /// Creates a result carrying no move.
    pub fn none() -> Self {
        Self {
            best_move: None,
            score: 0.0,
            depth: 0,
            n_nodes: 0,
            is_endgame: false,
        }
    }

    /// Creates a result for a move taken from an endgame plan.
    pub fn from_plan(mv: Move, n_nodes: u64) -> Self {
        Self {
            best_move: Some(mv),
            score: 0.0,
            depth: 0,
            n_nodes,
            is_endgame: true,
        }
    }
}
