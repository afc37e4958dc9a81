//! Global constants

use crate::types::Score;

/// Number of squares on the board.
pub const BOARD_SQUARES: usize = 64;

/// Number of queens each side owns. Pieces are never captured.
pub const PIECES_PER_SIDE: usize = 4;

/// Upper bound on the legal plies of one side: four queens, each with at
/// most 27 destinations, each destination with at most 27 arrow squares.
pub const MAX_MOVES: usize = PIECES_PER_SIDE * 27 * 27;

/// Bonus added by the evaluator when one side has no legal destination.
pub const SCORE_DECISIVE: Score = 1e9;

/// Value returned inside the search tree when the side to move has no move.
pub const SCORE_NO_MOVES: Score = 1e10;

/// Initial bound for alpha-beta windows. Larger than any reachable score.
pub const SCORE_INF: Score = 1e11;

/// Territory above which the endgame solver stops searching and plays the
/// first legal move of the cornered piece. Heuristic, not a rule of the game.
pub const ENDGAME_SHORTCUT_AREA: i32 = 12;
