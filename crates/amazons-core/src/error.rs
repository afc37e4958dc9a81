//! Error types of the engine.

use thiserror::Error;

use crate::game_state::TurnPhase;
use crate::square::Square;

/// Reasons a turn step or a complete ply is refused.
///
/// A refused action never changes the game state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("the game is already over")]
    GameOver,
    #[error("action not allowed during {0}")]
    WrongPhase(TurnPhase),
    #[error("{0} does not hold a piece of the side to move")]
    NotOwnPiece(Square),
    #[error("no piece is selected")]
    NoSelection,
    #[error("{from} to {to} is not a clear queen line")]
    BlockedPath { from: Square, to: Square },
    #[error("no ply to undo")]
    NothingToUndo,
}

/// Reasons a persisted game record is rejected.
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("board must have 8 rows of 8 cells")]
    BoardDimensions,
    #[error("unknown cell code {0}")]
    CellCode(u8),
    #[error("turn state {0} is outside 0..=3")]
    TurnState(u8),
    #[error("expected 4 pieces per side, found {white} white and {black} black")]
    PieceCount { white: usize, black: usize },
    #[error("history entry {0} must hold six coordinates in 0..8")]
    HistoryEntry(usize),
    #[error("history entry {0} does not match the board")]
    HistoryMismatch(usize),
}
