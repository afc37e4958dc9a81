//! Game state management for Amazons.
//!
//! This module provides the `GameState` struct which owns the authoritative
//! board, the turn-phase state machine and the move history. A ply is built
//! from three steps (select a piece, move it, shoot an arrow) or applied as a
//! whole with [`GameState::apply_move`]. After every completed ply the
//! termination scan decides whether the game is over.

use std::fmt;
use std::sync::Arc;

use crate::board::Board;
use crate::cell::Cell;
use crate::error::MoveError;
use crate::move_list::{Move, MoveList};
use crate::side::{Side, Winner};
use crate::square::Square;

/// Step of the turn cycle.
///
/// The cycle is always WhiteMove, WhiteShoot, BlackMove, BlackShoot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum TurnPhase {
    WhiteMove = 0,
    WhiteShoot = 1,
    BlackMove = 2,
    BlackShoot = 3,
}

impl TurnPhase {
    /// Returns the persisted code of the phase.
    #[inline]
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Converts a persisted code back into a phase.
    pub fn from_code(code: u8) -> Option<TurnPhase> {
        match code {
            0 => Some(TurnPhase::WhiteMove),
            1 => Some(TurnPhase::WhiteShoot),
            2 => Some(TurnPhase::BlackMove),
            3 => Some(TurnPhase::BlackShoot),
            _ => None,
        }
    }

    /// Returns the relocation phase of `side`.
    #[inline]
    pub fn move_phase(side: Side) -> TurnPhase {
        match side {
            Side::White => TurnPhase::WhiteMove,
            Side::Black => TurnPhase::BlackMove,
        }
    }

    /// Returns the side acting in this phase.
    #[inline]
    pub fn side(self) -> Side {
        match self {
            TurnPhase::WhiteMove | TurnPhase::WhiteShoot => Side::White,
            TurnPhase::BlackMove | TurnPhase::BlackShoot => Side::Black,
        }
    }

    #[inline]
    pub fn is_shoot(self) -> bool {
        matches!(self, TurnPhase::WhiteShoot | TurnPhase::BlackShoot)
    }

    /// Returns the phase that follows in the cycle.
    #[inline]
    pub fn next(self) -> TurnPhase {
        match self {
            TurnPhase::WhiteMove => TurnPhase::WhiteShoot,
            TurnPhase::WhiteShoot => TurnPhase::BlackMove,
            TurnPhase::BlackMove => TurnPhase::BlackShoot,
            TurnPhase::BlackShoot => TurnPhase::WhiteMove,
        }
    }
}

impl fmt::Display for TurnPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let action = if self.is_shoot() { "shoot" } else { "move" };
        write!(f, "{} {}", self.side(), action)
    }
}

/// Notification emitted by [`GameState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// A ply was completed by `side`.
    MoveMade { mv: Move, side: Side },
    /// The termination scan found a winner.
    GameOver(Winner),
}

/// Callback invoked for every [`GameEvent`].
pub type GameEventCallback = dyn Fn(&GameEvent) + Send + Sync + 'static;

/// Represents the state of an Amazons game.
#[derive(Clone)]
pub struct GameState {
    /// The current board position.
    board: Board,
    /// Current step of the turn cycle.
    phase: TurnPhase,
    /// Piece picked for the current ply, `Square::None` if none.
    selected: Square,
    /// Origin of a relocation waiting for its arrow.
    origin: Square,
    /// Completed plies in order.
    history: Vec<Move>,
    winner: Option<Winner>,
    callback: Option<Arc<GameEventCallback>>,
}

impl fmt::Debug for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameState")
            .field("board", &self.board)
            .field("phase", &self.phase)
            .field("selected", &self.selected)
            .field("history", &self.history)
            .field("winner", &self.winner)
            .field("callback", &self.callback.is_some())
            .finish()
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    /// Creates a new game in the initial position with White to move.
    pub fn new() -> Self {
        Self::from_board(Board::new(), Side::White)
    }

    /// Creates a game state from an existing board position.
    ///
    /// The termination scan runs immediately, so a finished position is
    /// reported as such without emitting an event.
    ///
    /// The piece count is not checked: boards with fewer than four pieces per
    /// side are accepted so that small positions can be set up directly.
    /// Untrusted input goes through [`crate::record::GameRecord::into_game`],
    /// which enforces the count.
    ///
    /// # Arguments
    ///
    /// * `board` - The board position to start from
    /// * `side_to_move` - Which side moves next
    pub fn from_board(board: Board, side_to_move: Side) -> Self {
        let mut state = Self {
            board,
            phase: TurnPhase::move_phase(side_to_move),
            selected: Square::None,
            origin: Square::None,
            history: Vec::new(),
            winner: None,
            callback: None,
        };
        state.winner = state.check_game_over();
        state
    }

    /// Replaces the history without touching the board.
    ///
    /// Callers are responsible for passing plies consistent with the board.
    pub(crate) fn with_history(mut self, history: Vec<Move>) -> Self {
        self.history = history;
        self
    }

    /// Registers the callback receiving game events.
    pub fn set_callback(&mut self, callback: Option<Arc<GameEventCallback>>) {
        self.callback = callback;
    }

    /// Returns a reference to the current board position.
    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    /// Returns which side is acting in the current phase.
    #[inline]
    pub fn side_to_move(&self) -> Side {
        self.phase.side()
    }

    /// Returns the selected piece, if any.
    ///
    /// During a shoot phase this is the square the piece landed on.
    pub fn selected(&self) -> Option<Square> {
        (self.selected != Square::None).then_some(self.selected)
    }

    /// Returns the completed plies in order.
    #[inline]
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// Returns the number of completed plies.
    #[inline]
    pub fn ply_count(&self) -> usize {
        self.history.len()
    }

    /// Returns the last completed ply.
    pub fn last_move(&self) -> Option<Move> {
        self.history.last().copied()
    }

    #[inline]
    pub fn winner(&self) -> Option<Winner> {
        self.winner
    }

    #[inline]
    pub fn is_game_over(&self) -> bool {
        self.winner.is_some()
    }

    /// Returns the board with a half-made ply taken back.
    ///
    /// Outside a shoot phase this is the current board.
    pub fn settled_board(&self) -> Board {
        let mut board = self.board;
        if self.phase.is_shoot() {
            let piece = board.get(self.selected);
            board.set(self.selected, Cell::Empty);
            board.set(self.origin, piece);
        }
        board
    }

    /// Returns the position before the first ply, followed by the position
    /// after each completed ply.
    ///
    /// The first position is rebuilt by taking the history back, so a game
    /// set up from any layout replays from where it began. A half-made ply
    /// is left out.
    pub fn positions(&self) -> Vec<Board> {
        let mut board = self.settled_board();
        for mv in self.history.iter().rev() {
            let piece = board.get(mv.target);
            board.set(mv.shoot, Cell::Empty);
            board.set(mv.target, Cell::Empty);
            board.set(mv.start, piece);
        }

        let mut positions = Vec::with_capacity(self.history.len() + 1);
        positions.push(board);
        for mv in &self.history {
            let piece = board.get(mv.start);
            board.set(mv.start, Cell::Empty);
            board.set(mv.target, piece);
            board.set(mv.shoot, Cell::Block);
            positions.push(board);
        }
        positions
    }

    /// Returns every legal ply of the side to move.
    ///
    /// Enclosed pieces are included; an empty list during a shoot phase.
    pub fn legal_moves(&self) -> MoveList {
        if self.phase.is_shoot() {
            return MoveList::default();
        }
        MoveList::new(&self.board, self.side_to_move(), true)
    }

    /// Selects the piece on `sq` for the current ply.
    ///
    /// # Returns
    ///
    /// `true` if `sq` holds a piece of the side to move during its move phase.
    pub fn select(&mut self, sq: Square) -> bool {
        if self.is_game_over() || self.phase.is_shoot() || sq == Square::None {
            return false;
        }
        if self.board.get(sq) != Cell::Piece(self.side_to_move()) {
            return false;
        }
        self.selected = sq;
        true
    }

    /// Drops the current selection.
    ///
    /// # Returns
    ///
    /// `false` during a shoot phase, where the moved piece must fire.
    pub fn clear_selection(&mut self) -> bool {
        if self.phase.is_shoot() {
            return false;
        }
        self.selected = Square::None;
        true
    }

    /// Relocates the selected piece to `sq`.
    ///
    /// On success the phase advances to the shoot phase of the same side.
    pub fn move_selected_to(&mut self, sq: Square) -> Result<(), MoveError> {
        if self.is_game_over() {
            return Err(MoveError::GameOver);
        }
        if self.phase.is_shoot() {
            return Err(MoveError::WrongPhase(self.phase));
        }
        let from = self.selected().ok_or(MoveError::NoSelection)?;
        if !self.board.is_path_clear(from, sq, Square::None) {
            return Err(MoveError::BlockedPath { from, to: sq });
        }

        let piece = self.board.get(from);
        self.board.set(from, Cell::Empty);
        self.board.set(sq, piece);
        self.origin = from;
        self.selected = sq;
        self.phase = self.phase.next();
        Ok(())
    }

    /// Fires the arrow of the relocated piece at `sq`, completing the ply.
    pub fn shoot_at(&mut self, sq: Square) -> Result<(), MoveError> {
        if self.is_game_over() {
            return Err(MoveError::GameOver);
        }
        if !self.phase.is_shoot() {
            return Err(MoveError::WrongPhase(self.phase));
        }
        let from = self.selected;
        if !self.board.is_path_clear(from, sq, Square::None) {
            return Err(MoveError::BlockedPath { from, to: sq });
        }

        self.board.set(sq, Cell::Block);
        let mv = Move::new(self.origin, from, sq);
        self.finish_ply(mv);
        Ok(())
    }

    /// Applies a complete ply.
    ///
    /// The whole ply is validated before anything changes, so a refused move
    /// leaves the state untouched, including any selection in progress.
    pub fn apply_move(&mut self, mv: &Move) -> Result<(), MoveError> {
        if self.is_game_over() {
            return Err(MoveError::GameOver);
        }
        if self.phase.is_shoot() {
            return Err(MoveError::WrongPhase(self.phase));
        }
        let side = self.side_to_move();
        if mv.start == Square::None || self.board.get(mv.start) != Cell::Piece(side) {
            return Err(MoveError::NotOwnPiece(mv.start));
        }
        if !self.board.is_path_clear(mv.start, mv.target, Square::None) {
            return Err(MoveError::BlockedPath {
                from: mv.start,
                to: mv.target,
            });
        }
        if !self.board.is_path_clear(mv.target, mv.shoot, mv.start) {
            return Err(MoveError::BlockedPath {
                from: mv.target,
                to: mv.shoot,
            });
        }

        self.board.set(mv.start, Cell::Empty);
        self.board.set(mv.target, Cell::Piece(side));
        self.board.set(mv.shoot, Cell::Block);
        self.phase = self.phase.next();
        self.finish_ply(*mv);
        Ok(())
    }

    fn finish_ply(&mut self, mv: Move) {
        let side = self.side_to_move();
        self.phase = self.phase.next();
        self.selected = Square::None;
        self.origin = Square::None;
        self.history.push(mv);
        tracing::trace!(ply = self.history.len(), %side, mv = %mv, "ply applied");
        self.emit(&GameEvent::MoveMade { mv, side });

        if let Some(winner) = self.check_game_over() {
            self.winner = Some(winner);
            tracing::info!(%winner, plies = self.history.len(), "game over");
            self.emit(&GameEvent::GameOver(winner));
        }
    }

    fn emit(&self, event: &GameEvent) {
        if let Some(callback) = &self.callback {
            callback(event);
        }
    }

    /// Runs the termination scan on the current board.
    ///
    /// Only immediate neighbours are inspected: a side is still alive while
    /// any of its pieces touches an empty square.
    ///
    /// # Returns
    ///
    /// `None` while both sides can move, otherwise the winner.
    pub fn check_game_over(&self) -> Option<Winner> {
        let white = self.board.has_mobile_piece(Side::White);
        let black = self.board.has_mobile_piece(Side::Black);
        match (white, black) {
            (true, true) => None,
            (false, false) => Some(Winner::Tie),
            (true, false) => Some(Winner::White),
            (false, true) => Some(Winner::Black),
        }
    }

    /// Takes back the last completed ply.
    ///
    /// Clears a recorded winner and returns the ply that was removed.
    ///
    /// # Errors
    ///
    /// `MoveError::NothingToUndo` on an empty history or while a ply is
    /// half-made.
    pub fn undo(&mut self) -> Result<Move, MoveError> {
        if self.phase.is_shoot() {
            return Err(MoveError::NothingToUndo);
        }
        let mv = self.history.pop().ok_or(MoveError::NothingToUndo)?;
        let piece = self.board.get(mv.target);
        self.board.set(mv.shoot, Cell::Empty);
        self.board.set(mv.target, Cell::Empty);
        self.board.set(mv.start, piece);
        if let Some(side) = piece.side() {
            self.phase = TurnPhase::move_phase(side);
        }
        self.selected = Square::None;
        self.winner = None;
        tracing::trace!(mv = %mv, "ply undone");
        Ok(mv)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    fn mv(s: &str) -> Move {
        s.parse().unwrap()
    }

    #[test]
    fn test_new_game() {
        let game = GameState::new();
        assert_eq!(game.phase(), TurnPhase::WhiteMove);
        assert_eq!(game.side_to_move(), Side::White);
        assert!(!game.is_game_over());
        assert_eq!(game.ply_count(), 0);
        assert_eq!(game.legal_moves().count(), 1232);
    }

    #[test]
    fn test_apply_move_advances_phase() {
        let mut game = GameState::new();
        game.apply_move(&mv("a6-d6/d3")).unwrap();
        assert_eq!(game.phase(), TurnPhase::BlackMove);
        assert_eq!(game.board().get(Square::D6), Cell::Piece(Side::White));
        assert_eq!(game.board().get(Square::A6), Cell::Empty);
        assert_eq!(game.board().get(Square::D3), Cell::Block);
        assert_eq!(game.board().count(Cell::Block), 1);
        assert_eq!(game.last_move(), Some(mv("a6-d6/d3")));
        // White has nothing left to do until Black moves
        assert!(!game.select(Square::D6));
        assert!(game.select(Square::C1));
    }

    #[test]
    fn test_illegal_moves_leave_state_untouched() {
        let mut game = GameState::new();
        let before = game.board().to_string();
        // black piece during white's turn
        assert_eq!(
            game.apply_move(&mv("c1-c2/c3")),
            Err(MoveError::NotOwnPiece(Square::C1))
        );
        // not a queen line
        assert!(matches!(
            game.apply_move(&mv("a6-b8/b7")),
            Err(MoveError::BlockedPath { .. })
        ));
        // arrow into an occupied square
        assert!(matches!(
            game.apply_move(&mv("a6-d6/h6")),
            Err(MoveError::BlockedPath { .. })
        ));
        assert_eq!(game.board().to_string(), before);
        assert_eq!(game.phase(), TurnPhase::WhiteMove);
        assert!(game.history().is_empty());
    }

    #[test]
    fn test_arrow_through_vacated_origin() {
        let mut game = GameState::new();
        game.apply_move(&mv("a6-d6/a6")).unwrap();
        assert_eq!(game.board().get(Square::A6), Cell::Block);
    }

    #[test]
    fn test_step_protocol() {
        let mut game = GameState::new();
        assert_eq!(game.move_selected_to(Square::D6), Err(MoveError::NoSelection));
        assert!(!game.select(Square::C1));
        assert!(game.select(Square::A6));
        assert!(game.clear_selection());
        assert!(game.select(Square::A6));
        game.move_selected_to(Square::D6).unwrap();
        assert_eq!(game.phase(), TurnPhase::WhiteShoot);
        assert_eq!(game.selected(), Some(Square::D6));
        assert!(!game.clear_selection());
        assert!(!game.select(Square::H6));
        assert!(matches!(
            game.apply_move(&mv("h6-h5/h4")),
            Err(MoveError::WrongPhase(TurnPhase::WhiteShoot))
        ));
        assert_eq!(game.undo(), Err(MoveError::NothingToUndo));
        game.shoot_at(Square::A6).unwrap();
        assert_eq!(game.phase(), TurnPhase::BlackMove);
        assert_eq!(game.last_move(), Some(mv("a6-d6/a6")));
        assert_eq!(game.selected(), None);
    }

    #[test]
    fn test_undo() {
        let mut game = GameState::new();
        let original = *game.board();
        game.apply_move(&mv("a6-d6/d3")).unwrap();
        game.apply_move(&mv("c1-c2/c5")).unwrap();
        assert_eq!(game.undo(), Ok(mv("c1-c2/c5")));
        assert_eq!(game.phase(), TurnPhase::BlackMove);
        assert_eq!(game.undo(), Ok(mv("a6-d6/d3")));
        assert_eq!(game.phase(), TurnPhase::WhiteMove);
        assert_eq!(*game.board(), original);
        assert_eq!(game.undo(), Err(MoveError::NothingToUndo));
    }

    #[test]
    fn test_game_over_when_black_is_stuck() {
        let board = Board::from_string(
            "B#------
             ##------
             --------
             --------
             ---W----
             --------
             --------
             --------",
        )
        .unwrap();
        let game = GameState::from_board(board, Side::Black);
        assert_eq!(game.check_game_over(), Some(Winner::White));
        assert_eq!(game.winner(), Some(Winner::White));
        let mut game = game;
        assert!(!game.select(Square::A1));
        assert_eq!(game.apply_move(&mv("a1-a2/a3")), Err(MoveError::GameOver));
    }

    #[test]
    fn test_tie_when_nobody_moves() {
        let board = Board::from_string(
            "B#----#W
             ##----##
             --------
             --------
             --------
             --------
             --------
             --------",
        )
        .unwrap();
        let game = GameState::from_board(board, Side::White);
        assert_eq!(game.check_game_over(), Some(Winner::Tie));
    }

    #[test]
    fn test_events() {
        // White seals Black's last piece with its arrow.
        let board = Board::from_string(
            "B#------
             -#------
             -#------
             W-------
             --------
             --------
             --------
             --------",
        )
        .unwrap();
        let mut game = GameState::from_board(board, Side::White);
        assert!(!game.is_game_over());

        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&events);
        game.set_callback(Some(Arc::new(move |event: &GameEvent| {
            sink.lock().unwrap().push(*event);
        })));

        game.apply_move(&mv("a4-a3/a2")).unwrap();
        assert_eq!(game.winner(), Some(Winner::White));
        let events = events.lock().unwrap();
        assert_eq!(
            *events,
            vec![
                GameEvent::MoveMade {
                    mv: mv("a4-a3/a2"),
                    side: Side::White
                },
                GameEvent::GameOver(Winner::White),
            ]
        );
    }

    #[test]
    fn test_undo_clears_winner() {
        let board = Board::from_string(
            "B#------
             -#------
             -#------
             W-------
             --------
             --------
             --------
             --------",
        )
        .unwrap();
        let mut game = GameState::from_board(board, Side::White);
        game.apply_move(&mv("a4-a3/a2")).unwrap();
        assert!(game.is_game_over());
        game.undo().unwrap();
        assert!(!game.is_game_over());
        assert_eq!(*game.board(), board);
        assert_eq!(game.phase(), TurnPhase::WhiteMove);
    }

    #[test]
    fn test_positions() {
        let mut game = GameState::new();
        assert_eq!(game.positions(), vec![Board::new()]);

        let plies = ["a6-d6/d3", "c1-c2/c1", "d6-d5/a2"];
        let mut expected = vec![Board::new()];
        for ply in plies {
            game.apply_move(&mv(ply)).unwrap();
            expected.push(*game.board());
        }
        assert_eq!(game.positions(), expected);

        // a half-made ply does not show up
        assert!(game.select(Square::C2));
        game.move_selected_to(Square::C3).unwrap();
        assert_eq!(game.positions(), expected);
    }

    #[test]
    fn test_positions_from_custom_layout() {
        let board = Board::from_string(
            "B#------
             -#------
             -#------
             W-------
             --------
             --------
             --------
             --------",
        )
        .unwrap();
        let mut game = GameState::from_board(board, Side::White);
        game.apply_move(&mv("a4-a3/a2")).unwrap();
        let positions = game.positions();
        assert_eq!(positions.len(), 2);
        assert_eq!(positions[0], board);
        assert_eq!(positions[1], *game.board());
    }

    #[test]
    fn test_from_board_accepts_reduced_piece_counts() {
        let board = Board::from_string(
            "W-------
             --------
             --------
             --------
             --------
             --------
             --------
             -------B",
        )
        .unwrap();
        let game = GameState::from_board(board, Side::Black);
        assert_eq!(game.phase(), TurnPhase::BlackMove);
        assert!(!game.is_game_over());
        assert_eq!(game.board().count(Cell::Piece(Side::White)), 1);
    }

    #[test]
    fn test_phase_codes() {
        for code in 0..4 {
            assert_eq!(TurnPhase::from_code(code).map(TurnPhase::code), Some(code));
        }
        assert_eq!(TurnPhase::from_code(4), None);
        assert_eq!(TurnPhase::BlackShoot.next(), TurnPhase::WhiteMove);
        assert_eq!(TurnPhase::WhiteShoot.to_string(), "White shoot");
    }
}
