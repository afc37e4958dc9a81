//! Persisted game records.
//!
//! The record is the JSON shape written by save files: the board as rows of
//! cell codes, the turn phase code, the history as six coordinates per ply,
//! the optional weights of each AI player and, optionally, which sides are
//! played by humans. Loading validates everything before a [`GameState`] is
//! built from it.

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::cell::Cell;
use crate::constants::PIECES_PER_SIDE;
use crate::error::RecordError;
use crate::eval::Weights;
use crate::game_state::{GameState, TurnPhase};
use crate::move_list::Move;
use crate::side::Side;
use crate::square::{BOARD_SIZE, Square};

/// Serializable snapshot of a game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameRecord {
    /// Rows of cell codes, row 0 first.
    pub board: Vec<Vec<u8>>,
    /// Turn phase code in `0..=3`.
    pub turn_state: u8,
    /// `[start_row, start_col, target_row, target_col, shoot_row, shoot_col]` per ply.
    pub history: Vec<Vec<i32>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub white_weights: Option<Weights>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub black_weights: Option<Weights>,
    /// Whether White is played by a human. Left to the front end.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub white_is_player: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub black_is_player: Option<bool>,
}

impl GameRecord {
    /// Captures `game` together with the weights of its AI players.
    ///
    /// Who plays which side is not known to the game; front ends fill in
    /// `white_is_player` and `black_is_player` themselves.
    ///
    /// A half-made ply is not saved: the record holds the board before the
    /// piece was moved and the mover's move phase.
    pub fn from_game(
        game: &GameState,
        white_weights: Option<Weights>,
        black_weights: Option<Weights>,
    ) -> GameRecord {
        let board = game.settled_board();
        GameRecord {
            board: board.to_codes().iter().map(|row| row.to_vec()).collect(),
            turn_state: TurnPhase::move_phase(game.side_to_move()).code(),
            history: game.history().iter().map(encode_move).collect(),
            white_weights,
            black_weights,
            white_is_player: None,
            black_is_player: None,
        }
    }

    /// Parses a record from JSON without validating its content.
    pub fn from_json(json: &str) -> Result<GameRecord, RecordError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, RecordError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Builds the game described by this record.
    ///
    /// A shoot phase code is accepted and mapped to the move phase of the
    /// same side, since the record does not say which piece was moved.
    ///
    /// # Errors
    ///
    /// Any malformed or inconsistent field is rejected; nothing is repaired.
    pub fn into_game(&self) -> Result<GameState, RecordError> {
        let board = self.decode_board()?;
        let phase =
            TurnPhase::from_code(self.turn_state).ok_or(RecordError::TurnState(self.turn_state))?;

        let white = board.count(Cell::Piece(Side::White));
        let black = board.count(Cell::Piece(Side::Black));
        if white != PIECES_PER_SIDE || black != PIECES_PER_SIDE {
            return Err(RecordError::PieceCount { white, black });
        }

        let history = self
            .history
            .iter()
            .enumerate()
            .map(|(i, entry)| decode_move(entry).ok_or(RecordError::HistoryEntry(i)))
            .collect::<Result<Vec<_>, _>>()?;
        check_history(&board, phase.side(), &history)?;

        Ok(GameState::from_board(board, phase.side()).with_history(history))
    }

    fn decode_board(&self) -> Result<Board, RecordError> {
        if self.board.len() != BOARD_SIZE || self.board.iter().any(|row| row.len() != BOARD_SIZE)
        {
            return Err(RecordError::BoardDimensions);
        }
        let mut rows = [[0; BOARD_SIZE]; BOARD_SIZE];
        for (dst, src) in rows.iter_mut().zip(self.board.iter()) {
            for (cell, &code) in dst.iter_mut().zip(src.iter()) {
                if Cell::from_code(code).is_none() {
                    return Err(RecordError::CellCode(code));
                }
                *cell = code;
            }
        }
        Board::from_codes(&rows).ok_or(RecordError::BoardDimensions)
    }
}

fn encode_move(mv: &Move) -> Vec<i32> {
    let (sr, sc) = mv.start.coords();
    let (tr, tc) = mv.target.coords();
    let (hr, hc) = mv.shoot.coords();
    vec![sr, sc, tr, tc, hr, hc]
}

fn decode_move(entry: &[i32]) -> Option<Move> {
    let [sr, sc, tr, tc, hr, hc] = entry else {
        return None;
    };
    Some(Move::new(
        Square::from_coords(*sr, *sc)?,
        Square::from_coords(*tr, *tc)?,
        Square::from_coords(*hr, *hc)?,
    ))
}

/// Takes the plies back one by one from `board` and checks each of them
/// was a legal ply of the side that made it.
fn check_history(board: &Board, side_to_move: Side, history: &[Move]) -> Result<(), RecordError> {
    let mut board = *board;
    let mut side = side_to_move;
    for (i, mv) in history.iter().enumerate().rev() {
        side = side.opposite();
        if board.get(mv.shoot) != Cell::Block {
            return Err(RecordError::HistoryMismatch(i));
        }
        board.set(mv.shoot, Cell::Empty);
        if board.get(mv.target) != Cell::Piece(side) || !board.is_empty(mv.start) {
            return Err(RecordError::HistoryMismatch(i));
        }
        board.set(mv.target, Cell::Empty);
        board.set(mv.start, Cell::Piece(side));

        if !board.is_path_clear(mv.start, mv.target, Square::None)
            || !board.is_path_clear(mv.target, mv.shoot, mv.start)
        {
            return Err(RecordError::HistoryMismatch(i));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn played_game() -> GameState {
        let mut game = GameState::new();
        for mv in ["a6-d6/d3", "c1-c2/c5", "d6-d5/a2"] {
            game.apply_move(&mv.parse().unwrap()).unwrap();
        }
        game
    }

    #[test]
    fn test_record_shape() {
        let game = played_game();
        let record = GameRecord::from_game(&game, Some(Weights::EASY), None);
        assert_eq!(record.turn_state, 2);
        assert_eq!(record.history[0], vec![5, 0, 5, 3, 2, 3]);
        assert_eq!(record.board[5][3], 0);
        assert_eq!(record.board[4][3], 2);
        assert_eq!(record.board[2][3], 1);

        let json = record.to_json().unwrap();
        assert!(json.contains("\"turnState\": 2"));
        assert!(json.contains("\"whiteWeights\""));
        assert!(!json.contains("blackWeights"));
    }

    #[test]
    fn test_load_restores_game() {
        let game = played_game();
        let json = GameRecord::from_game(&game, None, None).to_json().unwrap();
        let loaded = GameRecord::from_json(&json).unwrap().into_game().unwrap();
        assert_eq!(loaded.board(), game.board());
        assert_eq!(loaded.phase(), TurnPhase::BlackMove);
        assert_eq!(loaded.history(), game.history());

        let mut loaded = loaded;
        loaded.undo().unwrap();
        loaded.undo().unwrap();
        loaded.undo().unwrap();
        assert_eq!(*loaded.board(), Board::new());
    }

    #[test]
    fn test_half_made_ply_is_not_saved() {
        let mut game = GameState::new();
        assert!(game.select(Square::A6));
        game.move_selected_to(Square::D6).unwrap();
        let record = GameRecord::from_game(&game, None, None);
        assert_eq!(record.turn_state, 0);
        assert_eq!(record.board[5][0], 2);
        assert_eq!(record.board[5][3], 0);
    }

    #[test]
    fn test_rejects_malformed_records() {
        let good = GameRecord::from_game(&played_game(), None, None);

        let mut bad = good.clone();
        bad.board.pop();
        assert!(matches!(bad.into_game(), Err(RecordError::BoardDimensions)));

        let mut bad = good.clone();
        bad.board[0][0] = 9;
        assert!(matches!(bad.into_game(), Err(RecordError::CellCode(9))));

        let mut bad = good.clone();
        bad.turn_state = 4;
        assert!(matches!(bad.into_game(), Err(RecordError::TurnState(4))));

        let mut bad = good.clone();
        bad.board[3][3] = 2;
        assert!(matches!(
            bad.into_game(),
            Err(RecordError::PieceCount { white: 5, black: 4 })
        ));

        let mut bad = good.clone();
        bad.history[1] = vec![0, 2, 1, 2, 4];
        assert!(matches!(bad.into_game(), Err(RecordError::HistoryEntry(1))));

        let mut bad = good.clone();
        bad.history[2][5] = 8;
        assert!(matches!(bad.into_game(), Err(RecordError::HistoryEntry(2))));

        let mut bad = good;
        bad.history.swap(0, 2);
        assert!(matches!(bad.into_game(), Err(RecordError::HistoryMismatch(_))));

        assert!(matches!(
            GameRecord::from_json("{\"board\": 3}"),
            Err(RecordError::Json(_))
        ));
    }

    #[test]
    fn test_player_flags() {
        let mut record = GameRecord::from_game(&GameState::new(), None, None);
        let json = record.to_json().unwrap();
        assert!(!json.contains("IsPlayer"));

        record.white_is_player = Some(true);
        record.black_is_player = Some(false);
        let json = record.to_json().unwrap();
        assert!(json.contains("\"whiteIsPlayer\": true"));
        assert!(json.contains("\"blackIsPlayer\": false"));
        assert_eq!(GameRecord::from_json(&json).unwrap(), record);

        // records without the flags still load
        let json = "{\"board\": [], \"turnState\": 0, \"history\": []}";
        let record = GameRecord::from_json(json).unwrap();
        assert_eq!(record.white_is_player, None);
        assert_eq!(record.black_is_player, None);
    }

    #[test]
    fn test_shoot_phase_code_maps_to_move_phase() {
        let mut record = GameRecord::from_game(&GameState::new(), None, None);
        record.turn_state = 3;
        let game = record.into_game().unwrap();
        assert_eq!(game.phase(), TurnPhase::BlackMove);
    }
}
