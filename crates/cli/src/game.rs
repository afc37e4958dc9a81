//! Game state management for the Amazons CLI.
//!
//! This module provides the `GameState` struct which wraps the core
//! game state and adds terminal display and record file I/O.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use amazons_core::board::Board;
use amazons_core::cell::Cell;
use amazons_core::game_state::{self, GameEvent, GameEventCallback};
use amazons_core::move_list::Move;
use amazons_core::record::GameRecord;
use amazons_core::side::Side;
use amazons_core::square::Square;
use colored::{ColoredString, Colorize};

use crate::players::Seat;

/// Core game state plus CLI-specific display.
///
/// Every ply and the end of the game are announced on stdout through the
/// core's event callback.
pub struct GameState {
    core: game_state::GameState,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    /// Creates a new game in the initial position with White to move.
    pub fn new() -> Self {
        Self::from_core(game_state::GameState::new())
    }

    /// Wraps an existing core game, e.g. one restored from a record.
    pub fn from_core(mut core: game_state::GameState) -> Self {
        let callback: Arc<GameEventCallback> = Arc::new(announce);
        core.set_callback(Some(callback));
        Self { core }
    }

    pub fn core(&self) -> &game_state::GameState {
        &self.core
    }

    pub fn core_mut(&mut self) -> &mut game_state::GameState {
        &mut self.core
    }

    /// Loads a game record from a JSON file.
    pub fn load(path: &Path) -> Result<GameRecord, String> {
        let json = fs::read_to_string(path)
            .map_err(|e| format!("cannot read {}: {e}", path.display()))?;
        GameRecord::from_json(&json).map_err(|e| e.to_string())
    }

    /// Writes the game to a JSON file together with who plays each side.
    pub fn save(&self, path: &Path, white: Seat, black: Seat) -> Result<(), String> {
        let mut record = GameRecord::from_game(&self.core, white.weights(), black.weights());
        record.white_is_player = Some(white.is_human());
        record.black_is_player = Some(black.is_human());
        let json = record.to_json().map_err(|e| e.to_string())?;
        fs::write(path, json).map_err(|e| format!("cannot write {}: {e}", path.display()))?;
        tracing::info!(path = %path.display(), plies = self.core.ply_count(), "game saved");
        Ok(())
    }

    /// Prints the game from its first position, one ply at a time.
    ///
    /// `wait` runs between two positions.
    pub fn replay(&self, mut wait: impl FnMut()) {
        let history = self.core.history();
        let positions = self.core.positions();
        for (step, board) in positions.iter().enumerate() {
            if step > 0 {
                wait();
            }
            let last_move = step.checked_sub(1).map(|i| history[i]);
            let info = [
                String::new(),
                String::new(),
                format!("   {}", "Replay".bright_cyan()),
                format!("   Ply:   {step}/{}", history.len()),
                last_move.map_or_else(String::new, |mv| format!("   Last:  {mv}")),
                String::new(),
                String::new(),
                String::new(),
            ];
            print_board(board, last_move, &info);
            println!();
        }
    }

    /// Prints a colored representation of the board to the terminal.
    pub fn print(&self) {
        let last_move = self.core.last_move();
        let action = if self.core.phase().is_shoot() { "shoot" } else { "move" };
        let to_move = match self.core.side_to_move() {
            Side::White => "White (W)".bright_yellow(),
            Side::Black => "Black (B)".bright_green(),
        };

        let info = [
            String::new(),
            String::new(),
            format!("   {to_move} to {action}"),
            format!("   Plies: {}", self.core.ply_count()),
            last_move.map_or_else(String::new, |mv| format!("   Last:  {mv}")),
            String::new(),
            self.core
                .winner()
                .map_or_else(String::new, |w| format!("   {}", w.to_string().bright_cyan())),
            if self.core.is_game_over() {
                format!("   {}", "*** Game Over ***".bright_red())
            } else {
                String::new()
            },
        ];
        print_board(self.core.board(), last_move, &info);
    }
}

fn cell_symbol(cell: Cell, sq: Square, last_move: Option<Move>) -> ColoredString {
    let is_target = last_move.is_some_and(|mv| mv.target == sq);
    let is_shot = last_move.is_some_and(|mv| mv.shoot == sq);
    let is_start = last_move.is_some_and(|mv| mv.start == sq);

    match cell {
        Cell::Piece(Side::White) if is_target => " W ".on_bright_black().bright_yellow(),
        Cell::Piece(Side::Black) if is_target => " B ".on_bright_black().bright_green(),
        Cell::Piece(Side::White) => " W ".bright_yellow(),
        Cell::Piece(Side::Black) => " B ".bright_green(),
        Cell::Block if is_shot => " # ".bright_red(),
        Cell::Block => " # ".bright_black(),
        Cell::Empty if is_start => " · ".bright_black(),
        Cell::Empty => "   ".black(),
    }
}

/// Prints `board` with one line of `info` to the right of each rank.
fn print_board(board: &Board, last_move: Option<Move>, info: &[String; 8]) {
    // Header
    println!("      a   b   c   d   e   f   g   h");
    println!("    ┌───┬───┬───┬───┬───┬───┬───┬───┐");

    for y in 0..8 {
        print!("  {} │", y + 1);
        for x in 0..8 {
            let sq = Square::from_usize_unchecked(y * 8 + x);
            print!("{}│", cell_symbol(board.get(sq), sq, last_move));
        }
        println!("{}", info[y]);

        if y < 7 {
            println!("    ├───┼───┼───┼───┼───┼───┼───┼───┤");
        }
    }

    // Footer
    println!("    └───┴───┴───┴───┴───┴───┴───┴───┘");
}

fn announce(event: &GameEvent) {
    match event {
        GameEvent::MoveMade { mv, side } => println!("{side} plays {mv}"),
        GameEvent::GameOver(winner) => println!("Game over: {winner}"),
    }
}
