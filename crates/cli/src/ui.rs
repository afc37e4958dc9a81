//! Interactive prompt for playing against the engine.

use std::path::{Path, PathBuf};

use amazons_core::level::{self, NUM_LEVELS};
use amazons_core::move_list::Move;
use amazons_core::side::Side;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use crate::EngineParams;
use crate::game::GameState;
use crate::players::{Players, format_result};

/// Whether the AI plays `side` in `game_mode`.
///
/// 0: White-Human, Black-AI
/// 1: White-AI, Black-Human
/// 2: White-AI, Black-AI
/// 3: White-Human, Black-Human
fn is_ai(game_mode: usize, side: Side) -> bool {
    matches!(
        (game_mode, side),
        (0, Side::Black) | (1, Side::White) | (2, _)
    )
}

/// Returns the mode in which humans play exactly the sides flagged here.
fn mode_for(white_human: bool, black_human: bool) -> usize {
    match (white_human, black_human) {
        (true, false) => 0,
        (false, true) => 1,
        (false, false) => 2,
        (true, true) => 3,
    }
}

fn print_modes(game_mode: usize) {
    println!("Current mode: {game_mode}");
    println!("0: White-Human, Black-AI");
    println!("1: White-AI, Black-Human");
    println!("2: White-AI, Black-AI");
    println!("3: White-Human, Black-Human");
}

fn print_help() {
    println!("a6-d6/d3          play a move (queen from a6 to d6, arrow on d3)");
    println!("go                let the AI play the side to move");
    println!("undo              take back the last ply");
    println!("mode [0-3]        show or change who plays which side");
    println!("level <0-2> [w|b] set the AI level of one or both sides");
    println!("replay            show the game again from its first position");
    println!("save [file]       save the game as JSON");
    println!("load <file>       load a saved game");
    println!("new               start a new game");
    println!("quit              leave");
}

/// Main prompt loop.
///
/// Automatically triggers AI moves based on the current game mode.
pub fn ui_loop(params: &EngineParams) -> Result<(), String> {
    let mut rl = DefaultEditor::new().map_err(|e| e.to_string())?;
    let mut game = GameState::new();
    let mut players = Players::new(params);
    let mut game_mode: usize = 0;

    loop {
        game.print();
        println!();

        let side = game.core().side_to_move();
        if is_ai(game_mode, side) && !game.core().is_game_over() {
            players.pause(&game);
            match players.play(&mut game)? {
                Some(result) => {
                    println!("{}\n", format_result(&result));
                    continue;
                }
                None => println!("Computer has no move.\n"),
            }
        }

        let line = match rl.readline("> ") {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(err) => return Err(err.to_string()),
        };
        let _ = rl.add_history_entry(&line);

        let mut parts = line.split_whitespace();
        let Some(cmd) = parts.next() else {
            continue;
        };
        println!();

        match cmd {
            "new" | "n" => {
                game = GameState::new();
                players.init();
            }
            "undo" | "u" => {
                if let Err(e) = game.core_mut().undo() {
                    println!("Cannot undo: {e}");
                    continue;
                }
                // take back the AI's answer as well
                let side = game.core().side_to_move();
                if is_ai(game_mode, side) && game_mode != 2 {
                    let _ = game.core_mut().undo();
                }
                players.init();
            }
            "level" | "l" => match parts.next().and_then(|s| s.parse::<usize>().ok()) {
                Some(lv) if lv < NUM_LEVELS => {
                    let level = level::get_level(lv);
                    let sides: &[Side] = match parts.next() {
                        Some("w" | "white") => &[Side::White],
                        Some("b" | "black") => &[Side::Black],
                        _ => &[Side::White, Side::Black],
                    };
                    for &side in sides {
                        players.set_level(side, level);
                        println!("{side} level: {}", level.name);
                    }
                }
                _ => println!("Invalid level. Please specify a value between 0-{}.", NUM_LEVELS - 1),
            },
            "mode" | "m" => match parts.next() {
                Some(mode_str) => match mode_str.parse::<usize>() {
                    Ok(mode) if mode <= 3 => {
                        game_mode = mode;
                        println!("Mode changed to: {mode}");
                    }
                    _ => println!("Invalid mode number. Please specify a value between 0-3."),
                },
                None => print_modes(game_mode),
            },
            "go" => {
                if game.core().is_game_over() {
                    println!("The game is over.");
                    continue;
                }
                match players.play(&mut game)? {
                    Some(result) => println!("{}\n", format_result(&result)),
                    None => println!("Computer has no move.\n"),
                }
            }
            "save" => {
                let path = parts.next().map(PathBuf::from).or_else(|| params.save.clone());
                let Some(path) = path else {
                    println!("Usage: save <file>");
                    continue;
                };
                let white = players.seat(Side::White, is_ai(game_mode, Side::White));
                let black = players.seat(Side::Black, is_ai(game_mode, Side::Black));
                match game.save(&path, white, black) {
                    Ok(()) => println!("Saved to {}", path.display()),
                    Err(e) => println!("Save failed: {e}"),
                }
            }
            "load" => {
                let Some(path) = parts.next() else {
                    println!("Usage: load <file>");
                    continue;
                };
                match load(Path::new(path), &mut players) {
                    Ok((loaded, mode)) => {
                        game = loaded;
                        println!("Loaded {path}");
                        if let Some(mode) = mode {
                            game_mode = mode;
                            println!("Mode changed to: {mode}");
                        }
                    }
                    Err(e) => println!("Load failed: {e}"),
                }
            }
            "replay" | "r" => game.replay(|| players.wait()),
            "help" | "h" | "?" => print_help(),
            "quit" | "q" => break,
            _ => match cmd.parse::<Move>() {
                Ok(mv) => {
                    if let Err(e) = game.core_mut().apply_move(&mv) {
                        println!("Illegal move {mv}: {e}\n");
                    }
                }
                Err(_) => println!("Unknown command: {cmd}\n"),
            },
        }
    }

    Ok(())
}

/// Restores a saved game, the AI weights stored with it and, when the
/// record says who played which side, the matching game mode.
fn load(path: &Path, players: &mut Players) -> Result<(GameState, Option<usize>), String> {
    let record = GameState::load(path)?;
    let core = record.into_game().map_err(|e| e.to_string())?;
    if let Some(weights) = record.white_weights {
        players.set_weights(Side::White, weights);
    }
    if let Some(weights) = record.black_weights {
        players.set_weights(Side::Black, weights);
    }
    players.init();
    let mode = record
        .white_is_player
        .zip(record.black_is_player)
        .map(|(white, black)| mode_for(white, black));
    Ok((GameState::from_core(core), mode))
}
