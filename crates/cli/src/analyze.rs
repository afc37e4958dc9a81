use std::path::Path;

use amazons_core::side::Side;

use crate::EngineParams;
use crate::game::GameState;
use crate::players::{Players, format_result};

/// Loads a saved game and prints the move the engine would play.
pub fn run(path: &Path, params: &EngineParams) -> Result<(), String> {
    let record = GameState::load(path)?;
    let core = record.into_game().map_err(|e| e.to_string())?;
    let side = core.side_to_move();
    let game = GameState::from_core(core);
    game.print();
    println!();

    if let Some(winner) = game.core().winner() {
        println!("{winner}");
        return Ok(());
    }

    let mut players = Players::new(params);
    let stored = match side {
        Side::White => record.white_weights,
        Side::Black => record.black_weights,
    };
    if let Some(weights) = stored {
        players.set_weights(side, weights);
    }

    let result = players.get_mut(side).run(game.core());
    match result.best_move {
        Some(mv) => {
            println!("{side} best move: {mv}");
            println!("{}", format_result(&result));
        }
        None => println!("{side} has no move"),
    }
    Ok(())
}
