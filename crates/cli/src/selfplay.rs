use amazons_core::side::Side;

use crate::EngineParams;
use crate::game::GameState;
use crate::players::{Players, format_result};

/// Plays a whole game between the two AI levels.
pub fn run(params: &EngineParams) -> Result<(), String> {
    let mut game = GameState::new();
    let mut players = Players::new(params);
    game.print();

    while !game.core().is_game_over() {
        players.pause(&game);
        match players.play(&mut game)? {
            Some(result) => println!("  {}", format_result(&result)),
            None => {
                tracing::warn!(side = %game.core().side_to_move(), "engine found no move");
                break;
            }
        }
    }
    println!();
    game.print();

    if let Some(path) = &params.save {
        game.save(
            path,
            players.seat(Side::White, true),
            players.seat(Side::Black, true),
        )?;
        println!("Saved to {}", path.display());
    }
    Ok(())
}
