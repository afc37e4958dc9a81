pub mod all_moves;
pub mod board;
pub mod cell;
mod constants;
pub mod error;
pub mod eval;
pub mod game_state;
pub mod level;
pub mod move_list;
pub mod perft;
pub mod range;
pub mod record;
pub mod search;
pub mod side;
pub mod square;
pub mod types;

pub use constants::{ENDGAME_SHORTCUT_AREA, PIECES_PER_SIDE};
