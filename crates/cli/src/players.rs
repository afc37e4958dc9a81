//! The AI players of a CLI session.

use std::thread;
use std::time::Duration;

use amazons_core::eval::Weights;
use amazons_core::level::{self, Level};
use amazons_core::search::Search;
use amazons_core::search::options::SearchOptions;
use amazons_core::search::search_result::SearchResult;
use amazons_core::side::Side;
use num_format::{Locale, ToFormattedString};

use crate::EngineParams;
use crate::game::GameState;

/// Who plays a side, as stored in save files.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Seat {
    Human,
    Ai(Weights),
}

impl Seat {
    pub fn is_human(self) -> bool {
        self == Seat::Human
    }

    pub fn weights(self) -> Option<Weights> {
        match self {
            Seat::Human => None,
            Seat::Ai(weights) => Some(weights),
        }
    }
}

/// One search engine per side.
pub struct Players {
    white: Search,
    black: Search,
    think_ms: u64,
}

impl Players {
    pub fn new(params: &EngineParams) -> Self {
        let options = |side, lv| {
            SearchOptions::new(side)
                .with_level(level::get_level(lv))
                .with_depth(params.depth)
        };
        Self {
            white: Search::new(&options(Side::White, params.white_level)),
            black: Search::new(&options(Side::Black, params.black_level)),
            think_ms: params.think_ms,
        }
    }

    pub fn get_mut(&mut self, side: Side) -> &mut Search {
        match side {
            Side::White => &mut self.white,
            Side::Black => &mut self.black,
        }
    }

    pub fn weights(&self, side: Side) -> Weights {
        match side {
            Side::White => self.white.options().weights,
            Side::Black => self.black.options().weights,
        }
    }

    pub fn set_level(&mut self, side: Side, level: Level) {
        self.get_mut(side).set_weights(level.weights);
    }

    pub fn set_weights(&mut self, side: Side, weights: Weights) {
        self.get_mut(side).set_weights(weights);
    }

    /// Forgets endgame plans, e.g. after a new game, a load or an undo.
    pub fn init(&mut self) {
        self.white.init();
        self.black.init();
    }

    /// Returns the seat of `side`, given whether the AI plays it.
    pub fn seat(&self, side: Side, is_ai: bool) -> Seat {
        if is_ai {
            Seat::Ai(self.weights(side))
        } else {
            Seat::Human
        }
    }

    /// Sleeps for the thinking pause.
    pub fn wait(&self) {
        if self.think_ms > 0 {
            thread::sleep(Duration::from_millis(self.think_ms));
        }
    }

    /// Waits the thinking pause, but only once the opponent has played.
    pub fn pause(&self, game: &GameState) {
        if game.core().ply_count() > 0 {
            self.wait();
        }
    }

    /// Lets the AI of the side to move play one ply.
    ///
    /// # Returns
    /// The search result, or `None` if the engine found nothing to play.
    pub fn play(&mut self, game: &mut GameState) -> Result<Option<SearchResult>, String> {
        let side = game.core().side_to_move();
        let search = self.get_mut(side);
        let result = search.run(game.core());
        let Some(mv) = result.best_move else {
            return Ok(None);
        };
        game.core_mut()
            .apply_move(&mv)
            .map_err(|e| format!("engine move {mv} was refused: {e}"))?;
        Ok(Some(result))
    }
}

/// Formats the statistics of a search as one table row.
pub fn format_result(result: &SearchResult) -> String {
    if result.is_endgame {
        format!(
            "endgame | {:>10} nodes",
            result.n_nodes.to_formatted_string(&Locale::en)
        )
    } else {
        format!(
            "depth {} | score {:>+12.4} | {:>10} nodes",
            result.depth,
            result.score,
            result.n_nodes.to_formatted_string(&Locale::en)
        )
    }
}
