//! Game tree search engine.
//!
//! [`Search`] is the AI player of one side. Until that side is sealed off it
//! runs an alpha-beta search on a scratch copy of the board; afterwards it
//! follows plans made by the endgame solver, one ply per turn.

pub mod endgame;
pub mod midgame;
pub mod options;
pub mod search_context;
pub mod search_result;

use std::collections::VecDeque;

use crate::all_moves::AllMoves;
use crate::error::MoveError;
use crate::eval::{Eval, Weights};
use crate::game_state::GameState;
use crate::move_list::Move;
use crate::search::options::SearchOptions;
use crate::search::search_context::SearchContext;
use crate::search::search_result::SearchResult;
use crate::side::Side;

/// AI player for one side.
pub struct Search {
    options: SearchOptions,
    /// Set once the side is sealed off, and kept until [`Search::init`].
    endgame: bool,
    /// Remaining plies of the current endgame plan.
    plan: VecDeque<Move>,
}

impl Search {
    /// Creates a new search engine with the given options.
    pub fn new(options: &SearchOptions) -> Search {
        Search {
            options: *options,
            endgame: false,
            plan: VecDeque::new(),
        }
    }

    /// Resets the search state for a new game.
    pub fn init(&mut self) {
        self.endgame = false;
        self.plan.clear();
    }

    #[inline]
    pub fn side(&self) -> Side {
        self.options.side
    }

    #[inline]
    pub fn options(&self) -> &SearchOptions {
        &self.options
    }

    pub fn set_weights(&mut self, weights: Weights) {
        self.options.weights = weights;
    }

    /// Whether the engine has switched to endgame play.
    #[inline]
    pub fn is_endgame(&self) -> bool {
        self.endgame
    }

    /// Chooses the next ply for this side.
    ///
    /// # Returns
    ///
    /// A result without a move if the game is over, it is not this side's
    /// move phase, or the side has nothing to play.
    pub fn run(&mut self, game: &GameState) -> SearchResult {
        let side = self.side();
        if game.is_game_over() || game.phase().is_shoot() || game.side_to_move() != side {
            return SearchResult::none();
        }
        let board = game.board();

        if !self.endgame && AllMoves::new(board, side, false).is_endgame() {
            tracing::debug!(%side, plies = game.ply_count(), "switching to endgame play");
            self.endgame = true;
            self.plan.clear();
        }

        if self.endgame {
            return self.run_endgame(game);
        }

        let depth = self.options.depth_policy.depth(game.ply_count());
        let mut ctx = SearchContext::new(board, side, Eval::new(self.options.weights));
        midgame::search_root(&mut ctx, depth)
    }

    fn run_endgame(&mut self, game: &GameState) -> SearchResult {
        // a plan only stays valid while its next ply is still legal
        if let Some(next) = self.plan.front()
            && !game.legal_moves().contains(next)
        {
            tracing::debug!(mv = %next, "dropping stale endgame plan");
            self.plan.clear();
        }

        let mut n_nodes = 0;
        if self.plan.is_empty() {
            let plan = endgame::solve(game.board(), self.side());
            n_nodes = plan.n_nodes;
            self.plan.extend(plan.moves);
        }

        match self.plan.pop_front() {
            Some(mv) => SearchResult::from_plan(mv, n_nodes),
            None => SearchResult {
                is_endgame: true,
                ..SearchResult::none()
            },
        }
    }

    /// Searches and plays the chosen ply on `game`.
    ///
    /// # Returns
    ///
    /// The ply played, or `None` if there was nothing to play.
    pub fn make_next_move(&mut self, game: &mut GameState) -> Result<Option<Move>, MoveError> {
        let result = self.run(game);
        let Some(mv) = result.best_move else {
            return Ok(None);
        };
        game.apply_move(&mv)?;
        Ok(Some(mv))
    }
}
