//! Midgame search: depth-limited minimax with alpha-beta pruning.
//!
//! Every node works on the one scratch board of the [`SearchContext`]:
//! a candidate ply is applied, searched and reverted before the next one.
//! The searching side always maximizes and plies strictly alternate.

use crate::constants::{SCORE_INF, SCORE_NO_MOVES};
use crate::move_list::MoveList;
use crate::search::search_context::SearchContext;
use crate::search::search_result::SearchResult;
use crate::types::{Depth, Score};

/// Finds the best ply for `ctx.side` on the scratch board.
///
/// The root is never cut off, so every candidate gets a score. Ties keep
/// the move generated first. Pieces sealed in their own region are not
/// considered; the endgame solver plays those.
///
/// # Arguments
///
/// * `ctx` - Search context holding the scratch board
/// * `depth` - Number of plies to look ahead, at least 1
///
/// # Returns
///
/// A result without a move if the side has no candidate at all.
pub fn search_root(ctx: &mut SearchContext, depth: Depth) -> SearchResult {
    let depth = depth.max(1);
    let moves = MoveList::new(ctx.scratch.board(), ctx.side, false);
    let Some(&first) = moves.first() else {
        return SearchResult::none();
    };

    let mut best_move = None;
    let mut best_score = -SCORE_INF;
    let mut alpha = -SCORE_INF;
    let beta = SCORE_INF;

    for mv in moves.iter() {
        if !ctx.apply(mv) {
            continue;
        }
        let score = alpha_beta(ctx, depth - 1, alpha, beta, false);
        ctx.revert(mv);

        if score > best_score {
            best_score = score;
            best_move = Some(*mv);
        }
        alpha = alpha.max(score);
    }

    let best_move = best_move.unwrap_or(first);
    tracing::debug!(
        side = %ctx.side,
        depth,
        nodes = ctx.n_nodes,
        score = best_score,
        mv = %best_move,
        "midgame search finished"
    );

    SearchResult {
        best_move: Some(best_move),
        score: best_score,
        depth,
        n_nodes: ctx.n_nodes,
        is_endgame: false,
    }
}

/// Alpha-beta search below the root.
///
/// A side without candidates at an inner node loses outright: the
/// searching side gets `-SCORE_NO_MOVES` when it is stuck and
/// `SCORE_NO_MOVES` when the opponent is.
///
/// # Arguments
///
/// * `ctx` - Search context holding the scratch board
/// * `depth` - Remaining plies; the evaluator is called at 0
/// * `alpha` - Lower bound
/// * `beta` - Upper bound
/// * `maximizing` - Whether the searching side is to move
pub fn alpha_beta(
    ctx: &mut SearchContext,
    depth: Depth,
    mut alpha: Score,
    mut beta: Score,
    maximizing: bool,
) -> Score {
    if depth == 0 {
        return ctx.evaluate();
    }

    let side = if maximizing {
        ctx.side
    } else {
        ctx.side.opposite()
    };
    let moves = MoveList::new(ctx.scratch.board(), side, false);
    if moves.is_empty() {
        return if maximizing {
            -SCORE_NO_MOVES
        } else {
            SCORE_NO_MOVES
        };
    }

    if maximizing {
        let mut max_eval = -SCORE_INF;
        for mv in moves.iter() {
            if !ctx.apply(mv) {
                continue;
            }
            let eval = alpha_beta(ctx, depth - 1, alpha, beta, false);
            ctx.revert(mv);

            max_eval = max_eval.max(eval);
            alpha = alpha.max(eval);
            if beta <= alpha {
                break;
            }
        }
        max_eval
    } else {
        let mut min_eval = SCORE_INF;
        for mv in moves.iter() {
            if !ctx.apply(mv) {
                continue;
            }
            let eval = alpha_beta(ctx, depth - 1, alpha, beta, true);
            ctx.revert(mv);

            min_eval = min_eval.min(eval);
            beta = beta.min(eval);
            if beta <= alpha {
                break;
            }
        }
        min_eval
    }
}
