//! Endgame solver for sealed-off pieces.
//!
//! Once every piece of a side is enclosed or immobile, its regions no longer
//! interact with the opponent and the only goal left is to make as many
//! plies as possible. The solver picks the first piece that can still move
//! and searches for its longest line of play inside its region.

use std::collections::HashSet;

use crate::all_moves::AllMoves;
use crate::board::{Board, BoardKey};
use crate::constants::ENDGAME_SHORTCUT_AREA;
use crate::move_list::{Move, MoveList};
use crate::search::search_context::ScratchBoard;
use crate::side::Side;
use crate::square::Square;

/// Plies planned for one piece, to be played one per turn.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EndgamePlan {
    /// Piece the plan is for, `Square::None` if no piece can move.
    pub piece: Square,
    /// Territory of the piece when the plan was made.
    pub territory: i32,
    pub moves: Vec<Move>,
    /// Whether the region was too large to search and a single ply was taken.
    pub shortcut: bool,
    /// Number of plies applied during the search.
    pub n_nodes: u64,
}

struct Solver {
    scratch: ScratchBoard,
    visited: HashSet<BoardKey>,
    n_nodes: u64,
}

/// Plans the endgame play of `side` on `board`.
///
/// Regions larger than [`ENDGAME_SHORTCUT_AREA`] are not searched: the first
/// legal ply of the piece is returned on its own and a new plan is made on
/// the next turn. This threshold is a speed heuristic, not a property of
/// the game: the first ply is blind to the region's shape, so a piece in a
/// large region can wall itself in after a few plies.
pub fn solve(board: &Board, side: Side) -> EndgamePlan {
    let all = AllMoves::new(board, side, true);
    let Some((piece, range)) = all.first_mobile() else {
        tracing::debug!(%side, "no piece left to move");
        return EndgamePlan {
            piece: Square::None,
            ..Default::default()
        };
    };

    if range.territory_area > ENDGAME_SHORTCUT_AREA {
        let moves: Vec<Move> = MoveList::for_piece(board, piece)
            .first()
            .copied()
            .into_iter()
            .collect();
        tracing::debug!(
            %side,
            piece = %piece,
            territory = range.territory_area,
            "endgame region too large, playing first move"
        );
        return EndgamePlan {
            piece,
            territory: range.territory_area,
            moves,
            shortcut: true,
            n_nodes: 0,
        };
    }

    let mut solver = Solver {
        scratch: ScratchBoard::new(board),
        visited: HashSet::new(),
        n_nodes: 0,
    };
    let moves = solver.longest_line(piece);
    tracing::debug!(
        %side,
        piece = %piece,
        territory = range.territory_area,
        plan = moves.len(),
        nodes = solver.n_nodes,
        "endgame plan"
    );

    EndgamePlan {
        piece,
        territory: range.territory_area,
        moves,
        shortcut: false,
        n_nodes: solver.n_nodes,
    }
}

impl Solver {
    /// Longest sequence of plies the piece on `piece` can make from the
    /// current scratch position.
    ///
    /// A position seen before anywhere in this search yields an empty line.
    /// Every ply consumes one empty square, so a position is always reached
    /// at the same depth and the first visit already explored it.
    fn longest_line(&mut self, piece: Square) -> Vec<Move> {
        if !self.visited.insert(self.scratch.board().key()) {
            return Vec::new();
        }

        let territory = self.scratch.board().piece_range(piece).territory_area;
        let mut best: Vec<Move> = Vec::new();

        for mv in MoveList::for_piece(self.scratch.board(), piece).iter() {
            if self.scratch.apply(mv) {
                self.n_nodes += 1;
                let tail = self.longest_line(mv.target);
                if tail.len() + 1 > best.len() {
                    best.clear();
                    best.push(*mv);
                    best.extend(tail);
                }
                self.scratch.revert(mv);
            }

            // no line can be longer than the region
            if best.len() as i32 == territory {
                break;
            }
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::Cell;

    fn board(s: &str) -> Board {
        Board::from_string(s).unwrap()
    }

    fn replay(board: &Board, plan: &EndgamePlan) -> Board {
        let mut scratch = ScratchBoard::new(board);
        for mv in &plan.moves {
            assert!(scratch.apply(mv), "{mv}");
        }
        *scratch.board()
    }

    #[test]
    fn test_corridor() {
        let b = board(
            "W-----#-
             #######-
             --------
             --------
             --------
             --------
             --------
             -------B",
        );
        let plan = solve(&b, Side::White);
        assert_eq!(plan.piece, Square::A1);
        assert_eq!(plan.territory, 5);
        assert_eq!(plan.moves.len(), 5);
        assert!(!plan.shortcut);
        let end = replay(&b, &plan);
        assert!(!end.can_move(plan.moves[4].target));
    }

    #[test]
    fn test_pocket() {
        let b = board(
            "W-#-----
             --#-----
             ###-----
             --------
             --------
             --------
             --------
             -------B",
        );
        let plan = solve(&b, Side::White);
        assert_eq!(plan.moves.len(), 3);
        assert_eq!(plan.moves[0], "a1-b1/b2".parse().unwrap());
    }

    #[test]
    fn test_box_uses_whole_region() {
        let b = board(
            "W--#----
             ---#----
             ---#----
             ####----
             --------
             --------
             --------
             -------B",
        );
        let plan = solve(&b, Side::White);
        assert_eq!(plan.territory, 8);
        assert_eq!(plan.moves.len(), 8);
        let end = replay(&b, &plan);
        assert_eq!(end.count(Cell::Block), 7 + 8);
    }

    // Above the shortcut area the plan is a single arbitrary ply, an
    // approximation that keeps large regions cheap; it is not a game rule.
    #[test]
    fn test_large_region_takes_first_move() {
        let b = board(
            "W---#---
             ----#---
             ----#---
             ----#---
             #####---
             --------
             --------
             -------B",
        );
        let plan = solve(&b, Side::White);
        assert_eq!(plan.territory, 15);
        assert!(plan.shortcut);
        assert_eq!(plan.moves, vec!["a1-b1/c1".parse().unwrap()]);
    }

    #[test]
    fn test_skips_immobile_pieces() {
        // A1 is walled in, C1 owns the pocket next to it.
        let b = board(
            "W#W-#---
             ##--#---
             #####---
             --------
             --------
             --------
             --------
             -------B",
        );
        let plan = solve(&b, Side::White);
        assert_eq!(plan.piece, Square::C1);
        assert_eq!(plan.moves.len(), 3);
    }

    #[test]
    fn test_no_mobile_piece() {
        let b = board(
            "W#------
             ##------
             --------
             --------
             --------
             --------
             --------
             -------B",
        );
        let plan = solve(&b, Side::White);
        assert_eq!(plan.piece, Square::None);
        assert!(plan.moves.is_empty());
    }
}
