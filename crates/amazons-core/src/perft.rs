use crate::board::Board;
use crate::move_list::MoveList;
use crate::search::search_context::ScratchBoard;
use crate::side::Side;

/// Executes a perft run starting from the standard initial position.
///
/// Generation includes enclosed pieces so every rules-legal ply is counted.
///
/// # Arguments
///
/// * `depth` - Number of plies to expand from the initial position. A depth of
///   `1` counts the immediate legal moves; larger values walk the tree
///   recursively.
///
/// # Returns
///
/// The number of leaf plies reached.
pub fn perft_root(depth: u32) -> u64 {
    perft_from(&Board::new(), Side::White, depth)
}

/// Executes a perft run from an arbitrary position.
pub fn perft_from(board: &Board, side: Side, depth: u32) -> u64 {
    let mut scratch = ScratchBoard::new(board);
    perft(&mut scratch, side, depth)
}

fn perft(scratch: &mut ScratchBoard, side: Side, depth: u32) -> u64 {
    let move_list = MoveList::new(scratch.board(), side, true);
    if depth <= 1 {
        return move_list.count() as u64;
    }

    let mut nodes = 0;
    for mv in move_list.iter() {
        if scratch.apply(mv) {
            nodes += perft(scratch, side.opposite(), depth - 1);
            scratch.revert(mv);
        }
    }
    nodes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_perft_depth_1() {
        assert_eq!(perft_root(1), 1232);
    }

    #[test]
    fn test_perft_stuck_side() {
        let board = Board::from_string(
            "W#------
             ##------
             --------
             --------
             --------
             --------
             --------
             -------B",
        )
        .unwrap();
        assert_eq!(perft_from(&board, Side::White, 3), 0);
    }
}
