//! Heuristic position evaluation.
//!
//! Scores are always computed from the point of view of the side the engine
//! plays. The terms are mobility, arrow flexibility, and either territory
//! (once a side is sealed off) or center control plus piece dispersion.

use serde::{Deserialize, Serialize};

use crate::all_moves::AllMoves;
use crate::board::Board;
use crate::constants::SCORE_DECISIVE;
use crate::side::Side;
use crate::square::Square;
use crate::types::Score;

/// Normalizer of the mobility term.
const MOBILITY_SCALE: f64 = 4.0 * 27.0;
/// Normalizer of the arrow flexibility term.
const SHOOT_SCALE: f64 = 4.0 * 27.0 * 27.0;
const TERRITORY_SCALE: f64 = 54.0;
const CENTER_SCALE: f64 = 28.0;
const DISPERSION_SCALE: f64 = 56.0;
const CENTER: f64 = 3.5;

/// Tunable evaluation weights, one instance per AI player.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Weights {
    pub mobility_weight: f64,
    pub mobility_exponent: f64,
    pub shoot_flexibility_weight: f64,
    pub shoot_exponent: f64,
    pub territory_weight: f64,
    pub center_control_weight: f64,
    pub dispersion_weight: f64,
}

impl Weights {
    pub const EASY: Weights = Weights::new(1.90, 0.147, 0.604, 0.108, 2.00, 0.222, 0.61);
    pub const MEDIUM: Weights = Weights::new(1.75, 0.0357, 0.939, 0.184, 2.00, 0.623, 0.80);
    pub const HARD: Weights = Weights::new(1.00, 0.500, 0.600, 0.400, 2.00, 0.500, 0.300);

    #[allow(clippy::too_many_arguments)]
    pub const fn new(
        mobility_weight: f64,
        mobility_exponent: f64,
        shoot_flexibility_weight: f64,
        shoot_exponent: f64,
        territory_weight: f64,
        center_control_weight: f64,
        dispersion_weight: f64,
    ) -> Weights {
        Weights {
            mobility_weight,
            mobility_exponent,
            shoot_flexibility_weight,
            shoot_exponent,
            territory_weight,
            center_control_weight,
            dispersion_weight,
        }
    }
}

impl Default for Weights {
    fn default() -> Self {
        Weights::HARD
    }
}

/// Position evaluator bound to one set of weights.
#[derive(Debug, Clone, Copy, Default)]
pub struct Eval {
    weights: Weights,
}

impl Eval {
    pub fn new(weights: Weights) -> Eval {
        Eval { weights }
    }

    /// Scores `board` for `side`. Positive values favour `side`.
    ///
    /// # Arguments
    ///
    /// * `board` - Position to score
    /// * `side` - Side the score is computed for
    /// * `include_enclosed` - Whether enclosed pieces count toward mobility
    ///   regardless of the phase
    pub fn evaluate(&self, board: &Board, side: Side, include_enclosed: bool) -> Score {
        let mut own = AllMoves::new(board, side, include_enclosed);
        let mut opp = AllMoves::new(board, side.opposite(), include_enclosed);
        if !include_enclosed && own.is_endgame() && opp.is_endgame() {
            own = AllMoves::new(board, side, true);
            opp = AllMoves::new(board, side.opposite(), true);
        }

        let w = &self.weights;
        let mut score = power_diff(own.move_opts, opp.move_opts, w.mobility_exponent)
            * w.mobility_weight
            / MOBILITY_SCALE;
        score += power_diff(own.shoot_opts, opp.shoot_opts, w.shoot_exponent)
            * w.shoot_flexibility_weight
            / SHOOT_SCALE;

        if own.is_endgame() || opp.is_endgame() {
            score += (own.territory() - opp.territory()) as f64 * w.territory_weight
                / TERRITORY_SCALE;
        } else {
            let center: f64 = opp.positions.iter().map(|&sq| center_distance(sq)).sum::<f64>()
                - own.positions.iter().map(|&sq| center_distance(sq)).sum::<f64>();
            score += center / CENTER_SCALE * w.center_control_weight;

            let spread = pair_distance_sum(&own.positions) - pair_distance_sum(&opp.positions);
            score += spread as f64 * w.dispersion_weight / DISPERSION_SCALE;
        }

        if opp.move_opts == 0 {
            score += SCORE_DECISIVE;
        }
        if own.move_opts == 0 {
            score -= SCORE_DECISIVE;
        }
        score
    }
}

/// `sign(a - b) * |a - b|^exponent`
fn power_diff(a: u32, b: u32, exponent: f64) -> f64 {
    let diff = a as f64 - b as f64;
    diff.abs().powf(exponent).copysign(if diff < 0.0 { -1.0 } else { 1.0 })
}

fn center_distance(sq: Square) -> f64 {
    (sq.row() as f64 - CENTER).abs() + (sq.col() as f64 - CENTER).abs()
}

fn manhattan(a: Square, b: Square) -> i32 {
    let (ar, ac) = a.coords();
    let (br, bc) = b.coords();
    (ar - br).abs() + (ac - bc).abs()
}

fn pair_distance_sum(positions: &[Square]) -> i32 {
    let mut sum = 0;
    for i in 0..positions.len() {
        for j in i + 1..positions.len() {
            sum += manhattan(positions[i], positions[j]);
        }
    }
    sum
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_position_is_balanced() {
        let eval = Eval::default();
        let board = Board::new();
        let white = eval.evaluate(&board, Side::White, false);
        let black = eval.evaluate(&board, Side::Black, false);
        assert!(white.abs() < 1e-9, "{white}");
        assert!(black.abs() < 1e-9, "{black}");
    }

    #[test]
    fn test_power_diff_sign() {
        assert_eq!(power_diff(5, 5, 0.5), 0.0);
        assert!((power_diff(13, 4, 0.5) - 3.0).abs() < 1e-12);
        assert!((power_diff(4, 13, 0.5) + 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_pair_distance_sum() {
        let board = Board::new();
        let white: Vec<Square> = board.pieces(Side::White).collect();
        // a6 h6 c8 f8
        assert_eq!(pair_distance_sum(&white), 7 + 4 + 7 + 7 + 4 + 3);
    }

    #[test]
    fn test_decisive_bonus_when_opponent_is_stuck() {
        let board = Board::from_string(
            "B#------
             ##------
             --------
             --------
             ---W----
             --------
             --------
             --------",
        )
        .unwrap();
        let eval = Eval::default();
        assert!(eval.evaluate(&board, Side::White, false) > SCORE_DECISIVE / 2.0);
        assert!(eval.evaluate(&board, Side::Black, false) < -SCORE_DECISIVE / 2.0);
    }

    #[test]
    fn test_territory_term_in_closed_position() {
        // White owns a 3-cell pocket, Black the 54 empty cells around it.
        let board = Board::from_string(
            "W-#-----
             --#-----
             ###-----
             --------
             --------
             --------
             --------
             -------B",
        )
        .unwrap();
        let weights = Weights {
            mobility_weight: 0.0,
            shoot_flexibility_weight: 0.0,
            ..Weights::HARD
        };
        let eval = Eval::new(weights);
        let expected = (3.0 - 54.0) * weights.territory_weight / TERRITORY_SCALE;
        // both sides are sealed off, so enclosed pieces count again
        let score = eval.evaluate(&board, Side::White, false);
        assert!((score - expected).abs() < 1e-9, "{score}");
        let black = eval.evaluate(&board, Side::Black, true);
        assert!((black + expected).abs() < 1e-9, "{black}");
    }

    #[test]
    fn test_weights_json_field_names() {
        let json = serde_json::to_string(&Weights::EASY).unwrap();
        assert!(json.contains("\"mobilityWeight\":1.9"));
        assert!(json.contains("\"shootFlexibilityWeight\""));
        assert!(json.contains("\"centerControlWeight\""));
        let back: Weights = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Weights::EASY);
    }
}
