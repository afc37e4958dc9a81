//! Difficulty levels and search depth scheduling.

use crate::eval::Weights;
use crate::types::Depth;

/// A difficulty level: a named set of evaluation weights.
///
/// All levels share the ply-count depth schedule of [`depth_for_plies`];
/// they differ only in how positions are judged.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Level {
    pub name: &'static str,
    pub weights: Weights,
}

/// Retrieves the configuration for a specific difficulty level.
///
/// # Arguments
///
/// * `lv` - The level index (0-2), where 0 is the weakest and 2 is the strongest.
///
/// # Panics
///
/// Panics if `lv` is outside the valid range of 0-2.
pub fn get_level(lv: usize) -> Level {
    if lv >= LEVELS.len() {
        panic!(
            "Invalid level: {}. Valid range is 0 to {}",
            lv,
            LEVELS.len() - 1
        );
    }
    LEVELS[lv]
}

/// Number of available levels.
pub const NUM_LEVELS: usize = LEVELS.len();

const LEVELS: [Level; 3] = [
    Level { name: "easy", weights: Weights::EASY },
    Level { name: "medium", weights: Weights::MEDIUM },
    Level { name: "hard", weights: Weights::HARD },
];

/// Returns the search depth for a game that has `plies` completed plies.
///
/// The board empties out slowly at first, so early positions get shallow
/// searches and the depth grows as the branching factor drops.
#[rustfmt::skip]
pub fn depth_for_plies(plies: usize) -> Depth {
    match plies {
        0..6   => 1,
        6..24  => 2,
        24..48 => 3,
        _      => 4,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_level_valid_range() {
        for (i, &expected_level) in LEVELS.iter().enumerate() {
            assert_eq!(get_level(i), expected_level);
        }
        assert_eq!(get_level(2).weights, Weights::default());
    }

    #[test]
    #[should_panic(expected = "Invalid level")]
    fn test_get_level_out_of_range() {
        get_level(NUM_LEVELS);
    }

    #[test]
    fn test_depth_schedule() {
        assert_eq!(depth_for_plies(0), 1);
        assert_eq!(depth_for_plies(5), 1);
        assert_eq!(depth_for_plies(6), 2);
        assert_eq!(depth_for_plies(23), 2);
        assert_eq!(depth_for_plies(24), 3);
        assert_eq!(depth_for_plies(47), 3);
        assert_eq!(depth_for_plies(48), 4);
        assert_eq!(depth_for_plies(92), 4);
    }
}
