use crate::eval::Weights;
use crate::level::{self, Level};
use crate::side::Side;
use crate::types::Depth;

/// How the midgame search depth is chosen for a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DepthPolicy {
    /// Grow the depth with the number of plies played, see
    /// [`level::depth_for_plies`].
    #[default]
    PlyCount,
    /// Always search this many plies.
    Fixed(Depth),
}

impl DepthPolicy {
    /// Returns the depth to search after `plies` completed plies.
    pub fn depth(self, plies: usize) -> Depth {
        match self {
            DepthPolicy::PlyCount => level::depth_for_plies(plies),
            DepthPolicy::Fixed(depth) => depth.max(1),
        }
    }
}

/// Configuration of one AI player.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchOptions {
    pub side: Side,
    pub weights: Weights,
    pub depth_policy: DepthPolicy,
}

impl SearchOptions {
    /// Creates options for `side` with the default weights and depth schedule.
    #[must_use]
    pub fn new(side: Side) -> Self {
        SearchOptions {
            side,
            weights: Weights::default(),
            depth_policy: DepthPolicy::default(),
        }
    }

    /// Uses the weights of a difficulty level.
    #[must_use]
    pub fn with_level(mut self, level: Level) -> Self {
        self.weights = level.weights;
        self
    }

    /// Overrides the depth schedule with a fixed depth when one is given.
    #[must_use]
    pub fn with_depth(mut self, depth: Option<Depth>) -> Self {
        if let Some(depth) = depth {
            self.depth_policy = DepthPolicy::Fixed(depth);
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_depth_policy() {
        assert_eq!(DepthPolicy::PlyCount.depth(0), 1);
        assert_eq!(DepthPolicy::PlyCount.depth(30), 3);
        assert_eq!(DepthPolicy::Fixed(2).depth(0), 2);
        assert_eq!(DepthPolicy::Fixed(0).depth(50), 1);
    }

    #[test]
    fn test_builders() {
        let options = SearchOptions::new(Side::Black)
            .with_level(level::get_level(0))
            .with_depth(None);
        assert_eq!(options.weights, Weights::EASY);
        assert_eq!(options.depth_policy, DepthPolicy::PlyCount);
        let options = options.with_depth(Some(3));
        assert_eq!(options.depth_policy, DepthPolicy::Fixed(3));
    }
}
