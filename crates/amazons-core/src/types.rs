//! Common type aliases used throughout the engine.

/// Search depth in plies.
pub type Depth = u32;

/// Evaluation score from the searching side's point of view.
pub type Score = f64;
