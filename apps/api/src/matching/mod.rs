//! Matching: pair scoring, ranking and per-pair analysis.

pub mod breakdown;
pub mod engine;
pub mod ranker;

pub use breakdown::MatchBreakdown;
pub use engine::{MatchScorer, WeightedScorer};
