//! Heuristic risk scoring components

pub mod engine;
pub mod rules;

pub use engine::RiskScorer;
pub use rules::RiskRule;
