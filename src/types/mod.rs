//! Type definitions for transactions and their risk assessments

pub mod assessment;
pub mod transaction;

pub use assessment::{
    Classification, ClassificationThresholds, ScoredTransaction, ScoringResult, MAX_RISK_SCORE,
};
pub use transaction::{Category, Transaction};
