//! UPI Fraud Detection Library
//!
//! Simulates UPI payments and scores each one with an additive rule set,
//! labelling it legitimate, suspicious or fraudulent.

pub mod config;
pub mod dashboard;
pub mod error;
pub mod generator;
pub mod scoring;
pub mod types;

pub use config::AppConfig;
pub use dashboard::{BatchOutcome, Dashboard, Session};
pub use error::{ConfigError, InvalidTransaction};
pub use generator::TransactionGenerator;
pub use scoring::{RiskRule, RiskScorer};
pub use types::{Category, Classification, ScoredTransaction, ScoringResult, Transaction};
