//! Error types for transaction scoring and configuration.

use thiserror::Error;

/// Outcome of scoring one record.
pub type ScoringOutcome<T> = Result<T, InvalidTransaction>;

/// A transaction record that breaks the scorer's input contract.
///
/// Callers should treat this as a programming error in whatever produced
/// the record; retrying the same input yields the same error.
#[derive(Error, Debug)]
pub enum InvalidTransaction {
    /// A required identifying field is empty.
    #[error("transaction is missing required field `{0}`")]
    MissingField(&'static str),

    /// Amount is zero or negative.
    #[error("transaction {id}: amount must be positive, got {amount}")]
    NonPositiveAmount { id: String, amount: i64 },

    /// Record could not be decoded (missing field, wrong type, bad timestamp).
    #[error("malformed transaction record: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Configuration error type.
#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    /// Fraud-leaning profile rate is not a probability.
    #[error("generator.fraud_pattern_rate must be within [0, 1], got {0}")]
    InvalidFraudRate(f64),

    /// Back-date window is longer than the generator supports.
    #[error("generator.max_backdate_secs must be at most {max}, got {got}")]
    InvalidBackdate { got: u64, max: u64 },

    /// Classification thresholds are out of order or out of range.
    #[error("detection thresholds must satisfy suspicious < fraud <= 100, got suspicious={suspicious} fraud={fraud}")]
    InvalidThresholds { suspicious: u8, fraud: u8 },

    /// Dashboard would never show anything.
    #[error("dashboard.display_limit must be at least 1")]
    EmptyDisplay,
}
