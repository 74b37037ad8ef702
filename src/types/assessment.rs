//! Risk assessment data structures

use super::transaction::Transaction;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Upper bound of every risk score
pub const MAX_RISK_SCORE: u8 = 100;

/// Three-way verdict derived from a risk score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Classification {
    Legitimate,
    Suspicious,
    Fraud,
}

impl Classification {
    /// Determine classification from score and thresholds.
    ///
    /// Both bounds are strict: a score equal to a threshold stays in the
    /// lower class.
    pub fn from_score(score: u8, thresholds: &ClassificationThresholds) -> Self {
        if score > thresholds.fraud {
            Classification::Fraud
        } else if score > thresholds.suspicious {
            Classification::Suspicious
        } else {
            Classification::Legitimate
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Classification::Legitimate => "LEGITIMATE",
            Classification::Suspicious => "SUSPICIOUS",
            Classification::Fraud => "FRAUD",
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Configurable classification thresholds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassificationThresholds {
    /// Scores above this are at least SUSPICIOUS
    pub suspicious: u8,
    /// Scores above this are FRAUD
    pub fraud: u8,
}

impl Default for ClassificationThresholds {
    fn default() -> Self {
        Self {
            suspicious: 40,
            fraud: 60,
        }
    }
}

/// Output of the risk scorer for one transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringResult {
    /// Saturated rule sum (0 - 100)
    pub risk_score: u8,

    pub classification: Classification,

    /// Descriptions of the rules that fired, in evaluation order
    pub triggered_rules: Vec<String>,
}

/// A transaction together with the verdict the scorer attached to it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoredTransaction {
    #[serde(flatten)]
    pub transaction: Transaction,

    #[serde(flatten)]
    pub result: ScoringResult,
}

impl ScoredTransaction {
    pub fn new(transaction: Transaction, result: ScoringResult) -> Self {
        Self {
            transaction,
            result,
        }
    }

    pub fn classification(&self) -> Classification {
        self.result.classification
    }
}
