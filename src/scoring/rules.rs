//! Heuristic fraud rules and their weights

use crate::types::transaction::Transaction;
use std::fmt;

/// A single additive risk rule.
///
/// Rules are evaluated in the order of [`RiskRule::ALL`]; the two amount
/// tiers are mutually exclusive so at most one of them fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RiskRule {
    HighAmount,
    MediumAmount,
    UnusualHour,
    HighVelocity,
    NewLocation,
    HighRiskCategory,
    RoundAmount,
}

impl RiskRule {
    /// Evaluation order: amount, time, velocity, location, category, round amount
    pub const ALL: [RiskRule; 7] = [
        RiskRule::HighAmount,
        RiskRule::MediumAmount,
        RiskRule::UnusualHour,
        RiskRule::HighVelocity,
        RiskRule::NewLocation,
        RiskRule::HighRiskCategory,
        RiskRule::RoundAmount,
    ];

    /// Points added to the risk score when the rule fires
    pub fn weight(self) -> u32 {
        match self {
            RiskRule::HighAmount => 35,
            RiskRule::MediumAmount => 20,
            RiskRule::UnusualHour => 25,
            RiskRule::HighVelocity => 30,
            RiskRule::NewLocation => 20,
            RiskRule::HighRiskCategory => 25,
            RiskRule::RoundAmount => 15,
        }
    }

    /// Human-readable indicator shown for a fired rule
    pub fn description(self) -> &'static str {
        match self {
            RiskRule::HighAmount => "High amount transaction (>₹50,000)",
            RiskRule::MediumAmount => "Medium amount transaction (>₹25,000)",
            RiskRule::UnusualHour => "Unusual transaction time (11 PM - 5 AM)",
            RiskRule::HighVelocity => "High transaction velocity (>5 txns/hour)",
            RiskRule::NewLocation => "New location detected",
            RiskRule::HighRiskCategory => "High-risk merchant category",
            RiskRule::RoundAmount => "Round amount transaction",
        }
    }

    /// Whether the rule fires for the given transaction
    pub fn matches(self, tx: &Transaction) -> bool {
        match self {
            RiskRule::HighAmount => tx.amount > 50_000,
            RiskRule::MediumAmount => tx.amount > 25_000 && tx.amount <= 50_000,
            RiskRule::UnusualHour => {
                let hour = tx.hour();
                hour >= 23 || hour <= 5
            }
            RiskRule::HighVelocity => tx.velocity > 5,
            RiskRule::NewLocation => tx.is_new_location,
            RiskRule::HighRiskCategory => tx.category.is_high_risk(),
            RiskRule::RoundAmount => tx.amount % 10_000 == 0 && tx.amount > 10_000,
        }
    }

    /// Rules that fire for the transaction, in evaluation order
    pub fn fired(tx: &Transaction) -> impl Iterator<Item = RiskRule> + '_ {
        RiskRule::ALL.into_iter().filter(move |rule| rule.matches(tx))
    }
}

impl fmt::Display for RiskRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}
