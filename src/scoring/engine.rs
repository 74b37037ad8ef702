//! Rule-based risk scoring engine

use crate::error::{InvalidTransaction, ScoringOutcome};
use crate::scoring::rules::RiskRule;
use crate::types::assessment::{
    Classification, ClassificationThresholds, ScoredTransaction, ScoringResult, MAX_RISK_SCORE,
};
use crate::types::transaction::Transaction;
use tracing::debug;

/// Scores transactions with the additive heuristic rule set.
///
/// The scorer holds no per-transaction state; scoring the same record twice
/// yields the same result.
#[derive(Debug, Clone, Default)]
pub struct RiskScorer {
    thresholds: ClassificationThresholds,
}

impl RiskScorer {
    /// Create a scorer with the default 40 / 60 thresholds
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a scorer with custom classification thresholds
    pub fn with_thresholds(thresholds: ClassificationThresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> &ClassificationThresholds {
        &self.thresholds
    }

    /// Score a single transaction.
    ///
    /// Fails only when the record violates the input contract
    /// (empty id, non-positive amount).
    pub fn score(&self, tx: &Transaction) -> ScoringOutcome<ScoringResult> {
        validate(tx)?;

        let mut raw_score = 0u32;
        let mut triggered_rules = Vec::new();

        for rule in RiskRule::fired(tx) {
            raw_score += rule.weight();
            triggered_rules.push(rule.description().to_string());
        }

        let risk_score = raw_score.min(u32::from(MAX_RISK_SCORE)) as u8;
        let classification = Classification::from_score(risk_score, &self.thresholds);

        debug!(
            transaction_id = %tx.id,
            raw_score = raw_score,
            risk_score = risk_score,
            classification = %classification,
            rules = triggered_rules.len(),
            "Transaction scored"
        );

        Ok(ScoringResult {
            risk_score,
            classification,
            triggered_rules,
        })
    }

    /// Score a transaction and attach the result to it
    pub fn assess(&self, tx: Transaction) -> ScoringOutcome<ScoredTransaction> {
        let result = self.score(&tx)?;
        Ok(ScoredTransaction::new(tx, result))
    }

    /// Decode a JSON record and score it
    pub fn assess_json(&self, json: &str) -> ScoringOutcome<ScoredTransaction> {
        let tx: Transaction = serde_json::from_str(json)?;
        self.assess(tx)
    }

    /// Score a batch of transactions
    pub fn score_batch(&self, txs: &[Transaction]) -> Vec<ScoringOutcome<ScoringResult>> {
        txs.iter().map(|tx| self.score(tx)).collect()
    }
}

fn validate(tx: &Transaction) -> ScoringOutcome<()> {
    if tx.id.trim().is_empty() {
        return Err(InvalidTransaction::MissingField("id"));
    }
    if tx.amount <= 0 {
        return Err(InvalidTransaction::NonPositiveAmount {
            id: tx.id.clone(),
            amount: tx.amount,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::transaction::Category;
    use chrono::NaiveDate;

    fn tx(amount: i64, hour: u32, category: Category) -> Transaction {
        let timestamp = NaiveDate::from_ymd_opt(2024, 3, 15)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap();
        Transaction::new("TXN_TEST", amount, category, timestamp)
    }

    #[test]
    fn test_all_rules_saturate() {
        let scorer = RiskScorer::new();
        let tx = tx(60_000, 2, Category::Crypto)
            .with_velocity(7)
            .with_new_location(true);

        let result = scorer.score(&tx).unwrap();

        assert_eq!(result.risk_score, 100);
        assert_eq!(result.classification, Classification::Fraud);
        assert_eq!(
            result.triggered_rules,
            vec![
                RiskRule::HighAmount.description(),
                RiskRule::UnusualHour.description(),
                RiskRule::HighVelocity.description(),
                RiskRule::NewLocation.description(),
                RiskRule::HighRiskCategory.description(),
                RiskRule::RoundAmount.description(),
            ]
        );
    }

    #[test]
    fn test_clean_transaction() {
        let scorer = RiskScorer::new();
        let result = scorer
            .score(&tx(500, 14, Category::Food).with_velocity(1))
            .unwrap();

        assert_eq!(result.risk_score, 0);
        assert_eq!(result.classification, Classification::Legitimate);
        assert!(result.triggered_rules.is_empty());
    }

    #[test]
    fn test_medium_amount_only() {
        let scorer = RiskScorer::new();
        let result = scorer
            .score(&tx(30_000, 12, Category::Shopping).with_velocity(1))
            .unwrap();

        assert_eq!(result.risk_score, 20);
        assert_eq!(result.classification, Classification::Legitimate);
        assert_eq!(
            result.triggered_rules,
            vec![RiskRule::MediumAmount.description()]
        );
    }

    #[test]
    fn test_rejects_non_positive_amount() {
        let scorer = RiskScorer::new();

        for amount in [0, -500] {
            let err = scorer.score(&tx(amount, 12, Category::Food)).unwrap_err();
            assert!(matches!(
                err,
                InvalidTransaction::NonPositiveAmount { amount: a, .. } if a == amount
            ));
        }
    }

    #[test]
    fn test_rejects_missing_id() {
        let scorer = RiskScorer::new();
        let mut record = tx(500, 12, Category::Food);
        record.id = "  ".to_string();

        let err = scorer.score(&record).unwrap_err();
        assert!(matches!(err, InvalidTransaction::MissingField("id")));
    }

    #[test]
    fn test_assess_json_malformed_timestamp() {
        let scorer = RiskScorer::new();
        let json = r#"{
            "id": "TXN_BAD",
            "amount": 500,
            "merchant": "Paytm",
            "category": "bills",
            "timestamp": "yesterday",
            "account_identifier": "user100@sbi",
            "location": "Delhi",
            "device_id": "DEV1111",
            "ip_address": "8.8.8.8"
        }"#;

        let err = scorer.assess_json(json).unwrap_err();
        assert!(matches!(err, InvalidTransaction::Malformed(_)));
    }

    #[test]
    fn test_custom_thresholds_change_only_classification() {
        let strict = RiskScorer::with_thresholds(ClassificationThresholds {
            suspicious: 10,
            fraud: 30,
        });
        let record = tx(30_000, 12, Category::Shopping);

        let default_result = RiskScorer::new().score(&record).unwrap();
        let strict_result = strict.score(&record).unwrap();

        assert_eq!(default_result.risk_score, strict_result.risk_score);
        assert_eq!(strict_result.classification, Classification::Suspicious);
    }

    #[test]
    fn test_score_batch_preserves_order() {
        let scorer = RiskScorer::new();
        let batch = vec![
            tx(500, 14, Category::Food),
            tx(0, 14, Category::Food),
            tx(60_000, 14, Category::Shopping),
        ];

        let results = scorer.score_batch(&batch);

        assert_eq!(results.len(), 3);
        assert_eq!(results[0].as_ref().unwrap().risk_score, 0);
        assert!(results[1].is_err());
        assert_eq!(results[2].as_ref().unwrap().risk_score, 50);
    }
}
