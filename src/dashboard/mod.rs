//! Dashboard shell: composes the generator and the scorer over a session

pub mod render;
pub mod session;

pub use session::{Session, SessionStats};

use crate::config::AppConfig;
use crate::error::{InvalidTransaction, ScoringOutcome};
use crate::generator::TransactionGenerator;
use crate::scoring::RiskScorer;
use crate::types::assessment::ScoredTransaction;
use crate::types::transaction::Transaction;
use rand::rngs::StdRng;
use rand::Rng;
use tracing::{error, info};

/// Result of scoring a batch of JSON records
#[derive(Debug, Default)]
pub struct BatchOutcome {
    /// Accepted records in input order
    pub scored: Vec<ScoredTransaction>,
    /// Position in the input and reason for every rejected record
    pub rejected: Vec<(usize, InvalidTransaction)>,
}

impl BatchOutcome {
    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty()
    }
}

/// Handlers behind the dashboard's simulate and submit actions.
///
/// The session is passed in by the caller on every call.
pub struct Dashboard<R = StdRng> {
    generator: TransactionGenerator<R>,
    scorer: RiskScorer,
}

impl Dashboard<StdRng> {
    /// Build generator and scorer from configuration
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            TransactionGenerator::new(config.generator.clone()),
            RiskScorer::with_thresholds(config.detection.thresholds),
        )
    }
}

impl<R: Rng> Dashboard<R> {
    pub fn new(generator: TransactionGenerator<R>, scorer: RiskScorer) -> Self {
        Self { generator, scorer }
    }

    pub fn scorer(&self) -> &RiskScorer {
        &self.scorer
    }

    /// Generate one transaction, score it and record it in the session
    pub fn simulate<'s>(&mut self, session: &'s mut Session) -> ScoringOutcome<&'s ScoredTransaction> {
        let tx = self.generator.generate();
        self.submit(session, tx)
    }

    /// Score an externally supplied transaction and record it
    pub fn submit<'s>(
        &self,
        session: &'s mut Session,
        tx: Transaction,
    ) -> ScoringOutcome<&'s ScoredTransaction> {
        let scored = self.scorer.assess(tx)?;

        info!(
            transaction_id = %scored.transaction.id,
            risk_score = scored.result.risk_score,
            classification = %scored.result.classification,
            "Transaction processed"
        );

        Ok(session.record(scored))
    }

    /// Decode JSON records, then score and record every valid one.
    ///
    /// Bad records are collected with their input position rather than
    /// stopping the batch.
    pub fn submit_all(&self, session: &mut Session, input: &str) -> BatchOutcome {
        let mut outcome = BatchOutcome::default();

        for (index, record) in Transaction::parse_records(input).into_iter().enumerate() {
            match record.and_then(|tx| self.submit(session, tx).cloned()) {
                Ok(scored) => outcome.scored.push(scored),
                Err(e) => {
                    error!(record = index, error = %e, "Invalid transaction");
                    outcome.rejected.push((index, e));
                }
            }
        }

        outcome
    }
}
