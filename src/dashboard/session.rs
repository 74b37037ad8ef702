//! Session state for the dashboard: scored history and running counters.

use crate::types::assessment::{Classification, ScoredTransaction};
use serde::Serialize;
use std::collections::VecDeque;
use tracing::info;

/// Running counters over everything recorded in a session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SessionStats {
    pub total: u64,
    pub fraud: u64,
    pub suspicious: u64,
    pub legitimate: u64,
}

impl SessionStats {
    fn record(&mut self, classification: Classification) {
        self.total += 1;
        match classification {
            Classification::Fraud => self.fraud += 1,
            Classification::Suspicious => self.suspicious += 1,
            Classification::Legitimate => self.legitimate += 1,
        }
    }

    /// Count for one classification
    pub fn count(&self, classification: Classification) -> u64 {
        match classification {
            Classification::Fraud => self.fraud,
            Classification::Suspicious => self.suspicious,
            Classification::Legitimate => self.legitimate,
        }
    }

    /// Share of the session total in percent
    pub fn rate(&self, classification: Classification) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.count(classification) as f64 / self.total as f64 * 100.0
    }
}

/// Scored transactions of one dashboard session, newest first.
///
/// Owned by the shell and handed to its handlers; the scorer and the
/// generator never see it.
#[derive(Debug, Default)]
pub struct Session {
    transactions: VecDeque<ScoredTransaction>,
    stats: SessionStats,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a scored transaction at the front of the history
    pub fn record(&mut self, scored: ScoredTransaction) -> &ScoredTransaction {
        self.stats.record(scored.classification());
        self.transactions.push_front(scored);
        &self.transactions[0]
    }

    /// Drop the history and zero all counters
    pub fn clear(&mut self) {
        let dropped = self.transactions.len();
        self.transactions.clear();
        self.stats = SessionStats::default();
        info!(dropped = dropped, "Session cleared");
    }

    /// At most `limit` most recent transactions, newest first
    pub fn recent(&self, limit: usize) -> impl Iterator<Item = &ScoredTransaction> {
        self.transactions.iter().take(limit)
    }

    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// Log summary statistics
    pub fn log_summary(&self) {
        let stats = &self.stats;
        info!(
            total = stats.total,
            fraud = stats.fraud,
            suspicious = stats.suspicious,
            legitimate = stats.legitimate,
            "Session summary"
        );
        for classification in [
            Classification::Fraud,
            Classification::Suspicious,
            Classification::Legitimate,
        ] {
            info!(
                "  {:10}: {:>6} ({:>5.1}%)",
                classification.as_str(),
                stats.count(classification),
                stats.rate(classification)
            );
        }
    }
}
