//! Terminal rendering of scored transactions and session counters

use crate::dashboard::session::{Session, SessionStats};
use crate::types::assessment::{Classification, ScoredTransaction, MAX_RISK_SCORE};
use colored::{Color, Colorize};
use std::fmt::Write;

/// Visual treatment for one classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Treatment {
    pub icon: &'static str,
    pub color: Color,
}

impl Treatment {
    pub fn for_classification(classification: Classification) -> Self {
        match classification {
            Classification::Fraud => Self {
                icon: "🚨",
                color: Color::Red,
            },
            Classification::Suspicious => Self {
                icon: "⚠️",
                color: Color::Yellow,
            },
            Classification::Legitimate => Self {
                icon: "✅",
                color: Color::Green,
            },
        }
    }
}

/// Format whole rupees with thousands separators, e.g. `₹60,000`
pub fn format_amount(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if amount < 0 {
        format!("-₹{grouped}")
    } else {
        format!("₹{grouped}")
    }
}

/// Render one transaction card
pub fn render_card(scored: &ScoredTransaction) -> String {
    let tx = &scored.transaction;
    let result = &scored.result;
    let treatment = Treatment::for_classification(result.classification);

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} {} | Risk Score: {}/{}",
        treatment.icon,
        result.classification.as_str().color(treatment.color).bold(),
        result.risk_score,
        MAX_RISK_SCORE
    );
    let _ = writeln!(
        out,
        "   🆔 {} | ⏰ {}",
        tx.id,
        tx.timestamp.format("%Y-%m-%d %H:%M:%S")
    );
    let _ = writeln!(out, "   💰 {} → {}", format_amount(tx.amount), tx.merchant);
    let _ = writeln!(out, "   📍 {} | 🏦 {}", tx.location, tx.account_identifier);
    let _ = writeln!(
        out,
        "   Category: {} | ⚡ Velocity: {}/hr",
        tx.category, tx.velocity
    );

    if !result.triggered_rules.is_empty() {
        let _ = writeln!(out, "   🔍 Fraud Indicators:");
        for rule in &result.triggered_rules {
            let _ = writeln!(out, "     - ⚠️ {rule}");
        }
    }

    out
}

/// Render the four metric tiles
pub fn render_stats(stats: &SessionStats) -> String {
    format!(
        "📊 Total Transactions: {}   🚨 Fraud Detected: {}   ⚠️ Flagged for Review: {}   ✅ Legitimate: {}",
        stats.total,
        stats.fraud.to_string().red(),
        stats.suspicious.to_string().yellow(),
        stats.legitimate.to_string().green()
    )
}

/// Render the whole dashboard: tiles, then the most recent cards
pub fn render_dashboard(session: &Session, display_limit: usize) -> String {
    let mut out = render_stats(session.stats());
    out.push_str("\n\n");

    if session.is_empty() {
        out.push_str("👆 Run `simulate` to start monitoring\n");
        return out;
    }

    out.push_str("🔍 Recent Transactions\n\n");
    for scored in session.recent(display_limit) {
        out.push_str(&render_card(scored));
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::RiskScorer;
    use crate::types::transaction::{Category, Transaction};
    use chrono::NaiveDate;

    fn fraud_card() -> ScoredTransaction {
        let timestamp = NaiveDate::from_ymd_opt(2024, 3, 15)
            .unwrap()
            .and_hms_opt(2, 5, 9)
            .unwrap();
        let tx = Transaction::new("TXN1710000000000123", 60_000, Category::Crypto, timestamp)
            .with_merchant("Crypto Exchange")
            .with_location("International")
            .with_velocity(7)
            .with_new_location(true);
        RiskScorer::new().assess(tx).unwrap()
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(0), "₹0");
        assert_eq!(format_amount(999), "₹999");
        assert_eq!(format_amount(1000), "₹1,000");
        assert_eq!(format_amount(60_000), "₹60,000");
        assert_eq!(format_amount(1_234_567), "₹1,234,567");
        assert_eq!(format_amount(-2500), "-₹2,500");
    }

    #[test]
    fn test_treatments_are_distinct() {
        let fraud = Treatment::for_classification(Classification::Fraud);
        let suspicious = Treatment::for_classification(Classification::Suspicious);
        let legit = Treatment::for_classification(Classification::Legitimate);

        assert_ne!(fraud, suspicious);
        assert_ne!(suspicious, legit);
        assert_eq!(fraud.color, Color::Red);
    }

    #[test]
    fn test_render_card_contents() {
        colored::control::set_override(false);
        let card = render_card(&fraud_card());

        assert!(card.contains("🚨 FRAUD | Risk Score: 100/100"));
        assert!(card.contains("2024-03-15 02:05:09"));
        assert!(card.contains("₹60,000 → Crypto Exchange"));
        assert!(card.contains("Velocity: 7/hr"));
        assert_eq!(card.matches("     - ⚠️ ").count(), 6);
    }

    #[test]
    fn test_render_empty_dashboard() {
        colored::control::set_override(false);
        let out = render_dashboard(&Session::new(), 10);

        assert!(out.contains("Total Transactions: 0"));
        assert!(out.contains("simulate"));
        assert!(!out.contains("Recent Transactions"));
    }
}
