//! Synthetic UPI transaction generator
//!
//! Produces one unscored transaction per call, drawing either from a normal
//! spending profile or, about 30% of the time, from a fraud-leaning profile.

use crate::config::{GeneratorConfig, MAX_BACKDATE_SECS};
use crate::types::transaction::{Category, Transaction};
use chrono::{DateTime, Duration, Local};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

const NORMAL_MERCHANTS: [&str; 6] = [
    "Amazon",
    "Flipkart",
    "Swiggy",
    "Zomato",
    "PhonePe Wallet",
    "Paytm",
];

const HIGH_RISK_MERCHANTS: [&str; 3] = ["Crypto Exchange", "Myntra", "BookMyShow"];

const NORMAL_CATEGORIES: [Category; 4] = [
    Category::Shopping,
    Category::Food,
    Category::P2pTransfer,
    Category::Bills,
];

const HIGH_RISK_CATEGORIES: [Category; 4] = [
    Category::Crypto,
    Category::Gambling,
    Category::Entertainment,
    Category::Unknown,
];

const KNOWN_CITIES: [&str; 7] = [
    "Mumbai",
    "Delhi",
    "Bangalore",
    "Hyderabad",
    "Chennai",
    "Pune",
    "Kolkata",
];

const UNTRACKED_LOCATIONS: [&str; 2] = ["Unknown", "International"];

const BANK_HANDLES: [&str; 6] = ["sbi", "hdfc", "icici", "axis", "pnb", "kotak"];

/// Sampling profile chosen for a generated transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    Normal,
    FraudLeaning,
}

/// Transaction generator with an injected random source
pub struct TransactionGenerator<R = StdRng> {
    config: GeneratorConfig,
    rng: R,
}

impl TransactionGenerator<StdRng> {
    /// Create a generator, seeded from `config.seed` when set and from
    /// OS entropy otherwise
    pub fn new(config: GeneratorConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { config, rng }
    }

    /// Create a reproducible generator with default settings
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(GeneratorConfig::default(), StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> TransactionGenerator<R> {
    /// Create a generator drawing from the given random source
    pub fn with_rng(config: GeneratorConfig, rng: R) -> Self {
        Self { config, rng }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generate a transaction stamped relative to the current local time
    pub fn generate(&mut self) -> Transaction {
        self.generate_at(Local::now())
    }

    /// Generate a transaction stamped relative to `now`
    pub fn generate_at(&mut self, now: DateTime<Local>) -> Transaction {
        let profile = self.pick_profile();
        let tx = match profile {
            Profile::FraudLeaning => self.fraud_leaning(now),
            Profile::Normal => self.normal(now),
        };

        debug!(
            transaction_id = %tx.id,
            profile = ?profile,
            amount = tx.amount,
            category = %tx.category,
            "Generated transaction"
        );

        tx
    }

    fn pick_profile(&mut self) -> Profile {
        let cutoff = 1.0 - self.config.fraud_pattern_rate;
        if self.rng.gen::<f64>() > cutoff {
            Profile::FraudLeaning
        } else {
            Profile::Normal
        }
    }

    fn fraud_leaning(&mut self, now: DateTime<Local>) -> Transaction {
        let amount = self.rng.gen_range(20_000..=85_000);
        let merchant = self.random_choice(&HIGH_RISK_MERCHANTS);
        let category = self.random_choice(&HIGH_RISK_CATEGORIES);
        let location = self.random_choice(&UNTRACKED_LOCATIONS);
        let velocity = self.rng.gen_range(4..=10);
        let is_new_location = self.rng.gen_bool(0.5);

        self.assemble(now, amount, merchant, category, location, velocity, is_new_location)
    }

    fn normal(&mut self, now: DateTime<Local>) -> Transaction {
        let amount = self.rng.gen_range(100..=15_000);
        let merchant = self.random_choice(&NORMAL_MERCHANTS);
        let category = self.random_choice(&NORMAL_CATEGORIES);
        let location = self.random_choice(&KNOWN_CITIES);
        let velocity = self.rng.gen_range(1..=3);

        self.assemble(now, amount, merchant, category, location, velocity, false)
    }

    #[allow(clippy::too_many_arguments)]
    fn assemble(
        &mut self,
        now: DateTime<Local>,
        amount: i64,
        merchant: &str,
        category: Category,
        location: &str,
        velocity: u32,
        is_new_location: bool,
    ) -> Transaction {
        let window = self.config.max_backdate_secs.min(MAX_BACKDATE_SECS);
        let backdate = i64::try_from(self.rng.gen_range(0..=window)).unwrap_or(0);
        let timestamp = (now - Duration::seconds(backdate)).naive_local();
        let bank = self.random_choice(&BANK_HANDLES);

        Transaction {
            id: format!(
                "TXN{}{}",
                now.timestamp_millis(),
                self.rng.gen_range(100..=999)
            ),
            amount,
            merchant: merchant.to_string(),
            category,
            timestamp,
            account_identifier: format!("user{}@{}", self.rng.gen_range(100..=9999), bank),
            location: location.to_string(),
            velocity,
            is_new_location,
            device_id: format!("DEV{}", self.rng.gen_range(1000..=9999)),
            ip_address: format!(
                "{}.{}.{}.{}",
                self.rng.gen_range(1..=255),
                self.rng.gen_range(1..=255),
                self.rng.gen_range(1..=255),
                self.rng.gen_range(1..=255)
            ),
        }
    }

    fn random_choice<T: Copy>(&mut self, choices: &[T]) -> T {
        choices[self.rng.gen_range(0..choices.len())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_fraud_leaning(tx: &Transaction) -> bool {
        UNTRACKED_LOCATIONS.contains(&tx.location.as_str())
    }

    #[test]
    fn test_seeded_generators_agree() {
        let now = Local::now();
        let mut a = TransactionGenerator::seeded(7);
        let mut b = TransactionGenerator::seeded(7);

        for _ in 0..20 {
            assert_eq!(a.generate_at(now), b.generate_at(now));
        }
    }

    #[test]
    fn test_profiles_stay_in_range() {
        let now = Local::now();
        let mut generator = TransactionGenerator::seeded(42);

        for _ in 0..500 {
            let tx = generator.generate_at(now);

            if is_fraud_leaning(&tx) {
                assert!((20_000..=85_000).contains(&tx.amount));
                assert!((4..=10).contains(&tx.velocity));
                assert!(HIGH_RISK_MERCHANTS.contains(&tx.merchant.as_str()));
                assert!(HIGH_RISK_CATEGORIES.contains(&tx.category));
            } else {
                assert!((100..=15_000).contains(&tx.amount));
                assert!((1..=3).contains(&tx.velocity));
                assert!(!tx.is_new_location);
                assert!(NORMAL_MERCHANTS.contains(&tx.merchant.as_str()));
                assert!(NORMAL_CATEGORIES.contains(&tx.category));
                assert!(KNOWN_CITIES.contains(&tx.location.as_str()));
            }
        }
    }

    #[test]
    fn test_timestamp_backdated_within_window() {
        let now = Local::now();
        let mut generator = TransactionGenerator::seeded(3);

        for _ in 0..200 {
            let tx = generator.generate_at(now);
            let offset = now.naive_local() - tx.timestamp;
            assert!(offset >= Duration::zero());
            assert!(offset <= Duration::seconds(300));
        }
    }

    #[test]
    fn test_oversized_backdate_is_clamped() {
        let config = GeneratorConfig {
            max_backdate_secs: u64::MAX,
            ..GeneratorConfig::default()
        };
        let mut generator = TransactionGenerator::with_rng(config, StdRng::seed_from_u64(8));
        let now = Local::now();

        for _ in 0..100 {
            let offset = now.naive_local() - generator.generate_at(now).timestamp;
            assert!(offset >= Duration::zero());
            assert!(offset <= Duration::seconds(MAX_BACKDATE_SECS as i64));
        }
    }

    #[test]
    fn test_fraud_pattern_rate_is_roughly_thirty_percent() {
        let now = Local::now();
        let mut generator = TransactionGenerator::seeded(2024);
        let runs = 5_000;

        let fraud_leaning = (0..runs)
            .filter(|_| is_fraud_leaning(&generator.generate_at(now)))
            .count();
        let rate = fraud_leaning as f64 / runs as f64;

        assert!((0.25..0.35).contains(&rate), "rate was {rate}");
    }

    #[test]
    fn test_rate_extremes() {
        let now = Local::now();
        let config = GeneratorConfig {
            fraud_pattern_rate: 0.0,
            ..GeneratorConfig::default()
        };
        let mut never = TransactionGenerator::with_rng(config, StdRng::seed_from_u64(1));
        assert!((0..200).all(|_| !is_fraud_leaning(&never.generate_at(now))));

        let config = GeneratorConfig {
            fraud_pattern_rate: 1.0,
            ..GeneratorConfig::default()
        };
        let mut always = TransactionGenerator::with_rng(config, StdRng::seed_from_u64(1));
        assert!((0..200).all(|_| is_fraud_leaning(&always.generate_at(now))));
    }

    #[test]
    fn test_identifier_formats() {
        let mut generator = TransactionGenerator::seeded(11);
        let tx = generator.generate();

        assert!(tx.id.starts_with("TXN"));
        assert!(tx.id[3..].chars().all(|c| c.is_ascii_digit()));

        let (user, bank) = tx.account_identifier.split_once('@').unwrap();
        assert!(user.starts_with("user"));
        assert!(BANK_HANDLES.contains(&bank));

        assert!(tx.device_id.starts_with("DEV"));
        assert_eq!(tx.device_id.len(), 7);

        let octets: Vec<u32> = tx
            .ip_address
            .split('.')
            .map(|o| o.parse().unwrap())
            .collect();
        assert_eq!(octets.len(), 4);
        assert!(octets.iter().all(|o| (1..=255).contains(o)));
    }
}
