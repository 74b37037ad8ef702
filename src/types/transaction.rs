//! Transaction data structures for UPI payment simulation

use crate::error::InvalidTransaction;
use chrono::{NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Merchant category of a UPI payment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Shopping,
    Food,
    P2pTransfer,
    Bills,
    Crypto,
    Gambling,
    Entertainment,
    Unknown,
}

impl Category {
    /// All categories in catalogue order
    pub const ALL: [Category; 8] = [
        Category::Shopping,
        Category::Food,
        Category::P2pTransfer,
        Category::Bills,
        Category::Crypto,
        Category::Gambling,
        Category::Entertainment,
        Category::Unknown,
    ];

    /// Whether payments to this category carry extra risk
    pub fn is_high_risk(self) -> bool {
        match self {
            Category::Crypto | Category::Gambling | Category::Unknown => true,
            Category::Shopping
            | Category::Food
            | Category::P2pTransfer
            | Category::Bills
            | Category::Entertainment => false,
        }
    }

    /// Wire name of the category
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Shopping => "shopping",
            Category::Food => "food",
            Category::P2pTransfer => "p2p_transfer",
            Category::Bills => "bills",
            Category::Crypto => "crypto",
            Category::Gambling => "gambling",
            Category::Entertainment => "entertainment",
            Category::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| format!("unknown merchant category: {s}"))
    }
}

/// A single UPI payment as seen by the risk scorer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique transaction identifier
    #[serde(alias = "txn_id")]
    pub id: String,

    /// Amount in whole rupees
    pub amount: i64,

    /// Merchant display name
    pub merchant: String,

    /// Merchant category
    pub category: Category,

    /// Local wall-clock time of the payment
    pub timestamp: NaiveDateTime,

    /// Payer's UPI address, e.g. `user1234@hdfc`
    #[serde(alias = "upi_id")]
    pub account_identifier: String,

    /// City name, or "Unknown" / "International"
    pub location: String,

    /// Payments by the same payer in the past hour
    #[serde(default)]
    pub velocity: u32,

    /// Payment originates from a location not seen before for this payer
    #[serde(default, alias = "new_location")]
    pub is_new_location: bool,

    pub device_id: String,

    pub ip_address: String,
}

impl Transaction {
    /// Create a transaction with the fields the scorer looks at.
    ///
    /// Informational fields are left with neutral placeholders.
    pub fn new(
        id: impl Into<String>,
        amount: i64,
        category: Category,
        timestamp: NaiveDateTime,
    ) -> Self {
        Self {
            id: id.into(),
            amount,
            merchant: String::new(),
            category,
            timestamp,
            account_identifier: String::new(),
            location: String::new(),
            velocity: 0,
            is_new_location: false,
            device_id: String::new(),
            ip_address: String::new(),
        }
    }

    pub fn with_velocity(mut self, velocity: u32) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn with_new_location(mut self, is_new_location: bool) -> Self {
        self.is_new_location = is_new_location;
        self
    }

    pub fn with_merchant(mut self, merchant: impl Into<String>) -> Self {
        self.merchant = merchant.into();
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    /// Hour of day (0-23) the payment was made
    pub fn hour(&self) -> u32 {
        self.timestamp.hour()
    }

    /// Decode transaction records from JSON text.
    ///
    /// Accepts a single object, an array of objects, or a stream of
    /// whitespace/newline separated objects. Each record is decoded on its
    /// own so one bad record does not hide the others; a syntax error in
    /// the stream itself ends decoding.
    pub fn parse_records(input: &str) -> Vec<Result<Transaction, InvalidTransaction>> {
        let mut records = Vec::new();

        for value in serde_json::Deserializer::from_str(input).into_iter::<serde_json::Value>() {
            match value {
                Ok(serde_json::Value::Array(items)) => {
                    records.extend(items.into_iter().map(decode_record));
                }
                Ok(item) => records.push(decode_record(item)),
                Err(e) => {
                    records.push(Err(e.into()));
                    break;
                }
            }
        }

        records
    }
}

fn decode_record(value: serde_json::Value) -> Result<Transaction, InvalidTransaction> {
    Ok(serde_json::from_value(value)?)
}
