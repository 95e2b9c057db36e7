use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Which side of a trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeSide {
    Buy,
    Sell,
}

impl std::fmt::Display for TradeSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TradeSide::Buy => write!(f, "buy"),
            TradeSide::Sell => write!(f, "sell"),
        }
    }
}

/// A single executed trade. Immutable once created; the account keeps an
/// append-only log of these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier
    pub id: Uuid,

    pub side: TradeSide,

    pub ticker: String,

    pub exchange: String,

    pub company_name: String,

    /// Whole shares traded (always positive)
    pub shares: u32,

    /// Fill price per share
    pub price: f64,

    /// When the trade executed
    pub timestamp: DateTime<Utc>,
}

impl Transaction {
    pub fn new(
        side: TradeSide,
        ticker: impl Into<String>,
        exchange: impl Into<String>,
        company_name: impl Into<String>,
        shares: u32,
        price: f64,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            side,
            ticker: ticker.into(),
            exchange: exchange.into(),
            company_name: company_name.into(),
            shares,
            price,
            timestamp: Utc::now(),
        }
    }

    /// Total cash moved by this trade (shares × price).
    #[must_use]
    pub fn gross_amount(&self) -> f64 {
        f64::from(self.shares) * self.price
    }
}
