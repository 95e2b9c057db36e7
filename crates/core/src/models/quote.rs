use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Analyst stance attached to a quote or analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Recommendation {
    Buy,
    Hold,
    Sell,
}

impl std::fmt::Display for Recommendation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Recommendation::Buy => write!(f, "Buy"),
            Recommendation::Hold => write!(f, "Hold"),
            Recommendation::Sell => write!(f, "Sell"),
        }
    }
}

/// Sign of a displayed change, for rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeDirection {
    Positive,
    Negative,
    Neutral,
}

/// A point-in-time price/metadata snapshot for one ticker, sourced from the
/// external market-data service. Prices are opaque simulated numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub company_name: String,

    pub ticker: String,

    pub exchange: String,

    /// Current per-share price
    pub price: f64,

    /// Absolute change since previous close
    pub change: f64,

    /// Formatted percent change with sign (e.g. "+1.25%")
    pub percent_change: String,

    /// Formatted volume (e.g. "1.25M")
    pub volume: String,

    /// Brief company description
    pub summary: String,

    pub recommendation: Recommendation,

    /// 0–100
    pub confidence_score: u8,

    /// Formatted market capitalisation (e.g. "2.5T"), when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub market_cap: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

/// One closing price in a historical series. Series are ordered oldest
/// to newest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub price: f64,
}

/// A market index snapshot for the dashboard overview strip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketIndex {
    /// Index name (e.g. "S&P 500", "BRVM Composite")
    pub name: String,

    /// Formatted current value
    pub value: String,

    /// Formatted change in points
    pub change: String,

    /// Formatted percent change
    pub percent_change: String,

    #[serde(rename = "changeType")]
    pub direction: ChangeDirection,
}
