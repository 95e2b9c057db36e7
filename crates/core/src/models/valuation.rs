use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::level::Level;

/// Derived financial summary of a portfolio at its current prices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioValuation {
    /// Available cash
    pub cash: f64,

    /// Σ(shares × effective price) over all holdings
    pub holdings_value: f64,

    /// cash + holdings value
    pub total_value: f64,

    /// total value − initial value
    pub gain_loss: f64,

    /// gain/loss ÷ initial value × 100; exactly 0 when initial value is 0
    pub return_pct: f64,
}

/// One leaderboard row: an account ranked by revalued portfolio total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedAccount {
    pub account_id: Uuid,

    pub full_name: String,

    pub total_value: f64,

    pub return_pct: f64,

    /// Tier at the revalued total
    pub level: Level,

    /// 1-based position, best first
    pub rank: usize,
}
