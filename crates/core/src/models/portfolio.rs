use serde::{Deserialize, Serialize};

/// Cash every new account starts with. `initial_value` is set to this at
/// signup and never changes afterwards.
pub const STARTING_CASH: f64 = 100_000.0;

/// A simulated brokerage portfolio: cash plus open stock positions.
///
/// **Money representation**: all amounts are `f64`, kept at full precision
/// through every calculation. Nothing is rounded in this layer; display
/// rounding is the frontend's concern. Prices arrive from an external
/// service as opaque numbers and are used as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Portfolio {
    /// Available cash. Never negative after a valid transaction.
    pub cash: f64,

    /// Open positions, at most one per (ticker, exchange) pair.
    pub holdings: Vec<Holding>,

    /// Portfolio value at account creation. Immutable; the baseline for
    /// gain/loss and return calculations.
    pub initial_value: f64,
}

impl Portfolio {
    /// A fresh portfolio as created at signup: starting cash, no positions.
    #[must_use]
    pub fn new() -> Self {
        Self {
            cash: STARTING_CASH,
            holdings: Vec::new(),
            initial_value: STARTING_CASH,
        }
    }

    /// Find an open position by (ticker, exchange).
    #[must_use]
    pub fn holding(&self, ticker: &str, exchange: &str) -> Option<&Holding> {
        self.holdings
            .iter()
            .find(|h| h.ticker == ticker && h.exchange == exchange)
    }

    #[must_use]
    pub fn holding_mut(&mut self, ticker: &str, exchange: &str) -> Option<&mut Holding> {
        self.holdings
            .iter_mut()
            .find(|h| h.ticker == ticker && h.exchange == exchange)
    }
}

impl Default for Portfolio {
    fn default() -> Self {
        Self::new()
    }
}

/// A position in one ticker/exchange pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Holding {
    /// Ticker symbol (e.g., "AAPL")
    pub ticker: String,

    /// Listing exchange (e.g., "NASDAQ", "BRVM")
    pub exchange: String,

    /// Human-readable company name
    pub company_name: String,

    /// Whole shares held. A holding with 0 shares is removed, never kept.
    pub shares: u32,

    /// Volume-weighted average price paid per share. Recomputed on buys,
    /// untouched by sells.
    pub purchase_price: f64,

    /// Latest known per-share price from a revaluation. `None` until the
    /// first refresh; valuation falls back to `purchase_price` when unset.
    #[serde(default)]
    pub current_value: Option<f64>,
}

impl Holding {
    /// The per-share price used for valuation: the refreshed price if one
    /// is known, otherwise the purchase price.
    #[must_use]
    pub fn effective_price(&self) -> f64 {
        self.current_value.unwrap_or(self.purchase_price)
    }

    /// Market value of the whole position at the effective price.
    #[must_use]
    pub fn market_value(&self) -> f64 {
        f64::from(self.shares) * self.effective_price()
    }
}
