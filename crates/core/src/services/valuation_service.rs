use std::collections::{HashMap, HashSet};

use futures::future::join_all;
use log::warn;

use crate::models::portfolio::Portfolio;
use crate::models::valuation::PortfolioValuation;
use crate::providers::traits::MarketDataProvider;

/// Map from ticker to latest known per-share price.
pub type PriceMap = HashMap<String, f64>;

/// Recomputes what a portfolio is worth from fresh quotes.
///
/// Revaluation is total: it never fails, even when every price lookup
/// fails. A holding whose lookup failed (or was never issued) is valued at
/// its purchase price. Callers that care can spot the stale holdings by
/// comparing `current_value` against `purchase_price`.
pub struct ValuationService;

impl ValuationService {
    pub fn new() -> Self {
        Self
    }

    /// Fetch current prices for a set of tickers, deduplicated and issued
    /// concurrently.
    ///
    /// Each lookup resolves independently: one slow or failing ticker
    /// neither blocks nor fails the others. Failed tickers are logged and
    /// absent from the returned map.
    pub async fn price_map<I>(&self, provider: &dyn MarketDataProvider, tickers: I) -> PriceMap
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let unique: HashSet<String> = tickers.into_iter().map(Into::into).collect();

        let lookups = unique.into_iter().map(|ticker| async move {
            match provider.get_quote(&ticker).await {
                Ok(quote) => Some((ticker, quote.price)),
                Err(e) => {
                    warn!("price lookup for {ticker} failed, keeping purchase price: {e}");
                    None
                }
            }
        });

        join_all(lookups).await.into_iter().flatten().collect()
    }

    /// Update every holding's `current_value` from the price map, falling
    /// back to the purchase price for tickers the map doesn't cover.
    ///
    /// An empty holdings list is a no-op — callers can skip the lookups
    /// entirely for cash-only portfolios.
    pub fn revalue(&self, portfolio: &mut Portfolio, prices: &PriceMap) {
        for holding in &mut portfolio.holdings {
            let price = prices
                .get(&holding.ticker)
                .copied()
                .unwrap_or(holding.purchase_price);
            holding.current_value = Some(price);
        }
    }

    /// Fetch fresh prices for every held ticker and apply them.
    ///
    /// Short-circuits without any lookups when there are no holdings.
    pub async fn refresh(&self, provider: &dyn MarketDataProvider, portfolio: &mut Portfolio) {
        if portfolio.holdings.is_empty() {
            return;
        }
        let tickers: Vec<String> = portfolio
            .holdings
            .iter()
            .map(|h| h.ticker.clone())
            .collect();
        let prices = self.price_map(provider, tickers).await;
        self.revalue(portfolio, &prices);
    }

    /// Derive the financial summary at the portfolio's current prices.
    ///
    /// Return % is defined as exactly 0 when `initial_value` is 0.
    #[must_use]
    pub fn summarize(&self, portfolio: &Portfolio) -> PortfolioValuation {
        let holdings_value: f64 = portfolio.holdings.iter().map(|h| h.market_value()).sum();
        let total_value = portfolio.cash + holdings_value;
        let gain_loss = total_value - portfolio.initial_value;
        let return_pct = if portfolio.initial_value > 0.0 {
            (gain_loss / portfolio.initial_value) * 100.0
        } else {
            0.0
        };

        PortfolioValuation {
            cash: portfolio.cash,
            holdings_value,
            total_value,
            gain_loss,
            return_pct,
        }
    }

}

impl Default for ValuationService {
    fn default() -> Self {
        Self::new()
    }
}
