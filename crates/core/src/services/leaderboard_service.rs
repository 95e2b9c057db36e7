use crate::models::account::UserAccount;
use crate::models::level::LevelTable;
use crate::models::valuation::RankedAccount;
use crate::services::valuation_service::{PriceMap, ValuationService};

/// Ranks player accounts by revalued portfolio total.
///
/// Pure — callers fetch one deduplicated price map for all accounts (one
/// lookup per distinct ticker, not per holding) and pass it in.
pub struct LeaderboardService {
    valuation_service: ValuationService,
}

impl LeaderboardService {
    pub fn new() -> Self {
        Self {
            valuation_service: ValuationService::new(),
        }
    }

    /// Every distinct ticker held across the given accounts, for a single
    /// batched price fetch.
    #[must_use]
    pub fn tickers_across(accounts: &[UserAccount]) -> Vec<String> {
        let mut tickers: Vec<String> = accounts
            .iter()
            .flat_map(|a| a.portfolio.holdings.iter().map(|h| h.ticker.clone()))
            .collect();
        tickers.sort();
        tickers.dedup();
        tickers
    }

    /// Revalue each account against the price map and rank by total value,
    /// best first. Admin accounts are excluded from the standings. Each
    /// holding falls back to its purchase price when the map has no entry
    /// for its ticker.
    #[must_use]
    pub fn rank(
        &self,
        accounts: &[UserAccount],
        prices: &PriceMap,
        levels: &LevelTable,
    ) -> Vec<RankedAccount> {
        let mut rows: Vec<RankedAccount> = accounts
            .iter()
            .filter(|account| !account.is_admin())
            .map(|account| {
                let mut portfolio = account.portfolio.clone();
                self.valuation_service.revalue(&mut portfolio, prices);
                let valuation = self.valuation_service.summarize(&portfolio);
                RankedAccount {
                    account_id: account.id,
                    full_name: account.full_name.clone(),
                    total_value: valuation.total_value,
                    return_pct: valuation.return_pct,
                    level: levels.classify(valuation.total_value).clone(),
                    rank: 0, // assigned after sorting
                }
            })
            .collect();

        rows.sort_by(|a, b| {
            b.total_value
                .partial_cmp(&a.total_value)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        for (idx, row) in rows.iter_mut().enumerate() {
            row.rank = idx + 1;
        }
        rows
    }
}

impl Default for LeaderboardService {
    fn default() -> Self {
        Self::new()
    }
}
