use crate::errors::CoreError;
use crate::models::portfolio::{Holding, Portfolio};
use crate::models::quote::Quote;
use crate::models::transaction::{TradeSide, Transaction};

/// Executes buy/sell orders against a portfolio.
///
/// Pure business logic — no I/O, no API calls. Easy to test.
///
/// Both operations mutate the portfolio and return the matching
/// `Transaction` record; the caller persists portfolio and transaction in
/// one store update so the two can never diverge. On any error the
/// portfolio is left untouched.
pub struct PortfolioService;

impl PortfolioService {
    pub fn new() -> Self {
        Self
    }

    /// Buy `shares` of the quoted stock at the quote's current price.
    ///
    /// Fails with `InsufficientFunds` when the order costs more than the
    /// available cash. A repeat buy of an open (ticker, exchange) position
    /// accumulates shares and recomputes the volume-weighted average
    /// purchase price; otherwise a new holding is appended.
    pub fn buy(
        &self,
        portfolio: &mut Portfolio,
        quote: &Quote,
        shares: u32,
    ) -> Result<Transaction, CoreError> {
        Self::validate_shares(shares)?;

        let cost = f64::from(shares) * quote.price;
        if cost > portfolio.cash {
            return Err(CoreError::InsufficientFunds {
                required: cost,
                available: portfolio.cash,
            });
        }

        portfolio.cash -= cost;

        if let Some(holding) = portfolio.holding_mut(&quote.ticker, &quote.exchange) {
            let total_shares = holding.shares + shares;
            // Volume-weighted average of the old position and the new fill
            holding.purchase_price = (holding.purchase_price * f64::from(holding.shares) + cost)
                / f64::from(total_shares);
            holding.shares = total_shares;
            holding.current_value = Some(quote.price);
        } else {
            portfolio.holdings.push(Holding {
                ticker: quote.ticker.clone(),
                exchange: quote.exchange.clone(),
                company_name: quote.company_name.clone(),
                shares,
                purchase_price: quote.price,
                current_value: Some(quote.price),
            });
        }

        Ok(Transaction::new(
            TradeSide::Buy,
            quote.ticker.clone(),
            quote.exchange.clone(),
            quote.company_name.clone(),
            shares,
            quote.price,
        ))
    }

    /// Sell `shares` of an open position at the quote's current price.
    ///
    /// Fails with `InsufficientShares` when there is no matching holding or
    /// the position is smaller than the order. A holding that reaches 0
    /// shares is removed entirely; the purchase price of a remaining
    /// position is unchanged (average cost basis only moves on buys).
    pub fn sell(
        &self,
        portfolio: &mut Portfolio,
        quote: &Quote,
        shares: u32,
    ) -> Result<Transaction, CoreError> {
        Self::validate_shares(shares)?;

        let held = portfolio
            .holding(&quote.ticker, &quote.exchange)
            .map_or(0, |h| h.shares);
        if held < shares {
            return Err(CoreError::InsufficientShares {
                ticker: quote.ticker.clone(),
                requested: shares,
                held,
            });
        }

        portfolio.cash += f64::from(shares) * quote.price;

        // held >= shares guaranteed above, so the holding exists
        if let Some(holding) = portfolio.holding_mut(&quote.ticker, &quote.exchange) {
            holding.shares -= shares;
            holding.current_value = Some(quote.price);
        }
        portfolio.holdings.retain(|h| h.shares > 0);

        Ok(Transaction::new(
            TradeSide::Sell,
            quote.ticker.clone(),
            quote.exchange.clone(),
            quote.company_name.clone(),
            shares,
            quote.price,
        ))
    }

    /// Parse a share count from raw user input.
    ///
    /// Whitespace is tolerated; anything that isn't a positive whole
    /// number is a `Validation` error, surfaced inline and never retried.
    pub fn parse_shares(input: &str) -> Result<u32, CoreError> {
        let trimmed = input.trim();
        let shares: u32 = trimmed.parse().map_err(|_| {
            CoreError::Validation(format!("'{trimmed}' is not a valid share count"))
        })?;
        Self::validate_shares(shares)?;
        Ok(shares)
    }

    fn validate_shares(shares: u32) -> Result<(), CoreError> {
        if shares == 0 {
            return Err(CoreError::Validation(
                "Share count must be positive".into(),
            ));
        }
        Ok(())
    }
}

impl Default for PortfolioService {
    fn default() -> Self {
        Self::new()
    }
}
