pub mod errors;
pub mod models;
pub mod navigation;
pub mod providers;
pub mod services;
pub mod storage;
pub mod store;

use std::sync::Arc;

use uuid::Uuid;

use errors::CoreError;
use models::account::{AccountUpdate, UserAccount, WatchlistEntry};
use models::alert::{Alert, AlertCondition, TriggeredAlert};
use models::analysis::{AnalysisBundle, HistoryItem, Metric};
use models::level::{Level, LevelTable, PromotionEvent};
use models::quote::{MarketIndex, PricePoint, Quote};
use models::transaction::{TradeSide, Transaction};
use models::valuation::{PortfolioValuation, RankedAccount};
use navigation::fragment;
use navigation::guard::{self, NavEvent, NavState, Page, Resolution};
use providers::traits::{MarketDataProvider, TextRequest, TextStream};
use services::alert_service::AlertService;
use services::leaderboard_service::LeaderboardService;
use services::portfolio_service::PortfolioService;
use services::valuation_service::ValuationService;
use store::traits::AccountStore;

/// Main entry point for the PaperTrade core library.
///
/// Owns the cached copy of the signed-in user's account, the navigation
/// state machine, and the services that operate on them. The cache is the
/// single source of truth for the frontend: it is mutated only by this
/// type's own operations, each of which calls the store first and
/// re-fetches on success. A failed store call leaves the cache exactly as
/// it was — there are no optimistic updates.
#[must_use]
pub struct Session {
    store: Arc<dyn AccountStore>,
    provider: Arc<dyn MarketDataProvider>,
    portfolio_service: PortfolioService,
    valuation_service: ValuationService,
    alert_service: AlertService,
    leaderboard_service: LeaderboardService,
    levels: LevelTable,
    nav: NavState,
    /// Cached copy of the signed-in user's account. `None` when signed out.
    account: Option<UserAccount>,
    /// True while a revaluation is in flight. The cached account stays
    /// readable as last-known-good data until the refresh lands.
    refreshing: bool,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("account", &self.account.as_ref().map(|a| a.id))
            .field("auth", &self.nav.auth)
            .field("page", &self.nav.page)
            .field("refreshing", &self.refreshing)
            .finish()
    }
}

impl Session {
    /// A fresh signed-out session with the stock level table.
    pub fn new(store: Arc<dyn AccountStore>, provider: Arc<dyn MarketDataProvider>) -> Self {
        Self::with_levels(store, provider, LevelTable::default())
    }

    /// A fresh signed-out session with a custom level table.
    pub fn with_levels(
        store: Arc<dyn AccountStore>,
        provider: Arc<dyn MarketDataProvider>,
        levels: LevelTable,
    ) -> Self {
        Self {
            store,
            provider,
            portfolio_service: PortfolioService::new(),
            valuation_service: ValuationService::new(),
            alert_service: AlertService::new(),
            leaderboard_service: LeaderboardService::new(),
            levels,
            nav: NavState::new(),
            account: None,
            refreshing: false,
        }
    }

    // ── Session & account cache ─────────────────────────────────────

    /// The cached account, when signed in.
    #[must_use]
    pub fn account(&self) -> Option<&UserAccount> {
        self.account.as_ref()
    }

    /// Whether a portfolio revaluation is currently in flight.
    #[must_use]
    pub fn is_refreshing(&self) -> bool {
        self.refreshing
    }

    #[must_use]
    pub fn levels(&self) -> &LevelTable {
        &self.levels
    }

    /// React to an external auth-session event: a user id when a session
    /// exists, `None` when signed out.
    ///
    /// Fetches the account, updates the cache, and drives the navigation
    /// state machine (which redirects off pages the new auth state may
    /// not see). When the account fetch fails the session resolves to
    /// signed-out and the error is surfaced.
    pub async fn handle_session(&mut self, user_id: Option<Uuid>) -> Result<(), CoreError> {
        match user_id {
            Some(id) => match self.store.get_account(id).await {
                Ok(account) => {
                    let role = account.role;
                    self.account = Some(account);
                    self.apply(NavEvent::SessionResolved(Some(role)));
                    Ok(())
                }
                Err(e) => {
                    self.account = None;
                    self.apply(NavEvent::SessionResolved(None));
                    Err(e)
                }
            },
            None => {
                self.account = None;
                self.apply(NavEvent::SessionResolved(None));
                Ok(())
            }
        }
    }

    /// Mark the auth-session check as in flight (app boot). The guard
    /// performs no redirects until the check resolves.
    pub fn session_checking(&mut self) {
        self.apply(NavEvent::SessionChecking);
    }

    /// Re-fetch the signed-in account from the store into the cache.
    ///
    /// Called automatically after every mutating operation; also usable
    /// directly when the frontend suspects the cache is stale.
    pub async fn refresh(&mut self) -> Result<(), CoreError> {
        let id = self.current()?.id;
        let account = self.store.get_account(id).await?;
        self.account = Some(account);
        Ok(())
    }

    // ── Navigation ──────────────────────────────────────────────────

    /// Request a page change. The guard runs immediately, so the page
    /// actually shown may differ from the one requested.
    pub fn navigate(&mut self, page: Page) {
        self.apply(NavEvent::Navigate(page));
    }

    /// Request a page change from a URL-fragment token (deep link).
    pub fn navigate_token(&mut self, token: &str) {
        self.navigate(fragment::parse(token));
    }

    /// The page the session currently shows.
    #[must_use]
    pub fn current_page(&self) -> &Page {
        &self.nav.page
    }

    /// The shareable URL-fragment token for the current page.
    #[must_use]
    pub fn fragment(&self) -> String {
        fragment::format(&self.nav.page)
    }

    #[must_use]
    pub fn nav_state(&self) -> &NavState {
        &self.nav
    }

    /// What the frontend should render for the current state, with role
    /// checks applied.
    #[must_use]
    pub fn resolution(&self) -> Resolution {
        guard::resolve(&self.nav)
    }

    // ── Trading ─────────────────────────────────────────────────────

    /// Execute a buy or sell at the quote's current price.
    ///
    /// The updated portfolio and the appended transaction go to the store
    /// in one update, so the two can never diverge. On a validation
    /// failure or store error nothing is persisted and the cache is
    /// untouched.
    pub async fn execute_trade(
        &mut self,
        side: TradeSide,
        quote: &Quote,
        shares: u32,
    ) -> Result<Transaction, CoreError> {
        let account = self.current()?;
        let id = account.id;
        let mut portfolio = account.portfolio.clone();
        let mut transactions = account.transactions.clone();

        let transaction = match side {
            TradeSide::Buy => self.portfolio_service.buy(&mut portfolio, quote, shares)?,
            TradeSide::Sell => self.portfolio_service.sell(&mut portfolio, quote, shares)?,
        };
        transactions.push(transaction.clone());

        self.store
            .update_account(
                id,
                AccountUpdate {
                    portfolio: Some(portfolio),
                    transactions: Some(transactions),
                    ..AccountUpdate::default()
                },
            )
            .await?;
        self.refresh().await?;
        Ok(transaction)
    }

    // ── Valuation & leveling ────────────────────────────────────────

    /// The financial summary of the cached portfolio at its last known
    /// prices. Cheap — no lookups.
    pub fn valuation(&self) -> Result<PortfolioValuation, CoreError> {
        Ok(self.valuation_service.summarize(&self.current()?.portfolio))
    }

    /// The tier the cached portfolio's total value currently sits in.
    pub fn current_level(&self) -> Result<Level, CoreError> {
        let valuation = self.valuation()?;
        Ok(self.levels.classify(valuation.total_value).clone())
    }

    /// Refresh every held ticker's price concurrently, persist the
    /// revalued portfolio, and report the new valuation together with any
    /// tier promotion it produced.
    ///
    /// Lookups are fault-tolerant: a failed ticker keeps its last known
    /// price (purchase price when it was never refreshed) and the
    /// revaluation as a whole never fails. Promotion is detected against
    /// the pre-refresh value, so holding steady inside a tier across
    /// repeated refreshes never re-fires the event.
    pub async fn revalue_portfolio(
        &mut self,
    ) -> Result<(PortfolioValuation, Option<PromotionEvent>), CoreError> {
        let account = self.current()?;
        let id = account.id;
        let mut portfolio = account.portfolio.clone();
        let old_value = self.valuation_service.summarize(&portfolio).total_value;

        self.refreshing = true;
        self.valuation_service
            .refresh(self.provider.as_ref(), &mut portfolio)
            .await;
        let updated = self
            .store
            .update_account(
                id,
                AccountUpdate {
                    portfolio: Some(portfolio),
                    ..AccountUpdate::default()
                },
            )
            .await;
        self.refreshing = false;
        updated?;
        self.refresh().await?;

        let valuation = self.valuation_service.summarize(&self.current()?.portfolio);
        let promotion = self.levels.detect_promotion(old_value, valuation.total_value);
        Ok((valuation, promotion))
    }

    // ── Watchlist ───────────────────────────────────────────────────

    /// Add the symbol to the watchlist, or remove it when already
    /// present. Returns whether the symbol is watched afterwards.
    pub async fn toggle_watchlist(
        &mut self,
        ticker: &str,
        exchange: &str,
    ) -> Result<bool, CoreError> {
        let account = self.current()?;
        let id = account.id;
        let mut watchlist = account.watchlist.clone();

        let before = watchlist.len();
        watchlist.retain(|w| !(w.ticker == ticker && w.exchange == exchange));
        let now_watching = watchlist.len() == before;
        if now_watching {
            watchlist.push(WatchlistEntry::new(ticker, exchange));
        }

        self.store
            .update_account(
                id,
                AccountUpdate {
                    watchlist: Some(watchlist),
                    ..AccountUpdate::default()
                },
            )
            .await?;
        self.refresh().await?;
        Ok(now_watching)
    }

    // ── Analysis & history ──────────────────────────────────────────

    /// Run a full AI analysis of a company (optionally against a
    /// comparison company) and save it to the history panel.
    pub async fn run_analysis(
        &mut self,
        identifier: &str,
        comparison: Option<&str>,
        currency: &str,
    ) -> Result<AnalysisBundle, CoreError> {
        self.current()?;
        let bundle = self
            .provider
            .get_analysis(identifier, comparison, currency)
            .await?;
        let item = HistoryItem::new(
            identifier,
            comparison.map(str::to_string),
            currency,
            bundle.clone(),
        );
        self.record_analysis(item).await?;
        Ok(bundle)
    }

    /// Save an analysis to the history panel (newest first, capped).
    pub async fn record_analysis(&mut self, item: HistoryItem) -> Result<(), CoreError> {
        let id = self.current()?.id;
        self.store.append_history(id, item).await?;
        self.refresh().await
    }

    /// Wipe the history panel.
    pub async fn clear_history(&mut self) -> Result<(), CoreError> {
        let id = self.current()?.id;
        self.store.clear_history(id).await?;
        self.refresh().await
    }

    // ── Alerts ──────────────────────────────────────────────────────

    /// Create a one-shot alert on a named metric. Returns the stored
    /// alert so the frontend can reference it by id.
    pub async fn add_alert(
        &mut self,
        metric_label: impl Into<String>,
        condition: AlertCondition,
        threshold: f64,
    ) -> Result<Alert, CoreError> {
        let id = self.current()?.id;
        let alert = Alert::new(metric_label, condition, threshold);
        self.store.add_alert(id, alert.clone()).await?;
        self.refresh().await?;
        Ok(alert)
    }

    /// Dismiss an alert without triggering it.
    pub async fn remove_alert(&mut self, alert_id: Uuid) -> Result<(), CoreError> {
        self.current()?;
        self.store.remove_alert(alert_id).await?;
        self.refresh().await
    }

    /// Evaluate the account's alerts against fresh analysis metrics.
    ///
    /// Each triggered alert is removed from the store before this
    /// returns, which is what makes alerts fire at most once: a second
    /// evaluation with the same metrics finds them gone.
    pub async fn check_alerts(
        &mut self,
        metrics: &[Metric],
    ) -> Result<Vec<TriggeredAlert>, CoreError> {
        let account = self.current()?;
        let triggered = self.alert_service.evaluate(&account.alerts, metrics);

        for fired in &triggered {
            self.store.remove_alert(fired.alert.id).await?;
        }
        if !triggered.is_empty() {
            self.refresh().await?;
        }
        Ok(triggered)
    }

    // ── Leaderboard & admin ─────────────────────────────────────────

    /// Rank every player account by revalued portfolio total.
    ///
    /// Prices are fetched once per distinct ticker across all accounts,
    /// concurrently, with the usual per-ticker fallback. Admin accounts
    /// are excluded from the standings.
    pub async fn leaderboard(&self) -> Result<Vec<RankedAccount>, CoreError> {
        let accounts = self.store.list_accounts().await?;
        let tickers = LeaderboardService::tickers_across(&accounts);
        let prices = self
            .valuation_service
            .price_map(self.provider.as_ref(), tickers)
            .await;
        Ok(self.leaderboard_service.rank(&accounts, &prices, &self.levels))
    }

    /// Every account in the store, for the admin dashboard. Requires the
    /// admin role.
    pub async fn admin_accounts(&self) -> Result<Vec<UserAccount>, CoreError> {
        if !self.current()?.is_admin() {
            return Err(CoreError::Validation("Admin role required".into()));
        }
        self.store.list_accounts().await
    }

    // ── Market data passthroughs ────────────────────────────────────

    /// Current quote for one ticker.
    pub async fn quote(&self, ticker: &str) -> Result<Quote, CoreError> {
        self.provider.get_quote(ticker).await
    }

    /// Recent daily closing prices for one ticker, oldest first.
    pub async fn price_history(&self, ticker: &str) -> Result<Vec<PricePoint>, CoreError> {
        self.provider.get_history(ticker).await
    }

    /// Quotes matching a free-text search query.
    pub async fn search(&self, query: &str) -> Result<Vec<Quote>, CoreError> {
        self.provider.search_symbols(query).await
    }

    /// Snapshot of the major market indices.
    pub async fn market_overview(&self) -> Result<Vec<MarketIndex>, CoreError> {
        self.provider.market_overview().await
    }

    /// Stream generated text for the strategy/education views.
    pub async fn stream_text(&self, request: TextRequest) -> Result<TextStream, CoreError> {
        self.provider.stream_text(request).await
    }

    // ── Internal ────────────────────────────────────────────────────

    fn current(&self) -> Result<&UserAccount, CoreError> {
        self.account.as_ref().ok_or(CoreError::NotAuthenticated)
    }

    fn apply(&mut self, event: NavEvent) {
        self.nav = guard::reduce(self.nav.clone(), event);
    }
}
