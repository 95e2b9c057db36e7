use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::alert::Alert;
use super::analysis::HistoryItem;
use super::portfolio::Portfolio;
use super::transaction::Transaction;

/// How many analyses the history panel keeps.
pub const HISTORY_CAP: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::User => write!(f, "user"),
            Role::Admin => write!(f, "admin"),
        }
    }
}

/// One watched symbol. The watchlist has set semantics over this pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WatchlistEntry {
    pub ticker: String,
    pub exchange: String,
}

impl WatchlistEntry {
    pub fn new(ticker: impl Into<String>, exchange: impl Into<String>) -> Self {
        Self {
            ticker: ticker.into(),
            exchange: exchange.into(),
        }
    }
}

/// Everything the store persists about one user.
///
/// The store owns this entity; the session controller only ever holds a
/// cached copy that it re-fetches after each mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAccount {
    pub id: Uuid,

    pub full_name: String,

    pub role: Role,

    pub portfolio: Portfolio,

    /// Append-only trade log, oldest first.
    pub transactions: Vec<Transaction>,

    pub watchlist: Vec<WatchlistEntry>,

    /// Saved analyses, newest first, capped at [`HISTORY_CAP`].
    pub analysis_history: Vec<HistoryItem>,

    /// Active one-shot metric alerts.
    pub alerts: Vec<Alert>,
}

impl UserAccount {
    /// A fresh account as created at signup: starting-cash portfolio,
    /// empty logs.
    pub fn new(full_name: impl Into<String>, role: Role) -> Self {
        Self {
            id: Uuid::new_v4(),
            full_name: full_name.into(),
            role,
            portfolio: Portfolio::new(),
            transactions: Vec::new(),
            watchlist: Vec::new(),
            analysis_history: Vec::new(),
            alerts: Vec::new(),
        }
    }

    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    #[must_use]
    pub fn is_watching(&self, ticker: &str, exchange: &str) -> bool {
        self.watchlist
            .iter()
            .any(|w| w.ticker == ticker && w.exchange == exchange)
    }
}

/// A partial update to an account, applied by the store. Fields left as
/// `None` are untouched. Mirrors the store's update operation taking a
/// partial entity rather than a full replacement.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub portfolio: Option<Portfolio>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transactions: Option<Vec<Transaction>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub watchlist: Option<Vec<WatchlistEntry>>,
}

impl AccountUpdate {
    /// Apply this partial update to an account in place.
    pub fn apply_to(&self, account: &mut UserAccount) {
        if let Some(full_name) = &self.full_name {
            account.full_name = full_name.clone();
        }
        if let Some(portfolio) = &self.portfolio {
            account.portfolio = portfolio.clone();
        }
        if let Some(transactions) = &self.transactions {
            account.transactions = transactions.clone();
        }
        if let Some(watchlist) = &self.watchlist {
            account.watchlist = watchlist.clone();
        }
    }
}
