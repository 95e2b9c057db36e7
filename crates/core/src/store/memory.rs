use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::CoreError;
use crate::models::account::{AccountUpdate, Role, UserAccount, HISTORY_CAP};
use crate::models::alert::Alert;
use crate::models::analysis::HistoryItem;
use crate::models::portfolio::Portfolio;

use super::traits::AccountStore;

/// Cash the seeded admin account starts with.
const ADMIN_SEED_CASH: f64 = 1_000_000.0;

/// In-memory account store.
///
/// Stands in for the real backend: the integration tests run against it,
/// and a frontend can use it as a fully offline simulated backend. Same
/// interface, same semantics (cap enforcement, atomic partial updates),
/// no durability.
pub struct MemoryStore {
    accounts: Mutex<HashMap<Uuid, UserAccount>>,
}

impl MemoryStore {
    /// An empty store.
    pub fn new() -> Self {
        Self {
            accounts: Mutex::new(HashMap::new()),
        }
    }

    /// A store seeded with the stock admin account.
    pub fn seeded() -> Self {
        let store = Self::new();
        let mut admin = UserAccount::new("Admin User", Role::Admin);
        admin.portfolio = Portfolio {
            cash: ADMIN_SEED_CASH,
            holdings: Vec::new(),
            initial_value: ADMIN_SEED_CASH,
        };
        store.insert(admin);
        store
    }

    /// Create a fresh account (signup): starting-cash portfolio, empty
    /// logs. Returns the stored account.
    pub fn create_account(&self, full_name: impl Into<String>, role: Role) -> UserAccount {
        let account = UserAccount::new(full_name, role);
        self.insert(account.clone());
        account
    }

    /// Insert a pre-built account (test setup).
    pub fn insert(&self, account: UserAccount) {
        let mut accounts = self.accounts.lock().unwrap_or_else(|e| e.into_inner());
        accounts.insert(account.id, account);
    }

    fn with_account<T>(
        &self,
        id: Uuid,
        f: impl FnOnce(&mut UserAccount) -> T,
    ) -> Result<T, CoreError> {
        let mut accounts = self.accounts.lock().unwrap_or_else(|e| e.into_inner());
        let account = accounts
            .get_mut(&id)
            .ok_or_else(|| CoreError::Store(format!("No account with id {id}")))?;
        Ok(f(account))
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl AccountStore for MemoryStore {
    async fn get_account(&self, id: Uuid) -> Result<UserAccount, CoreError> {
        let accounts = self.accounts.lock().unwrap_or_else(|e| e.into_inner());
        accounts
            .get(&id)
            .cloned()
            .ok_or_else(|| CoreError::AccountNotFound(id.to_string()))
    }

    async fn list_accounts(&self) -> Result<Vec<UserAccount>, CoreError> {
        let accounts = self.accounts.lock().unwrap_or_else(|e| e.into_inner());
        let mut all: Vec<UserAccount> = accounts.values().cloned().collect();
        all.sort_by(|a, b| a.full_name.cmp(&b.full_name));
        Ok(all)
    }

    async fn update_account(
        &self,
        id: Uuid,
        update: AccountUpdate,
    ) -> Result<UserAccount, CoreError> {
        self.with_account(id, |account| {
            update.apply_to(account);
            account.clone()
        })
    }

    async fn append_history(&self, user_id: Uuid, item: HistoryItem) -> Result<(), CoreError> {
        self.with_account(user_id, |account| {
            account.analysis_history.insert(0, item);
            account.analysis_history.truncate(HISTORY_CAP);
        })
    }

    async fn clear_history(&self, user_id: Uuid) -> Result<(), CoreError> {
        self.with_account(user_id, |account| account.analysis_history.clear())
    }

    async fn add_alert(&self, user_id: Uuid, alert: Alert) -> Result<(), CoreError> {
        self.with_account(user_id, |account| account.alerts.push(alert))
    }

    async fn remove_alert(&self, alert_id: Uuid) -> Result<(), CoreError> {
        let mut accounts = self.accounts.lock().unwrap_or_else(|e| e.into_inner());
        for account in accounts.values_mut() {
            let before = account.alerts.len();
            account.alerts.retain(|a| a.id != alert_id);
            if account.alerts.len() != before {
                return Ok(());
            }
        }
        Err(CoreError::Store(format!("No alert with id {alert_id}")))
    }
}
