use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::CoreError;
use crate::models::account::{AccountUpdate, UserAccount};
use crate::models::alert::Alert;
use crate::models::analysis::HistoryItem;

/// Trait abstraction over the backend account store.
///
/// The store owns every `UserAccount`; the session controller works with
/// cached copies and re-fetches after each mutation. All operations are
/// asynchronous and may fail with `CoreError::Store` — callers treat a
/// failed operation as not having happened and keep their cache as-is.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait AccountStore: Send + Sync {
    /// Fetch one account by id.
    async fn get_account(&self, id: Uuid) -> Result<UserAccount, CoreError>;

    /// Fetch every account (admin/leaderboard views).
    async fn list_accounts(&self) -> Result<Vec<UserAccount>, CoreError>;

    /// Apply a partial update and return the stored account. The update is
    /// atomic: portfolio and transaction log passed together can never be
    /// half-applied.
    async fn update_account(
        &self,
        id: Uuid,
        update: AccountUpdate,
    ) -> Result<UserAccount, CoreError>;

    /// Prepend an analysis to the user's history. The store enforces the
    /// history cap, dropping the oldest item past the limit.
    async fn append_history(&self, user_id: Uuid, item: HistoryItem) -> Result<(), CoreError>;

    /// Delete the user's entire analysis history.
    async fn clear_history(&self, user_id: Uuid) -> Result<(), CoreError>;

    /// Add an alert to the user's active set.
    async fn add_alert(&self, user_id: Uuid, alert: Alert) -> Result<(), CoreError>;

    /// Remove an alert by its (globally unique) id, wherever it lives.
    async fn remove_alert(&self, alert_id: Uuid) -> Result<(), CoreError>;
}
