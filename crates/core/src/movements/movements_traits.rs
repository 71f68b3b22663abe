use super::movements_model::*;
use crate::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Trait defining the contract of the stock ledger store.
///
/// The implementation is the sole authority over the `stock` counter: `apply`
/// must persist the movement row and the counter update as one atomic unit,
/// and applies against the same article must be serialized so that no two of
/// them ever observe the same pre-update stock value.
#[async_trait]
pub trait MovementRepositoryTrait: Send + Sync {
    /// Atomically records a movement and updates the owning article's stock
    /// counter by the signed delta.
    ///
    /// Fails with [`MovementError::NotFound`] when the article does not
    /// exist, and with [`MovementError::InsufficientStock`] when an OUT
    /// movement would drive stock negative under the configured
    /// [`StockPolicy`]. On any failure neither the movement nor the counter
    /// change is observable afterwards.
    ///
    /// [`MovementError::NotFound`]: super::MovementError::NotFound
    /// [`MovementError::InsufficientStock`]: super::MovementError::InsufficientStock
    async fn apply(&self, new_movement: NewMovement) -> Result<AppliedMovement>;

    /// Point read of the article's stock counter, reflecting the last
    /// committed apply.
    fn current_stock(&self, article_id: &str) -> Result<i64>;

    fn get_movement(&self, movement_id: &str) -> Result<Movement>;

    /// Movements with effective date in `[from, to]`, newest first.
    /// Re-querying is idempotent; there is no cursor state.
    fn movements_in_range(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
        filters: &MovementFilters,
    ) -> Result<Vec<Movement>>;

    /// Paginated movement listing, newest first.
    fn list_movements(
        &self,
        filters: &MovementFilters,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Movement>>;

    /// Most recent movements joined with article and user fields.
    fn recent_with_details(&self, limit: i64) -> Result<Vec<MovementDetails>>;

    /// Full movement history for one article, newest first.
    fn movements_for_article(&self, article_id: &str) -> Result<Vec<Movement>>;
}

/// Trait defining the contract for the movement recorder service.
#[async_trait]
pub trait MovementServiceTrait: Send + Sync {
    async fn record(
        &self,
        caller: &crate::auth::Caller,
        input: NewMovement,
    ) -> Result<AppliedMovement>;
    fn get_movement(&self, movement_id: &str) -> Result<Movement>;
    fn current_stock(&self, article_id: &str) -> Result<i64>;
    fn list_movements(
        &self,
        filters: &MovementFilters,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Movement>>;
}
