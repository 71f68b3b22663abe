use crate::Result;
use chrono::{DateTime, Utc};

/// Read-only view over promotions (external collaborator), used only for the
/// alerts badge.
pub trait PromotionReadTrait: Send + Sync {
    /// Number of active promotions whose end date falls within
    /// `[now, now + days]`.
    fn count_expiring_within(&self, now: DateTime<Utc>, days: i64) -> Result<i64>;
}

/// Read-only view over orders (external collaborator), used only for the
/// alerts badge.
pub trait OrderReadTrait: Send + Sync {
    /// Number of orders awaiting fulfilment (status CONFIRMED).
    fn count_pending(&self) -> Result<i64>;
}
