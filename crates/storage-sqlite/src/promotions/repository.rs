use chrono::{DateTime, Duration, Utc};
use diesel::prelude::*;
use std::sync::Arc;

use stockbook_core::dashboard::PromotionReadTrait;
use stockbook_core::Result;

use crate::db::{get_connection, DbPool};
use crate::errors::StorageError;
use crate::schema::promotions;

/// Read-only view over promotions, used by the dashboard alerts count.
pub struct PromotionRepository {
    pool: Arc<DbPool>,
}

impl PromotionRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }
}

impl PromotionReadTrait for PromotionRepository {
    fn count_expiring_within(&self, now: DateTime<Utc>, days: i64) -> Result<i64> {
        let mut conn = get_connection(&self.pool)?;
        let window_end = now + Duration::days(days);
        Ok(promotions::table
            .filter(promotions::active.eq(true))
            .filter(promotions::end_date.ge(crate::utils::fmt_utc(now)))
            .filter(promotions::end_date.le(crate::utils::fmt_utc(window_end)))
            .count()
            .get_result::<i64>(&mut conn)
            .map_err(StorageError::from)?)
    }
}
