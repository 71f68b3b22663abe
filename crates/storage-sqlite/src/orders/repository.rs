use diesel::prelude::*;
use std::sync::Arc;

use stockbook_core::dashboard::OrderReadTrait;
use stockbook_core::Result;

use crate::db::{get_connection, DbPool};
use crate::errors::StorageError;
use crate::schema::orders;

/// Order status that counts as pending for the dashboard alerts.
const PENDING_STATUS: &str = "CONFIRMED";

/// Read-only view over orders, used by the dashboard alerts count.
pub struct OrderRepository {
    pool: Arc<DbPool>,
}

impl OrderRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }
}

impl OrderReadTrait for OrderRepository {
    fn count_pending(&self) -> Result<i64> {
        let mut conn = get_connection(&self.pool)?;
        Ok(orders::table
            .filter(orders::status.eq(PENDING_STATUS))
            .count()
            .get_result::<i64>(&mut conn)
            .map_err(StorageError::from)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{insert_order, setup_db};

    #[tokio::test]
    async fn counts_only_confirmed_orders() {
        let (_dir, pool, _writer) = setup_db();
        insert_order(&pool, "order-1", "CONFIRMED");
        insert_order(&pool, "order-2", "DRAFT");
        insert_order(&pool, "order-3", "CONFIRMED");
        insert_order(&pool, "order-4", "SHIPPED");

        let repo = OrderRepository::new(pool);
        assert_eq!(repo.count_pending().unwrap(), 2);
    }
}
