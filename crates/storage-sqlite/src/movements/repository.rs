use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use std::sync::Arc;

use stockbook_core::movements::{
    AppliedMovement, Movement, MovementDetails, MovementError, MovementFilters,
    MovementRepositoryTrait, NewMovement, StockPolicy,
};
use stockbook_core::{Error, Result};

use super::model::{MovementDB, MovementDetailsDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::{articles, movements, users};
use crate::utils::fmt_utc;

/// SQLite-backed stock ledger store.
///
/// Reads go straight to the pool; every apply is shipped to the writer actor
/// so that movement insert and stock update commit as one transaction, and
/// same-article applies never interleave.
pub struct MovementRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
    policy: StockPolicy,
}

impl MovementRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self::with_policy(pool, writer, StockPolicy::default())
    }

    pub fn with_policy(pool: Arc<DbPool>, writer: WriteHandle, policy: StockPolicy) -> Self {
        Self {
            pool,
            writer,
            policy,
        }
    }

    fn filtered(filters: &MovementFilters) -> movements::BoxedQuery<'static, diesel::sqlite::Sqlite> {
        let mut query = movements::table.into_boxed();
        if let Some(article_id) = &filters.article_id {
            query = query.filter(movements::article_id.eq(article_id.clone()));
        }
        if let Some(direction) = filters.direction {
            query = query.filter(movements::direction.eq(direction.as_str()));
        }
        if let Some(customer_id) = &filters.customer_id {
            query = query.filter(movements::customer_id.eq(customer_id.clone()));
        }
        query
    }
}

#[async_trait]
impl MovementRepositoryTrait for MovementRepository {
    async fn apply(&self, new_movement: NewMovement) -> Result<AppliedMovement> {
        let policy = self.policy;
        self.writer
            .exec(move |conn| {
                // The recorder validates first, but the store is the final
                // authority over its own invariants.
                if new_movement.quantity <= 0 {
                    return Err(MovementError::InvalidData(format!(
                        "Quantity must be strictly positive, got {}",
                        new_movement.quantity
                    ))
                    .into());
                }
                let delta = new_movement.direction.signed_delta(new_movement.quantity);
                let requested = new_movement.quantity;
                let row = MovementDB::from_new(new_movement);

                let available = articles::table
                    .find(&row.article_id)
                    .select(articles::stock)
                    .first::<i64>(conn)
                    .optional()
                    .map_err(StorageError::from)?
                    .ok_or_else(|| MovementError::NotFound(row.article_id.clone()))?;

                if available + delta < 0 && !policy.allow_negative_stock {
                    return Err(MovementError::InsufficientStock {
                        article_id: row.article_id.clone(),
                        requested,
                        available,
                    }
                    .into());
                }

                diesel::insert_into(movements::table)
                    .values(&row)
                    .execute(conn)
                    .map_err(StorageError::from)?;

                let stock = diesel::update(articles::table.find(&row.article_id))
                    .set((
                        articles::stock.eq(articles::stock + delta),
                        articles::updated_at.eq(fmt_utc(Utc::now())),
                    ))
                    .returning(articles::stock)
                    .get_result::<i64>(conn)
                    .map_err(StorageError::from)?;

                let movement = Movement::try_from(row)?;
                Ok(AppliedMovement { movement, stock })
            })
            .await
    }

    fn current_stock(&self, article_id: &str) -> Result<i64> {
        let mut conn = get_connection(&self.pool)?;
        articles::table
            .find(article_id)
            .select(articles::stock)
            .first::<i64>(&mut conn)
            .optional()
            .map_err(StorageError::from)?
            .ok_or_else(|| MovementError::NotFound(article_id.to_string()).into())
    }

    fn get_movement(&self, movement_id: &str) -> Result<Movement> {
        let mut conn = get_connection(&self.pool)?;
        let movement_db = movements::table
            .select(MovementDB::as_select())
            .find(movement_id)
            .first::<MovementDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?
            .ok_or_else(|| MovementError::NotFound(movement_id.to_string()))?;
        Movement::try_from(movement_db)
    }

    fn movements_in_range(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
        filters: &MovementFilters,
    ) -> Result<Vec<Movement>> {
        let mut conn = get_connection(&self.pool)?;
        // The stored format sorts lexicographically in chronological order,
        // so the range filter works on the TEXT column directly.
        let rows = Self::filtered(filters)
            .filter(movements::movement_date.ge(fmt_utc(from)))
            .filter(movements::movement_date.le(fmt_utc(to)))
            .order((
                movements::movement_date.desc(),
                movements::created_at.desc(),
            ))
            .select(MovementDB::as_select())
            .load::<MovementDB>(&mut conn)
            .map_err(StorageError::from)?;
        rows.into_iter().map(Movement::try_from).collect()
    }

    fn list_movements(
        &self,
        filters: &MovementFilters,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Movement>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = Self::filtered(filters)
            .order((
                movements::movement_date.desc(),
                movements::created_at.desc(),
            ))
            .limit(limit)
            .offset(offset)
            .select(MovementDB::as_select())
            .load::<MovementDB>(&mut conn)
            .map_err(StorageError::from)?;
        rows.into_iter().map(Movement::try_from).collect()
    }

    fn recent_with_details(&self, limit: i64) -> Result<Vec<MovementDetails>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = movements::table
            .inner_join(articles::table)
            .inner_join(users::table)
            .order((
                movements::movement_date.desc(),
                movements::created_at.desc(),
            ))
            .limit(limit)
            .select((
                movements::id,
                movements::direction,
                movements::quantity,
                movements::movement_date,
                articles::code,
                articles::description,
                users::name,
            ))
            .load::<MovementDetailsDB>(&mut conn)
            .map_err(StorageError::from)?;
        rows.into_iter().map(MovementDetails::try_from).collect()
    }

    fn movements_for_article(&self, article_id: &str) -> Result<Vec<Movement>> {
        let filters = MovementFilters {
            article_id: Some(article_id.to_string()),
            ..Default::default()
        };
        let mut conn = get_connection(&self.pool)?;
        let rows = Self::filtered(&filters)
            .order((
                movements::movement_date.desc(),
                movements::created_at.desc(),
            ))
            .select(MovementDB::as_select())
            .load::<MovementDB>(&mut conn)
            .map_err(StorageError::from)?;
        rows.into_iter().map(Movement::try_from).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{insert_article, insert_user, setup_db};
    use chrono::{Duration, TimeZone};
    use rust_decimal_macros::dec;
    use stockbook_core::movements::MovementDirection;

    fn new_movement(article_id: &str, direction: MovementDirection, quantity: i64) -> NewMovement {
        NewMovement {
            article_id: article_id.to_string(),
            direction,
            quantity,
            reason: None,
            unit_price: None,
            customer_id: None,
            order_id: None,
            movement_date: None,
            user_id: "user-1".to_string(),
        }
    }

    fn seeded_repo(pool: &Arc<DbPool>, writer: &WriteHandle) -> MovementRepository {
        insert_user(pool, "user-1", Some("Mario"), "mario@example.com", "AGENT");
        MovementRepository::new(pool.clone(), writer.clone())
    }

    #[tokio::test]
    async fn apply_persists_movement_and_updates_stock() {
        let (_dir, pool, writer) = setup_db();
        insert_article(&pool, "art-1", "ART-001", "2.50", 10);
        let repo = seeded_repo(&pool, &writer);

        let mut input = new_movement("art-1", MovementDirection::In, 5);
        input.unit_price = Some(dec!(2.50));
        let applied = repo.apply(input).await.unwrap();

        assert_eq!(applied.stock, 15);
        assert_eq!(applied.movement.quantity, 5);
        assert_eq!(applied.movement.unit_price, Some(dec!(2.50)));
        assert_eq!(repo.current_stock("art-1").unwrap(), 15);

        let stored = repo.get_movement(&applied.movement.id).unwrap();
        assert_eq!(stored, applied.movement);
    }

    #[tokio::test]
    async fn stock_equals_signed_sum_of_applied_movements() {
        let (_dir, pool, writer) = setup_db();
        insert_article(&pool, "art-1", "ART-001", "1.00", 0);
        let repo = seeded_repo(&pool, &writer);

        let script = [
            (MovementDirection::In, 40i64),
            (MovementDirection::Out, 15),
            (MovementDirection::In, 3),
            (MovementDirection::Out, 20),
        ];
        for (direction, quantity) in script {
            repo.apply(new_movement("art-1", direction, quantity))
                .await
                .unwrap();
        }

        let history = repo.movements_for_article("art-1").unwrap();
        let signed_sum: i64 = history
            .iter()
            .map(|m| m.direction.signed_delta(m.quantity))
            .sum();
        assert_eq!(signed_sum, 8);
        assert_eq!(repo.current_stock("art-1").unwrap(), 8);
    }

    #[tokio::test]
    async fn out_movement_beyond_stock_is_rejected_and_leaves_no_trace() {
        let (_dir, pool, writer) = setup_db();
        insert_article(&pool, "art-1", "ART-001", "1.00", 10);
        let repo = seeded_repo(&pool, &writer);

        repo.apply(new_movement("art-1", MovementDirection::In, 50))
            .await
            .unwrap();

        let err = repo
            .apply(new_movement("art-1", MovementDirection::Out, 65))
            .await
            .unwrap_err();
        match err {
            Error::Movement(MovementError::InsufficientStock {
                article_id,
                requested,
                available,
            }) => {
                assert_eq!(article_id, "art-1");
                assert_eq!(requested, 65);
                assert_eq!(available, 60);
            }
            other => panic!("expected InsufficientStock, got {:?}", other),
        }

        assert_eq!(repo.current_stock("art-1").unwrap(), 60);
        assert_eq!(repo.movements_for_article("art-1").unwrap().len(), 1);
    }

    #[tokio::test]
    async fn permissive_policy_allows_negative_stock() {
        let (_dir, pool, writer) = setup_db();
        insert_article(&pool, "art-1", "ART-001", "1.00", 3);
        insert_user(&pool, "user-1", Some("Mario"), "mario@example.com", "AGENT");
        let repo = MovementRepository::with_policy(
            pool.clone(),
            writer.clone(),
            StockPolicy::permissive(),
        );

        let applied = repo
            .apply(new_movement("art-1", MovementDirection::Out, 10))
            .await
            .unwrap();
        assert_eq!(applied.stock, -7);
        assert_eq!(repo.current_stock("art-1").unwrap(), -7);
    }

    #[tokio::test]
    async fn missing_ledger_reads_share_one_not_found_error() {
        let (_dir, pool, writer) = setup_db();
        let repo = seeded_repo(&pool, &writer);

        assert!(matches!(
            repo.get_movement("missing"),
            Err(Error::Movement(MovementError::NotFound(ref id))) if id == "missing"
        ));
        assert!(matches!(
            repo.current_stock("missing"),
            Err(Error::Movement(MovementError::NotFound(ref id))) if id == "missing"
        ));
    }

    #[tokio::test]
    async fn apply_rejects_non_positive_quantity() {
        let (_dir, pool, writer) = setup_db();
        insert_article(&pool, "art-1", "ART-001", "1.00", 10);
        let repo = seeded_repo(&pool, &writer);

        let err = repo
            .apply(new_movement("art-1", MovementDirection::In, 0))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Movement(MovementError::InvalidData(_))
        ));
        assert_eq!(repo.current_stock("art-1").unwrap(), 10);
    }

    #[tokio::test]
    async fn apply_against_unknown_article_is_not_found() {
        let (_dir, pool, writer) = setup_db();
        let repo = seeded_repo(&pool, &writer);

        let err = repo
            .apply(new_movement("missing", MovementDirection::In, 1))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Movement(MovementError::NotFound(ref id)) if id == "missing"
        ));
    }

    #[tokio::test]
    async fn failed_write_job_rolls_back_both_sides() {
        let (_dir, pool, writer) = setup_db();
        insert_article(&pool, "art-1", "ART-001", "1.00", 10);
        let repo = seeded_repo(&pool, &writer);

        // Run the same insert-then-update sequence as apply, then fail the
        // job: the rollback must erase both the row and the counter change.
        let result: Result<()> = writer
            .exec(|conn| {
                let row = MovementDB::from_new(new_movement(
                    "art-1",
                    MovementDirection::In,
                    5,
                ));
                diesel::insert_into(movements::table)
                    .values(&row)
                    .execute(conn)
                    .map_err(StorageError::from)?;
                diesel::update(articles::table.find("art-1"))
                    .set(articles::stock.eq(articles::stock + 5))
                    .execute(conn)
                    .map_err(StorageError::from)?;
                Err(Error::Unexpected("injected failure".to_string()))
            })
            .await;
        assert!(result.is_err());

        assert_eq!(repo.current_stock("art-1").unwrap(), 10);
        assert!(repo.movements_for_article("art-1").unwrap().is_empty());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 10)]
    async fn concurrent_applies_lose_no_updates() {
        let (_dir, pool, writer) = setup_db();
        insert_article(&pool, "art-1", "ART-001", "1.00", 0);
        insert_user(&pool, "user-1", Some("Mario"), "mario@example.com", "AGENT");
        let repo = Arc::new(MovementRepository::new(pool.clone(), writer.clone()));

        let mut handles = Vec::new();
        for _ in 0..100 {
            let repo = repo.clone();
            handles.push(tokio::spawn(async move {
                repo.apply(new_movement("art-1", MovementDirection::In, 1))
                    .await
            }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        assert_eq!(repo.current_stock("art-1").unwrap(), 100);
        assert_eq!(repo.movements_for_article("art-1").unwrap().len(), 100);
    }

    #[tokio::test]
    async fn range_query_filters_and_orders_newest_first() {
        let (_dir, pool, writer) = setup_db();
        insert_article(&pool, "art-1", "ART-001", "1.00", 0);
        insert_article(&pool, "art-2", "ART-002", "1.00", 0);
        let repo = seeded_repo(&pool, &writer);

        let base = Utc.with_ymd_and_hms(2024, 3, 10, 12, 0, 0).unwrap();
        for (article_id, direction, offset_days) in [
            ("art-1", MovementDirection::In, 0i64),
            ("art-1", MovementDirection::In, 1),
            ("art-2", MovementDirection::In, 1),
            ("art-1", MovementDirection::In, 5),
        ] {
            let mut input = new_movement(article_id, direction, 1);
            input.movement_date = Some(base + Duration::days(offset_days));
            repo.apply(input).await.unwrap();
        }

        let filters = MovementFilters {
            article_id: Some("art-1".to_string()),
            ..Default::default()
        };
        let in_window = repo
            .movements_in_range(base, base + Duration::days(2), &filters)
            .unwrap();
        assert_eq!(in_window.len(), 2);
        assert!(in_window[0].movement_date > in_window[1].movement_date);

        // Re-querying the same window returns the same rows.
        let again = repo
            .movements_in_range(base, base + Duration::days(2), &filters)
            .unwrap();
        assert_eq!(in_window, again);
    }

    #[tokio::test]
    async fn list_movements_paginates_newest_first() {
        let (_dir, pool, writer) = setup_db();
        insert_article(&pool, "art-1", "ART-001", "1.00", 0);
        let repo = seeded_repo(&pool, &writer);

        let base = Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap();
        for day in 0..5i64 {
            let mut input = new_movement("art-1", MovementDirection::In, 1);
            input.movement_date = Some(base + Duration::days(day));
            repo.apply(input).await.unwrap();
        }

        let filters = MovementFilters::default();
        let first_page = repo.list_movements(&filters, 2, 0).unwrap();
        let second_page = repo.list_movements(&filters, 2, 2).unwrap();
        assert_eq!(first_page.len(), 2);
        assert_eq!(
            first_page[0].movement_date,
            base + Duration::days(4)
        );
        assert_eq!(
            second_page[0].movement_date,
            base + Duration::days(2)
        );
    }

    #[tokio::test]
    async fn recent_with_details_joins_article_and_user() {
        let (_dir, pool, writer) = setup_db();
        insert_article(&pool, "art-1", "ART-001", "1.00", 0);
        let repo = seeded_repo(&pool, &writer);

        repo.apply(new_movement("art-1", MovementDirection::In, 7))
            .await
            .unwrap();

        let feed = repo.recent_with_details(8).unwrap();
        assert_eq!(feed.len(), 1);
        assert_eq!(feed[0].article_code, "ART-001");
        assert_eq!(feed[0].quantity, 7);
        assert_eq!(feed[0].direction, MovementDirection::In);
        assert_eq!(feed[0].user_name.as_deref(), Some("Mario"));
    }
}
