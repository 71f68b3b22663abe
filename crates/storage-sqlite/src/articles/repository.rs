use diesel::dsl::sql;
use diesel::prelude::*;
use diesel::sql_types::{BigInt, Nullable};
use std::sync::Arc;

use stockbook_core::articles::{
    Article, ArticleRepositoryTrait, LowStockSummary, ValuationInput,
};
use stockbook_core::errors::DatabaseError;
use stockbook_core::{Error, Result};

use super::model::{ArticleDB, ValuationInputDB};
use crate::db::{get_connection, DbPool};
use crate::errors::StorageError;
use crate::schema::articles;

/// Read-only repository over the article catalog.
///
/// Catalog writes happen outside this core; the `stock` column is mutated
/// only by the movement repository's apply path.
pub struct ArticleRepository {
    pool: Arc<DbPool>,
}

impl ArticleRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }
}

impl ArticleRepositoryTrait for ArticleRepository {
    fn get_article(&self, article_id: &str) -> Result<Article> {
        let mut conn = get_connection(&self.pool)?;
        let article_db = articles::table
            .select(ArticleDB::as_select())
            .find(article_id)
            .first::<ArticleDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?
            .ok_or_else(|| {
                Error::Database(DatabaseError::NotFound(format!(
                    "Article {} does not exist",
                    article_id
                )))
            })?;
        Ok(Article::from(article_db))
    }

    fn list_articles(&self) -> Result<Vec<Article>> {
        let mut conn = get_connection(&self.pool)?;
        let articles_db = articles::table
            .select(ArticleDB::as_select())
            .order(articles::code.asc())
            .load::<ArticleDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(articles_db.into_iter().map(Article::from).collect())
    }

    fn count_articles(&self) -> Result<i64> {
        let mut conn = get_connection(&self.pool)?;
        Ok(articles::table
            .count()
            .get_result::<i64>(&mut conn)
            .map_err(StorageError::from)?)
    }

    fn total_stock(&self) -> Result<i64> {
        let mut conn = get_connection(&self.pool)?;
        // diesel's sum() widens BigInt to Numeric; keep the i64 type with a
        // literal SUM instead.
        let total = articles::table
            .select(sql::<Nullable<BigInt>>("SUM(stock)"))
            .get_result::<Option<i64>>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(total.unwrap_or(0))
    }

    fn low_stock(&self, threshold: i64, limit: i64) -> Result<LowStockSummary> {
        let mut conn = get_connection(&self.pool)?;

        let total_count = articles::table
            .filter(articles::stock.le(threshold))
            .count()
            .get_result::<i64>(&mut conn)
            .map_err(StorageError::from)?;

        let preview = articles::table
            .filter(articles::stock.le(threshold))
            .order(articles::stock.asc())
            .limit(limit)
            .select(ArticleDB::as_select())
            .load::<ArticleDB>(&mut conn)
            .map_err(StorageError::from)?;

        Ok(LowStockSummary {
            articles: preview.into_iter().map(Into::into).collect(),
            total_count,
        })
    }

    fn valuation_inputs(&self) -> Result<Vec<ValuationInput>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = articles::table
            .select((articles::price, articles::stock))
            .load::<ValuationInputDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{insert_article, setup_db};
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn low_stock_orders_ascending_and_counts_all_matches() {
        let (_dir, pool, _writer) = setup_db();
        for (i, stock) in [10i64, 2, 0, 7, 5].iter().enumerate() {
            insert_article(&pool, &format!("art-{}", i + 1), &format!("ART-{:03}", i + 1), "1.00", *stock);
        }
        let repo = ArticleRepository::new(pool);

        let summary = repo.low_stock(5, 2).unwrap();
        assert_eq!(summary.total_count, 3);
        assert_eq!(summary.articles.len(), 2);
        assert_eq!(summary.articles[0].stock, 0);
        assert_eq!(summary.articles[1].stock, 2);
    }

    #[tokio::test]
    async fn catalog_totals() {
        let (_dir, pool, _writer) = setup_db();
        insert_article(&pool, "art-1", "ART-001", "2.50", 100);
        insert_article(&pool, "art-2", "ART-002", "1.20", 250);
        let repo = ArticleRepository::new(pool);

        assert_eq!(repo.count_articles().unwrap(), 2);
        assert_eq!(repo.total_stock().unwrap(), 350);

        let inputs = repo.valuation_inputs().unwrap();
        assert_eq!(inputs.len(), 2);
        assert_eq!(inputs[0].price, dec!(2.50));
    }

    #[tokio::test]
    async fn empty_catalog_totals_are_zero() {
        let (_dir, pool, _writer) = setup_db();
        let repo = ArticleRepository::new(pool);
        assert_eq!(repo.count_articles().unwrap(), 0);
        assert_eq!(repo.total_stock().unwrap(), 0);
        assert!(repo.valuation_inputs().unwrap().is_empty());
    }

    #[tokio::test]
    async fn get_article_surfaces_not_found() {
        let (_dir, pool, _writer) = setup_db();
        let repo = ArticleRepository::new(pool);
        assert!(matches!(
            repo.get_article("missing"),
            Err(Error::Database(DatabaseError::NotFound(_)))
        ));
    }

    #[tokio::test]
    async fn list_articles_orders_by_code() {
        let (_dir, pool, _writer) = setup_db();
        insert_article(&pool, "art-2", "ART-002", "1.00", 1);
        insert_article(&pool, "art-1", "ART-001", "1.00", 1);
        let repo = ArticleRepository::new(pool);

        let listed = repo.list_articles().unwrap();
        assert_eq!(listed[0].code, "ART-001");
        assert_eq!(listed[1].code, "ART-002");
    }
}
