use super::articles_model::{Article, LowStockSummary, ValuationInput};
use crate::Result;

/// Trait defining the read-only contract against the article catalog.
///
/// The ledger never writes stock through this trait; the counter is mutated
/// exclusively by the movement repository's apply path.
pub trait ArticleRepositoryTrait: Send + Sync {
    fn get_article(&self, article_id: &str) -> Result<Article>;
    fn list_articles(&self) -> Result<Vec<Article>>;
    fn count_articles(&self) -> Result<i64>;
    /// Sum of the stock counters over the whole catalog.
    fn total_stock(&self) -> Result<i64>;
    /// Articles with `stock <= threshold`, ascending by stock, truncated to
    /// `limit`, together with the un-truncated match count.
    fn low_stock(&self, threshold: i64, limit: i64) -> Result<LowStockSummary>;
    /// Price/stock pairs for the whole catalog, for inventory valuation.
    fn valuation_inputs(&self) -> Result<Vec<ValuationInput>>;
}
