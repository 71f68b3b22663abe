//! Articles module - catalog models and the read-only repository contract.

mod articles_model;
mod articles_traits;

pub use articles_model::{Article, LowStockArticle, LowStockSummary, ValuationInput};
pub use articles_traits::ArticleRepositoryTrait;
