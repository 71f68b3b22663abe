//! Article domain models.
//!
//! Articles are catalog entities managed outside this core. The ledger is the
//! sole writer of the `stock` counter; everything else here is read-only.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A stocked item from the article catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub id: String,
    /// Unique human-readable code (e.g. `ART-001`).
    pub code: String,
    pub description: String,
    /// Current unit price. Fixed-point decimal, never a float.
    pub price: Decimal,
    /// On-hand quantity. Equals the signed sum of all movements referencing
    /// this article; mutated only through the ledger's apply path.
    pub stock: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Compact article view used in the low-stock preview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LowStockArticle {
    pub id: String,
    pub code: String,
    pub description: String,
    pub stock: i64,
}

/// Low-stock query result: the truncated preview plus the full match count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct LowStockSummary {
    /// Matching articles ordered by stock ascending, truncated to the
    /// requested limit.
    pub articles: Vec<LowStockArticle>,
    /// Total number of matching articles, independent of truncation.
    pub total_count: i64,
}

/// Price and stock pair consumed by the valuation aggregate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValuationInput {
    pub price: Decimal,
    pub stock: i64,
}
