//! Dashboard aggregate models. Nothing here is persisted; every value is
//! recomputed from committed store state on each read.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::articles::LowStockArticle;
use crate::movements::MovementDetails;

/// Today's movement quantities, split by direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct TodayTotals {
    pub in_qty: i64,
    pub out_qty: i64,
}

/// One calendar day of the trend window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayFlow {
    pub day: NaiveDate,
    pub in_qty: i64,
    pub out_qty: i64,
}

impl DayFlow {
    pub fn empty(day: NaiveDate) -> Self {
        Self {
            day,
            in_qty: 0,
            out_qty: 0,
        }
    }
}

/// Composite payload consumed by the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardMetrics {
    pub articles_total: i64,
    pub stock_total: i64,
    pub today_in: i64,
    pub today_out: i64,
    pub low_stock_list: Vec<LowStockArticle>,
    pub low_stock_count: i64,
    pub valuation: Decimal,
    pub trend: Vec<DayFlow>,
    pub recent_activity: Vec<MovementDetails>,
    pub alerts_count: i64,
}
