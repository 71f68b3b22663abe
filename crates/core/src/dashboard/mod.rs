//! Dashboard module - the aggregation engine over committed ledger state.

mod dashboard_model;
mod dashboard_service;
mod dashboard_traits;
mod day_bucket;


pub use dashboard_model::{DashboardMetrics, DayFlow, TodayTotals};
pub use dashboard_service::DashboardService;
pub use dashboard_traits::{OrderReadTrait, PromotionReadTrait};
pub use day_bucket::{day_end, day_key, day_start};
