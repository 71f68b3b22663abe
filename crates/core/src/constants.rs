//! Application-wide constants.

/// Stock level at or below which an article is considered low on stock.
pub const LOW_STOCK_THRESHOLD: i64 = 5;

/// Number of days before "today" covered by the dashboard trend window.
/// The window itself spans `TREND_DAYS_BACK + 1` calendar days.
pub const TREND_DAYS_BACK: u32 = 6;

/// Number of low-stock articles shown in the dashboard preview.
pub const LOW_STOCK_PREVIEW_LIMIT: i64 = 5;

/// Number of movements shown in the recent activity feed.
pub const RECENT_ACTIVITY_LIMIT: i64 = 8;

/// Promotions ending within this many days count towards the alerts badge.
pub const PROMO_EXPIRY_WINDOW_DAYS: i64 = 7;
