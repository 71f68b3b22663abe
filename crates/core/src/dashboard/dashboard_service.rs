use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use log::{debug, warn};
use num_traits::Zero;
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::articles::{ArticleRepositoryTrait, LowStockSummary};
use crate::constants::{
    LOW_STOCK_PREVIEW_LIMIT, LOW_STOCK_THRESHOLD, PROMO_EXPIRY_WINDOW_DAYS, RECENT_ACTIVITY_LIMIT,
    TREND_DAYS_BACK,
};
use crate::dashboard::dashboard_model::{DashboardMetrics, DayFlow, TodayTotals};
use crate::dashboard::day_bucket::{day_end, day_key, day_start};
use crate::dashboard::{OrderReadTrait, PromotionReadTrait};
use crate::movements::{MovementDirection, MovementFilters, MovementRepositoryTrait};
use crate::Result;

/// Derives dashboard metrics from committed store state at call time.
///
/// There is no caching and no background refresh; every call re-reads the
/// store. Operations that depend on "today" take the caller's `now` so that
/// results stay deterministic under test; production passes
/// `chrono::Local::now()`.
pub struct DashboardService {
    movement_repository: Arc<dyn MovementRepositoryTrait>,
    article_repository: Arc<dyn ArticleRepositoryTrait>,
    promotion_reader: Arc<dyn PromotionReadTrait>,
    order_reader: Arc<dyn OrderReadTrait>,
}

impl DashboardService {
    pub fn new(
        movement_repository: Arc<dyn MovementRepositoryTrait>,
        article_repository: Arc<dyn ArticleRepositoryTrait>,
        promotion_reader: Arc<dyn PromotionReadTrait>,
        order_reader: Arc<dyn OrderReadTrait>,
    ) -> Self {
        Self {
            movement_repository,
            article_repository,
            promotion_reader,
            order_reader,
        }
    }

    /// Sums of today's movement quantities, split by direction. "Today" is
    /// the calendar day containing `now` in `now`'s time zone, local
    /// midnight to local midnight.
    pub fn today_totals<Tz: TimeZone>(&self, now: DateTime<Tz>) -> Result<TodayTotals> {
        let tz = now.timezone();
        let today = now.date_naive();
        let movements = self.movement_repository.movements_in_range(
            day_start(today, &tz),
            day_end(today, &tz),
            &MovementFilters::default(),
        )?;

        let mut totals = TodayTotals::default();
        for movement in movements {
            // The range query may over-fetch at zone boundaries; the day key
            // decides membership.
            if day_key(&movement.movement_date, &tz) != today {
                continue;
            }
            match movement.direction {
                MovementDirection::In => totals.in_qty += movement.quantity,
                MovementDirection::Out => totals.out_qty += movement.quantity,
            }
        }
        Ok(totals)
    }

    /// Day-bucketed in/out quantities over the `days_back + 1` calendar days
    /// ending at `now`'s day. The series is dense: days without movements
    /// appear zero-filled, ordered chronologically ascending.
    pub fn trend<Tz: TimeZone>(&self, now: DateTime<Tz>, days_back: u32) -> Result<Vec<DayFlow>> {
        let tz = now.timezone();
        let today = now.date_naive();
        let first_day = today - Duration::days(days_back as i64);

        let mut buckets: BTreeMap<NaiveDate, DayFlow> = (0..=days_back)
            .map(|i| {
                let day = first_day + Duration::days(i as i64);
                (day, DayFlow::empty(day))
            })
            .collect();

        let movements = self.movement_repository.movements_in_range(
            day_start(first_day, &tz),
            day_end(today, &tz),
            &MovementFilters::default(),
        )?;

        for movement in movements {
            let key = day_key(&movement.movement_date, &tz);
            if let Some(entry) = buckets.get_mut(&key) {
                match movement.direction {
                    MovementDirection::In => entry.in_qty += movement.quantity,
                    MovementDirection::Out => entry.out_qty += movement.quantity,
                }
            }
        }

        Ok(buckets.into_values().collect())
    }

    /// Articles at or below `threshold`, ascending by stock, truncated to
    /// `limit`, plus the un-truncated match count.
    pub fn low_stock(&self, threshold: i64, limit: i64) -> Result<LowStockSummary> {
        self.article_repository.low_stock(threshold, limit)
    }

    /// Total monetary value of on-hand inventory: Σ price × stock over all
    /// articles, in fixed-point decimal arithmetic. Zero for an empty
    /// catalog.
    pub fn valuation(&self) -> Result<Decimal> {
        let inputs = self.article_repository.valuation_inputs()?;
        Ok(inputs
            .iter()
            .fold(Decimal::zero(), |acc, input| {
                acc + input.price * Decimal::from(input.stock)
            }))
    }

    /// Notification badge count: low-stock articles, plus promotions ending
    /// within `promo_window_days`, plus pending orders.
    ///
    /// The two collaborator sub-counts are non-critical and degrade to zero
    /// on failure; the low-stock count is served by the store and surfaces
    /// its errors.
    pub fn alerts_count(
        &self,
        now: DateTime<Utc>,
        low_stock_threshold: i64,
        promo_window_days: i64,
    ) -> Result<i64> {
        let low_stock = self
            .article_repository
            .low_stock(low_stock_threshold, 0)?
            .total_count;

        let expiring_promotions = self
            .promotion_reader
            .count_expiring_within(now, promo_window_days)
            .unwrap_or_else(|e| {
                warn!("Promotion expiry count unavailable, omitting from alerts: {e}");
                0
            });
        let pending_orders = self.order_reader.count_pending().unwrap_or_else(|e| {
            warn!("Pending order count unavailable, omitting from alerts: {e}");
            0
        });

        Ok(low_stock + expiring_promotions + pending_orders)
    }

    /// Everything the dashboard renders, computed in one pass with the
    /// application defaults (7-day trend, 5-item low-stock preview, 8-item
    /// activity feed).
    pub fn dashboard_metrics<Tz: TimeZone>(&self, now: DateTime<Tz>) -> Result<DashboardMetrics> {
        debug!("Computing dashboard metrics");

        let now_utc = now.clone().with_timezone(&Utc);
        let today = self.today_totals(now.clone())?;
        let trend = self.trend(now, TREND_DAYS_BACK)?;
        let low_stock = self.low_stock(LOW_STOCK_THRESHOLD, LOW_STOCK_PREVIEW_LIMIT)?;
        let alerts_count =
            self.alerts_count(now_utc, LOW_STOCK_THRESHOLD, PROMO_EXPIRY_WINDOW_DAYS)?;

        Ok(DashboardMetrics {
            articles_total: self.article_repository.count_articles()?,
            stock_total: self.article_repository.total_stock()?,
            today_in: today.in_qty,
            today_out: today.out_qty,
            low_stock_count: low_stock.total_count,
            low_stock_list: low_stock.articles,
            valuation: self.valuation()?,
            trend,
            recent_activity: self
                .movement_repository
                .recent_with_details(RECENT_ACTIVITY_LIMIT)?,
            alerts_count,
        })
    }
}
