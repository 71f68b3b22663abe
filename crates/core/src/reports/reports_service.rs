use std::sync::Arc;

use crate::movements::{Movement, MovementDetails, MovementRepositoryTrait};
use crate::Result;

/// Read-only projections over ledger state for presentation.
///
/// Performs no mutation and holds no cache; callers may cache results safely.
pub struct ReportsService {
    movement_repository: Arc<dyn MovementRepositoryTrait>,
}

impl ReportsService {
    pub fn new(movement_repository: Arc<dyn MovementRepositoryTrait>) -> Self {
        Self {
            movement_repository,
        }
    }

    /// Most recent movements joined with article and user fields, newest
    /// first, bounded by `limit`.
    pub fn recent_activity(&self, limit: i64) -> Result<Vec<MovementDetails>> {
        self.movement_repository.recent_with_details(limit)
    }

    /// Full movement history for one article, newest first.
    pub fn article_history(&self, article_id: &str) -> Result<Vec<Movement>> {
        self.movement_repository.movements_for_article(article_id)
    }
}
