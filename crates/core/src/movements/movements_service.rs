use log::debug;
use std::sync::Arc;

use crate::auth::Caller;
use crate::movements::movements_model::*;
use crate::movements::{MovementRepositoryTrait, MovementServiceTrait};
use crate::{Error, Result};

/// The movement recorder: the only entry point permitted to create movements.
///
/// Validation runs before any storage interaction; storage errors are
/// propagated unchanged, with no retries and no silent correction.
pub struct MovementService {
    movement_repository: Arc<dyn MovementRepositoryTrait>,
}

impl MovementService {
    pub fn new(movement_repository: Arc<dyn MovementRepositoryTrait>) -> Self {
        Self {
            movement_repository,
        }
    }
}

#[async_trait::async_trait]
impl MovementServiceTrait for MovementService {
    /// Records a movement on behalf of `caller`.
    ///
    /// The caller must hold the recording capability (Admin or Agent). The
    /// recording user is stamped from the caller identity; a `user_id`
    /// supplied on the input is ignored.
    async fn record(&self, caller: &Caller, mut input: NewMovement) -> Result<AppliedMovement> {
        if !caller.can_record_movements() {
            return Err(Error::Forbidden(format!(
                "Role {:?} cannot record movements",
                caller.role
            )));
        }

        input.user_id = caller.user_id.clone();
        input.validate()?;

        debug!(
            "Recording {} movement of {} for article {}",
            input.direction, input.quantity, input.article_id
        );
        self.movement_repository.apply(input).await
    }

    fn get_movement(&self, movement_id: &str) -> Result<Movement> {
        self.movement_repository.get_movement(movement_id)
    }

    fn current_stock(&self, article_id: &str) -> Result<i64> {
        self.movement_repository.current_stock(article_id)
    }

    fn list_movements(
        &self,
        filters: &MovementFilters,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Movement>> {
        self.movement_repository
            .list_movements(filters, limit, offset)
    }
}
