//! Movements module - the ledger contract and the movement recorder.

mod movements_errors;
mod movements_model;
mod movements_service;
mod movements_traits;



pub use movements_errors::MovementError;
pub use movements_model::{
    AppliedMovement, Movement, MovementDetails, MovementDirection, MovementFilters, NewMovement,
    StockPolicy,
};
pub use movements_service::MovementService;
pub use movements_traits::{MovementRepositoryTrait, MovementServiceTrait};
