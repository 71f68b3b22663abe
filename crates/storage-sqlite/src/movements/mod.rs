//! SQLite storage implementation for the stock ledger.

mod model;
mod repository;

pub use model::MovementDB;
pub use repository::MovementRepository;
