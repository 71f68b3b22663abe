//! SQLite persistence for the stockbook ledger, built on Diesel.
//!
//! Repositories implement the trait seams defined in `stockbook_core`. Reads
//! run on a shared r2d2 pool; all writes are funneled through a single-writer
//! actor so that ledger applies are atomic and serialized.

pub mod db;
pub mod errors;
pub mod schema;
pub mod utils;

pub mod articles;
pub mod movements;
pub mod orders;
pub mod promotions;

#[cfg(test)]
mod test_support;

pub use articles::ArticleRepository;
pub use db::{create_pool, get_connection, init, run_migrations, spawn_writer, DbPool, WriteHandle};
pub use errors::StorageError;
pub use movements::MovementRepository;
pub use orders::OrderRepository;
pub use promotions::PromotionRepository;
