//! SQLite storage implementation for order reads.

mod repository;

pub use repository::OrderRepository;
