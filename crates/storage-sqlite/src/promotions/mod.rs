//! SQLite storage implementation for promotion reads.

mod repository;

pub use repository::PromotionRepository;
