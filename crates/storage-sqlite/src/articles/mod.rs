//! SQLite storage implementation for the article catalog reads.

mod model;
mod repository;

pub use model::ArticleDB;
pub use repository::ArticleRepository;
