//! Stockbook Core - Domain entities, services, and traits.
//!
//! This crate contains the inventory movement ledger and stock-consistency
//! engine. It is database-agnostic and defines repository traits that are
//! implemented by the `storage-sqlite` crate.

pub mod articles;
pub mod auth;
pub mod constants;
pub mod dashboard;
pub mod errors;
pub mod movements;
pub mod reports;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
