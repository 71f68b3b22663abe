use thiserror::Error;

/// Errors raised by the movement recorder and the stock ledger.
#[derive(Error, Debug)]
pub enum MovementError {
    /// The referenced article (or movement) does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// An OUT movement would drive the article's stock below zero.
    #[error(
        "Insufficient stock for article {article_id}: requested {requested}, available {available}"
    )]
    InsufficientStock {
        article_id: String,
        requested: i64,
        available: i64,
    },

    /// Malformed input, rejected before any storage interaction.
    #[error("Invalid movement data: {0}")]
    InvalidData(String),
}
