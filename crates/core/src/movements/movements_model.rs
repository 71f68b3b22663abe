//! Movement domain models.

use crate::movements::movements_errors::MovementError;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Whether a movement increases or decreases stock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MovementDirection {
    In,
    Out,
}

impl MovementDirection {
    /// Signed stock delta for this direction: `+quantity` for IN,
    /// `-quantity` for OUT.
    pub fn signed_delta(&self, quantity: i64) -> i64 {
        match self {
            MovementDirection::In => quantity,
            MovementDirection::Out => -quantity,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MovementDirection::In => "IN",
            MovementDirection::Out => "OUT",
        }
    }
}

impl fmt::Display for MovementDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MovementDirection {
    type Err = MovementError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "IN" => Ok(MovementDirection::In),
            "OUT" => Ok(MovementDirection::Out),
            other => Err(MovementError::InvalidData(format!(
                "Unknown movement direction '{}'",
                other
            ))),
        }
    }
}

/// An immutable record of a stock-affecting event.
///
/// Movements are never updated or deleted; corrections are made by recording
/// a compensating movement in the opposite direction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Movement {
    pub id: String,
    pub article_id: String,
    pub direction: MovementDirection,
    /// Strictly positive; the sign lives in `direction`.
    pub quantity: i64,
    pub reason: Option<String>,
    /// Price snapshot at recording time, independent of the article's
    /// current price.
    pub unit_price: Option<Decimal>,
    pub customer_id: Option<String>,
    pub order_id: Option<String>,
    /// Effective date of the movement. May lie in the past or future;
    /// defaults to the recording instant.
    pub movement_date: DateTime<Utc>,
    /// User who recorded the movement.
    pub user_id: String,
    pub created_at: DateTime<Utc>,
}

/// Input model for recording a new movement.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMovement {
    pub article_id: String,
    pub direction: MovementDirection,
    pub quantity: i64,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub unit_price: Option<Decimal>,
    #[serde(default)]
    pub customer_id: Option<String>,
    #[serde(default)]
    pub order_id: Option<String>,
    /// Effective date; `None` means "now".
    #[serde(default)]
    pub movement_date: Option<DateTime<Utc>>,
    /// Stamped by the recorder from the caller's identity.
    #[serde(default)]
    pub user_id: String,
}

impl NewMovement {
    /// Validates the input before any storage interaction.
    pub fn validate(&self) -> std::result::Result<(), MovementError> {
        if self.article_id.trim().is_empty() {
            return Err(MovementError::InvalidData(
                "Article ID cannot be empty".to_string(),
            ));
        }
        if self.quantity <= 0 {
            return Err(MovementError::InvalidData(format!(
                "Quantity must be strictly positive, got {}",
                self.quantity
            )));
        }
        if let Some(price) = self.unit_price {
            if price.is_sign_negative() {
                return Err(MovementError::InvalidData(format!(
                    "Unit price cannot be negative, got {}",
                    price
                )));
            }
        }
        if self.user_id.trim().is_empty() {
            return Err(MovementError::InvalidData(
                "Recording user ID cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Result of a successful apply: the persisted movement together with the
/// article's post-commit stock counter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppliedMovement {
    pub movement: Movement,
    pub stock: i64,
}

/// Optional filters for movement range and list queries.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovementFilters {
    pub article_id: Option<String>,
    pub direction: Option<MovementDirection>,
    pub customer_id: Option<String>,
}

/// Movement joined with article and user fields, for the activity feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovementDetails {
    pub id: String,
    pub direction: MovementDirection,
    pub quantity: i64,
    pub movement_date: DateTime<Utc>,
    pub article_code: String,
    pub article_description: String,
    pub user_name: Option<String>,
}

/// Policy governing whether an OUT movement may drive stock below zero.
///
/// The default forbids negative stock and surfaces
/// [`MovementError::InsufficientStock`]; deployments that need the legacy
/// permissive behavior flip the flag instead of losing the guard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StockPolicy {
    pub allow_negative_stock: bool,
}

impl StockPolicy {
    pub fn permissive() -> Self {
        Self {
            allow_negative_stock: true,
        }
    }
}
