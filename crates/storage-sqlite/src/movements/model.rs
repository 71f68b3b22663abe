//! Database models for movements.

use chrono::Utc;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

use stockbook_core::movements::{Movement, MovementDetails, MovementDirection, NewMovement};
use stockbook_core::{Error, Result};

use crate::utils::{fmt_utc, parse_decimal_string_tolerant, parse_utc_tolerant};

/// Database model for movements. Rows are append-only.
#[derive(Queryable, Identifiable, Insertable, Selectable, PartialEq, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::movements)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct MovementDB {
    pub id: String,
    pub article_id: String,
    pub direction: String,
    pub quantity: i64,
    pub reason: Option<String>,
    pub unit_price: Option<String>,
    pub customer_id: Option<String>,
    pub order_id: Option<String>,
    pub movement_date: String,
    pub user_id: String,
    pub created_at: String,
}

impl MovementDB {
    /// Builds an insertable row from validated input, minting the id and
    /// defaulting the effective date to the recording instant.
    pub fn from_new(new_movement: NewMovement) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            article_id: new_movement.article_id,
            direction: new_movement.direction.as_str().to_string(),
            quantity: new_movement.quantity,
            reason: new_movement.reason,
            unit_price: new_movement.unit_price.map(|p| p.to_string()),
            customer_id: new_movement.customer_id,
            order_id: new_movement.order_id,
            movement_date: fmt_utc(new_movement.movement_date.unwrap_or(now)),
            user_id: new_movement.user_id,
            created_at: fmt_utc(now),
        }
    }
}

impl TryFrom<MovementDB> for Movement {
    type Error = Error;

    fn try_from(db: MovementDB) -> Result<Movement> {
        Ok(Movement {
            direction: MovementDirection::from_str(&db.direction)?,
            unit_price: db
                .unit_price
                .as_deref()
                .map(|p| parse_decimal_string_tolerant(p, "unit_price")),
            movement_date: parse_utc_tolerant(&db.movement_date, "movement_date"),
            created_at: parse_utc_tolerant(&db.created_at, "created_at"),
            id: db.id,
            article_id: db.article_id,
            quantity: db.quantity,
            reason: db.reason,
            customer_id: db.customer_id,
            order_id: db.order_id,
            user_id: db.user_id,
        })
    }
}

/// Movement joined with article and user fields, for the activity feed.
#[derive(Queryable, Debug, Clone)]
pub struct MovementDetailsDB {
    pub id: String,
    pub direction: String,
    pub quantity: i64,
    pub movement_date: String,
    pub article_code: String,
    pub article_description: String,
    pub user_name: Option<String>,
}

impl TryFrom<MovementDetailsDB> for MovementDetails {
    type Error = Error;

    fn try_from(db: MovementDetailsDB) -> Result<MovementDetails> {
        Ok(MovementDetails {
            direction: MovementDirection::from_str(&db.direction)?,
            movement_date: parse_utc_tolerant(&db.movement_date, "movement_date"),
            id: db.id,
            quantity: db.quantity,
            article_code: db.article_code,
            article_description: db.article_description,
            user_name: db.user_name,
        })
    }
}
