//! Database models for articles.

use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use stockbook_core::articles::{Article, LowStockArticle, ValuationInput};

use crate::utils::{parse_decimal_string_tolerant, parse_utc_tolerant};

/// Database model for articles.
#[derive(Queryable, Identifiable, Selectable, PartialEq, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::articles)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ArticleDB {
    pub id: String,
    pub code: String,
    pub description: String,
    pub price: String,
    pub stock: i64,
    pub created_at: String,
    pub updated_at: String,
}

impl From<ArticleDB> for Article {
    fn from(db: ArticleDB) -> Self {
        Self {
            price: parse_decimal_string_tolerant(&db.price, "price"),
            created_at: parse_utc_tolerant(&db.created_at, "created_at"),
            updated_at: parse_utc_tolerant(&db.updated_at, "updated_at"),
            id: db.id,
            code: db.code,
            description: db.description,
            stock: db.stock,
        }
    }
}

impl From<ArticleDB> for LowStockArticle {
    fn from(db: ArticleDB) -> Self {
        Self {
            id: db.id,
            code: db.code,
            description: db.description,
            stock: db.stock,
        }
    }
}

/// Price/stock pair row, as selected for valuation.
#[derive(Queryable, Debug, Clone)]
pub struct ValuationInputDB {
    pub price: String,
    pub stock: i64,
}

impl From<ValuationInputDB> for ValuationInput {
    fn from(db: ValuationInputDB) -> Self {
        Self {
            price: parse_decimal_string_tolerant(&db.price, "price"),
            stock: db.stock,
        }
    }
}
