//! Shared fixtures for repository tests: a fresh migrated database per test
//! plus seed helpers for the tables the ledger only reads.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use std::sync::Arc;
use tempfile::TempDir;

use crate::db::{create_pool, get_connection, run_migrations, spawn_writer, DbPool, WriteHandle};
use crate::schema::{articles, orders, promotions, users};
use crate::utils::fmt_utc;

/// Creates a migrated database in a temp directory and spawns its writer.
///
/// The `TempDir` must be kept alive for the duration of the test; dropping
/// it deletes the database file.
pub fn setup_db() -> (TempDir, Arc<DbPool>, WriteHandle) {
    let dir = TempDir::new().expect("failed to create temp dir");
    let db_path = dir.path().join("stockbook.db").display().to_string();
    let pool = create_pool(&db_path).expect("failed to create pool");
    run_migrations(&pool).expect("failed to run migrations");
    let writer = spawn_writer(pool.as_ref().clone());
    (dir, pool, writer)
}

pub fn insert_article(pool: &Arc<DbPool>, id: &str, code: &str, price: &str, stock: i64) {
    let mut conn = get_connection(pool).unwrap();
    let now = fmt_utc(Utc::now());
    diesel::insert_into(articles::table)
        .values((
            articles::id.eq(id),
            articles::code.eq(code),
            articles::description.eq(format!("Article {}", code)),
            articles::price.eq(price),
            articles::stock.eq(stock),
            articles::created_at.eq(now.as_str()),
            articles::updated_at.eq(now.as_str()),
        ))
        .execute(&mut conn)
        .unwrap();
}

pub fn insert_user(pool: &Arc<DbPool>, id: &str, name: Option<&str>, email: &str, role: &str) {
    let mut conn = get_connection(pool).unwrap();
    diesel::insert_into(users::table)
        .values((
            users::id.eq(id),
            users::name.eq(name),
            users::email.eq(email),
            users::role.eq(role),
            users::created_at.eq(fmt_utc(Utc::now())),
        ))
        .execute(&mut conn)
        .unwrap();
}

pub fn insert_order(pool: &Arc<DbPool>, id: &str, status: &str) {
    let mut conn = get_connection(pool).unwrap();
    diesel::insert_into(orders::table)
        .values((
            orders::id.eq(id),
            orders::status.eq(status),
            orders::created_at.eq(fmt_utc(Utc::now())),
        ))
        .execute(&mut conn)
        .unwrap();
}

pub fn insert_promotion(
    pool: &Arc<DbPool>,
    id: &str,
    active: bool,
    start_date: DateTime<Utc>,
    end_date: DateTime<Utc>,
) {
    let mut conn = get_connection(pool).unwrap();
    diesel::insert_into(promotions::table)
        .values((
            promotions::id.eq(id),
            promotions::title.eq(format!("Promotion {}", id)),
            promotions::active.eq(active),
            promotions::start_date.eq(fmt_utc(start_date)),
            promotions::end_date.eq(fmt_utc(end_date)),
            promotions::created_at.eq(fmt_utc(Utc::now())),
        ))
        .execute(&mut conn)
        .unwrap();
}
