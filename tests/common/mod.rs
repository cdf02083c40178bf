#![allow(dead_code)]

use chrono::{NaiveDate, Utc};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

/// Fresh in-memory database with the full schema applied.
///
/// A single connection keeps every query in the test on the same in-memory
/// database.
pub async fn test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("failed to open in-memory database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("failed to run migrations");

    pool
}

/// Insert a bare test user (password hash is not meant to verify).
pub async fn seed_user(pool: &SqlitePool, username: &str) -> i64 {
    let result = sqlx::query(
        "INSERT INTO users (username, password_hash, created_at) VALUES (?, ?, ?)",
    )
    .bind(username)
    .bind("x")
    .bind(Utc::now().naive_utc())
    .execute(pool)
    .await
    .expect("failed to seed user");

    result.last_insert_rowid()
}

/// Raw checklist row, bypassing the generator (simulates legacy data).
pub async fn seed_checklist_item(
    pool: &SqlitePool,
    user_id: i64,
    date: NaiveDate,
    label: &str,
    item_type: &str,
    checked: bool,
) {
    sqlx::query(
        "INSERT INTO nutrition_checklist (user_id, entry_date, item_label, item_type, is_checked)
         VALUES (?, ?, ?, ?, ?)",
    )
    .bind(user_id)
    .bind(date)
    .bind(label)
    .bind(item_type)
    .bind(checked)
    .execute(pool)
    .await
    .expect("failed to seed checklist item");
}

/// Raw reminder row, bypassing the service (no recalculation side effect).
pub async fn seed_reminder(
    pool: &SqlitePool,
    user_id: i64,
    date: Option<NaiveDate>,
    title: &str,
    done: bool,
) {
    sqlx::query(
        "INSERT INTO reminders (user_id, title, reminder_date, is_done, created_at)
         VALUES (?, ?, ?, ?, ?)",
    )
    .bind(user_id)
    .bind(title)
    .bind(date)
    .bind(done)
    .bind(Utc::now().naive_utc())
    .execute(pool)
    .await
    .expect("failed to seed reminder");
}
