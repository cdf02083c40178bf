use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A manual physical task pinned to a calendar date.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Task {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub task_date: NaiveDate,
    pub is_completed: bool,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Deserialize)]
pub struct CreateTaskRequest {
    pub title: String,
    pub date: NaiveDate,
}

#[derive(Debug, Deserialize)]
pub struct ToggleTaskRequest {
    pub id: i64,
    pub completed: bool,
}
