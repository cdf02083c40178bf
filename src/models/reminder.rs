use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A dated (or undated) reminder. Undated reminders never contribute to
/// daily activity totals.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Reminder {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub reminder_date: Option<NaiveDate>,
    pub is_done: bool,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Deserialize)]
pub struct CreateReminderRequest {
    pub title: String,
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Deserialize)]
pub struct ToggleReminderRequest {
    pub id: i64,
    pub done: bool,
}
