use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ProfessionTask {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub task_date: NaiveDate,
    pub is_completed: bool,
    pub created_at: NaiveDateTime,
}

/// All-time profession rollup, refreshed on every toggle.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ProfessionStats {
    pub user_id: i64,
    pub completed_count: i64,
    pub target_count: i64,
}

#[derive(Debug, Deserialize)]
pub struct CreateProfessionTaskRequest {
    pub title: String,
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Deserialize)]
pub struct ToggleProfessionTaskRequest {
    pub id: i64,
    pub completed: bool,
}

#[derive(Debug, Deserialize)]
pub struct EditProfessionTaskRequest {
    pub id: i64,
    pub title: String,
}

/// Returned from a toggle so the client can refresh its counters without a
/// second round trip.
#[derive(Debug, Serialize)]
pub struct ProfessionToggleOutcome {
    pub done: i64,
    pub total: i64,
    pub pct: i64,
}
