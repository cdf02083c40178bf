use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A dated physical goal. `completed_count`/`total_count` support partial
/// completion; a plain checkbox goal has total_count 1.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PhysicalGoal {
    pub id: i64,
    pub user_id: i64,
    pub goal_title: String,
    pub goal_date: NaiveDate,
    pub completed_count: i64,
    pub total_count: i64,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Deserialize)]
pub struct CreateGoalRequest {
    pub goal_title: String,
    pub goal_date: NaiveDate,
}

#[derive(Debug, Deserialize)]
pub struct ToggleGoalRequest {
    pub id: i64,
    pub completed: bool,
}

#[derive(Debug, Deserialize)]
pub struct DeleteGoalRequest {
    pub id: i64,
}
