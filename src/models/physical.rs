use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Free-form per-day physical log, lazily created on first access.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DailyPhysical {
    pub id: i64,
    pub user_id: i64,
    pub entry_date: NaiveDate,
    pub water_intake_liters: Option<f64>,
    pub food_log: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateDailyPhysicalRequest {
    pub water: Option<f64>,
    pub food_log: Option<String>,
}
