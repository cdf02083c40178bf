use anyhow::Result;
use chrono::NaiveDate;
use sqlx::SqlitePool;

use crate::models::{DailyPhysical, UpdateDailyPhysicalRequest};

/// Per-day free-form physical log (water intake, food notes).
#[derive(Clone)]
pub struct PhysicalService {
    db: SqlitePool,
}

impl PhysicalService {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    /// Fetch the day's log row, creating an empty one on first access.
    pub async fn ensure_daily(&self, user_id: i64, date: NaiveDate) -> Result<DailyPhysical> {
        sqlx::query(
            "INSERT INTO daily_physical (user_id, entry_date) VALUES (?, ?)
             ON CONFLICT(user_id, entry_date) DO NOTHING",
        )
        .bind(user_id)
        .bind(date)
        .execute(&self.db)
        .await?;

        let daily = sqlx::query_as::<_, DailyPhysical>(
            "SELECT * FROM daily_physical WHERE user_id = ? AND entry_date = ?",
        )
        .bind(user_id)
        .bind(date)
        .fetch_one(&self.db)
        .await?;

        Ok(daily)
    }

    pub async fn update_daily(
        &self,
        user_id: i64,
        date: NaiveDate,
        request: UpdateDailyPhysicalRequest,
    ) -> Result<DailyPhysical> {
        self.ensure_daily(user_id, date).await?;

        if let Some(water) = request.water {
            sqlx::query(
                "UPDATE daily_physical SET water_intake_liters = ?
                 WHERE user_id = ? AND entry_date = ?",
            )
            .bind(water)
            .bind(user_id)
            .bind(date)
            .execute(&self.db)
            .await?;
        }

        if let Some(food_log) = &request.food_log {
            sqlx::query(
                "UPDATE daily_physical SET food_log = ? WHERE user_id = ? AND entry_date = ?",
            )
            .bind(food_log)
            .bind(user_id)
            .bind(date)
            .execute(&self.db)
            .await?;
        }

        self.ensure_daily(user_id, date).await
    }
}
