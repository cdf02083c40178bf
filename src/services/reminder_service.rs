use anyhow::Result;
use chrono::{NaiveDate, Utc};
use sqlx::SqlitePool;

use crate::models::{DailyStats, Reminder};
use crate::services::activity_service::recalculate_daily_activity;

/// Outcome of a reminder mutation. Undated reminders belong to no day, so
/// they carry no recomputed stats.
#[derive(Debug)]
pub enum ReminderMutation {
    NotFound,
    Applied { stats: Option<DailyStats> },
}

#[derive(Clone)]
pub struct ReminderService {
    db: SqlitePool,
}

impl ReminderService {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    /// Reminders shown for a day: dated for that day, plus undated ones.
    pub async fn list_for_day(&self, user_id: i64, date: NaiveDate) -> Result<Vec<Reminder>> {
        let reminders = sqlx::query_as::<_, Reminder>(
            "SELECT * FROM reminders
             WHERE user_id = ? AND (reminder_date = ? OR reminder_date IS NULL)
             ORDER BY is_done ASC, created_at DESC",
        )
        .bind(user_id)
        .bind(date)
        .fetch_all(&self.db)
        .await?;

        Ok(reminders)
    }

    /// Reminders pinned to exactly this date.
    pub async fn list_by_date(&self, user_id: i64, date: NaiveDate) -> Result<Vec<Reminder>> {
        let reminders = sqlx::query_as::<_, Reminder>(
            "SELECT * FROM reminders WHERE user_id = ? AND reminder_date = ?",
        )
        .bind(user_id)
        .bind(date)
        .fetch_all(&self.db)
        .await?;

        Ok(reminders)
    }

    pub async fn add(
        &self,
        user_id: i64,
        title: &str,
        date: Option<NaiveDate>,
    ) -> Result<(i64, Option<DailyStats>)> {
        let mut tx = self.db.begin().await?;
        let result = sqlx::query(
            "INSERT INTO reminders (user_id, title, reminder_date, created_at)
             VALUES (?, ?, ?, ?)",
        )
        .bind(user_id)
        .bind(title)
        .bind(date)
        .bind(Utc::now().naive_utc())
        .execute(&mut *tx)
        .await?;

        let stats = match date {
            Some(date) => Some(recalculate_daily_activity(&mut tx, user_id, date).await?),
            None => None,
        };
        tx.commit().await?;

        Ok((result.last_insert_rowid(), stats))
    }

    pub async fn toggle(&self, user_id: i64, reminder_id: i64, done: bool) -> Result<ReminderMutation> {
        let mut tx = self.db.begin().await?;

        let reminder_date: Option<Option<NaiveDate>> = sqlx::query_scalar(
            "SELECT reminder_date FROM reminders WHERE id = ? AND user_id = ?",
        )
        .bind(reminder_id)
        .bind(user_id)
        .fetch_optional(&mut *tx)
        .await?;

        let date = match reminder_date {
            Some(date) => date,
            None => return Ok(ReminderMutation::NotFound),
        };

        sqlx::query("UPDATE reminders SET is_done = ? WHERE id = ? AND user_id = ?")
            .bind(done)
            .bind(reminder_id)
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        let stats = match date {
            Some(date) => Some(recalculate_daily_activity(&mut tx, user_id, date).await?),
            None => None,
        };
        tx.commit().await?;

        Ok(ReminderMutation::Applied { stats })
    }

    pub async fn delete(&self, user_id: i64, reminder_id: i64) -> Result<ReminderMutation> {
        let mut tx = self.db.begin().await?;

        let reminder_date: Option<Option<NaiveDate>> = sqlx::query_scalar(
            "SELECT reminder_date FROM reminders WHERE id = ? AND user_id = ?",
        )
        .bind(reminder_id)
        .bind(user_id)
        .fetch_optional(&mut *tx)
        .await?;

        let date = match reminder_date {
            Some(date) => date,
            None => return Ok(ReminderMutation::NotFound),
        };

        sqlx::query("DELETE FROM reminders WHERE id = ? AND user_id = ?")
            .bind(reminder_id)
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        let stats = match date {
            Some(date) => Some(recalculate_daily_activity(&mut tx, user_id, date).await?),
            None => None,
        };
        tx.commit().await?;

        Ok(ReminderMutation::Applied { stats })
    }
}
