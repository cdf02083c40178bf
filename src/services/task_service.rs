use anyhow::Result;
use chrono::{NaiveDate, Utc};
use sqlx::SqlitePool;

use crate::models::{CreateTaskRequest, DailyStats, Task};
use crate::services::activity_service::recalculate_daily_activity;

/// Manual physical tasks. Every mutation recomputes the affected date inside
/// the same transaction.
#[derive(Clone)]
pub struct TaskService {
    db: SqlitePool,
}

impl TaskService {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    pub async fn list_by_date(&self, user_id: i64, date: NaiveDate) -> Result<Vec<Task>> {
        let tasks = sqlx::query_as::<_, Task>(
            "SELECT * FROM tasks WHERE user_id = ? AND task_date = ?",
        )
        .bind(user_id)
        .bind(date)
        .fetch_all(&self.db)
        .await?;

        Ok(tasks)
    }

    pub async fn add_task(&self, user_id: i64, request: CreateTaskRequest) -> Result<DailyStats> {
        let mut tx = self.db.begin().await?;
        sqlx::query(
            "INSERT INTO tasks (user_id, title, task_date, created_at) VALUES (?, ?, ?, ?)",
        )
        .bind(user_id)
        .bind(&request.title)
        .bind(request.date)
        .bind(Utc::now().naive_utc())
        .execute(&mut *tx)
        .await?;
        let stats = recalculate_daily_activity(&mut tx, user_id, request.date).await?;
        tx.commit().await?;

        Ok(stats)
    }

    /// Flip completion; `None` when the task does not belong to the user.
    pub async fn toggle_task(
        &self,
        user_id: i64,
        task_id: i64,
        completed: bool,
    ) -> Result<Option<DailyStats>> {
        let mut tx = self.db.begin().await?;

        let task_date: Option<NaiveDate> =
            sqlx::query_scalar("SELECT task_date FROM tasks WHERE id = ? AND user_id = ?")
                .bind(task_id)
                .bind(user_id)
                .fetch_optional(&mut *tx)
                .await?;

        let date = match task_date {
            Some(date) => date,
            None => return Ok(None),
        };

        sqlx::query("UPDATE tasks SET is_completed = ? WHERE id = ? AND user_id = ?")
            .bind(completed)
            .bind(task_id)
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        let stats = recalculate_daily_activity(&mut tx, user_id, date).await?;
        tx.commit().await?;

        Ok(Some(stats))
    }

    pub async fn delete_task(&self, user_id: i64, task_id: i64) -> Result<Option<DailyStats>> {
        let mut tx = self.db.begin().await?;

        let task_date: Option<NaiveDate> =
            sqlx::query_scalar("SELECT task_date FROM tasks WHERE id = ? AND user_id = ?")
                .bind(task_id)
                .bind(user_id)
                .fetch_optional(&mut *tx)
                .await?;

        let date = match task_date {
            Some(date) => date,
            None => return Ok(None),
        };

        sqlx::query("DELETE FROM tasks WHERE id = ? AND user_id = ?")
            .bind(task_id)
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        let stats = recalculate_daily_activity(&mut tx, user_id, date).await?;
        tx.commit().await?;

        Ok(Some(stats))
    }
}
