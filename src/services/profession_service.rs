use anyhow::Result;
use chrono::{NaiveDate, Utc};
use sqlx::SqlitePool;

use crate::models::{ProfessionStats, ProfessionTask, ProfessionToggleOutcome};
use crate::services::activity_service::{percentage, recalculate_daily_activity};

#[derive(Clone)]
pub struct ProfessionService {
    db: SqlitePool,
}

impl ProfessionService {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    pub async fn list_tasks(&self, user_id: i64) -> Result<Vec<ProfessionTask>> {
        let tasks = sqlx::query_as::<_, ProfessionTask>(
            "SELECT * FROM profession_tasks WHERE user_id = ?
             ORDER BY is_completed ASC, created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.db)
        .await?;

        Ok(tasks)
    }

    pub async fn list_by_date(&self, user_id: i64, date: NaiveDate) -> Result<Vec<ProfessionTask>> {
        let tasks = sqlx::query_as::<_, ProfessionTask>(
            "SELECT * FROM profession_tasks WHERE user_id = ? AND task_date = ?",
        )
        .bind(user_id)
        .bind(date)
        .fetch_all(&self.db)
        .await?;

        Ok(tasks)
    }

    pub async fn stats(&self, user_id: i64) -> Result<Option<ProfessionStats>> {
        let stats = sqlx::query_as::<_, ProfessionStats>(
            "SELECT * FROM profession_stats WHERE user_id = ?",
        )
        .bind(user_id)
        .fetch_optional(&self.db)
        .await?;

        Ok(stats)
    }

    /// Insert a task and recompute its date. Returns the new task id.
    pub async fn add_task(&self, user_id: i64, title: &str, date: NaiveDate) -> Result<i64> {
        let mut tx = self.db.begin().await?;
        let result = sqlx::query(
            "INSERT INTO profession_tasks (user_id, title, task_date, created_at)
             VALUES (?, ?, ?, ?)",
        )
        .bind(user_id)
        .bind(title)
        .bind(date)
        .bind(Utc::now().naive_utc())
        .execute(&mut *tx)
        .await?;
        recalculate_daily_activity(&mut tx, user_id, date).await?;
        tx.commit().await?;

        Ok(result.last_insert_rowid())
    }

    /// Flip completion, recompute the task's date and refresh the all-time
    /// rollup. `None` when the task does not belong to the user.
    pub async fn toggle_task(
        &self,
        user_id: i64,
        task_id: i64,
        completed: bool,
    ) -> Result<Option<ProfessionToggleOutcome>> {
        let mut tx = self.db.begin().await?;

        let task_date: Option<NaiveDate> = sqlx::query_scalar(
            "SELECT task_date FROM profession_tasks WHERE id = ? AND user_id = ?",
        )
        .bind(task_id)
        .bind(user_id)
        .fetch_optional(&mut *tx)
        .await?;

        let date = match task_date {
            Some(date) => date,
            None => return Ok(None),
        };

        sqlx::query("UPDATE profession_tasks SET is_completed = ? WHERE id = ? AND user_id = ?")
            .bind(completed)
            .bind(task_id)
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        recalculate_daily_activity(&mut tx, user_id, date).await?;

        let (done, total): (i64, i64) = sqlx::query_as(
            "SELECT COALESCE(SUM(is_completed), 0), COUNT(*)
             FROM profession_tasks WHERE user_id = ?",
        )
        .bind(user_id)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(
            "INSERT INTO profession_stats (user_id, completed_count, target_count)
             VALUES (?, ?, ?)
             ON CONFLICT(user_id) DO UPDATE SET
                completed_count = excluded.completed_count,
                target_count = excluded.target_count",
        )
        .bind(user_id)
        .bind(done)
        .bind(total)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(Some(ProfessionToggleOutcome {
            done,
            total,
            pct: percentage(done, total),
        }))
    }

    pub async fn edit_title(&self, user_id: i64, task_id: i64, title: &str) -> Result<bool> {
        let result =
            sqlx::query("UPDATE profession_tasks SET title = ? WHERE id = ? AND user_id = ?")
                .bind(title)
                .bind(task_id)
                .bind(user_id)
                .execute(&self.db)
                .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn delete_task(&self, user_id: i64, task_id: i64) -> Result<bool> {
        let mut tx = self.db.begin().await?;

        let task_date: Option<NaiveDate> = sqlx::query_scalar(
            "SELECT task_date FROM profession_tasks WHERE id = ? AND user_id = ?",
        )
        .bind(task_id)
        .bind(user_id)
        .fetch_optional(&mut *tx)
        .await?;

        let date = match task_date {
            Some(date) => date,
            None => return Ok(false),
        };

        sqlx::query("DELETE FROM profession_tasks WHERE id = ? AND user_id = ?")
            .bind(task_id)
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        recalculate_daily_activity(&mut tx, user_id, date).await?;
        tx.commit().await?;

        Ok(true)
    }
}
