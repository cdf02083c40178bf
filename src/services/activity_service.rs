use anyhow::Result;
use chrono::NaiveDate;
use sqlx::{SqliteConnection, SqlitePool};
use tracing::debug;

use crate::models::{DailyActivity, DailyStats};

/// Completion percentage, 0 when nothing is tracked for the category.
pub fn percentage(done: i64, total: i64) -> i64 {
    if total > 0 {
        ((done as f64 / total as f64) * 100.0).round() as i64
    } else {
        0
    }
}

/// Average of the physical and profession percentages for a day.
pub fn combined_score(phys_pct: i64, prof_pct: i64) -> i64 {
    ((phys_pct + prof_pct) as f64 / 2.0).round() as i64
}

/// Aggregate completion stats for (user, date) across all item sources
/// without touching the summary row.
pub async fn compute_daily_stats(
    conn: &mut SqliteConnection,
    user_id: i64,
    date: NaiveDate,
) -> Result<DailyStats> {
    let nutrition_total: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM nutrition_checklist WHERE user_id = ? AND entry_date = ?",
    )
    .bind(user_id)
    .bind(date)
    .fetch_one(&mut *conn)
    .await?;

    let nutrition_done: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM nutrition_checklist WHERE user_id = ? AND entry_date = ? AND is_checked = 1",
    )
    .bind(user_id)
    .bind(date)
    .fetch_one(&mut *conn)
    .await?;

    let task_total: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM tasks WHERE user_id = ? AND task_date = ?")
            .bind(user_id)
            .bind(date)
            .fetch_one(&mut *conn)
            .await?;

    let task_done: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM tasks WHERE user_id = ? AND task_date = ? AND is_completed = 1",
    )
    .bind(user_id)
    .bind(date)
    .fetch_one(&mut *conn)
    .await?;

    let reminder_total: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM reminders WHERE user_id = ? AND reminder_date = ?",
    )
    .bind(user_id)
    .bind(date)
    .fetch_one(&mut *conn)
    .await?;

    let reminder_done: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM reminders WHERE user_id = ? AND reminder_date = ? AND is_done = 1",
    )
    .bind(user_id)
    .bind(date)
    .fetch_one(&mut *conn)
    .await?;

    // Goals contribute their own counts, which allows partial completion.
    let (goal_done, goal_total): (i64, i64) = sqlx::query_as(
        "SELECT COALESCE(SUM(completed_count), 0), COALESCE(SUM(total_count), 0)
         FROM physical_goals WHERE user_id = ? AND goal_date = ?",
    )
    .bind(user_id)
    .bind(date)
    .fetch_one(&mut *conn)
    .await?;

    let (prof_done, prof_total): (i64, i64) = sqlx::query_as(
        "SELECT COALESCE(SUM(is_completed), 0), COUNT(*)
         FROM profession_tasks WHERE user_id = ? AND task_date = ?",
    )
    .bind(user_id)
    .bind(date)
    .fetch_one(&mut *conn)
    .await?;

    let phys_total = nutrition_total + task_total + reminder_total + goal_total;
    let phys_done = nutrition_done + task_done + reminder_done + goal_done;

    let phys_pct = percentage(phys_done, phys_total);
    let prof_pct = percentage(prof_done, prof_total);

    Ok(DailyStats {
        phys_pct,
        prof_pct,
        phys_done,
        phys_total,
        prof_done,
        prof_total,
        combined: combined_score(phys_pct, prof_pct),
    })
}

/// Recompute and upsert the summary row for (user, date).
///
/// Idempotent: with unchanged underlying data, running this twice stores the
/// same values. Runs on an explicit connection so mutating services can call
/// it inside their own transaction; `day_note` is never touched.
pub async fn recalculate_daily_activity(
    conn: &mut SqliteConnection,
    user_id: i64,
    date: NaiveDate,
) -> Result<DailyStats> {
    let stats = compute_daily_stats(conn, user_id, date).await?;
    let points = stats.phys_done + stats.prof_done;

    sqlx::query(
        "INSERT INTO daily_activity
            (user_id, entry_date, physical_completion_pct, profession_completion_pct,
             physical_points, profession_points, total_points,
             physical_total_count, profession_total_count)
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
         ON CONFLICT(user_id, entry_date) DO UPDATE SET
            physical_completion_pct = excluded.physical_completion_pct,
            profession_completion_pct = excluded.profession_completion_pct,
            physical_points = excluded.physical_points,
            profession_points = excluded.profession_points,
            total_points = excluded.total_points,
            physical_total_count = excluded.physical_total_count,
            profession_total_count = excluded.profession_total_count",
    )
    .bind(user_id)
    .bind(date)
    .bind(stats.phys_pct)
    .bind(stats.prof_pct)
    .bind(stats.phys_done)
    .bind(stats.prof_done)
    .bind(points)
    .bind(stats.phys_total)
    .bind(stats.prof_total)
    .execute(&mut *conn)
    .await?;

    debug!(
        user_id,
        %date,
        phys_pct = stats.phys_pct,
        prof_pct = stats.prof_pct,
        "daily activity recalculated"
    );

    Ok(stats)
}

#[derive(Clone)]
pub struct ActivityService {
    db: SqlitePool,
}

impl ActivityService {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    /// Recalculate (user, date) in its own transaction.
    pub async fn recalculate(&self, user_id: i64, date: NaiveDate) -> Result<DailyStats> {
        let mut tx = self.db.begin().await?;
        let stats = recalculate_daily_activity(&mut tx, user_id, date).await?;
        tx.commit().await?;
        Ok(stats)
    }

    pub async fn get(&self, user_id: i64, date: NaiveDate) -> Result<Option<DailyActivity>> {
        let activity = sqlx::query_as::<_, DailyActivity>(
            "SELECT * FROM daily_activity WHERE user_id = ? AND entry_date = ?",
        )
        .bind(user_id)
        .bind(date)
        .fetch_optional(&self.db)
        .await?;

        Ok(activity)
    }

    /// Upsert the free-text note for a date without touching computed columns.
    pub async fn set_day_note(&self, user_id: i64, date: NaiveDate, note: &str) -> Result<()> {
        sqlx::query(
            "INSERT INTO daily_activity (user_id, entry_date, day_note)
             VALUES (?, ?, ?)
             ON CONFLICT(user_id, entry_date) DO UPDATE SET day_note = excluded.day_note",
        )
        .bind(user_id)
        .bind(date)
        .bind(note)
        .execute(&self.db)
        .await?;

        Ok(())
    }
}
