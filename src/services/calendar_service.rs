use anyhow::Result;
use chrono::{Local, NaiveDate};
use sqlx::SqlitePool;
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

use crate::models::{CalendarDay, DailyActivity, DailyStats, Task};
use crate::services::activity_service::{combined_score, compute_daily_stats, recalculate_daily_activity};

/// Month-level projection built from per-day summaries, goal/reminder
/// presence and profession task dates.
#[derive(Clone)]
pub struct CalendarService {
    db: SqlitePool,
}

impl CalendarService {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    /// Build the month view for (user, year, month), keyed by ISO date.
    ///
    /// Days carrying goals or reminders but no summary row are recomputed
    /// only when the day is today or later; past days stay frozen as
    /// zero-activity and no phantom row is created for them.
    pub async fn month_view(
        &self,
        user_id: i64,
        year: i32,
        month: u32,
    ) -> Result<BTreeMap<String, CalendarDay>> {
        self.month_view_as_of(user_id, year, month, Local::now().date_naive())
            .await
    }

    /// Same as [`month_view`], with an explicit "today" for the backfill
    /// cutoff.
    pub async fn month_view_as_of(
        &self,
        user_id: i64,
        year: i32,
        month: u32,
        today: NaiveDate,
    ) -> Result<BTreeMap<String, CalendarDay>> {
        let prefix = format!("{year:04}-{month:02}-%");

        let activities = sqlx::query_as::<_, DailyActivity>(
            "SELECT * FROM daily_activity WHERE user_id = ? AND entry_date LIKE ?",
        )
        .bind(user_id)
        .bind(&prefix)
        .fetch_all(&self.db)
        .await?;

        let goal_dates = self
            .dated(
                "SELECT DISTINCT goal_date FROM physical_goals WHERE user_id = ? AND goal_date LIKE ?",
                user_id,
                &prefix,
            )
            .await?;
        let reminder_dates = self
            .dated(
                "SELECT DISTINCT reminder_date FROM reminders
                 WHERE user_id = ? AND reminder_date IS NOT NULL AND reminder_date LIKE ?",
                user_id,
                &prefix,
            )
            .await?;
        let profession_dates = self
            .dated(
                "SELECT DISTINCT task_date FROM profession_tasks WHERE user_id = ? AND task_date LIKE ?",
                user_id,
                &prefix,
            )
            .await?;

        let mut all_dates: BTreeSet<NaiveDate> =
            activities.iter().map(|a| a.entry_date).collect();
        all_dates.extend(&goal_dates);
        all_dates.extend(&reminder_dates);
        all_dates.extend(&profession_dates);

        let mut map = BTreeMap::new();

        for date in all_dates {
            let activity = activities.iter().find(|a| a.entry_date == date);
            let has_goals = goal_dates.contains(&date);
            let has_reminders = reminder_dates.contains(&date);

            let mut day = match activity {
                Some(activity) => CalendarDay {
                    physical_completion_pct: activity.physical_completion_pct,
                    profession_completion_pct: activity.profession_completion_pct,
                    total_points: activity.total_points,
                    day_note: activity.day_note.clone(),
                    ..CalendarDay::default()
                },
                None if (has_goals || has_reminders) && date >= today => {
                    // Near-term placeholder: self-heal by computing and
                    // persisting the missing summary.
                    let stats = self.backfill(user_id, date).await?;
                    CalendarDay {
                        physical_completion_pct: stats.phys_pct,
                        profession_completion_pct: stats.prof_pct,
                        total_points: stats.phys_done + stats.prof_done,
                        ..CalendarDay::default()
                    }
                }
                None => CalendarDay::default(),
            };

            day.has_goals = has_goals;
            day.has_reminders = has_reminders;
            day.overall_score =
                combined_score(day.physical_completion_pct, day.profession_completion_pct);
            day.keyword = match &day.day_note {
                Some(note) if !note.is_empty() => Some(note.chars().take(15).collect()),
                _ if has_reminders || has_goals => self.keyword_for(user_id, date).await?,
                _ => None,
            };

            map.insert(date.format("%Y-%m-%d").to_string(), day);
        }

        Ok(map)
    }

    /// Summary row plus manual tasks for one date.
    pub async fn day_view(
        &self,
        user_id: i64,
        date: NaiveDate,
    ) -> Result<(Option<DailyActivity>, Vec<Task>)> {
        let activity = sqlx::query_as::<_, DailyActivity>(
            "SELECT * FROM daily_activity WHERE user_id = ? AND entry_date = ?",
        )
        .bind(user_id)
        .bind(date)
        .fetch_optional(&self.db)
        .await?;

        let tasks = sqlx::query_as::<_, Task>(
            "SELECT * FROM tasks WHERE user_id = ? AND task_date = ?",
        )
        .bind(user_id)
        .bind(date)
        .fetch_all(&self.db)
        .await?;

        Ok((activity, tasks))
    }

    /// Live (non-persisted) stats for one date.
    pub async fn live_stats(&self, user_id: i64, date: NaiveDate) -> Result<DailyStats> {
        let mut conn = self.db.acquire().await?;
        compute_daily_stats(&mut conn, user_id, date).await
    }

    async fn backfill(&self, user_id: i64, date: NaiveDate) -> Result<DailyStats> {
        debug!(user_id, %date, "backfilling summary for calendar view");
        let mut tx = self.db.begin().await?;
        let stats = recalculate_daily_activity(&mut tx, user_id, date).await?;
        tx.commit().await?;
        Ok(stats)
    }

    /// Short label for a calendar cell: the first word (max 10 chars) of a
    /// reminder title, falling back to a goal title.
    async fn keyword_for(&self, user_id: i64, date: NaiveDate) -> Result<Option<String>> {
        let reminder_title: Option<String> = sqlx::query_scalar(
            "SELECT title FROM reminders WHERE user_id = ? AND reminder_date = ? LIMIT 1",
        )
        .bind(user_id)
        .bind(date)
        .fetch_optional(&self.db)
        .await?;

        let title = match reminder_title {
            Some(title) => Some(title),
            None => {
                sqlx::query_scalar(
                    "SELECT goal_title FROM physical_goals
                     WHERE user_id = ? AND goal_date = ? LIMIT 1",
                )
                .bind(user_id)
                .bind(date)
                .fetch_optional(&self.db)
                .await?
            }
        };

        Ok(title.and_then(|t| {
            t.split_whitespace()
                .next()
                .map(|word| word.chars().take(10).collect())
        }))
    }

    async fn dated(&self, sql: &str, user_id: i64, prefix: &str) -> Result<BTreeSet<NaiveDate>> {
        let rows: Vec<NaiveDate> = sqlx::query_scalar(sql)
            .bind(user_id)
            .bind(prefix)
            .fetch_all(&self.db)
            .await?;

        Ok(rows.into_iter().collect())
    }
}
