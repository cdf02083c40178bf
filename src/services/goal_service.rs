use anyhow::Result;
use chrono::{NaiveDate, Utc};
use sqlx::SqlitePool;

use crate::models::{CreateGoalRequest, DailyStats, PhysicalGoal};
use crate::services::activity_service::recalculate_daily_activity;

/// Dated physical goals with count-based partial completion.
#[derive(Clone)]
pub struct GoalService {
    db: SqlitePool,
}

impl GoalService {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    pub async fn list_by_date(&self, user_id: i64, date: NaiveDate) -> Result<Vec<PhysicalGoal>> {
        let goals = sqlx::query_as::<_, PhysicalGoal>(
            "SELECT * FROM physical_goals WHERE user_id = ? AND goal_date = ?",
        )
        .bind(user_id)
        .bind(date)
        .fetch_all(&self.db)
        .await?;

        Ok(goals)
    }

    pub async fn add_goal(&self, user_id: i64, request: CreateGoalRequest) -> Result<DailyStats> {
        let mut tx = self.db.begin().await?;
        sqlx::query(
            "INSERT INTO physical_goals (user_id, goal_title, goal_date, created_at)
             VALUES (?, ?, ?, ?)",
        )
        .bind(user_id)
        .bind(&request.goal_title)
        .bind(request.goal_date)
        .bind(Utc::now().naive_utc())
        .execute(&mut *tx)
        .await?;
        let stats = recalculate_daily_activity(&mut tx, user_id, request.goal_date).await?;
        tx.commit().await?;

        Ok(stats)
    }

    /// Mark a checkbox goal done or not done. `None` when the goal does not
    /// belong to the user; nothing is mutated in that case.
    pub async fn toggle_goal(
        &self,
        user_id: i64,
        goal_id: i64,
        completed: bool,
    ) -> Result<Option<DailyStats>> {
        let mut tx = self.db.begin().await?;

        let goal_date: Option<NaiveDate> = sqlx::query_scalar(
            "SELECT goal_date FROM physical_goals WHERE id = ? AND user_id = ?",
        )
        .bind(goal_id)
        .bind(user_id)
        .fetch_optional(&mut *tx)
        .await?;

        let date = match goal_date {
            Some(date) => date,
            None => return Ok(None),
        };

        sqlx::query("UPDATE physical_goals SET completed_count = ? WHERE id = ? AND user_id = ?")
            .bind(if completed { 1 } else { 0 })
            .bind(goal_id)
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        let stats = recalculate_daily_activity(&mut tx, user_id, date).await?;
        tx.commit().await?;

        Ok(Some(stats))
    }

    pub async fn delete_goal(&self, user_id: i64, goal_id: i64) -> Result<Option<DailyStats>> {
        let mut tx = self.db.begin().await?;

        let goal_date: Option<NaiveDate> = sqlx::query_scalar(
            "SELECT goal_date FROM physical_goals WHERE id = ? AND user_id = ?",
        )
        .bind(goal_id)
        .bind(user_id)
        .fetch_optional(&mut *tx)
        .await?;

        let date = match goal_date {
            Some(date) => date,
            None => return Ok(None),
        };

        sqlx::query("DELETE FROM physical_goals WHERE id = ? AND user_id = ?")
            .bind(goal_id)
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        let stats = recalculate_daily_activity(&mut tx, user_id, date).await?;
        tx.commit().await?;

        Ok(Some(stats))
    }
}
