use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use chrono::Local;
use serde_json::{json, Value};
use sqlx::SqlitePool;

use crate::errors::AppError;
use crate::services::{ActivityService, QuoteService, ReminderService};

#[derive(Clone)]
pub struct OverviewState {
    pub activity: ActivityService,
    pub reminders: ReminderService,
    pub quotes: QuoteService,
}

pub fn overview_routes(db: SqlitePool) -> Router {
    let state = OverviewState {
        activity: ActivityService::new(db.clone()),
        reminders: ReminderService::new(db),
        quotes: QuoteService::new(),
    };

    Router::new().route("/", get(get_overview)).with_state(state)
}

/// Today's dashboard. Recalculating on read keeps the summary row honest
/// even if a writer ever skipped it.
pub async fn get_overview(
    State(state): State<OverviewState>,
    Path(user_id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    let today = Local::now().date_naive();

    let stats = state.activity.recalculate(user_id, today).await?;
    let reminders = state.reminders.list_for_day(user_id, today).await?;
    let quote = state.quotes.daily_quote().await;

    Ok(Json(json!({
        "date": today,
        "tasks_total": stats.phys_total,
        "tasks_done": stats.phys_done,
        "physical_pct": stats.phys_pct,
        "prof_total": stats.prof_total,
        "prof_done": stats.prof_done,
        "profession_pct": stats.prof_pct,
        "combined_score": stats.combined,
        "reminders": reminders,
        "quote": quote,
    })))
}
