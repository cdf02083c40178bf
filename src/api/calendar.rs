use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use chrono::{Datelike, Local};
use serde::Deserialize;
use serde_json::{json, Value};
use sqlx::SqlitePool;
use std::collections::BTreeMap;

use crate::api::tasks::DateQuery;
use crate::errors::AppError;
use crate::models::{CalendarDay, EditPolicy, UpdateDayNoteRequest};
use crate::services::{
    ActivityService, CalendarService, ChecklistService, GoalService, ProfessionService,
    ReminderService, TaskService, UserService,
};

#[derive(Debug, Deserialize)]
pub struct MonthQuery {
    pub year: Option<i32>,
    pub month: Option<u32>,
}

#[derive(Clone)]
pub struct CalendarState {
    pub calendar: CalendarService,
    pub activity: ActivityService,
    pub tasks: TaskService,
    pub checklists: ChecklistService,
    pub goals: GoalService,
    pub reminders: ReminderService,
    pub profession: ProfessionService,
    pub users: UserService,
}

pub fn calendar_routes(db: SqlitePool) -> Router {
    let state = CalendarState {
        calendar: CalendarService::new(db.clone()),
        activity: ActivityService::new(db.clone()),
        tasks: TaskService::new(db.clone()),
        checklists: ChecklistService::new(db.clone()),
        goals: GoalService::new(db.clone()),
        reminders: ReminderService::new(db.clone()),
        profession: ProfessionService::new(db.clone()),
        users: UserService::new(db),
    };

    Router::new()
        .route("/month", get(get_month))
        .route("/day", get(get_day))
        .route("/date-view", get(get_date_view))
        .route("/note", post(update_day_note))
        .route("/edit-allowed", get(check_edit_allowed))
        .with_state(state)
}

/// Month view keyed by ISO date string.
pub async fn get_month(
    State(state): State<CalendarState>,
    Path(user_id): Path<i64>,
    Query(query): Query<MonthQuery>,
) -> Result<Json<BTreeMap<String, CalendarDay>>, AppError> {
    let today = Local::now().date_naive();
    let year = query.year.unwrap_or_else(|| today.year());
    let month = query.month.unwrap_or_else(|| today.month());

    let map = state.calendar.month_view(user_id, year, month).await?;
    Ok(Json(map))
}

/// Stored summary plus manual tasks for one date.
pub async fn get_day(
    State(state): State<CalendarState>,
    Path(user_id): Path<i64>,
    Query(query): Query<DateQuery>,
) -> Result<Json<Value>, AppError> {
    let (activity, tasks) = state.calendar.day_view(user_id, query.date).await?;
    Ok(Json(json!({ "activity": activity, "tasks": tasks })))
}

/// Live breakdown for one date, computed from the item tables without
/// persisting anything.
pub async fn get_date_view(
    State(state): State<CalendarState>,
    Path(user_id): Path<i64>,
    Query(query): Query<DateQuery>,
) -> Result<Json<Value>, AppError> {
    let date = query.date;

    let user = state
        .users
        .get_user(user_id)
        .await?
        .ok_or(AppError::NotFound("user"))?;

    let stats = state.calendar.live_stats(user_id, date).await?;
    let checklist = state.checklists.list_for_date(user_id, date).await?;
    let goals = state.goals.list_by_date(user_id, date).await?;
    let reminders = state.reminders.list_by_date(user_id, date).await?;
    let tasks = state.tasks.list_by_date(user_id, date).await?;
    let prof_tasks = state.profession.list_by_date(user_id, date).await?;

    let day_note = state
        .activity
        .get(user_id, date)
        .await?
        .and_then(|a| a.day_note);

    Ok(Json(json!({
        "date": date,
        "combined": stats.combined,
        "overview": {
            "physical_completion_pct": stats.phys_pct,
            "profession_completion_pct": stats.prof_pct,
            "day_note": day_note,
        },
        "physical": {
            "percentage": stats.phys_pct,
            "phys_done": stats.phys_done,
            "phys_total": stats.phys_total,
            "checklist": checklist,
            "goals": goals,
            "reminders": reminders,
            "tasks_list": tasks,
        },
        "profession": {
            "tasks_total": stats.prof_total,
            "tasks_done": stats.prof_done,
            "percentage": stats.prof_pct,
            "tasks_list": prof_tasks,
        },
        "user": {
            "height": user.height,
            "weight": user.weight,
            "blood_group": user.blood_group,
            "bmi": user.bmi,
        },
    })))
}

/// Attach a free-text note to a date without disturbing computed columns.
pub async fn update_day_note(
    State(state): State<CalendarState>,
    Path(user_id): Path<i64>,
    Json(request): Json<UpdateDayNoteRequest>,
) -> Result<Json<Value>, AppError> {
    state
        .activity
        .set_day_note(user_id, request.date, request.note.trim())
        .await?;
    Ok(Json(json!({ "status": "success" })))
}

/// Past days are view-only; today and future days accept edits.
pub async fn check_edit_allowed(
    Query(query): Query<DateQuery>,
) -> Result<Json<EditPolicy>, AppError> {
    let today = Local::now().date_naive();
    Ok(Json(EditPolicy::for_date(query.date, today)))
}
