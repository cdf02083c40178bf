use axum::{
    extract::{Path, State},
    routing::post,
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use sqlx::SqlitePool;

use crate::errors::AppError;
use crate::models::{CreateReminderRequest, ToggleReminderRequest};
use crate::services::reminder_service::ReminderMutation;
use crate::services::ReminderService;

#[derive(Debug, Deserialize)]
pub struct DeleteReminderRequest {
    pub id: i64,
}

pub fn reminder_routes(db: SqlitePool) -> Router {
    Router::new()
        .route("/add", post(add_reminder))
        .route("/toggle", post(toggle_reminder))
        .route("/delete", post(delete_reminder))
        .with_state(ReminderService::new(db))
}

pub async fn add_reminder(
    State(reminders): State<ReminderService>,
    Path(user_id): Path<i64>,
    Json(request): Json<CreateReminderRequest>,
) -> Result<Json<Value>, AppError> {
    let title = request.title.trim();
    if title.is_empty() {
        return Err(AppError::BadRequest("title must not be empty".into()));
    }

    let (id, stats) = reminders.add(user_id, title, request.date).await?;
    Ok(Json(json!({ "status": "success", "id": id, "stats": stats })))
}

pub async fn toggle_reminder(
    State(reminders): State<ReminderService>,
    Path(user_id): Path<i64>,
    Json(request): Json<ToggleReminderRequest>,
) -> Result<Json<Value>, AppError> {
    match reminders.toggle(user_id, request.id, request.done).await? {
        ReminderMutation::NotFound => Err(AppError::NotFound("reminder")),
        ReminderMutation::Applied { stats } => {
            Ok(Json(json!({ "status": "success", "stats": stats })))
        }
    }
}

pub async fn delete_reminder(
    State(reminders): State<ReminderService>,
    Path(user_id): Path<i64>,
    Json(request): Json<DeleteReminderRequest>,
) -> Result<Json<Value>, AppError> {
    match reminders.delete(user_id, request.id).await? {
        ReminderMutation::NotFound => Err(AppError::NotFound("reminder")),
        ReminderMutation::Applied { stats } => {
            Ok(Json(json!({ "status": "success", "stats": stats })))
        }
    }
}
