use axum::{
    extract::{Path, Query, State},
    routing::{delete, get, post},
    Json, Router,
};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::{json, Value};
use sqlx::SqlitePool;

use crate::errors::AppError;
use crate::models::{CreateTaskRequest, Task, ToggleTaskRequest};
use crate::services::TaskService;

#[derive(Debug, Deserialize)]
pub struct DateQuery {
    pub date: NaiveDate,
}

pub fn task_routes(db: SqlitePool) -> Router {
    Router::new()
        .route("/", get(get_tasks).post(add_task))
        .route("/toggle", post(toggle_task))
        .route("/:task_id", delete(delete_task))
        .with_state(TaskService::new(db))
}

/// Manual tasks for one date.
pub async fn get_tasks(
    State(tasks): State<TaskService>,
    Path(user_id): Path<i64>,
    Query(query): Query<DateQuery>,
) -> Result<Json<Vec<Task>>, AppError> {
    let tasks = tasks.list_by_date(user_id, query.date).await?;
    Ok(Json(tasks))
}

/// Add a task; the date's summary is recomputed in the same transaction.
pub async fn add_task(
    State(tasks): State<TaskService>,
    Path(user_id): Path<i64>,
    Json(request): Json<CreateTaskRequest>,
) -> Result<Json<Value>, AppError> {
    let stats = tasks.add_task(user_id, request).await?;
    Ok(Json(json!({ "status": "success", "stats": stats })))
}

pub async fn toggle_task(
    State(tasks): State<TaskService>,
    Path(user_id): Path<i64>,
    Json(request): Json<ToggleTaskRequest>,
) -> Result<Json<Value>, AppError> {
    let stats = tasks
        .toggle_task(user_id, request.id, request.completed)
        .await?
        .ok_or(AppError::NotFound("task"))?;
    Ok(Json(json!({ "status": "success", "stats": stats })))
}

pub async fn delete_task(
    State(tasks): State<TaskService>,
    Path((user_id, task_id)): Path<(i64, i64)>,
) -> Result<Json<Value>, AppError> {
    let stats = tasks
        .delete_task(user_id, task_id)
        .await?
        .ok_or(AppError::NotFound("task"))?;
    Ok(Json(json!({ "status": "success", "stats": stats })))
}
