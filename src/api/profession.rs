use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use chrono::Local;
use serde::Deserialize;
use serde_json::{json, Value};
use sqlx::SqlitePool;

use crate::errors::AppError;
use crate::models::{
    CreateProfessionTaskRequest, EditProfessionTaskRequest, ProfessionTask,
    ToggleProfessionTaskRequest,
};
use crate::services::ProfessionService;

#[derive(Debug, Deserialize)]
pub struct DeleteProfessionTaskRequest {
    pub id: i64,
}

pub fn profession_routes(db: SqlitePool) -> Router {
    Router::new()
        .route("/tasks", get(get_profession_tasks).post(add_profession_task))
        .route("/tasks/toggle", post(toggle_profession_task))
        .route("/tasks/edit", post(edit_profession_task))
        .route("/tasks/delete", post(delete_profession_task))
        .route("/stats", get(get_profession_stats))
        .with_state(ProfessionService::new(db))
}

/// All-time done/target rollup shown on the profession page.
pub async fn get_profession_stats(
    State(profession): State<ProfessionService>,
    Path(user_id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    let stats = profession.stats(user_id).await?;
    Ok(Json(json!({ "stats": stats })))
}

pub async fn get_profession_tasks(
    State(profession): State<ProfessionService>,
    Path(user_id): Path<i64>,
) -> Result<Json<Vec<ProfessionTask>>, AppError> {
    let tasks = profession.list_tasks(user_id).await?;
    Ok(Json(tasks))
}

pub async fn add_profession_task(
    State(profession): State<ProfessionService>,
    Path(user_id): Path<i64>,
    Json(request): Json<CreateProfessionTaskRequest>,
) -> Result<Json<Value>, AppError> {
    let title = request.title.trim();
    if title.is_empty() {
        return Err(AppError::BadRequest("title must not be empty".into()));
    }

    let date = request.date.unwrap_or_else(|| Local::now().date_naive());
    let id = profession.add_task(user_id, title, date).await?;
    Ok(Json(json!({ "status": "success", "id": id })))
}

/// Toggle completion; responds with the refreshed all-time counters.
pub async fn toggle_profession_task(
    State(profession): State<ProfessionService>,
    Path(user_id): Path<i64>,
    Json(request): Json<ToggleProfessionTaskRequest>,
) -> Result<Json<Value>, AppError> {
    let outcome = profession
        .toggle_task(user_id, request.id, request.completed)
        .await?
        .ok_or(AppError::NotFound("profession task"))?;
    Ok(Json(json!({
        "status": "success",
        "done": outcome.done,
        "total": outcome.total,
        "pct": outcome.pct,
    })))
}

pub async fn edit_profession_task(
    State(profession): State<ProfessionService>,
    Path(user_id): Path<i64>,
    Json(request): Json<EditProfessionTaskRequest>,
) -> Result<Json<Value>, AppError> {
    let title = request.title.trim();
    if title.is_empty() {
        return Err(AppError::BadRequest("title must not be empty".into()));
    }

    if !profession.edit_title(user_id, request.id, title).await? {
        return Err(AppError::NotFound("profession task"));
    }
    Ok(Json(json!({ "status": "success" })))
}

pub async fn delete_profession_task(
    State(profession): State<ProfessionService>,
    Path(user_id): Path<i64>,
    Json(request): Json<DeleteProfessionTaskRequest>,
) -> Result<Json<Value>, AppError> {
    if !profession.delete_task(user_id, request.id).await? {
        return Err(AppError::NotFound("profession task"));
    }
    Ok(Json(json!({ "status": "success" })))
}
