use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use sqlx::SqlitePool;

use crate::api::tasks::DateQuery;
use crate::errors::AppError;
use crate::models::{CreateGoalRequest, DeleteGoalRequest, PhysicalGoal, ToggleGoalRequest};
use crate::services::GoalService;

pub fn goal_routes(db: SqlitePool) -> Router {
    Router::new()
        .route("/", get(get_goals))
        .route("/add", post(add_goal))
        .route("/toggle", post(toggle_goal))
        .route("/delete", post(delete_goal))
        .with_state(GoalService::new(db))
}

pub async fn get_goals(
    State(goals): State<GoalService>,
    Path(user_id): Path<i64>,
    Query(query): Query<DateQuery>,
) -> Result<Json<Vec<PhysicalGoal>>, AppError> {
    let goals = goals.list_by_date(user_id, query.date).await?;
    Ok(Json(goals))
}

pub async fn add_goal(
    State(goals): State<GoalService>,
    Path(user_id): Path<i64>,
    Json(request): Json<CreateGoalRequest>,
) -> Result<Json<Value>, AppError> {
    let stats = goals.add_goal(user_id, request).await?;
    Ok(Json(json!({ "status": "success", "stats": stats })))
}

pub async fn toggle_goal(
    State(goals): State<GoalService>,
    Path(user_id): Path<i64>,
    Json(request): Json<ToggleGoalRequest>,
) -> Result<Json<Value>, AppError> {
    let stats = goals
        .toggle_goal(user_id, request.id, request.completed)
        .await?
        .ok_or(AppError::NotFound("goal"))?;
    Ok(Json(json!({ "status": "success", "stats": stats })))
}

pub async fn delete_goal(
    State(goals): State<GoalService>,
    Path(user_id): Path<i64>,
    Json(request): Json<DeleteGoalRequest>,
) -> Result<Json<Value>, AppError> {
    let stats = goals
        .delete_goal(user_id, request.id)
        .await?
        .ok_or(AppError::NotFound("goal"))?;
    Ok(Json(json!({ "status": "success", "stats": stats })))
}
