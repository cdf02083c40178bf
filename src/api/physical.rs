use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use chrono::Local;
use serde_json::{json, Value};
use sqlx::SqlitePool;

use crate::errors::AppError;
use crate::models::{
    NutritionTargets, ToggleChecklistRequest, UpdateDailyPhysicalRequest, UpdateProfileRequest,
};
use crate::services::{ChecklistService, PhysicalService, UserService};

#[derive(Clone)]
pub struct PhysicalState {
    pub users: UserService,
    pub checklists: ChecklistService,
    pub physical: PhysicalService,
}

pub fn physical_routes(db: SqlitePool) -> Router {
    let state = PhysicalState {
        users: UserService::new(db.clone()),
        checklists: ChecklistService::new(db.clone()),
        physical: PhysicalService::new(db),
    };

    Router::new()
        .route("/", get(get_physical_page))
        .route("/update", post(update_daily_physical))
        .route("/checklist/toggle", post(toggle_checklist_item))
        .route("/profile", post(update_profile))
        .with_state(state)
}

/// Today's physical page: profile targets, daily log, and the checklist
/// (generated on first access).
pub async fn get_physical_page(
    State(state): State<PhysicalState>,
    Path(user_id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    let today = Local::now().date_naive();

    let user = state
        .users
        .get_user(user_id)
        .await?
        .ok_or(AppError::NotFound("user"))?;

    let daily = state.physical.ensure_daily(user_id, today).await?;
    let targets = NutritionTargets::from_profile(user.height, user.weight);
    let checklist = state
        .checklists
        .ensure_for_date(user_id, today, targets.as_ref())
        .await?;

    Ok(Json(json!({
        "date": today,
        "targets": targets,
        "daily": daily,
        "checklist": checklist,
        "user": {
            "height": user.height,
            "weight": user.weight,
            "blood_group": user.blood_group,
            "bmi": user.bmi,
        },
    })))
}

pub async fn update_daily_physical(
    State(state): State<PhysicalState>,
    Path(user_id): Path<i64>,
    Json(request): Json<UpdateDailyPhysicalRequest>,
) -> Result<Json<Value>, AppError> {
    let today = Local::now().date_naive();
    let daily = state.physical.update_daily(user_id, today, request).await?;
    Ok(Json(json!({ "status": "success", "daily": daily })))
}

/// Check or uncheck one checklist item; responds with the recomputed
/// physical percentage.
pub async fn toggle_checklist_item(
    State(state): State<PhysicalState>,
    Path(user_id): Path<i64>,
    Json(request): Json<ToggleChecklistRequest>,
) -> Result<Json<Value>, AppError> {
    let stats = state
        .checklists
        .toggle_item(user_id, request.id, request.checked)
        .await?
        .ok_or(AppError::NotFound("checklist item"))?;
    Ok(Json(json!({ "status": "success", "percentage": stats.phys_pct })))
}

pub async fn update_profile(
    State(state): State<PhysicalState>,
    Path(user_id): Path<i64>,
    Json(request): Json<UpdateProfileRequest>,
) -> Result<Json<Value>, AppError> {
    let outcome = state
        .users
        .update_profile(user_id, request)
        .await?
        .ok_or(AppError::NotFound("user"))?;
    Ok(Json(json!({
        "status": "success",
        "bmi": outcome.bmi,
        "bmi_status": outcome.bmi_status,
    })))
}
