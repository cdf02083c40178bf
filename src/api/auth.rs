use axum::{extract::State, routing::post, Json, Router};
use serde::Deserialize;
use sqlx::SqlitePool;

use crate::errors::AppError;
use crate::models::{CreateUser, UserResponse};
use crate::services::UserService;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

pub fn auth_routes(db: SqlitePool) -> Router {
    Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login))
        .with_state(UserService::new(db))
}

/// Create an account. Session handling is left to the caller.
pub async fn signup(
    State(users): State<UserService>,
    Json(request): Json<CreateUser>,
) -> Result<Json<UserResponse>, AppError> {
    if request.username.trim().is_empty() {
        return Err(AppError::BadRequest("username must not be empty".into()));
    }

    let user = users.create_user(request).await?;
    user.map(Json).ok_or(AppError::UsernameTaken)
}

pub async fn login(
    State(users): State<UserService>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<UserResponse>, AppError> {
    let user = users
        .verify_credentials(&request.username, &request.password)
        .await?;
    user.map(Json).ok_or(AppError::InvalidCredentials)
}
