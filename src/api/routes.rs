use axum::{routing::get, Router};
use sqlx::SqlitePool;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use super::auth::auth_routes;
use super::calendar::calendar_routes;
use super::goals::goal_routes;
use super::health::health_check;
use super::overview::overview_routes;
use super::physical::physical_routes;
use super::profession::profession_routes;
use super::reminders::reminder_routes;
use super::tasks::task_routes;

pub fn create_routes(db: SqlitePool) -> Router {
    let per_user = Router::new()
        .nest("/overview", overview_routes(db.clone()))
        .nest("/tasks", task_routes(db.clone()))
        .nest("/profession", profession_routes(db.clone()))
        .nest("/reminders", reminder_routes(db.clone()))
        .nest("/physical-goals", goal_routes(db.clone()))
        .nest("/physical", physical_routes(db.clone()))
        .nest("/calendar", calendar_routes(db.clone()));

    Router::new()
        .route("/health", get(health_check))
        .nest("/api/auth", auth_routes(db))
        .nest("/api/users/:user_id", per_user)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
