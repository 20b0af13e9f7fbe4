pub mod public;
pub mod user;

use axum::{http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use sea_orm::DatabaseConnection;
use serde_json::json;
use std::sync::Arc;

use crate::config::Config;
use public::public_api_router;
use user::user_api_router;

pub fn create_api_router(shared_db: Arc<DatabaseConnection>, config: Arc<Config>) -> Router {
    Router::new()
        .route("/", get(index))
        .nest("/api", public_api_router(shared_db.clone(), config.clone()))
        .nest("/api", user_api_router(shared_db, config))
}

async fn index() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({
            "service": "lavka",
            "status": "ok"
        })),
    )
}
