use axum::{
    extract::Extension, http::StatusCode, response::IntoResponse, routing::get, Json, Router,
};
use sea_orm::{DatabaseConnection, EntityTrait};
use serde_json::json;
use std::sync::Arc;

use crate::entities::user::Entity as UserEntity;
use crate::error::ApiError;
use crate::middleware::auth::Claims;

//ROUTERS
pub fn profile_router(db: Arc<DatabaseConnection>) -> Router {
    Router::new()
        .route("/me", get(get_me))
        .layer(Extension(db))
}

async fn get_me(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, ApiError> {
    let found = UserEntity::find_by_id(claims.user_id)
        .one(&*db)
        .await?
        .ok_or(ApiError::Unauthenticated)?;

    Ok((
        StatusCode::OK,
        Json(json!({
            "id": found.id,
            "username": found.username,
            "email": found.email,
            "created_at": found.created_at
        })),
    ))
}
