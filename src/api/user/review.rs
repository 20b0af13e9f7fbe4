use axum::{
    extract::Extension, http::StatusCode, response::IntoResponse, routing::post, Json, Router,
};
use chrono::Utc;
use sea_orm::{DatabaseConnection, EntityTrait, Set, SqlErr};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use validator::Validate;

use crate::entities::product::Entity as ProductEntity;
use crate::entities::review::{self, Entity as ReviewEntity};
use crate::error::ApiError;
use crate::middleware::auth::Claims;

//ROUTERS
pub fn review_router(db: Arc<DatabaseConnection>) -> Router {
    Router::new()
        .route("/review", post(submit_review))
        .layer(Extension(db))
}

async fn submit_review(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<SubmitReview>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|err| ApiError::Validation(err.to_string()))?;

    ProductEntity::find_by_id(payload.product_id)
        .one(&*db)
        .await?
        .ok_or(ApiError::NotFound {
            what: "product",
            id: payload.product_id,
        })?;

    let new_review = review::ActiveModel {
        user_id: Set(claims.user_id),
        product_id: Set(payload.product_id),
        rating: Set(payload.rating),
        comment: Set(payload.comment),
        created_at: Set(Utc::now()),
        ..Default::default()
    };

    //the unique (user, product) index turns a second submission into a conflict
    match ReviewEntity::insert(new_review).exec(&*db).await {
        Ok(_) => Ok((
            StatusCode::CREATED,
            Json(json!({
                "message": "Review submitted"
            })),
        )),
        Err(err) => Err(match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => ApiError::DuplicateReview,
            _ => ApiError::Storage(err),
        }),
    }
}

//structs
#[derive(Deserialize, Clone, Debug, Validate)]
struct SubmitReview {
    product_id: i32,
    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))]
    rating: i32,
    #[validate(length(min = 1, max = 2000, message = "Comment must be 1-2000 characters"))]
    comment: String,
}
