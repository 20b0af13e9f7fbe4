use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use sea_orm::{
    prelude::DateTimeUtc, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
};
use serde::Serialize;
use std::sync::Arc;

use crate::entities::product::Entity as ProductEntity;
use crate::entities::review::{self, Entity as ReviewEntity};
use crate::entities::user::{self, Entity as UserEntity};
use crate::error::ApiError;

//ROUTERS
pub fn review_router(db: Arc<DatabaseConnection>) -> Router {
    Router::new()
        .route("/product/:id/review", get(get_reviews))
        .layer(Extension(db))
}

async fn get_reviews(
    Path(id): Path<i32>,
    Extension(db): Extension<Arc<DatabaseConnection>>,
) -> Result<impl IntoResponse, ApiError> {
    ProductEntity::find_by_id(id)
        .one(&*db)
        .await?
        .ok_or(ApiError::NotFound {
            what: "product",
            id,
        })?;

    let reviews = ReviewEntity::find()
        .filter(review::Column::ProductId.eq(id))
        .find_also_related(UserEntity)
        .order_by_desc(review::Column::CreatedAt)
        .order_by_desc(review::Column::Id)
        .all(&*db)
        .await?;

    let response: Vec<ReviewResponse> = reviews
        .into_iter()
        .map(|(entry, author)| ReviewResponse::new(entry, author))
        .collect();

    Ok((StatusCode::OK, Json(response)))
}

//structs
#[derive(Serialize)]
struct ReviewResponse {
    id: i32,
    user_id: i32,
    username: String,
    rating: i32,
    comment: String,
    created_at: DateTimeUtc,
}

impl ReviewResponse {
    fn new(entry: review::Model, author: Option<user::Model>) -> ReviewResponse {
        ReviewResponse {
            id: entry.id,
            user_id: entry.user_id,
            username: author.map(|user| user.username).unwrap_or_default(),
            rating: entry.rating,
            comment: entry.comment,
            created_at: entry.created_at,
        }
    }
}
