use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use rust_decimal::Decimal;
use sea_orm::{prelude::DateTimeUtc, DatabaseConnection, EntityTrait, QueryOrder};
use serde::Serialize;
use std::sync::Arc;

use crate::entities::product::{self, Entity as ProductEntity};
use crate::error::ApiError;

//ROUTERS
pub fn product_router(db: Arc<DatabaseConnection>) -> Router {
    Router::new()
        .route("/product", get(get_products))
        .route("/product/:id", get(get_product))
        .layer(Extension(db))
}

async fn get_products(
    Extension(db): Extension<Arc<DatabaseConnection>>,
) -> Result<impl IntoResponse, ApiError> {
    let products = ProductEntity::find()
        .order_by_desc(product::Column::CreatedAt)
        .order_by_desc(product::Column::Id)
        .all(&*db)
        .await?;

    let response: Vec<ProductResponse> = products.into_iter().map(ProductResponse::new).collect();

    Ok((StatusCode::OK, Json(response)))
}

async fn get_product(
    Path(id): Path<i32>,
    Extension(db): Extension<Arc<DatabaseConnection>>,
) -> Result<impl IntoResponse, ApiError> {
    let product = ProductEntity::find_by_id(id)
        .one(&*db)
        .await?
        .ok_or(ApiError::NotFound {
            what: "product",
            id,
        })?;

    Ok((StatusCode::OK, Json(ProductResponse::new(product))))
}

//structs
#[derive(Serialize)]
struct ProductResponse {
    id: i32,
    name: String,
    description: String,
    price: Decimal,
    image_url: Option<String>,
    created_at: DateTimeUtc,
}

impl ProductResponse {
    fn new(product: product::Model) -> ProductResponse {
        //prices come back from SQLite with minimal scale, pad to two decimals
        let mut price = product.price;
        price.rescale(2);
        ProductResponse {
            id: product.id,
            name: product.name,
            description: product.description,
            price,
            image_url: product.image_url,
            created_at: product.created_at,
        }
    }
}
