use axum::{
    extract::Extension,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    prelude::DateTimeUtc, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    Set, TransactionTrait,
};
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;

use crate::entities::cart_item::{self, Entity as CartEntity};
use crate::entities::product::{self, Entity as ProductEntity};
use crate::entities::purchase::{self, Entity as PurchaseEntity};
use crate::error::ApiError;
use crate::middleware::auth::Claims;

//ROUTERS
pub fn checkout_router(db: Arc<DatabaseConnection>) -> Router {
    Router::new()
        .route("/checkout", post(checkout))
        .route("/purchase", get(get_purchases))
        .layer(Extension(db))
}

async fn checkout(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, ApiError> {
    let txn = db.begin().await?;

    let lines = CartEntity::find()
        .filter(cart_item::Column::UserId.eq(claims.user_id))
        .all(&txn)
        .await?;

    if lines.is_empty() {
        let _ = txn.rollback().await;
        return Err(ApiError::EmptyCart);
    }

    let now = Utc::now();
    let records: Vec<purchase::ActiveModel> = lines
        .iter()
        .map(|line| purchase::ActiveModel {
            user_id: Set(line.user_id),
            product_id: Set(line.product_id),
            quantity: Set(line.quantity),
            created_at: Set(now),
            ..Default::default()
        })
        .collect();

    let purchased = records.len();
    PurchaseEntity::insert_many(records).exec(&txn).await?;

    CartEntity::delete_many()
        .filter(cart_item::Column::UserId.eq(claims.user_id))
        .exec(&txn)
        .await?;

    txn.commit().await?;

    Ok((
        StatusCode::OK,
        Json(json!({
            "message": "Checkout complete",
            "purchased": purchased
        })),
    ))
}

async fn get_purchases(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, ApiError> {
    let rows = PurchaseEntity::find()
        .filter(purchase::Column::UserId.eq(claims.user_id))
        .find_also_related(ProductEntity)
        .order_by_desc(purchase::Column::CreatedAt)
        .order_by_desc(purchase::Column::Id)
        .all(&*db)
        .await?;

    let response: Vec<PurchaseResponse> = rows
        .into_iter()
        .filter_map(|(record, found)| found.map(|product| PurchaseResponse::new(record, product)))
        .collect();

    Ok((StatusCode::OK, Json(response)))
}

//structs
#[derive(Serialize)]
struct PurchaseResponse {
    id: i32,
    product_id: i32,
    name: String,
    price: Decimal,
    image_url: Option<String>,
    quantity: i32,
    line_total: Decimal,
    created_at: DateTimeUtc,
}

impl PurchaseResponse {
    fn new(record: purchase::Model, product: product::Model) -> PurchaseResponse {
        //two decimals on the wire
        let mut price = product.price;
        price.rescale(2);
        let mut line_total = price * Decimal::from(record.quantity);
        line_total.rescale(2);
        PurchaseResponse {
            id: record.id,
            product_id: product.id,
            name: product.name,
            price,
            image_url: product.image_url,
            quantity: record.quantity,
            line_total,
            created_at: record.created_at,
        }
    }
}
