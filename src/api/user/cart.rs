use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, patch},
    Json, Router,
};
use rust_decimal::Decimal;
use sea_orm::{
    sea_query::{Expr, ExprTrait, OnConflict},
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;

use crate::entities::cart_item::{self, Entity as CartEntity};
use crate::entities::product::{self, Entity as ProductEntity};
use crate::error::ApiError;
use crate::middleware::auth::Claims;

//ROUTERS
pub fn cart_router(db: Arc<DatabaseConnection>) -> Router {
    Router::new()
        .route("/cart", get(get_cart).post(add_to_cart))
        .route("/cart/:id", patch(update_quantity).delete(remove_item))
        .layer(Extension(db))
}

async fn get_cart(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, ApiError> {
    let lines = CartEntity::find()
        .filter(cart_item::Column::UserId.eq(claims.user_id))
        .find_also_related(ProductEntity)
        .order_by_asc(cart_item::Column::Id)
        .all(&*db)
        .await?;

    let mut total = Decimal::ZERO;
    let mut items = Vec::with_capacity(lines.len());
    for (line, found) in lines {
        let Some(product) = found else { continue };
        total += product.price * Decimal::from(line.quantity);
        items.push(CartItemResponse::new(line, product));
    }
    //money leaves with two decimals, the f64 bridge trims trailing zeros
    total.rescale(2);

    Ok((
        StatusCode::OK,
        Json(json!({
            "items": items,
            "total": total
        })),
    ))
}

async fn add_to_cart(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<AddToCart>,
) -> Result<impl IntoResponse, ApiError> {
    let product = ProductEntity::find_by_id(payload.product_id)
        .one(&*db)
        .await?
        .ok_or(ApiError::NotFound {
            what: "product",
            id: payload.product_id,
        })?;

    //insert a fresh line, or bump the existing one, in a single statement
    let new_line = cart_item::ActiveModel {
        user_id: Set(claims.user_id),
        product_id: Set(product.id),
        quantity: Set(1),
        ..Default::default()
    };
    CartEntity::insert(new_line)
        .on_conflict(
            OnConflict::columns([cart_item::Column::UserId, cart_item::Column::ProductId])
                .value(
                    cart_item::Column::Quantity,
                    Expr::col((cart_item::Entity, cart_item::Column::Quantity)).add(1),
                )
                .to_owned(),
        )
        .exec_without_returning(&*db)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Added to cart"
        })),
    ))
}

async fn update_quantity(
    Path(id): Path<i32>,
    Extension(claims): Extension<Claims>,
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Json(payload): Json<UpdateQuantity>,
) -> Result<impl IntoResponse, ApiError> {
    let txn = db.begin().await?;

    let line = CartEntity::find_by_id(id)
        .filter(cart_item::Column::UserId.eq(claims.user_id))
        .one(&txn)
        .await?
        .ok_or(ApiError::NotFound {
            what: "cart item",
            id,
        })?;

    //zero or less means the line goes away entirely
    if payload.quantity <= 0 {
        let line: cart_item::ActiveModel = line.into();
        line.delete(&txn).await?;
        txn.commit().await?;
        return Ok((
            StatusCode::OK,
            Json(json!({
                "message": "Removed from cart"
            })),
        ));
    }

    let mut line: cart_item::ActiveModel = line.into();
    line.quantity = Set(payload.quantity);
    line.update(&txn).await?;
    txn.commit().await?;

    Ok((
        StatusCode::OK,
        Json(json!({
            "message": "Quantity updated"
        })),
    ))
}

async fn remove_item(
    Path(id): Path<i32>,
    Extension(claims): Extension<Claims>,
    Extension(db): Extension<Arc<DatabaseConnection>>,
) -> Result<impl IntoResponse, ApiError> {
    let txn = db.begin().await?;

    let line = CartEntity::find_by_id(id)
        .filter(cart_item::Column::UserId.eq(claims.user_id))
        .one(&txn)
        .await?
        .ok_or(ApiError::NotFound {
            what: "cart item",
            id,
        })?;

    let line: cart_item::ActiveModel = line.into();
    line.delete(&txn).await?;
    txn.commit().await?;

    Ok((
        StatusCode::OK,
        Json(json!({
            "message": "Removed from cart"
        })),
    ))
}

//structs
#[derive(Deserialize, Debug)]
struct AddToCart {
    product_id: i32,
}

#[derive(Deserialize)]
struct UpdateQuantity {
    quantity: i32,
}

#[derive(Serialize)]
struct CartItemResponse {
    id: i32,
    product_id: i32,
    name: String,
    price: Decimal,
    image_url: Option<String>,
    quantity: i32,
    line_total: Decimal,
}

impl CartItemResponse {
    fn new(line: cart_item::Model, product: product::Model) -> CartItemResponse {
        let mut price = product.price;
        price.rescale(2);
        let mut line_total = price * Decimal::from(line.quantity);
        line_total.rescale(2);
        CartItemResponse {
            id: line.id,
            product_id: product.id,
            name: product.name,
            price,
            image_url: product.image_url,
            quantity: line.quantity,
            line_total,
        }
    }
}
