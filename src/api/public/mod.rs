pub mod auth;
pub mod product;
pub mod review;

use axum::Router;
use sea_orm::DatabaseConnection;
use std::sync::Arc;

use crate::config::Config;

use auth::auth_router;
use product::product_router;
use review::review_router;

pub fn public_api_router(db: Arc<DatabaseConnection>, config: Arc<Config>) -> Router {
    let auth_router = auth_router(db.clone(), config);
    let product_router = product_router(db.clone());
    let review_router = review_router(db);

    Router::new()
        .nest("/", auth_router)
        .nest("/", product_router)
        .nest("/", review_router)
}
