pub mod cart;
pub mod checkout;
pub mod profile;
pub mod review;

use axum::{middleware::from_fn_with_state, Router};
use sea_orm::DatabaseConnection;
use std::sync::Arc;

use crate::config::Config;
use crate::middleware::auth::{auth_middleware, AuthState};

use cart::cart_router;
use checkout::checkout_router;
use profile::profile_router;
use review::review_router;

pub fn user_api_router(db: Arc<DatabaseConnection>, config: Arc<Config>) -> Router {
    Router::new()
        .nest("/", cart_router(db.clone()))
        .nest("/", checkout_router(db.clone()))
        .nest("/", profile_router(db.clone()))
        .nest("/", review_router(db.clone()))
        .layer(from_fn_with_state(
            AuthState {
                db: db.clone(),
                config,
            },
            auth_middleware,
        ))
}
