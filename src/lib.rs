pub mod api;
pub mod config;
pub mod db;
pub mod entities;
pub mod error;
pub mod middleware;
pub mod migration;
pub mod seed;

use axum::{
    http::{header, Method},
    middleware::{from_fn, from_fn_with_state},
    Router,
};
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use crate::api::create_api_router;
use crate::config::Config;
use crate::middleware::{logging::logging_middleware, timeout::timeout_middleware};

//the binary and the integration tests both assemble the app from here
pub fn build_router(shared_db: Arc<DatabaseConnection>, config: Arc<Config>) -> Router {
    let mut router = create_api_router(shared_db, config.clone())
        .layer(from_fn_with_state(
            config.request_timeout,
            timeout_middleware,
        ))
        .layer(from_fn(logging_middleware));

    //cookies need a concrete origin, a wildcard will not do
    if let Some(origin) = config.cors_origin.clone() {
        router = router.layer(
            CorsLayer::new()
                .allow_origin(origin)
                .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE])
                .allow_headers([header::CONTENT_TYPE])
                .allow_credentials(true),
        );
    }

    router
}
