use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use lavka::{build_router, config::Config, db, migration, seed};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Arc::new(Config::load());

    let db = db::connect(&config)
        .await
        .expect("Failed to connect to the database");
    migration::run(&db).await.expect("Failed to run migrations");

    let shared_db = Arc::new(db);

    seed::seed_products(&shared_db)
        .await
        .expect("Failed to seed the catalog");

    let app = build_router(shared_db, config.clone());

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .expect("Failed to bind address");
    info!("Listening on {}", config.bind_addr);
    axum::serve(listener, app).await.expect("Server stopped");
}
