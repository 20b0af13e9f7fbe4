use reqwest::StatusCode;
use sea_orm::{ConnectOptions, Database};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

use lavka::{build_router, config::Config, migration, seed};

//a complete server per test: fresh in-memory database with the catalog
//seeded, real listener on an ephemeral port
pub struct TestApp {
    pub addr: String,
    pub client: reqwest::Client,
}

fn test_config() -> Config {
    Config {
        database_url: "sqlite::memory:".to_string(),
        bind_addr: "127.0.0.1:0".to_string(),
        session_secret: "lavka-test-secret".to_string(),
        session_ttl_days: 30,
        db_max_connections: 1,
        db_connect_attempts: 1,
        db_retry_delay: Duration::from_millis(50),
        request_timeout: Duration::from_secs(5),
        cors_origin: None,
    }
}

pub async fn spawn_app() -> TestApp {
    let config = Arc::new(test_config());

    //a single pooled connection keeps the in-memory database alive
    let mut options = ConnectOptions::new("sqlite::memory:");
    options.max_connections(1).min_connections(1);
    let db = Database::connect(options)
        .await
        .expect("Failed to open the in-memory database");

    migration::run(&db).await.expect("Failed to run migrations");
    seed::seed_products(&db)
        .await
        .expect("Failed to seed the catalog");

    let app = build_router(Arc::new(db), config);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener
        .local_addr()
        .expect("Failed to read the listener address");

    tokio::spawn(async move {
        axum::serve(listener, app)
            .await
            .expect("Test server stopped");
    });

    TestApp {
        addr: format!("http://{}", addr),
        client: new_client(),
    }
}

//a fresh cookie jar, for playing a second user
pub fn new_client() -> reqwest::Client {
    reqwest::Client::builder()
        .cookie_store(true)
        .build()
        .expect("Failed to build http client")
}

impl TestApp {
    //signs up through the real endpoint, the session cookie lands in the
    //client's jar
    pub async fn sign_up(
        &self,
        client: &reqwest::Client,
        username: &str,
        email: &str,
    ) -> serde_json::Value {
        let response = client
            .post(format!("{}/api/signup", self.addr))
            .json(&json!({
                "username": username,
                "email": email
            }))
            .send()
            .await
            .expect("Failed to send signup request");

        assert_eq!(response.status(), StatusCode::CREATED);

        response
            .json::<serde_json::Value>()
            .await
            .expect("Failed to parse signup response JSON")
    }

    pub async fn add_to_cart(&self, client: &reqwest::Client, product_id: i64) {
        let response = client
            .post(format!("{}/api/cart", self.addr))
            .json(&json!({ "product_id": product_id }))
            .send()
            .await
            .expect("Failed to send add to cart request");

        assert_eq!(response.status(), StatusCode::CREATED);
    }

    pub async fn get_cart(&self, client: &reqwest::Client) -> serde_json::Value {
        let response = client
            .get(format!("{}/api/cart", self.addr))
            .send()
            .await
            .expect("Failed to send get cart request");

        assert_eq!(response.status(), StatusCode::OK);

        response
            .json::<serde_json::Value>()
            .await
            .expect("Failed to parse cart response JSON")
    }
}
