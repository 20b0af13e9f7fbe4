use reqwest::StatusCode;

mod common;
use common::spawn_app;

#[tokio::test]
async fn test_index_reports_service_status() {
    let app = spawn_app().await;

    let response = app
        .client
        .get(&app.addr)
        .send()
        .await
        .expect("Failed to send index request");

    assert_eq!(response.status(), StatusCode::OK);

    let body = response
        .json::<serde_json::Value>()
        .await
        .expect("Failed to parse index response JSON");

    assert_eq!(body["status"].as_str(), Some("ok"));
}

#[tokio::test]
async fn test_get_products_lists_seeded_catalog() {
    let app = spawn_app().await;

    let response = app
        .client
        .get(format!("{}/api/product", app.addr))
        .send()
        .await
        .expect("Failed to send products request");

    assert_eq!(response.status(), StatusCode::OK);

    let body = response
        .json::<serde_json::Value>()
        .await
        .expect("Failed to parse products response JSON");

    let products = body.as_array().expect("Products response is not an array");
    assert_eq!(products.len(), 6);

    // Newest first
    assert_eq!(products[0]["name"].as_str(), Some("Ceramic Pour-Over Set"));

    // Prices travel as two-decimal strings, even for whole amounts
    assert_eq!(products[0]["price"].as_str(), Some("34.50"));
    assert_eq!(products[1]["name"].as_str(), Some("Walnut Cutting Board"));
    assert_eq!(products[1]["price"].as_str(), Some("52.00"));
}

#[tokio::test]
async fn test_get_product_by_id() {
    let app = spawn_app().await;

    let response = app
        .client
        .get(format!("{}/api/product/1", app.addr))
        .send()
        .await
        .expect("Failed to send product request");

    assert_eq!(response.status(), StatusCode::OK);

    let body = response
        .json::<serde_json::Value>()
        .await
        .expect("Failed to parse product response JSON");

    assert_eq!(body["id"].as_i64(), Some(1));
    assert_eq!(body["name"].as_str(), Some("Ceramic Pour-Over Set"));
    assert_eq!(body["price"].as_str(), Some("34.50"));
    assert!(body["description"].as_str().is_some());
}

#[tokio::test]
async fn test_get_product_unknown_id_is_not_found() {
    let app = spawn_app().await;

    let response = app
        .client
        .get(format!("{}/api/product/999", app.addr))
        .send()
        .await
        .expect("Failed to send product request");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = response
        .json::<serde_json::Value>()
        .await
        .expect("Failed to parse product response JSON");

    assert_eq!(
        body["error"].as_str(),
        Some("No product with 999 id was found")
    );
}
