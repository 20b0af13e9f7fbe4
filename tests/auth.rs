use reqwest::StatusCode;
use serde_json::json;

mod common;
use common::{new_client, spawn_app};

#[tokio::test]
async fn test_signup_sets_session_cookie() {
    let app = spawn_app().await;

    // Step 1: Sign up a new user
    let body = app
        .sign_up(&app.client, "ferris", "ferris@example.com")
        .await;

    assert_eq!(body["username"].as_str(), Some("ferris"));
    assert_eq!(body["email"].as_str(), Some("ferris@example.com"));
    let user_id = body["id"].as_i64().expect("User id not found in response");

    // Step 2: The cookie from signup should authenticate /me
    let me_response = app
        .client
        .get(format!("{}/api/me", app.addr))
        .send()
        .await
        .expect("Failed to send me request");

    assert_eq!(me_response.status(), StatusCode::OK);

    let me_body = me_response
        .json::<serde_json::Value>()
        .await
        .expect("Failed to parse me response JSON");

    assert_eq!(me_body["id"].as_i64(), Some(user_id));
    assert_eq!(me_body["username"].as_str(), Some("ferris"));
}

#[tokio::test]
async fn test_signup_duplicate_email_is_rejected() {
    let app = spawn_app().await;

    // Step 1: First signup takes the email
    let signup_body = app
        .sign_up(&app.client, "ferris", "ferris@example.com")
        .await;
    let user_id = signup_body["id"]
        .as_i64()
        .expect("User id not found in response");

    // Step 2: A second signup with the same email must conflict
    let response = new_client()
        .post(format!("{}/api/signup", app.addr))
        .json(&json!({
            "username": "crab",
            "email": "ferris@example.com"
        }))
        .send()
        .await
        .expect("Failed to send signup request");

    assert_eq!(response.status(), StatusCode::CONFLICT);

    let body = response
        .json::<serde_json::Value>()
        .await
        .expect("Failed to parse signup response JSON");

    assert_eq!(body["error"].as_str(), Some("Email is already registered"));

    // Step 3: The email still resolves to the original account, no second row
    let signin_response = new_client()
        .post(format!("{}/api/signin", app.addr))
        .json(&json!({ "email": "ferris@example.com" }))
        .send()
        .await
        .expect("Failed to send signin request");

    assert_eq!(signin_response.status(), StatusCode::OK);

    let signin_body = signin_response
        .json::<serde_json::Value>()
        .await
        .expect("Failed to parse signin response JSON");

    assert_eq!(signin_body["id"].as_i64(), Some(user_id));
    assert_eq!(signin_body["username"].as_str(), Some("ferris"));
}

#[tokio::test]
async fn test_signin_unknown_email_is_not_found() {
    let app = spawn_app().await;

    let response = app
        .client
        .post(format!("{}/api/signin", app.addr))
        .json(&json!({ "email": "ghost@example.com" }))
        .send()
        .await
        .expect("Failed to send signin request");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = response
        .json::<serde_json::Value>()
        .await
        .expect("Failed to parse signin response JSON");

    assert_eq!(
        body["error"].as_str(),
        Some("No user with this email was found")
    );
}

#[tokio::test]
async fn test_signin_resolves_to_the_same_user() {
    let app = spawn_app().await;

    // Step 1: Create the account
    let signup_body = app
        .sign_up(&app.client, "ferris", "ferris@example.com")
        .await;
    let user_id = signup_body["id"]
        .as_i64()
        .expect("User id not found in response");

    // Step 2: Sign in from a different client, email only
    let other = new_client();
    let signin_response = other
        .post(format!("{}/api/signin", app.addr))
        .json(&json!({ "email": "ferris@example.com" }))
        .send()
        .await
        .expect("Failed to send signin request");

    assert_eq!(signin_response.status(), StatusCode::OK);

    let signin_body = signin_response
        .json::<serde_json::Value>()
        .await
        .expect("Failed to parse signin response JSON");

    assert_eq!(signin_body["id"].as_i64(), Some(user_id));

    // Step 3: The new session resolves to the same user
    let me_response = other
        .get(format!("{}/api/me", app.addr))
        .send()
        .await
        .expect("Failed to send me request");

    assert_eq!(me_response.status(), StatusCode::OK);

    let me_body = me_response
        .json::<serde_json::Value>()
        .await
        .expect("Failed to parse me response JSON");

    assert_eq!(me_body["id"].as_i64(), Some(user_id));
}

#[tokio::test]
async fn test_me_requires_session() {
    let app = spawn_app().await;

    let response = app
        .client
        .get(format!("{}/api/me", app.addr))
        .send()
        .await
        .expect("Failed to send me request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = response
        .json::<serde_json::Value>()
        .await
        .expect("Failed to parse me response JSON");

    assert_eq!(body["error"].as_str(), Some("Authentication required"));
}

#[tokio::test]
async fn test_signout_clears_session() {
    let app = spawn_app().await;

    // Step 1: Sign up, session works
    app.sign_up(&app.client, "ferris", "ferris@example.com")
        .await;

    let me_response = app
        .client
        .get(format!("{}/api/me", app.addr))
        .send()
        .await
        .expect("Failed to send me request");
    assert_eq!(me_response.status(), StatusCode::OK);

    // Step 2: Sign out
    let signout_response = app
        .client
        .post(format!("{}/api/signout", app.addr))
        .send()
        .await
        .expect("Failed to send signout request");

    assert_eq!(signout_response.status(), StatusCode::OK);

    // Step 3: The old session no longer authenticates
    let me_after = app
        .client
        .get(format!("{}/api/me", app.addr))
        .send()
        .await
        .expect("Failed to send me request");

    assert_eq!(me_after.status(), StatusCode::UNAUTHORIZED);

    // Step 4: Signing back in restores access to the same account
    let signin_response = app
        .client
        .post(format!("{}/api/signin", app.addr))
        .json(&json!({ "email": "ferris@example.com" }))
        .send()
        .await
        .expect("Failed to send signin request");

    assert_eq!(signin_response.status(), StatusCode::OK);

    let me_again = app
        .client
        .get(format!("{}/api/me", app.addr))
        .send()
        .await
        .expect("Failed to send me request")
        .json::<serde_json::Value>()
        .await
        .expect("Failed to parse me response JSON");

    assert_eq!(me_again["username"].as_str(), Some("ferris"));
}

#[tokio::test]
async fn test_signup_rejects_invalid_payloads() {
    let app = spawn_app().await;

    // Step 1: Broken email
    let bad_email = app
        .client
        .post(format!("{}/api/signup", app.addr))
        .json(&json!({
            "username": "ferris",
            "email": "not-an-email"
        }))
        .send()
        .await
        .expect("Failed to send signup request");

    assert_eq!(bad_email.status(), StatusCode::BAD_REQUEST);

    // Step 2: Username too short
    let bad_username = app
        .client
        .post(format!("{}/api/signup", app.addr))
        .json(&json!({
            "username": "ab",
            "email": "ab@example.com"
        }))
        .send()
        .await
        .expect("Failed to send signup request");

    assert_eq!(bad_username.status(), StatusCode::BAD_REQUEST);
}
