use axum::{
    extract::Extension,
    http::{header, StatusCode},
    response::IntoResponse,
    routing::post,
    Json, Router,
};
use chrono::Utc;
use once_cell::sync::Lazy;
use regex::Regex;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set, SqlErr};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use validator::Validate;

use crate::config::Config;
use crate::entities::user::{self, Entity as UserEntity};
use crate::error::ApiError;
use crate::middleware::auth::{clear_session_cookie, generate_session, session_cookie};

//ROUTERS
pub fn auth_router(db: Arc<DatabaseConnection>, config: Arc<Config>) -> Router {
    Router::new()
        .route("/signup", post(sign_up))
        .route("/signin", post(sign_in))
        .route("/signout", post(sign_out))
        .layer(Extension(db))
        .layer(Extension(config))
}

async fn sign_up(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Extension(config): Extension<Arc<Config>>,
    Json(payload): Json<SignUp>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|err| ApiError::Validation(err.to_string()))?;

    let email = payload.email.trim().to_lowercase();

    //the unique index is the real guard, this check just gives a clean error
    if UserEntity::find()
        .filter(user::Column::Email.eq(email.as_str()))
        .one(&*db)
        .await?
        .is_some()
    {
        return Err(ApiError::DuplicateEmail);
    }

    let new_user = user::ActiveModel {
        username: Set(payload.username.clone()),
        email: Set(email.clone()),
        created_at: Set(Utc::now()),
        ..Default::default()
    };

    let inserted = match UserEntity::insert(new_user).exec(&*db).await {
        Ok(inserted) => inserted,
        Err(err) => {
            return Err(match err.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(msg)) if msg.contains("email") => {
                    ApiError::DuplicateEmail
                }
                Some(SqlErr::UniqueConstraintViolation(_)) => {
                    ApiError::Validation("Username is already taken".to_string())
                }
                _ => ApiError::Storage(err),
            });
        }
    };

    let token = generate_session(inserted.last_insert_id, &config)?;

    Ok((
        StatusCode::CREATED,
        [(header::SET_COOKIE, session_cookie(&token, &config))],
        Json(json!({
            "id": inserted.last_insert_id,
            "username": payload.username,
            "email": email
        })),
    ))
}

async fn sign_in(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Extension(config): Extension<Arc<Config>>,
    Json(payload): Json<SignIn>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|err| ApiError::Validation(err.to_string()))?;

    let email = payload.email.trim().to_lowercase();

    let found = UserEntity::find()
        .filter(user::Column::Email.eq(email.as_str()))
        .one(&*db)
        .await?
        .ok_or(ApiError::UserNotFound)?;

    let token = generate_session(found.id, &config)?;

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, session_cookie(&token, &config))],
        Json(json!({
            "id": found.id,
            "username": found.username,
            "email": found.email
        })),
    ))
}

async fn sign_out() -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::SET_COOKIE, clear_session_cookie())],
        Json(json!({
            "message": "Signed out"
        })),
    )
}

//structs
#[derive(Deserialize, Clone, Debug, Validate)]
struct SignUp {
    #[validate(regex(
        path = *USERNAME_REGEX,
        message = "Username must be 3-32 letters, numbers, '-' or '_'"
    ))]
    username: String,
    #[validate(email(message = "Invalid email address"))]
    email: String,
}

#[derive(Deserialize, Clone, Debug, Validate)]
struct SignIn {
    #[validate(email(message = "Invalid email address"))]
    email: String,
}

static USERNAME_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-zA-Z0-9_-]{3,32}$").unwrap());
