use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use std::time::Duration;
use tokio::time::timeout;

use crate::error::ApiError;

//a handler still running at the deadline is dropped and the client gets a 408
pub async fn timeout_middleware(
    State(limit): State<Duration>,
    req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    match timeout(limit, next.run(req)).await {
        Ok(response) => Ok(response),
        Err(_) => Err(ApiError::Timeout),
    }
}
