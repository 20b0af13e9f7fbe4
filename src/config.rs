use axum::http::HeaderValue;
use std::{env, fmt::Display, str::FromStr, time::Duration};
use tracing::info;

//read once at startup; DATABASE_URL and SESSION_SECRET must be set, the rest
//has defaults
#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub bind_addr: String,
    pub session_secret: String,
    pub session_ttl_days: i64,
    pub db_max_connections: u32,
    pub db_connect_attempts: u32,
    pub db_retry_delay: Duration,
    pub request_timeout: Duration,
    pub cors_origin: Option<HeaderValue>,
}

impl Config {
    pub fn load() -> Self {
        Self {
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            bind_addr: try_load("BIND_ADDR", "0.0.0.0:3000"),
            session_secret: env::var("SESSION_SECRET").expect("SESSION_SECRET must be set"),
            session_ttl_days: try_load("SESSION_TTL_DAYS", "30"),
            db_max_connections: try_load("DB_MAX_CONNECTIONS", "10"),
            db_connect_attempts: try_load("DB_CONNECT_ATTEMPTS", "3"),
            db_retry_delay: Duration::from_millis(try_load("DB_RETRY_DELAY_MS", "200")),
            request_timeout: Duration::from_secs(try_load("REQUEST_TIMEOUT_SECS", "10")),
            cors_origin: env::var("CORS_ORIGIN").ok().map(|origin| {
                origin
                    .parse::<HeaderValue>()
                    .expect("CORS_ORIGIN is not a valid header value")
            }),
        }
    }
}

fn try_load<T: FromStr>(key: &str, default: &str) -> T
where
    T::Err: Display,
{
    let value = env::var(key).unwrap_or_else(|_| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    });

    match value.parse() {
        Ok(parsed) => parsed,
        Err(err) => panic!("Invalid {key} value {value:?}: {err}"),
    }
}
