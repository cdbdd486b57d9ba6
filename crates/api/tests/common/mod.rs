//! Shared harness for router-level tests.
//!
//! Builds the real router over a lazy (never-connected) pool, so tests
//! exercise everything up to the first database query.

use axum::Router;
use chrono::Utc;
use secrecy::SecretString;
use sqlx::postgres::PgPoolOptions;

use bakehouse_api::{config::ApiConfig, models::User, routes, state::AppState};
use bakehouse_core::{StaffRole, UserId};

const TEST_SECRET: &str = "0123456789abcdef0123456789abcdef";

pub fn test_state() -> AppState {
    let config = ApiConfig {
        database_url: SecretString::from("postgres://bakehouse@localhost/bakehouse_unreachable"),
        host: "127.0.0.1".parse().expect("host"),
        port: 0,
        token_secret: SecretString::from(TEST_SECRET),
        email: None,
        assets: None,
        sentry_dsn: None,
    };

    // Lazy pool: never connects unless a handler actually queries.
    let pool = PgPoolOptions::new()
        .connect_lazy("postgres://bakehouse@localhost/bakehouse_unreachable")
        .expect("lazy pool");

    AppState::new(config, pool).expect("state")
}

pub fn app() -> Router {
    routes::routes().with_state(test_state())
}

pub fn token_for(role: StaffRole) -> String {
    let user = User {
        id: UserId::new(1),
        username: "tester".to_owned(),
        role,
        created_at: Utc::now(),
    };
    test_state().tokens().issue(&user).expect("issue token")
}

pub async fn json_message(response: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    let body: serde_json::Value = serde_json::from_slice(&bytes).expect("json body");
    body["message"].as_str().expect("message field").to_owned()
}
