//! HTTP route handlers for the API.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health           - Liveness check
//! GET  /health/ready     - Readiness check (pings the database)
//!
//! # Auth
//! POST /auth/login       - Staff login, returns {token, role}
//!
//! # Catalog
//! GET  /products         - Full catalog (public)
//! POST /products         - Create product (staff, multipart upload)
//!
//! # Orders
//! POST /orders           - Place order (public)
//! GET  /orders           - List orders newest-first (staff)
//! PUT  /orders/{id}      - Overwrite order status (staff)
//!
//! # Staff accounts (super-admin only)
//! GET    /users          - List accounts (no password hashes)
//! POST   /users          - Create account
//! DELETE /users/{id}     - Delete account
//! ```

pub mod auth;
pub mod orders;
pub mod products;
pub mod users;

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    routing::{delete, get, post, put},
};

use crate::state::AppState;

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new().route("/login", post(auth::login))
}

/// Create the catalog routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new().route("/", get(products::list).post(products::create))
}

/// Create the order routes router.
pub fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(orders::place).get(orders::list))
        .route("/{id}", put(orders::update_status))
}

/// Create the staff account routes router.
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(users::list).post(users::create))
        .route("/{id}", delete(users::delete))
}

/// Create all routes for the API.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/health/ready", get(readiness))
        .nest("/auth", auth_routes())
        .nest("/products", product_routes())
        .nest("/orders", order_routes())
        .nest("/users", user_routes())
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Verifies database connectivity before returning OK.
/// Returns 503 Service Unavailable if the database is not reachable.
async fn readiness(State(state): State<AppState>) -> StatusCode {
    match sqlx::query("SELECT 1").fetch_one(state.pool()).await {
        Ok(_) => StatusCode::OK,
        Err(_) => StatusCode::SERVICE_UNAVAILABLE,
    }
}
