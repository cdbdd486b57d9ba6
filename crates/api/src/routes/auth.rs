//! Staff login route handler.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use bakehouse_core::StaffRole;

use crate::error::{AppError, Result};
use crate::services::AuthService;
use crate::state::AppState;

/// Login request body.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

/// Successful login response.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub role: StaffRole,
}

/// Handle staff login.
///
/// Unknown usernames and wrong passwords fail identically with 400
/// "Invalid credentials".
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<LoginResponse>> {
    let username = body.username.unwrap_or_default();
    let password = body.password.unwrap_or_default();

    let auth = AuthService::new(state.pool());
    let user = auth.login(username.trim(), &password).await?;

    let token = state
        .tokens()
        .issue(&user)
        .map_err(|_| AppError::Internal("failed to issue token".to_owned()))?;

    tracing::info!(user_id = %user.id, role = %user.role, "staff login");

    Ok(Json(LoginResponse {
        token,
        role: user.role,
    }))
}
