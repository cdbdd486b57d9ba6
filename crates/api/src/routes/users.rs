//! Staff account management route handlers (super-admin only).

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;

use bakehouse_core::{StaffRole, UserId};

use crate::error::{AppError, Result};
use crate::middleware::RequireSuperAdmin;
use crate::models::User;
use crate::services::AuthService;
use crate::state::AppState;

/// Account creation request body.
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub username: Option<String>,
    pub password: Option<String>,
    pub role: Option<String>,
}

/// List all staff accounts. Password hashes are excluded by construction.
pub async fn list(
    RequireSuperAdmin(_claims): RequireSuperAdmin,
    State(state): State<AppState>,
) -> Result<Json<Vec<User>>> {
    let users = AuthService::new(state.pool()).list_users().await?;
    Ok(Json(users))
}

/// Create a staff account. Accounts never self-register; this endpoint is
/// the only API path that mints one.
pub async fn create(
    RequireSuperAdmin(claims): RequireSuperAdmin,
    State(state): State<AppState>,
    Json(body): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<User>)> {
    let (Some(username), Some(password), Some(role)) = (body.username, body.password, body.role)
    else {
        return Err(AppError::Validation("Please enter all fields".to_owned()));
    };

    let role = role
        .parse::<StaffRole>()
        .map_err(|_| AppError::Validation("Role must be admin or super-admin".to_owned()))?;

    let user = AuthService::new(state.pool())
        .create_user(username.trim(), &password, role)
        .await?;

    tracing::info!(user_id = %user.id, role = %user.role, created_by = %claims.username, "staff account created");

    Ok((StatusCode::CREATED, Json(user)))
}

/// Delete a staff account. Deleting an id that no longer exists still
/// answers success, so repeated clicks are harmless.
pub async fn delete(
    RequireSuperAdmin(claims): RequireSuperAdmin,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>> {
    let deleted = AuthService::new(state.pool())
        .delete_user(UserId::new(id))
        .await?;

    if deleted {
        tracing::info!(user_id = %id, deleted_by = %claims.username, "staff account deleted");
    }

    Ok(Json(serde_json::json!({ "message": "User deleted" })))
}
