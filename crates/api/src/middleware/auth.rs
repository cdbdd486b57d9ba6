//! Bearer-token authentication extractors.
//!
//! Protected handlers declare the privilege tier they need by taking one
//! of these extractors; the token is pulled from the `Authorization`
//! header and verified before the handler body runs.

use axum::{
    Json,
    extract::FromRequestParts,
    http::{StatusCode, header, request::Parts},
    response::{IntoResponse, Response},
};

use bakehouse_core::StaffRole;

use crate::services::Claims;
use crate::state::AppState;

/// Extractor that requires any authenticated staff member.
///
/// Missing, malformed, forged, and expired tokens are all rejected with
/// the same 401; a probing client learns nothing about why.
///
/// # Example
///
/// ```rust,ignore
/// async fn dashboard(RequireStaff(claims): RequireStaff) -> impl IntoResponse {
///     format!("Hello, {}!", claims.username)
/// }
/// ```
pub struct RequireStaff(pub Claims);

/// Extractor that additionally requires the `super-admin` role.
///
/// Rejects with 403 when a valid token carries insufficient privilege.
pub struct RequireSuperAdmin(pub Claims);

/// Rejection for the auth extractors.
pub enum AuthRejection {
    /// No usable bearer token.
    Unauthorized,
    /// Valid token, insufficient role.
    Forbidden,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::Unauthorized => (StatusCode::UNAUTHORIZED, "Access denied"),
            Self::Forbidden => (StatusCode::FORBIDDEN, "Super admin access required"),
        };
        (status, Json(serde_json::json!({ "message": message }))).into_response()
    }
}

/// Pull the bearer token out of the `Authorization` header.
fn bearer_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

impl FromRequestParts<AppState> for RequireStaff {
    type Rejection = AuthRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts).ok_or(AuthRejection::Unauthorized)?;
        let claims = state
            .tokens()
            .verify(token)
            .map_err(|_| AuthRejection::Unauthorized)?;

        Ok(Self(claims))
    }
}

impl FromRequestParts<AppState> for RequireSuperAdmin {
    type Rejection = AuthRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let RequireStaff(claims) = RequireStaff::from_request_parts(parts, state).await?;

        if !claims.role.permits(StaffRole::SuperAdmin) {
            return Err(AuthRejection::Forbidden);
        }

        Ok(Self(claims))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn parts_with_auth(value: Option<&str>) -> Parts {
        let mut builder = Request::builder().uri("/orders");
        if let Some(v) = value {
            builder = builder.header(header::AUTHORIZATION, v);
        }
        builder.body(()).expect("request").into_parts().0
    }

    #[test]
    fn bearer_token_strips_the_scheme() {
        let parts = parts_with_auth(Some("Bearer abc.def"));
        assert_eq!(bearer_token(&parts), Some("abc.def"));
    }

    #[test]
    fn bearer_token_rejects_other_schemes_and_absence() {
        assert_eq!(bearer_token(&parts_with_auth(Some("Basic dXNlcg=="))), None);
        assert_eq!(bearer_token(&parts_with_auth(Some("bearer abc"))), None);
        assert_eq!(bearer_token(&parts_with_auth(None)), None);
    }
}
