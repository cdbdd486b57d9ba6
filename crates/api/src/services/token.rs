//! Bearer token issuing and verification.
//!
//! Tokens are HMAC-SHA256 signed: `base64url(claims_json).base64url(mac)`.
//! Claims carry the staff member's identity and role so protected handlers
//! never need a database round-trip to authorize a request.

use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::{DateTime, Duration, Utc};
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use thiserror::Error;

use bakehouse_core::{StaffRole, UserId};

use crate::models::User;

type HmacSha256 = Hmac<Sha256>;

/// Tokens are valid for 24 hours from issuance.
const TOKEN_TTL_HOURS: i64 = 24;

/// Opaque verification failure.
///
/// Malformed, forged, and expired tokens all produce this same value so
/// callers (and clients probing the API) cannot distinguish them.
#[derive(Debug, Error)]
#[error("invalid token")]
pub struct TokenError;

/// Claims embedded in an issued token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Staff account id.
    pub sub: UserId,
    pub username: String,
    pub role: StaffRole,
    /// Issued-at, unix seconds.
    pub iat: i64,
    /// Expiry, unix seconds.
    pub exp: i64,
}

/// Issues and verifies signed bearer tokens with a shared secret.
#[derive(Clone)]
pub struct TokenService {
    mac: HmacSha256,
}

impl TokenService {
    /// Create a token service from the configured signing secret.
    #[must_use]
    pub fn new(secret: &[u8]) -> Self {
        // HMAC accepts keys of any length, so this cannot fail.
        let mac = HmacSha256::new_from_slice(secret).expect("HMAC-SHA256 accepts any key length");
        Self { mac }
    }

    /// Issue a signed token for a staff account, expiring in 24 hours.
    ///
    /// # Errors
    ///
    /// Returns `TokenError` if the claims cannot be encoded.
    pub fn issue(&self, user: &User) -> Result<String, TokenError> {
        self.issue_at(user, Utc::now())
    }

    /// Verify a token's signature and expiry.
    ///
    /// # Errors
    ///
    /// Returns the uniform `TokenError` for any failure.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        self.verify_at(token, Utc::now())
    }

    fn issue_at(&self, user: &User, now: DateTime<Utc>) -> Result<String, TokenError> {
        let claims = Claims {
            sub: user.id,
            username: user.username.clone(),
            role: user.role,
            iat: now.timestamp(),
            exp: (now + Duration::hours(TOKEN_TTL_HOURS)).timestamp(),
        };

        let payload = URL_SAFE_NO_PAD.encode(serde_json::to_vec(&claims).map_err(|_| TokenError)?);

        let mut mac = self.mac.clone();
        mac.update(payload.as_bytes());
        let signature = URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes());

        Ok(format!("{payload}.{signature}"))
    }

    fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, TokenError> {
        let (payload, signature) = token.split_once('.').ok_or(TokenError)?;
        let signature = URL_SAFE_NO_PAD.decode(signature).map_err(|_| TokenError)?;

        // Constant-time comparison; the signature is checked before the
        // payload is even parsed.
        let mut mac = self.mac.clone();
        mac.update(payload.as_bytes());
        mac.verify_slice(&signature).map_err(|_| TokenError)?;

        let claims_json = URL_SAFE_NO_PAD.decode(payload).map_err(|_| TokenError)?;
        let claims: Claims = serde_json::from_slice(&claims_json).map_err(|_| TokenError)?;

        if claims.exp <= now.timestamp() {
            return Err(TokenError);
        }

        Ok(claims)
    }
}
