//! API configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `BAKEHOUSE_DATABASE_URL` - `PostgreSQL` connection string (falls back
//!   to `DATABASE_URL`)
//!
//! ## Required in production, dev fallback otherwise
//! - `BAKEHOUSE_TOKEN_SECRET` - Bearer-token signing secret (min 32 chars,
//!   no placeholder values). When unset outside production a fixed
//!   development secret is used and a warning is logged.
//!
//! ## Optional
//! - `BAKEHOUSE_HOST` - Bind address (default: 127.0.0.1)
//! - `BAKEHOUSE_PORT` - Listen port (default: 8080)
//! - `APP_ENV` - Deployment environment name; `production` tightens secret
//!   handling
//! - `BAKEHOUSE_ASSET_UPLOAD_URL` - External asset host upload endpoint;
//!   product image uploads fail without it
//! - `SMTP_HOST`, `SMTP_PORT`, `SMTP_USERNAME`, `SMTP_PASSWORD`,
//!   `SMTP_FROM`, `ORDER_NOTIFY_TO` - Mail relay for order notifications;
//!   notifications are skipped when the block is absent
//! - `SENTRY_DSN` - Sentry error tracking DSN

use std::net::{IpAddr, SocketAddr};

use secrecy::SecretString;
use thiserror::Error;

const MIN_TOKEN_SECRET_LENGTH: usize = 32;

/// Fixed signing secret for local development only. Production refuses to
/// start on this value.
const DEV_TOKEN_SECRET: &str = "bakehouse-dev-token-secret-do-not-deploy";

/// Blocklist of common placeholder patterns (case-insensitive).
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "example",
    "secret",
    "password",
    "todo",
    "fixme",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// API application configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// `PostgreSQL` connection URL (contains password)
    pub database_url: SecretString,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Bearer-token signing secret
    pub token_secret: SecretString,
    /// Mail relay settings; `None` disables order notifications
    pub email: Option<EmailConfig>,
    /// External asset host settings; `None` disables product image upload
    pub assets: Option<AssetConfig>,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
}

/// SMTP relay configuration for order notification mail.
///
/// Implements `Debug` manually to redact the password.
#[derive(Clone)]
pub struct EmailConfig {
    pub smtp_host: String,
    pub smtp_port: u16,
    pub smtp_username: String,
    pub smtp_password: SecretString,
    /// From address on outgoing mail.
    pub from_address: String,
    /// Shop owner address that receives new-order notifications.
    pub notify_address: String,
}

impl std::fmt::Debug for EmailConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmailConfig")
            .field("smtp_host", &self.smtp_host)
            .field("smtp_port", &self.smtp_port)
            .field("smtp_username", &self.smtp_username)
            .field("smtp_password", &"[REDACTED]")
            .field("from_address", &self.from_address)
            .field("notify_address", &self.notify_address)
            .finish()
    }
}

/// External asset host configuration.
#[derive(Debug, Clone)]
pub struct AssetConfig {
    /// Endpoint accepting multipart image uploads and answering with the
    /// hosted URL.
    pub upload_url: String,
}

impl ApiConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid,
    /// or if the token secret fails validation.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let database_url = get_database_url("BAKEHOUSE_DATABASE_URL")?;
        let host = get_env_or_default("BAKEHOUSE_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("BAKEHOUSE_HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("BAKEHOUSE_PORT", "8080")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("BAKEHOUSE_PORT".to_string(), e.to_string()))?;

        let production = get_optional_env("APP_ENV").is_some_and(|env| env == "production");
        let token_secret = load_token_secret("BAKEHOUSE_TOKEN_SECRET", production)?;

        let email = EmailConfig::from_env()?;
        let assets = get_optional_env("BAKEHOUSE_ASSET_UPLOAD_URL")
            .map(|upload_url| AssetConfig { upload_url });
        let sentry_dsn = get_optional_env("SENTRY_DSN");

        Ok(Self {
            database_url,
            host,
            port,
            token_secret,
            email,
            assets,
            sentry_dsn,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl EmailConfig {
    /// Load the optional SMTP block. All-or-nothing: a partially set block
    /// is a configuration error, a fully absent one disables notifications.
    fn from_env() -> Result<Option<Self>, ConfigError> {
        let vars = [
            "SMTP_HOST",
            "SMTP_PORT",
            "SMTP_USERNAME",
            "SMTP_PASSWORD",
            "SMTP_FROM",
            "ORDER_NOTIFY_TO",
        ];
        let set = vars.iter().filter(|v| std::env::var(v).is_ok()).count();
        if set == 0 {
            return Ok(None);
        }
        if set < vars.len() {
            let missing = vars
                .iter()
                .filter(|v| std::env::var(v).is_err())
                .copied()
                .collect::<Vec<_>>()
                .join(", ");
            return Err(ConfigError::MissingEnvVar(missing));
        }

        let smtp_port = get_required_env("SMTP_PORT")?.parse::<u16>().map_err(|e| {
            ConfigError::InvalidEnvVar("SMTP_PORT".to_string(), e.to_string())
        })?;

        Ok(Some(Self {
            smtp_host: get_required_env("SMTP_HOST")?,
            smtp_port,
            smtp_username: get_required_env("SMTP_USERNAME")?,
            smtp_password: SecretString::from(get_required_env("SMTP_PASSWORD")?),
            from_address: get_required_env("SMTP_FROM")?,
            notify_address: get_required_env("ORDER_NOTIFY_TO")?,
        }))
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get database URL with fallback to generic `DATABASE_URL`.
fn get_database_url(primary_key: &str) -> Result<SecretString, ConfigError> {
    if let Ok(value) = std::env::var(primary_key) {
        return Ok(SecretString::from(value));
    }
    if let Ok(value) = std::env::var("DATABASE_URL") {
        return Ok(SecretString::from(value));
    }
    Err(ConfigError::MissingEnvVar(primary_key.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Load the token signing secret.
///
/// Unset: fall back to [`DEV_TOKEN_SECRET`] with a warning, unless running
/// in production, where the fallback is refused. Set values must pass
/// [`validate_token_secret`].
fn load_token_secret(key: &str, production: bool) -> Result<SecretString, ConfigError> {
    match std::env::var(key) {
        Ok(value) => {
            validate_token_secret(&value, key)?;
            Ok(SecretString::from(value))
        }
        Err(_) if production => Err(ConfigError::MissingEnvVar(key.to_string())),
        Err(_) => {
            tracing::warn!(
                "{key} is not set; using the development token secret. \
                 Tokens signed with it are worthless outside local testing."
            );
            Ok(SecretString::from(DEV_TOKEN_SECRET))
        }
    }
}

/// Validate that a configured secret is long enough and not a placeholder.
fn validate_token_secret(secret: &str, var_name: &str) -> Result<(), ConfigError> {
    if secret.len() < MIN_TOKEN_SECRET_LENGTH {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "must be at least {MIN_TOKEN_SECRET_LENGTH} characters (got {})",
                secret.len()
            ),
        ));
    }

    let lower = secret.to_lowercase();
    for pattern in PLACEHOLDER_PATTERNS {
        if lower.contains(pattern) {
            return Err(ConfigError::InsecureSecret(
                var_name.to_string(),
                format!("appears to be a placeholder (contains '{pattern}')"),
            ));
        }
    }

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_token_secret_too_short() {
        let result = validate_token_secret("short", "TEST_VAR");
        assert!(matches!(result, Err(ConfigError::InsecureSecret(_, _))));
    }

    #[test]
    fn test_validate_token_secret_placeholder() {
        let result = validate_token_secret(&"changeme".repeat(8), "TEST_VAR");
        assert!(matches!(result, Err(ConfigError::InsecureSecret(_, _))));
    }

    #[test]
    fn test_validate_token_secret_valid() {
        let result = validate_token_secret("aB3$xY9!mK2@nL5#pQ7&rT0*uW4^zC6%", "TEST_VAR");
        assert!(result.is_ok());
    }

    #[test]
    fn test_dev_fallback_fails_its_own_validation() {
        // The fallback contains blocklisted words on purpose: it can never
        // be smuggled in through the environment variable path.
        assert!(validate_token_secret(DEV_TOKEN_SECRET, "TEST_VAR").is_err());
    }

    #[test]
    fn test_socket_addr() {
        let config = ApiConfig {
            database_url: SecretString::from("postgres://localhost/test"),
            host: "127.0.0.1".parse().unwrap(),
            port: 8080,
            token_secret: SecretString::from("x".repeat(32)),
            email: None,
            assets: None,
            sentry_dsn: None,
        };

        let addr = config.socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 8080);
    }

    #[test]
    fn test_email_config_debug_redacts_password() {
        let config = EmailConfig {
            smtp_host: "smtp.example.com".to_string(),
            smtp_port: 587,
            smtp_username: "orders@bakehouse.example".to_string(),
            smtp_password: SecretString::from("super_secret_smtp_password"),
            from_address: "orders@bakehouse.example".to_string(),
            notify_address: "owner@bakehouse.example".to_string(),
        };

        let debug_output = format!("{config:?}");
        assert!(debug_output.contains("smtp.example.com"));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("super_secret_smtp_password"));
    }
}
