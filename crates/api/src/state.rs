//! Application state shared across handlers.

use std::sync::Arc;

use secrecy::ExposeSecret;
use sqlx::PgPool;

use crate::config::ApiConfig;
use crate::services::{AssetHost, OrderNotifier, TokenService};

/// Error constructing application state.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("smtp transport error: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),
}

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`; holds the pool, the token service, and the
/// optional external collaborators (mail relay, asset host).
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ApiConfig,
    pool: PgPool,
    tokens: TokenService,
    notifier: Option<OrderNotifier>,
    assets: Option<AssetHost>,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Errors
    ///
    /// Returns an error if the SMTP transport cannot be constructed from
    /// the configured relay.
    pub fn new(config: ApiConfig, pool: PgPool) -> Result<Self, StateError> {
        let tokens = TokenService::new(config.token_secret.expose_secret().as_bytes());
        let notifier = config.email.as_ref().map(OrderNotifier::new).transpose()?;
        let assets = config.assets.as_ref().map(AssetHost::new);

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                tokens,
                notifier,
                assets,
            }),
        })
    }

    /// Get a reference to the configuration.
    #[must_use]
    pub fn config(&self) -> &ApiConfig {
        &self.inner.config
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    /// Get a reference to the token service.
    #[must_use]
    pub fn tokens(&self) -> &TokenService {
        &self.inner.tokens
    }

    /// Get the order notifier, if a mail relay is configured.
    #[must_use]
    pub fn notifier(&self) -> Option<&OrderNotifier> {
        self.inner.notifier.as_ref()
    }

    /// Get the asset host client, if one is configured.
    #[must_use]
    pub fn assets(&self) -> Option<&AssetHost> {
        self.inner.assets.as_ref()
    }
}
