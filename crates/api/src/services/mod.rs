//! Application services: credentials, tokens, notifications, assets.

pub mod assets;
pub mod auth;
pub mod notify;
pub mod token;

pub use assets::AssetHost;
pub use auth::{AuthError, AuthService};
pub use notify::{OrderNotifier, notify_order_placed};
pub use token::{Claims, TokenService};
