//! Request middleware: bearer-token auth extractors and request IDs.

pub mod auth;
pub mod request_id;

pub use auth::{RequireStaff, RequireSuperAdmin};
pub use request_id::request_id_middleware;
