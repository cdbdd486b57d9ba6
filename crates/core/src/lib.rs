//! Bakehouse Core - Shared types library.
//!
//! This crate provides common types used across all Bakehouse components:
//! - `api` - HTTP/JSON API serving the storefront and the admin dashboard
//! - `cli` - Command-line tools for migrations and staff management
//!
//! # Architecture
//!
//! The core crate contains only types and pure logic - no I/O, no database
//! access, no HTTP clients. This keeps it lightweight and allows it to be
//! used anywhere, including the client-side cart state which only talks to
//! an abstract key-value storage seam.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, staff roles, and order statuses
//! - [`cart`] - Client-side cart state with merge-on-add semantics

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod types;

pub use types::*;
