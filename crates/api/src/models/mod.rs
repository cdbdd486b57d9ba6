//! Domain types for the API.
//!
//! These are validated domain objects; raw database rows live in the
//! repository layer and are converted at the boundary.

pub mod order;
pub mod product;
pub mod user;

pub use order::{NewOrder, Order, OrderItem};
pub use product::{NewProduct, Product, Variant};
pub use user::User;
