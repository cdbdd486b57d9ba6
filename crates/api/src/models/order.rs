//! Customer order domain types.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use bakehouse_core::{OrderId, OrderStatus, ProductId};

/// One ordered item: a snapshot of the product and selected variant at the
/// moment the customer checked out, so later catalog changes never
/// rewrite order history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub product_id: ProductId,
    pub title: String,
    /// Selected variant weight in kilograms.
    pub weight: Decimal,
    /// Unit price of the selected variant.
    pub price: Decimal,
    pub qty: u32,
    /// Message to pipe onto the cake.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_message: Option<String>,
    /// Free-form preparation note (e.g. "eggless").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customization: Option<String>,
}

/// A customer order. Immutable once created except for `status`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub customer_name: String,
    pub phone: String,
    pub address: String,
    pub delivery_date: NaiveDate,
    pub time_slot: String,
    pub items: Vec<OrderItem>,
    /// Client-computed total; trusted as submitted, settled cash on
    /// delivery.
    pub total_amount: Decimal,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

/// Payload for inserting a new order. Status and creation time are set by
/// the store: every order starts `Pending`.
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub customer_name: String,
    pub phone: String,
    pub address: String,
    pub delivery_date: NaiveDate,
    pub time_slot: String,
    pub items: Vec<OrderItem>,
    pub total_amount: Decimal,
}
