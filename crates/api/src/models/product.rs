//! Catalog product domain types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use bakehouse_core::ProductId;

/// A purchasable size/price option embedded within a product.
///
/// Variants are value objects, not independently addressable entities:
/// they live inside the product record (a JSONB column) and have no ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variant {
    /// Weight in kilograms (e.g. 0.5).
    pub weight: Decimal,
    /// Price in rupees.
    pub price: Decimal,
}

/// A catalog product. The catalog is append-only: products are created by
/// staff upload and listed publicly; there is no update or delete.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub description: String,
    pub category: String,
    /// URL on the external asset host where the uploaded image landed.
    pub image_url: String,
    pub variants: Vec<Variant>,
    pub created_at: DateTime<Utc>,
}

/// Payload for inserting a new product.
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub title: String,
    pub description: String,
    pub category: String,
    pub image_url: String,
    pub variants: Vec<Variant>,
}
