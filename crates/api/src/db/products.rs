//! Catalog product repository.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use bakehouse_core::ProductId;

use super::RepositoryError;
use crate::models::{NewProduct, Product, Variant};

#[derive(sqlx::FromRow)]
struct ProductRow {
    id: i64,
    title: String,
    description: String,
    category: String,
    image_url: String,
    variants: serde_json::Value,
    created_at: DateTime<Utc>,
}

impl ProductRow {
    fn into_product(self) -> Result<Product, RepositoryError> {
        let variants: Vec<Variant> = serde_json::from_value(self.variants).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid variants in database: {e}"))
        })?;
        Ok(Product {
            id: ProductId::new(self.id),
            title: self.title,
            description: self.description,
            category: self.category,
            image_url: self.image_url,
            variants,
            created_at: self.created_at,
        })
    }
}

/// Repository for catalog database operations.
pub struct ProductRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List the full catalog, oldest first. No pagination: the catalog is
    /// a single shop's cake list.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if stored variants no
    /// longer parse.
    pub async fn list(&self) -> Result<Vec<Product>, RepositoryError> {
        let rows = sqlx::query_as::<_, ProductRow>(
            "SELECT id, title, description, category, image_url, variants, created_at \
             FROM products ORDER BY id",
        )
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(ProductRow::into_product).collect()
    }

    /// Insert a new catalog product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(&self, new: &NewProduct) -> Result<Product, RepositoryError> {
        let variants = serde_json::to_value(&new.variants).map_err(|e| {
            RepositoryError::DataCorruption(format!("unserializable variants: {e}"))
        })?;

        let row = sqlx::query_as::<_, ProductRow>(
            "INSERT INTO products (title, description, category, image_url, variants) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING id, title, description, category, image_url, variants, created_at",
        )
        .bind(&new.title)
        .bind(&new.description)
        .bind(&new.category)
        .bind(&new.image_url)
        .bind(variants)
        .fetch_one(self.pool)
        .await?;

        row.into_product()
    }
}
