//! Customer order repository.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;

use bakehouse_core::{OrderId, OrderStatus};

use super::RepositoryError;
use crate::models::{NewOrder, Order, OrderItem};

#[derive(sqlx::FromRow)]
struct OrderRow {
    id: i64,
    customer_name: String,
    phone: String,
    address: String,
    delivery_date: NaiveDate,
    time_slot: String,
    items: serde_json::Value,
    total_amount: Decimal,
    status: String,
    created_at: DateTime<Utc>,
}

const ORDER_COLUMNS: &str = "id, customer_name, phone, address, delivery_date, time_slot, \
                             items, total_amount, status, created_at";

impl OrderRow {
    fn into_order(self) -> Result<Order, RepositoryError> {
        let items: Vec<OrderItem> = serde_json::from_value(self.items).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid order items in database: {e}"))
        })?;
        let status = self.status.parse::<OrderStatus>().map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid status in database: {e}"))
        })?;
        Ok(Order {
            id: OrderId::new(self.id),
            customer_name: self.customer_name,
            phone: self.phone,
            address: self.address,
            delivery_date: self.delivery_date,
            time_slot: self.time_slot,
            items,
            total_amount: self.total_amount,
            status,
            created_at: self.created_at,
        })
    }
}

/// Repository for order database operations.
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all orders, newest first, for the staff dashboard.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_newest_first(&self) -> Result<Vec<Order>, RepositoryError> {
        let query =
            format!("SELECT {ORDER_COLUMNS} FROM orders ORDER BY created_at DESC, id DESC");
        let rows = sqlx::query_as::<_, OrderRow>(&query)
            .fetch_all(self.pool)
            .await?;

        rows.into_iter().map(OrderRow::into_order).collect()
    }

    /// Insert a new order. Status starts `Pending` and `created_at` is set
    /// by the database.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(&self, new: &NewOrder) -> Result<Order, RepositoryError> {
        let items = serde_json::to_value(&new.items).map_err(|e| {
            RepositoryError::DataCorruption(format!("unserializable order items: {e}"))
        })?;

        let query = format!(
            "INSERT INTO orders \
             (customer_name, phone, address, delivery_date, time_slot, items, total_amount) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {ORDER_COLUMNS}"
        );
        let row = sqlx::query_as::<_, OrderRow>(&query)
            .bind(&new.customer_name)
            .bind(&new.phone)
            .bind(&new.address)
            .bind(new.delivery_date)
            .bind(&new.time_slot)
            .bind(items)
            .bind(new.total_amount)
            .fetch_one(self.pool)
            .await?;

        row.into_order()
    }

    /// Overwrite an order's status unconditionally.
    ///
    /// Any of the five statuses may be set regardless of the current one;
    /// the update is idempotent when reapplied with the same value. Returns
    /// `None` when no order has the given id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn update_status(
        &self,
        id: OrderId,
        status: OrderStatus,
    ) -> Result<Option<Order>, RepositoryError> {
        let query = format!(
            "UPDATE orders SET status = $2 WHERE id = $1 RETURNING {ORDER_COLUMNS}"
        );
        let row = sqlx::query_as::<_, OrderRow>(&query)
            .bind(id.get())
            .bind(status.to_string())
            .fetch_optional(self.pool)
            .await?;

        row.map(OrderRow::into_order).transpose()
    }
}
