//! Order lifecycle route handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;

use bakehouse_core::{OrderId, OrderStatus};

use crate::db::OrderRepository;
use crate::error::{AppError, Result};
use crate::middleware::RequireStaff;
use crate::models::{NewOrder, Order, OrderItem};
use crate::services::notify_order_placed;
use crate::state::AppState;

/// Checkout request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceOrderRequest {
    pub customer_name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub delivery_date: Option<NaiveDate>,
    pub time_slot: Option<String>,
    pub items: Option<Vec<OrderItem>>,
    pub total_amount: Option<Decimal>,
}

/// Status update request body.
#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: Option<String>,
}

/// Place a customer order. Public: checkout does not require an account.
///
/// The created order is always `Pending`. The owner notification is
/// dispatched fire-and-forget after the order has committed; its failure
/// never affects the response.
pub async fn place(
    State(state): State<AppState>,
    Json(body): Json<PlaceOrderRequest>,
) -> Result<(StatusCode, Json<Order>)> {
    let new_order = validate_order(body)?;

    let order = OrderRepository::new(state.pool()).create(&new_order).await?;

    tracing::info!(order_id = %order.id, customer = %order.customer_name, "order placed");
    notify_order_placed(state.notifier(), &order);

    Ok((StatusCode::CREATED, Json(order)))
}

/// List all orders, newest first, for the staff dashboard.
pub async fn list(
    RequireStaff(_claims): RequireStaff,
    State(state): State<AppState>,
) -> Result<Json<Vec<Order>>> {
    let orders = OrderRepository::new(state.pool()).list_newest_first().await?;
    Ok(Json(orders))
}

/// Overwrite an order's status.
///
/// Accepts any of the five statuses regardless of the current one; the
/// shop uses this to correct mis-taps, so even Completed and Cancelled
/// orders can be reopened.
pub async fn update_status(
    RequireStaff(claims): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<UpdateStatusRequest>,
) -> Result<Json<Order>> {
    let status = body
        .status
        .as_deref()
        .unwrap_or_default()
        .parse::<OrderStatus>()
        .map_err(|_| {
            AppError::Validation(
                "Status must be one of Pending, Baking, Out for Delivery, Completed, Cancelled"
                    .to_owned(),
            )
        })?;

    let order = OrderRepository::new(state.pool())
        .update_status(OrderId::new(id), status)
        .await?
        .ok_or_else(|| AppError::NotFound("Order not found".to_owned()))?;

    tracing::info!(order_id = %order.id, status = %order.status, by = %claims.username, "order status updated");

    Ok(Json(order))
}

/// Check the checkout payload for required fields.
fn validate_order(req: PlaceOrderRequest) -> Result<NewOrder> {
    const MESSAGE: &str = "Please fill all details including delivery date and time slot";
    let missing = || AppError::Validation(MESSAGE.to_owned());

    let customer_name = req.customer_name.filter(|v| !v.trim().is_empty()).ok_or_else(missing)?;
    let phone = req.phone.filter(|v| !v.trim().is_empty()).ok_or_else(missing)?;
    let address = req.address.filter(|v| !v.trim().is_empty()).ok_or_else(missing)?;
    let delivery_date = req.delivery_date.ok_or_else(missing)?;
    let time_slot = req.time_slot.filter(|v| !v.trim().is_empty()).ok_or_else(missing)?;
    let items = req.items.filter(|i| !i.is_empty()).ok_or_else(missing)?;
    // Client-computed; trusted as submitted (cash on delivery).
    let total_amount = req.total_amount.ok_or_else(missing)?;

    Ok(NewOrder {
        customer_name,
        phone,
        address,
        delivery_date,
        time_slot,
        items,
        total_amount,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use bakehouse_core::ProductId;

    fn full_request() -> PlaceOrderRequest {
        PlaceOrderRequest {
            customer_name: Some("Asha".to_owned()),
            phone: Some("9876543210".to_owned()),
            address: Some("12 Hill Road".to_owned()),
            delivery_date: NaiveDate::from_ymd_opt(2026, 9, 1),
            time_slot: Some("4 PM - 6 PM".to_owned()),
            items: Some(vec![OrderItem {
                product_id: ProductId::new(1),
                title: "Chocolate Truffle".to_owned(),
                weight: Decimal::from(1),
                price: Decimal::from(800),
                qty: 1,
                custom_message: None,
                customization: None,
            }]),
            total_amount: Some(Decimal::from(800)),
        }
    }

    #[test]
    fn complete_requests_validate() {
        let new_order = validate_order(full_request()).expect("valid");
        assert_eq!(new_order.customer_name, "Asha");
        assert_eq!(new_order.items.len(), 1);
        assert_eq!(new_order.total_amount, Decimal::from(800));
    }

    #[test]
    fn each_missing_field_rejects() {
        let cases: Vec<Box<dyn Fn(&mut PlaceOrderRequest)>> = vec![
            Box::new(|r| r.customer_name = None),
            Box::new(|r| r.phone = None),
            Box::new(|r| r.address = None),
            Box::new(|r| r.delivery_date = None),
            Box::new(|r| r.time_slot = None),
            Box::new(|r| r.items = None),
            Box::new(|r| r.total_amount = None),
        ];

        for (i, clear) in cases.iter().enumerate() {
            let mut req = full_request();
            clear(&mut req);
            assert!(validate_order(req).is_err(), "case {i} should reject");
        }
    }

    #[test]
    fn blank_and_empty_values_reject() {
        let mut req = full_request();
        req.customer_name = Some("   ".to_owned());
        assert!(validate_order(req).is_err());

        let mut req = full_request();
        req.items = Some(vec![]);
        assert!(validate_order(req).is_err());
    }
}
