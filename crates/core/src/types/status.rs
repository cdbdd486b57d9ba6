//! Order lifecycle status.

use serde::{Deserialize, Serialize};

/// Fulfillment status of a customer order.
///
/// Orders are always created as `Pending`. Staff may set any status from
/// any prior status, including reopening `Completed` or `Cancelled`
/// orders; there is deliberately no transition graph so the shop can
/// correct mistakes (e.g. a mis-tapped "Completed") without operator
/// intervention in the database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum OrderStatus {
    #[default]
    Pending,
    Baking,
    #[serde(rename = "Out for Delivery")]
    OutForDelivery,
    Completed,
    Cancelled,
}

impl OrderStatus {
    /// Every status a staff member may set.
    pub const ALL: [Self; 5] = [
        Self::Pending,
        Self::Baking,
        Self::OutForDelivery,
        Self::Completed,
        Self::Cancelled,
    ];
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "Pending"),
            Self::Baking => write!(f, "Baking"),
            Self::OutForDelivery => write!(f, "Out for Delivery"),
            Self::Completed => write!(f, "Completed"),
            Self::Cancelled => write!(f, "Cancelled"),
        }
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pending" => Ok(Self::Pending),
            "Baking" => Ok(Self::Baking),
            "Out for Delivery" => Ok(Self::OutForDelivery),
            "Completed" => Ok(Self::Completed),
            "Cancelled" => Ok(Self::Cancelled),
            _ => Err(format!("invalid order status: {s}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_orders_default_to_pending() {
        assert_eq!(OrderStatus::default(), OrderStatus::Pending);
    }

    #[test]
    fn wire_names_match_display() {
        for status in OrderStatus::ALL {
            let json = serde_json::to_string(&status).expect("serialize");
            assert_eq!(json, format!("\"{status}\""));
            let back: OrderStatus = serde_json::from_str(&json).expect("deserialize");
            assert_eq!(back, status);
        }
    }

    #[test]
    fn out_for_delivery_keeps_its_spaces() {
        assert_eq!(
            "Out for Delivery".parse::<OrderStatus>(),
            Ok(OrderStatus::OutForDelivery)
        );
        assert_eq!(OrderStatus::OutForDelivery.to_string(), "Out for Delivery");
    }

    #[test]
    fn unknown_statuses_are_rejected() {
        assert!("Shipped".parse::<OrderStatus>().is_err());
        assert!("pending".parse::<OrderStatus>().is_err());
    }
}
