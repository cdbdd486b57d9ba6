//! Newtype IDs for type-safe entity references.
//!
//! Each entity table uses a `BIGSERIAL` primary key; wrapping the raw `i64`
//! in a dedicated newtype prevents accidentally passing an order id where a
//! product id is expected.

use serde::{Deserialize, Serialize};

macro_rules! define_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Wrap a raw database id.
            #[must_use]
            pub const fn new(id: i64) -> Self {
                Self(id)
            }

            /// The underlying i64 value.
            #[must_use]
            pub const fn get(self) -> i64 {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(id: i64) -> Self {
                Self(id)
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id!(
    /// Id of a staff account.
    UserId
);
define_id!(
    /// Id of a catalog product.
    ProductId
);
define_id!(
    /// Id of a customer order.
    OrderId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_round_trip_through_i64() {
        let id = UserId::new(42);
        assert_eq!(id.get(), 42);
        assert_eq!(i64::from(id), 42);
        assert_eq!(UserId::from(42), id);
    }

    #[test]
    fn ids_serialize_transparently() {
        let id = ProductId::new(7);
        assert_eq!(serde_json::to_string(&id).expect("serialize"), "7");
        let back: ProductId = serde_json::from_str("7").expect("deserialize");
        assert_eq!(back, id);
    }

    #[test]
    fn ids_display_as_plain_numbers() {
        assert_eq!(OrderId::new(1001).to_string(), "1001");
    }
}
