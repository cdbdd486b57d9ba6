//! Client-side cart state.
//!
//! The cart never reaches the server as an entity: it aggregates the
//! shopper's selections locally until checkout posts an order. State is an
//! explicit store object over a key-value storage seam rather than ambient
//! global state, so UI components receive a `&mut CartStore<_>` and the
//! serialized line array lives under a single storage key, rehydrated on
//! load and rewritten on every mutation.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::ProductId;

/// The single storage key holding the serialized cart.
pub const CART_STORAGE_KEY: &str = "bakehouse.cart";

/// Key-value storage seam for cart persistence.
///
/// Backed by browser local storage in the real client; tests use
/// [`MemoryStorage`].
pub trait CartStorage {
    /// Read the value stored under `key`, if any.
    fn load(&self, key: &str) -> Option<String>;

    /// Overwrite the value stored under `key`.
    fn store(&mut self, key: &str, value: &str);
}

/// In-memory [`CartStorage`] implementation.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: std::collections::HashMap<String, String>,
}

impl CartStorage for MemoryStorage {
    fn load(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn store(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_owned(), value.to_owned());
    }
}

/// One line in the cart: a product snapshot plus the selected variant,
/// quantity, and any customization text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub product_id: ProductId,
    pub title: String,
    pub image_url: String,
    /// Selected variant weight in kilograms.
    pub weight: Decimal,
    /// Unit price of the selected variant.
    pub price: Decimal,
    pub qty: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customization: Option<String>,
}

impl CartLine {
    /// Lines are combined only when product, variant, and both
    /// customization fields match exactly.
    #[must_use]
    pub fn merges_with(&self, other: &Self) -> bool {
        self.product_id == other.product_id
            && self.weight == other.weight
            && self.custom_message == other.custom_message
            && self.customization == other.customization
    }
}

/// The cart store: live line list over a borrowed persistence backend.
///
/// UI components receive `&mut CartStore<_>`; the storage itself stays
/// owned by the surrounding page/session scope.
#[derive(Debug)]
pub struct CartStore<'a, S: CartStorage> {
    storage: &'a mut S,
    lines: Vec<CartLine>,
}

impl<'a, S: CartStorage> CartStore<'a, S> {
    /// Open the cart, rehydrating any previously persisted lines.
    ///
    /// Corrupt or missing stored state yields an empty cart.
    pub fn open(storage: &'a mut S) -> Self {
        let lines = storage
            .load(CART_STORAGE_KEY)
            .and_then(|raw| serde_json::from_str(&raw).ok())
            .unwrap_or_default();
        Self { storage, lines }
    }

    /// Current cart lines, in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Add a line, merging into an existing line when the merge identity
    /// matches.
    pub fn add(&mut self, line: CartLine) {
        if let Some(existing) = self.lines.iter_mut().find(|l| l.merges_with(&line)) {
            existing.qty += line.qty;
        } else {
            self.lines.push(line);
        }
        self.persist();
    }

    /// Set the quantity of the line at `index`; a quantity of zero removes
    /// the line.
    pub fn set_qty(&mut self, index: usize, qty: u32) {
        if qty == 0 {
            self.remove(index);
            return;
        }
        if let Some(line) = self.lines.get_mut(index) {
            line.qty = qty;
            self.persist();
        }
    }

    /// Remove the line at `index`. Out-of-range indexes are ignored.
    pub fn remove(&mut self, index: usize) {
        if index < self.lines.len() {
            self.lines.remove(index);
            self.persist();
        }
    }

    /// Empty the cart (after a successful checkout).
    pub fn clear(&mut self) {
        self.lines.clear();
        self.persist();
    }

    /// Total of `price * qty` across all lines; what checkout submits as
    /// the order's `totalAmount`.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.lines
            .iter()
            .map(|l| l.price * Decimal::from(l.qty))
            .sum()
    }

    /// Total item count (sum of quantities), for the cart badge.
    #[must_use]
    pub fn count(&self) -> u32 {
        self.lines.iter().map(|l| l.qty).sum()
    }

    fn persist(&mut self) {
        if let Ok(raw) = serde_json::to_string(&self.lines) {
            self.storage.store(CART_STORAGE_KEY, &raw);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn truffle_line() -> CartLine {
        CartLine {
            product_id: ProductId::new(1),
            title: "Chocolate Truffle".to_owned(),
            image_url: "https://assets.example/truffle.jpg".to_owned(),
            weight: Decimal::new(5, 1),
            price: Decimal::from(500),
            qty: 1,
            custom_message: None,
            customization: None,
        }
    }

    #[test]
    fn adding_the_same_selection_twice_merges_into_one_line() {
        let mut storage = MemoryStorage::default();
        let mut cart = CartStore::open(&mut storage);
        cart.add(truffle_line());
        cart.add(truffle_line());

        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines()[0].qty, 2);
    }

    #[test]
    fn changing_any_identity_field_creates_a_distinct_line() {
        let base = truffle_line();

        let mut other_weight = base.clone();
        other_weight.weight = Decimal::from(1);

        let mut other_message = base.clone();
        other_message.custom_message = Some("Happy Birthday".to_owned());

        let mut other_customization = base.clone();
        other_customization.customization = Some("eggless".to_owned());

        let mut other_product = base.clone();
        other_product.product_id = ProductId::new(2);

        for variant in [
            other_weight,
            other_message,
            other_customization,
            other_product,
        ] {
            let mut storage = MemoryStorage::default();
            let mut cart = CartStore::open(&mut storage);
            cart.add(base.clone());
            cart.add(variant);
            assert_eq!(cart.lines().len(), 2);
        }
    }

    #[test]
    fn cart_persists_across_reopen() {
        let mut storage = MemoryStorage::default();
        {
            let mut cart = CartStore::open(&mut storage);
            cart.add(truffle_line());
            cart.add(truffle_line());
        }

        let cart = CartStore::open(&mut storage);
        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines()[0].qty, 2);
    }

    #[test]
    fn corrupt_stored_state_yields_an_empty_cart() {
        let mut storage = MemoryStorage::default();
        storage.store(CART_STORAGE_KEY, "not json at all {");

        let cart = CartStore::open(&mut storage);
        assert!(cart.lines().is_empty());
    }

    #[test]
    fn total_and_count_sum_over_lines() {
        let mut storage = MemoryStorage::default();
        let mut cart = CartStore::open(&mut storage);
        let mut line = truffle_line();
        line.qty = 2;
        cart.add(line);

        let mut heavier = truffle_line();
        heavier.weight = Decimal::from(1);
        heavier.price = Decimal::from(800);
        cart.add(heavier);

        assert_eq!(cart.total(), Decimal::from(1800));
        assert_eq!(cart.count(), 3);
    }

    #[test]
    fn set_qty_zero_removes_the_line() {
        let mut storage = MemoryStorage::default();
        let mut cart = CartStore::open(&mut storage);
        cart.add(truffle_line());
        cart.set_qty(0, 0);
        assert!(cart.lines().is_empty());
    }

    #[test]
    fn clear_empties_and_persists() {
        let mut storage = MemoryStorage::default();
        let mut cart = CartStore::open(&mut storage);
        cart.add(truffle_line());
        cart.clear();
        assert!(cart.lines().is_empty());
        assert_eq!(cart.total(), Decimal::ZERO);
    }
}
