//! Cart

use rusty_money::{Money, iso::Currency};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::items::{CartItem, CartProduct, ItemId, coerce_quantity};

/// Errors related to cart totals.
#[derive(Debug, Error, PartialEq)]
pub enum CartError {
    /// A line total or the subtotal doesn't fit in minor units.
    #[error("cart total overflowed at item {0}")]
    Overflow(ItemId),

    /// The subtotal is valid minor units but too large for money arithmetic.
    #[error("cart subtotal {0} is too large")]
    TooLarge(u64),
}

/// Ordered list of cart lines, one per product id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a cart from previously stored lines.
    pub fn from_items(items: impl Into<Vec<CartItem>>) -> Self {
        Self {
            items: items.into(),
        }
    }

    /// Cart lines in insertion order.
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Look up a line by product id.
    pub fn get(&self, id: &ItemId) -> Option<&CartItem> {
        self.items.iter().find(|item| &item.id == id)
    }

    /// Add `quantity` units of `product`.
    ///
    /// An existing line for the same product is incremented and gets the fresh price and stock
    /// snapshot; otherwise a new line is appended.
    pub fn add_item(&mut self, product: CartProduct, quantity: i64) {
        let quantity = coerce_quantity(quantity);

        if let Some(existing) = self.items.iter_mut().find(|item| item.id == product.id) {
            existing.quantity = existing.quantity.saturating_add(quantity);
            existing.refresh_snapshot(&product);
        } else {
            self.items.push(CartItem::new(product, quantity));
        }
    }

    /// Set the quantity of a line, coerced to at least one. Stock isn't consulted.
    pub fn update_quantity(&mut self, id: &ItemId, quantity: i64) {
        let quantity = coerce_quantity(quantity);

        if let Some(item) = self.items.iter_mut().find(|item| &item.id == id) {
            item.quantity = quantity;
        }
    }

    /// Checkout variant of [`Cart::update_quantity`].
    ///
    /// Zero or less removes the line; otherwise the quantity is clamped to the stock count for
    /// in-stock lines.
    pub fn set_quantity_clamped(&mut self, id: &ItemId, quantity: i64) {
        if quantity <= 0 {
            self.remove_item(id);
            return;
        }

        let quantity = coerce_quantity(quantity);

        if let Some(item) = self.items.iter_mut().find(|item| &item.id == id) {
            item.quantity = if item.in_stock {
                quantity.min(item.stock_count).max(1)
            } else {
                quantity
            };
        }
    }

    /// Remove a line. Unknown ids are ignored.
    pub fn remove_item(&mut self, id: &ItemId) {
        self.items.retain(|item| &item.id != id);
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Number of distinct lines.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total number of units across all lines.
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }

    /// `Σ(unit_price × quantity)` in minor units.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Overflow`] if any line or the running sum overflows.
    pub fn subtotal_minor(&self) -> Result<u64, CartError> {
        self.items.iter().try_fold(0_u64, |acc, item| {
            item.line_total()
                .and_then(|line| acc.checked_add(line))
                .ok_or_else(|| CartError::Overflow(item.id.clone()))
        })
    }

    /// Calculate the subtotal of the cart.
    ///
    /// # Errors
    ///
    /// Returns a [`CartError`] if the subtotal can't be represented.
    pub fn subtotal(
        &self,
        currency: &'static Currency,
    ) -> Result<Money<'static, Currency>, CartError> {
        let minor = self.subtotal_minor()?;

        let minor = i64::try_from(minor).map_err(|_err| CartError::TooLarge(minor))?;

        Ok(Money::from_minor(minor, currency))
    }

    /// Consume the cart, returning its lines.
    pub fn into_items(self) -> Vec<CartItem> {
        self.items
    }
}
