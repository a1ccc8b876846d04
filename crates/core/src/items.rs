//! Items

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::prices::Price;

/// Identifier of a product line in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    /// Create a new item id.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ItemId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Snapshot of a catalogue product at the moment it's added to a cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartProduct {
    /// Product id, shared by every line for the same product.
    pub id: ItemId,

    /// Display name.
    pub name: String,

    /// Seller display name.
    pub seller_name: String,

    /// Current unit price.
    pub unit_price: Price,

    /// Price before any markdown, if the product is on sale.
    pub original_price: Option<Price>,

    /// Image reference (URL or asset key).
    pub image_ref: String,

    /// Whether the seller currently has stock.
    pub in_stock: bool,

    /// Units available.
    pub stock_count: u32,
}

/// A single product line in the cart with its own quantity and price snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    /// Product id.
    pub id: ItemId,

    /// Display name.
    pub name: String,

    /// Seller display name.
    pub seller_name: String,

    /// Unit price in minor units.
    pub unit_price: Price,

    /// Pre-markdown unit price in minor units.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_price: Option<Price>,

    /// Quantity, always at least one.
    pub quantity: u32,

    /// Image reference.
    #[serde(default)]
    pub image_ref: String,

    /// Stock flag at the time of the last snapshot.
    pub in_stock: bool,

    /// Units available at the time of the last snapshot.
    pub stock_count: u32,
}

impl CartItem {
    /// Create a line for `product` with the given (already coerced) quantity.
    pub fn new(product: CartProduct, quantity: u32) -> Self {
        Self {
            id: product.id,
            name: product.name,
            seller_name: product.seller_name,
            unit_price: product.unit_price,
            original_price: product.original_price,
            quantity: quantity.max(1),
            image_ref: product.image_ref,
            in_stock: product.in_stock,
            stock_count: product.stock_count,
        }
    }

    /// Overwrite the price and stock snapshot from a fresher product view.
    pub fn refresh_snapshot(&mut self, product: &CartProduct) {
        self.name.clone_from(&product.name);
        self.seller_name.clone_from(&product.seller_name);
        self.unit_price = product.unit_price;
        self.original_price = product.original_price;
        self.image_ref.clone_from(&product.image_ref);
        self.in_stock = product.in_stock;
        self.stock_count = product.stock_count;
    }

    /// `unit_price * quantity`, or `None` on overflow.
    pub fn line_total(&self) -> Option<u64> {
        self.unit_price.checked_mul(u64::from(self.quantity))
    }

    /// Per-line savings against the original price, when it's higher.
    pub fn savings(&self) -> Option<u64> {
        let original = self.original_price?;

        original
            .checked_sub(*self.unit_price)
            .filter(|saved| *saved > 0)
            .and_then(|saved| saved.checked_mul(u64::from(self.quantity)))
    }

    /// True when the line asks for more units than the seller has.
    pub fn exceeds_stock(&self) -> bool {
        self.in_stock && self.quantity > self.stock_count
    }
}

/// Coerce a raw quantity into a positive integer; anything below one becomes one.
pub fn coerce_quantity(raw: i64) -> u32 {
    if raw < 1 {
        1
    } else {
        u32::try_from(raw).unwrap_or(u32::MAX)
    }
}

/// Leniently parse form input into a raw quantity. Unparseable input yields one.
pub fn parse_quantity(input: &str) -> i64 {
    input.trim().parse().unwrap_or(1)
}
