//! Persistent cart.

use std::sync::Arc;

use rusty_money::iso::Currency;
use tracing::{debug, warn};
use voltcart::{
    cart::Cart,
    items::{CartItem, CartProduct, ItemId},
    orders::Order,
    prices::Price,
};

use crate::{domain::carts::errors::CartStoreError, storage::KeyValueStore};

/// Storage key holding the serialized cart.
pub const CART_STORAGE_KEY: &str = "voltcart.cart";

/// A [`Cart`] mirrored to durable storage after every change.
pub struct CartStore {
    cart: Cart,
    currency: &'static Currency,
    storage: Arc<dyn KeyValueStore>,
}

impl std::fmt::Debug for CartStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartStore")
            .field("cart", &self.cart)
            .field("currency", &self.currency.iso_alpha_code)
            .finish_non_exhaustive()
    }
}

impl CartStore {
    /// Load the stored cart. Missing or unreadable data starts an empty cart.
    #[must_use]
    pub fn load(storage: Arc<dyn KeyValueStore>, currency: &'static Currency) -> Self {
        let cart = match storage.get(CART_STORAGE_KEY) {
            Ok(Some(raw)) => serde_json::from_str::<Vec<CartItem>>(&raw)
                .map(Cart::from_items)
                .unwrap_or_else(|error| {
                    warn!(%error, "stored cart is corrupt, starting empty");
                    Cart::new()
                }),
            Ok(None) => Cart::new(),
            Err(error) => {
                warn!(%error, "failed to read stored cart, starting empty");
                Cart::new()
            }
        };

        debug!(lines = cart.len(), "cart loaded");

        Self {
            cart,
            currency,
            storage,
        }
    }

    #[must_use]
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    #[must_use]
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// Add `product`, merging with an existing line for the same id.
    ///
    /// # Errors
    ///
    /// Returns an error if the updated cart can't be written.
    pub fn add_item(&mut self, product: CartProduct, quantity: i64) -> Result<(), CartStoreError> {
        self.cart.add_item(product, quantity);
        self.persist()
    }

    /// Set a line's quantity; values below one become one.
    ///
    /// # Errors
    ///
    /// Returns an error if the updated cart can't be written.
    pub fn update_quantity(&mut self, id: &ItemId, quantity: i64) -> Result<(), CartStoreError> {
        self.cart.update_quantity(id, quantity);
        self.persist()
    }

    /// Set a line's quantity from checkout, removing it at zero and clamping to stock.
    ///
    /// # Errors
    ///
    /// Returns an error if the updated cart can't be written.
    pub fn set_quantity_clamped(
        &mut self,
        id: &ItemId,
        quantity: i64,
    ) -> Result<(), CartStoreError> {
        self.cart.set_quantity_clamped(id, quantity);
        self.persist()
    }

    /// # Errors
    ///
    /// Returns an error if the updated cart can't be written.
    pub fn remove_item(&mut self, id: &ItemId) -> Result<(), CartStoreError> {
        self.cart.remove_item(id);
        self.persist()
    }

    /// # Errors
    ///
    /// Returns an error if the updated cart can't be written.
    pub fn clear(&mut self) -> Result<(), CartStoreError> {
        self.cart.clear();
        self.persist()
    }

    /// Put a past order's product back in the cart. The order itself is untouched.
    ///
    /// # Errors
    ///
    /// Returns [`CartStoreError::NotReorderable`] unless the order names one product and its
    /// unit price, or an error if that price doesn't fit the currency or the cart can't be
    /// written.
    pub fn reorder(&mut self, order: &Order) -> Result<(), CartStoreError> {
        let (Some(id), Some(unit)) = (&order.product_id, order.unit_price) else {
            return Err(CartStoreError::NotReorderable(order.id.clone()));
        };

        let quantity = order.quantity.max(1);
        let unit_price = Price::from_major(unit, self.currency)
            .map_err(|error| CartStoreError::Reorder(order.id.clone(), error))?;

        let product = CartProduct {
            id: ItemId::new(id.clone()),
            name: order.product_name.clone(),
            seller_name: String::new(),
            unit_price,
            original_price: None,
            image_ref: order.product_image.clone().unwrap_or_default(),
            in_stock: true,
            stock_count: quantity,
        };

        self.add_item(product, i64::from(quantity))
    }

    fn persist(&self) -> Result<(), CartStoreError> {
        let encoded = serde_json::to_string(self.cart.items())?;

        self.storage.set(CART_STORAGE_KEY, &encoded)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use rusty_money::iso;
    use testresult::TestResult;
    use voltcart::{
        checkout::CheckoutFlow,
        orders::{NewOrder, OrderId, OrderStatus},
        payments::PaymentMethod,
        pricing::PricingRules,
        users::UserId,
    };

    use crate::{
        storage::{FileStore, MemoryStore, MockKeyValueStore, StorageError},
        test::{order_fixture, product},
    };

    use super::*;

    #[test]
    fn mutations_survive_a_reload() -> TestResult {
        let dir = tempfile::tempdir()?;
        let storage: Arc<dyn KeyValueStore> = Arc::new(FileStore::open(dir.path())?);

        let mut store = CartStore::load(Arc::clone(&storage), iso::USD);

        store.add_item(product("panel", 120_00), 2)?;
        store.add_item(product("battery", 55_00), 1)?;
        store.remove_item(&ItemId::from("battery"))?;

        let reloaded = CartStore::load(storage, iso::USD);

        assert_eq!(reloaded.cart().len(), 1);
        assert_eq!(reloaded.cart().item_count(), 2);

        Ok(())
    }

    #[test]
    fn corrupt_data_loads_empty_cart() -> TestResult {
        let storage = Arc::new(MemoryStore::new());

        storage.set(CART_STORAGE_KEY, "{not json")?;

        let store = CartStore::load(storage, iso::USD);

        assert!(store.cart().is_empty());

        Ok(())
    }

    #[test]
    fn clamped_update_to_zero_removes_and_persists() -> TestResult {
        let storage = Arc::new(MemoryStore::new());
        let mut store = CartStore::load(Arc::clone(&storage) as Arc<dyn KeyValueStore>, iso::USD);

        store.add_item(product("panel", 120_00), 1)?;
        store.set_quantity_clamped(&ItemId::from("panel"), 0)?;

        assert_eq!(storage.get(CART_STORAGE_KEY)?.as_deref(), Some("[]"));

        Ok(())
    }

    #[test]
    fn write_failures_surface_as_errors() {
        let mut storage = MockKeyValueStore::new();

        storage.expect_get().returning(|_| Ok(None));
        storage
            .expect_set()
            .returning(|_, _| Err(StorageError::Poisoned));

        let mut store = CartStore::load(Arc::new(storage), iso::USD);

        assert!(matches!(
            store.add_item(product("panel", 120_00), 1),
            Err(CartStoreError::Storage(StorageError::Poisoned))
        ));
    }

    #[test]
    fn reorder_adds_unit_priced_line_from_order() -> TestResult {
        let mut store = CartStore::load(Arc::new(MemoryStore::new()), iso::USD);
        let mut order = order_fixture("o-1", OrderStatus::Delivered);

        order.quantity = 2;
        order.price = Decimal::new(259_20, 2);
        order.unit_price = Some(Decimal::new(120_00, 2));

        store.reorder(&order)?;

        let line = store
            .cart()
            .get(&ItemId::from("panel-400w"))
            .ok_or("reordered line missing")?;

        assert_eq!(*line.unit_price, 120_00);
        assert_eq!(line.quantity, 2);
        assert_eq!(order.status, OrderStatus::Delivered);

        Ok(())
    }

    #[test]
    fn reorder_of_multi_product_order_is_refused() {
        let mut store = CartStore::load(Arc::new(MemoryStore::new()), iso::USD);
        let mut order = order_fixture("o-9", OrderStatus::Delivered);

        order.product_id = None;
        order.unit_price = None;

        assert!(matches!(
            store.reorder(&order),
            Err(CartStoreError::NotReorderable(id)) if id == OrderId::from("o-9")
        ));
        assert!(store.cart().is_empty());
    }

    #[test]
    fn reorder_of_checkout_order_restores_pre_tax_line() -> TestResult {
        let mut cart = Cart::new();
        cart.add_item(product("panel-400w", 125_00), 2);

        let totals = CheckoutFlow::new().totals(&cart, iso::USD, &PricingRules::default())?;
        let new_order =
            NewOrder::for_checkout(&cart, &totals, PaymentMethod::Mpesa, UserId::from("b"));

        let mut body = serde_json::to_value(&new_order)?;
        body["_id"] = "o-3".into();
        body["status"] = "Delivered".into();
        let order: Order = serde_json::from_value(body)?;

        let mut store = CartStore::load(Arc::new(MemoryStore::new()), iso::USD);

        store.reorder(&order)?;

        let line = store
            .cart()
            .get(&ItemId::from("panel-400w"))
            .ok_or("reordered line missing")?;

        assert_eq!(line.unit_price, Price::new(125_00));
        assert_eq!(line.quantity, 2);
        assert_eq!(store.cart().len(), 1);

        Ok(())
    }
}
