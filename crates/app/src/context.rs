//! App Context

use std::sync::Arc;

use rusty_money::iso::Currency;
use thiserror::Error;
use voltcart::users::UserId;

use crate::{
    config::{AppConfig, ConfigError},
    domain::{
        carts::CartStore,
        checkout::{CheckoutSession, CheckoutSettings},
        orders::{HttpOrdersApi, OrderBoard, OrdersApi, OrdersApiError},
    },
    storage::{FileStore, KeyValueStore, StorageError},
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to open cart storage")]
    Storage(#[from] StorageError),

    #[error("failed to build order service client")]
    OrdersApi(#[from] OrdersApiError),
}

#[derive(Clone)]
pub struct AppContext {
    pub orders: Arc<dyn OrdersApi>,
    pub storage: Arc<dyn KeyValueStore>,
    pub currency: &'static Currency,
    pub checkout: CheckoutSettings,
}

impl AppContext {
    /// Build application context from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error when the currency is unknown, the data directory can't be created, or
    /// the API URL is invalid.
    pub fn from_config(config: &AppConfig) -> Result<Self, AppInitError> {
        let currency = config.store.currency()?;
        let storage = FileStore::open(&config.store.data_dir)?;
        let orders = HttpOrdersApi::new(config.api.base_url(), config.api.timeout())?;

        Ok(Self {
            orders: Arc::new(orders),
            storage: Arc::new(storage),
            currency,
            checkout: CheckoutSettings {
                delays: config.payments.delays(),
                ..CheckoutSettings::default()
            },
        })
    }

    /// Load the persisted cart.
    #[must_use]
    pub fn cart_store(&self) -> CartStore {
        CartStore::load(Arc::clone(&self.storage), self.currency)
    }

    /// Order board for a buyer, or for the seller when `buyer` is `None`.
    #[must_use]
    pub fn order_board(&self, buyer: Option<UserId>) -> OrderBoard {
        match buyer {
            Some(buyer) => OrderBoard::for_buyer(Arc::clone(&self.orders), buyer),
            None => OrderBoard::for_seller(Arc::clone(&self.orders)),
        }
    }

    /// Start a checkout of the stored cart.
    #[must_use]
    pub fn checkout(&self, buyer: UserId) -> CheckoutSession {
        CheckoutSession::new(
            self.cart_store(),
            buyer,
            Arc::clone(&self.orders),
            self.checkout.clone(),
        )
    }
}
