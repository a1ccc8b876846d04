//! A buyer's checkout session.

use std::sync::Arc;

use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};
use voltcart::{
    cart::{Cart, CartError},
    checkout::{
        AddressRecord, CheckoutError, CheckoutFlow, CheckoutStep, EntryMode, OrderConfirmation,
    },
    discounts::DiscountError,
    items::{CartProduct, ItemId},
    orders::{NewOrder, Order},
    payments::PaymentSelection,
    pricing::{DeliveryOption, OrderTotals, PricingError, PricingRules},
    promotions::{PromoApplication, PromoCatalogue},
    users::UserId,
};

use crate::domain::{
    carts::{CartStore, CartStoreError},
    orders::OrdersApi,
    payments::{
        PaymentDelays, PaymentDispatcher, PaymentError, PaymentOutcome, PaymentRequest, pause,
    },
};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Checkout(#[from] CheckoutError),

    #[error(transparent)]
    Payment(#[from] PaymentError),

    #[error(transparent)]
    CartStore(#[from] CartStoreError),

    #[error(transparent)]
    Cart(#[from] CartError),

    #[error(transparent)]
    Pricing(#[from] PricingError),

    #[error(transparent)]
    Discount(#[from] DiscountError),
}

/// Rules and timings shared by every session.
#[derive(Debug, Clone, Default)]
pub struct CheckoutSettings {
    pub pricing: PricingRules,
    pub promos: PromoCatalogue,
    pub delays: PaymentDelays,
}

/// Checkout state for one buyer. Dropping the session cancels any pending payment or delay.
#[derive(Debug)]
pub struct CheckoutSession {
    store: CartStore,
    direct: Option<Cart>,
    flow: CheckoutFlow,
    buyer: UserId,
    settings: CheckoutSettings,
    dispatcher: Arc<PaymentDispatcher>,
    lifecycle: CancellationToken,
}

fn active_cart<'a>(direct: Option<&'a Cart>, store: &'a CartStore) -> &'a Cart {
    direct.unwrap_or_else(|| store.cart())
}

impl CheckoutSession {
    /// Check out the stored cart.
    #[must_use]
    pub fn new(
        store: CartStore,
        buyer: UserId,
        api: Arc<dyn OrdersApi>,
        settings: CheckoutSettings,
    ) -> Self {
        Self::start(store, None, CheckoutFlow::new(), buyer, api, settings)
    }

    /// "Buy now": check out a single product without touching the stored cart.
    #[must_use]
    pub fn direct_purchase(
        store: CartStore,
        product: CartProduct,
        quantity: i64,
        buyer: UserId,
        api: Arc<dyn OrdersApi>,
        settings: CheckoutSettings,
    ) -> Self {
        let mut cart = Cart::new();

        cart.add_item(product, quantity);

        Self::start(
            store,
            Some(cart),
            CheckoutFlow::direct_purchase(),
            buyer,
            api,
            settings,
        )
    }

    fn start(
        store: CartStore,
        direct: Option<Cart>,
        flow: CheckoutFlow,
        buyer: UserId,
        api: Arc<dyn OrdersApi>,
        settings: CheckoutSettings,
    ) -> Self {
        let lifecycle = CancellationToken::new();
        let dispatcher = Arc::new(PaymentDispatcher::new(
            api,
            settings.delays,
            lifecycle.child_token(),
        ));

        Self {
            store,
            direct,
            flow,
            buyer,
            settings,
            dispatcher,
            lifecycle,
        }
    }

    /// Items being checked out.
    #[must_use]
    pub fn cart(&self) -> &Cart {
        active_cart(self.direct.as_ref(), &self.store)
    }

    #[must_use]
    pub fn flow(&self) -> &CheckoutFlow {
        &self.flow
    }

    #[must_use]
    pub fn step(&self) -> CheckoutStep {
        self.flow.step()
    }

    #[must_use]
    pub fn store(&self) -> &CartStore {
        &self.store
    }

    #[must_use]
    pub fn dispatcher(&self) -> &Arc<PaymentDispatcher> {
        &self.dispatcher
    }

    /// Token cancelled when this session is dropped.
    #[must_use]
    pub fn lifecycle(&self) -> &CancellationToken {
        &self.lifecycle
    }

    /// Current totals, using the delivery option once one is chosen.
    ///
    /// # Errors
    ///
    /// Returns a [`PricingError`] if totals can't be calculated.
    pub fn totals(&self) -> Result<OrderTotals, PricingError> {
        self.flow
            .totals(self.cart(), self.store.currency(), &self.settings.pricing)
    }

    /// Evaluate a promo code, replacing any earlier one. A blank code clears the promo.
    ///
    /// # Errors
    ///
    /// Returns an error if the subtotal or discount can't be computed.
    pub fn apply_promo(&mut self, code: &str) -> Result<Option<&PromoApplication>, SessionError> {
        if code.trim().is_empty() {
            self.flow.set_promo(None);
            return Ok(None);
        }

        let subtotal = self.cart().subtotal(self.store.currency())?;
        let application = self.settings.promos.apply(code, &subtotal)?;

        debug!(
            code = %application.code,
            applied = application.is_applied(),
            "promo evaluated"
        );

        self.flow.set_promo(Some(application));

        Ok(self.flow.promo())
    }

    /// Set a line's quantity from checkout; zero removes the line.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored cart can't be written.
    pub fn set_quantity(&mut self, id: &ItemId, quantity: i64) -> Result<(), SessionError> {
        match self.direct.as_mut() {
            Some(cart) => cart.set_quantity_clamped(id, quantity),
            None => self.store.set_quantity_clamped(id, quantity)?,
        }

        Ok(())
    }

    pub fn select_address(&mut self, address: AddressRecord) {
        self.flow.select_address(address);
    }

    pub fn select_delivery(&mut self, option: DeliveryOption) {
        self.flow.select_delivery(option);
    }

    pub fn select_payment(&mut self, selection: PaymentSelection) {
        self.flow.select_payment(selection);
    }

    /// # Errors
    ///
    /// Returns a [`CheckoutError`] if the current step is incomplete.
    pub fn next(&mut self) -> Result<CheckoutStep, SessionError> {
        let cart = active_cart(self.direct.as_ref(), &self.store);

        Ok(self.flow.next(cart)?)
    }

    /// # Errors
    ///
    /// Returns a [`CheckoutError`] on the first step.
    pub fn previous(&mut self) -> Result<CheckoutStep, SessionError> {
        Ok(self.flow.previous()?)
    }

    /// # Errors
    ///
    /// Returns a [`CheckoutError`] for steps not yet reached.
    pub fn go_to(&mut self, step: CheckoutStep) -> Result<CheckoutStep, SessionError> {
        Ok(self.flow.go_to(step)?)
    }

    /// Confirm the selected payment. On success the order is recorded at once and checkout
    /// moves to review after the success display pause. If that pause is interrupted, calling
    /// this again moves to review without a second payment.
    ///
    /// # Errors
    ///
    /// Returns an error if the payment step is incomplete, another confirmation is running,
    /// or the session is torn down. Declined payments are an `Ok` outcome.
    pub async fn confirm_payment(&mut self) -> Result<PaymentOutcome, SessionError> {
        if self.flow.step() != CheckoutStep::Payment {
            return Err(CheckoutError::WrongStep(self.flow.step()).into());
        }

        self.flow
            .check_gate(self.cart())
            .map_err(|failure| CheckoutError::Gate {
                step: CheckoutStep::Payment,
                failure,
            })?;

        // An earlier confirmation was interrupted after the order was created.
        if let Some(order) = self.flow.order().cloned() {
            self.flow.record_payment(order.clone())?;
            return Ok(PaymentOutcome::Succeeded(order));
        }

        let Some(selection) = self.flow.payment().cloned() else {
            return Err(CheckoutError::PaymentPending.into());
        };

        let totals = self.totals()?;
        let order = NewOrder::for_checkout(
            self.cart(),
            &totals,
            selection.method(),
            self.buyer.clone(),
        );

        let outcome = self
            .dispatcher
            .confirm(PaymentRequest { selection, order })
            .await?;

        if let PaymentOutcome::Succeeded(order) = &outcome {
            self.flow.attach_order(order.clone())?;

            pause(&self.lifecycle, self.settings.delays.success_display).await?;

            self.flow.record_payment(order.clone())?;
        }

        Ok(outcome)
    }

    /// Place the order from review and return the confirmation.
    ///
    /// The stored cart is emptied unless this was a direct purchase.
    ///
    /// # Errors
    ///
    /// Returns an error off the review step, without a confirmed payment, or if the stored
    /// cart can't be cleared.
    pub async fn place_order(&mut self) -> Result<OrderConfirmation, SessionError> {
        if self.flow.step() != CheckoutStep::Review {
            return Err(CheckoutError::WrongStep(self.flow.step()).into());
        }

        pause(&self.lifecycle, self.settings.delays.place_order).await?;

        let cart = active_cart(self.direct.as_ref(), &self.store);
        let confirmation =
            self.flow
                .place_order(cart, self.store.currency(), &self.settings.pricing)?;

        if self.flow.entry() == EntryMode::Cart {
            self.store.clear()?;
        }

        info!(
            order_id = %confirmation.order.id,
            total = %confirmation.totals.total,
            "order placed"
        );

        Ok(confirmation)
    }

    /// Order created by the confirmed payment, if any.
    #[must_use]
    pub fn order(&self) -> Option<&Order> {
        self.flow.order()
    }
}

impl Drop for CheckoutSession {
    fn drop(&mut self) {
        self.lifecycle.cancel();
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use rusty_money::iso;
    use testresult::TestResult;
    use voltcart::{
        orders::OrderStatus,
        payments::{MobileMoneyDetails, PaymentFailure, PaymentMethod},
    };

    use crate::{
        domain::orders::MockOrdersApi,
        storage::{KeyValueStore, MemoryStore},
        test::{order_fixture, product},
    };

    use super::*;

    fn address() -> AddressRecord {
        AddressRecord {
            full_name: "Amina Odhiambo".to_string(),
            street: "12 Ngong Road".to_string(),
            city: "Nairobi".to_string(),
            state: "Nairobi".to_string(),
            zip_code: "00100".to_string(),
            phone: "0712345678".to_string(),
            is_default: true,
        }
    }

    fn mpesa(pin: &str) -> PaymentSelection {
        PaymentSelection::mobile_money(
            PaymentMethod::Mpesa,
            MobileMoneyDetails {
                mobile_number: "+254700000000".to_string(),
                pin: pin.to_string(),
            },
        )
    }

    fn creating_api() -> MockOrdersApi {
        let mut api = MockOrdersApi::new();

        api.expect_create_order()
            .times(1)
            .returning(|_| Ok(order_fixture("o-1", OrderStatus::Pending)));

        api
    }

    fn stored_cart(storage: &Arc<MemoryStore>) -> Result<CartStore, CartStoreError> {
        let storage: Arc<dyn KeyValueStore> = Arc::clone(storage) as Arc<dyn KeyValueStore>;
        let mut store = CartStore::load(storage, iso::USD);

        store.add_item(product("panel", 120_00), 2)?;
        store.add_item(product("battery", 30_00), 1)?;

        Ok(store)
    }

    fn advance_to_payment(session: &mut CheckoutSession) -> Result<(), SessionError> {
        if session.step() == CheckoutStep::Cart {
            session.next()?;
        }

        session.select_address(address());
        session.select_delivery(DeliveryOption::Standard);
        session.next()?;

        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn full_checkout_clears_stored_cart() -> TestResult {
        let storage = Arc::new(MemoryStore::new());
        let mut session = CheckoutSession::new(
            stored_cart(&storage)?,
            UserId::from("buyer-1"),
            Arc::new(creating_api()),
            CheckoutSettings::default(),
        );

        advance_to_payment(&mut session)?;
        session.select_payment(mpesa("1234"));

        let outcome = session.confirm_payment().await?;

        assert!(matches!(outcome, PaymentOutcome::Succeeded(_)));
        assert_eq!(session.step(), CheckoutStep::Review);

        let confirmation = session.place_order().await?;

        assert_eq!(confirmation.items.len(), 2);
        assert_eq!(confirmation.payment_method, PaymentMethod::Mpesa);
        assert!(session.cart().is_empty());
        assert_eq!(storage.get("voltcart.cart")?.as_deref(), Some("[]"));

        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn interrupted_success_pause_keeps_the_created_order() -> TestResult {
        let storage = Arc::new(MemoryStore::new());
        let mut session = CheckoutSession::new(
            stored_cart(&storage)?,
            UserId::from("buyer-1"),
            Arc::new(creating_api()),
            CheckoutSettings::default(),
        );

        advance_to_payment(&mut session)?;
        session.select_payment(mpesa("1234"));

        let interrupted =
            tokio::time::timeout(Duration::from_millis(2_500), session.confirm_payment()).await;

        assert!(interrupted.is_err());
        assert!(session.order().is_some());
        assert_eq!(session.step(), CheckoutStep::Payment);

        let outcome = session.confirm_payment().await?;

        assert!(matches!(outcome, PaymentOutcome::Succeeded(_)));
        assert_eq!(session.step(), CheckoutStep::Review);

        let confirmation = session.place_order().await?;

        assert_eq!(confirmation.order.id.as_str(), "o-1");

        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn declined_payment_stays_on_payment_step() -> TestResult {
        let storage = Arc::new(MemoryStore::new());
        let mut api = MockOrdersApi::new();

        api.expect_create_order().never();

        let mut session = CheckoutSession::new(
            stored_cart(&storage)?,
            UserId::from("buyer-1"),
            Arc::new(api),
            CheckoutSettings::default(),
        );

        advance_to_payment(&mut session)?;
        session.select_payment(mpesa("12"));

        let outcome = session.confirm_payment().await?;

        assert_eq!(outcome, PaymentOutcome::Failed(PaymentFailure::PinTooShort));
        assert_eq!(session.step(), CheckoutStep::Payment);
        assert!(session.order().is_none());

        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn direct_purchase_leaves_stored_cart_alone() -> TestResult {
        let storage = Arc::new(MemoryStore::new());
        let mut session = CheckoutSession::direct_purchase(
            stored_cart(&storage)?,
            product("inverter", 899_00),
            1,
            UserId::from("buyer-1"),
            Arc::new(creating_api()),
            CheckoutSettings::default(),
        );

        assert_eq!(session.step(), CheckoutStep::Shipping);

        advance_to_payment(&mut session)?;
        session.select_payment(mpesa("1234"));
        session.confirm_payment().await?;

        let confirmation = session.place_order().await?;

        assert_eq!(confirmation.items.len(), 1);
        assert_eq!(session.store().cart().len(), 2);

        Ok(())
    }

    #[test]
    fn promo_codes_replace_and_clear() -> TestResult {
        let storage = Arc::new(MemoryStore::new());
        let mut session = CheckoutSession::new(
            stored_cart(&storage)?,
            UserId::from("buyer-1"),
            Arc::new(MockOrdersApi::new()),
            CheckoutSettings::default(),
        );

        let applied = session.apply_promo(" save10 ")?.map(PromoApplication::is_applied);

        assert_eq!(applied, Some(true));
        assert_eq!(session.totals()?.discount.to_minor_units(), 27_00);

        let applied = session.apply_promo("BOGUS")?.map(PromoApplication::is_applied);

        assert_eq!(applied, Some(false));
        assert_eq!(session.totals()?.discount.to_minor_units(), 0);

        assert!(session.apply_promo("  ")?.is_none());

        Ok(())
    }

    #[test]
    fn dropping_the_session_cancels_pending_work() -> TestResult {
        let storage = Arc::new(MemoryStore::new());
        let session = CheckoutSession::new(
            stored_cart(&storage)?,
            UserId::from("buyer-1"),
            Arc::new(MockOrdersApi::new()),
            CheckoutSettings::default(),
        );

        let dispatcher = Arc::clone(session.dispatcher());

        drop(session);

        assert!(dispatcher.token().is_cancelled());

        Ok(())
    }

    #[test]
    fn zero_quantity_in_checkout_removes_line() -> TestResult {
        let storage = Arc::new(MemoryStore::new());
        let mut session = CheckoutSession::new(
            stored_cart(&storage)?,
            UserId::from("buyer-1"),
            Arc::new(MockOrdersApi::new()),
            CheckoutSettings::default(),
        );

        session.set_quantity(&ItemId::from("battery"), 0)?;

        assert_eq!(session.cart().len(), 1);

        Ok(())
    }
}
