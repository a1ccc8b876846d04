//! Checkout
//!
//! A strictly linear step machine: cart → shipping → payment → review. Moving forward is gated
//! on the current step being complete; moving back is always allowed. Orders are created when a
//! payment is confirmed, and placing the order on the review step produces the confirmation
//! snapshot.

use std::fmt;

use rusty_money::iso::Currency;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    cart::Cart,
    items::CartItem,
    orders::Order,
    payments::{PaymentFailure, PaymentMethod, PaymentSelection},
    pricing::{DeliveryOption, OrderTotals, PricingError, PricingRules, calculate_totals},
    promotions::PromoApplication,
};

/// A checkout stage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CheckoutStep {
    /// Review cart contents.
    #[default]
    Cart,

    /// Choose address and delivery option.
    Shipping,

    /// Choose and fill in a payment method.
    Payment,

    /// Final review before placing the order.
    Review,
}

impl CheckoutStep {
    /// Every step, in order.
    pub const ALL: [Self; 4] = [Self::Cart, Self::Shipping, Self::Payment, Self::Review];

    /// Zero-based position.
    pub fn index(self) -> usize {
        match self {
            Self::Cart => 0,
            Self::Shipping => 1,
            Self::Payment => 2,
            Self::Review => 3,
        }
    }

    /// The following step, if any.
    pub fn next(self) -> Option<Self> {
        match self {
            Self::Cart => Some(Self::Shipping),
            Self::Shipping => Some(Self::Payment),
            Self::Payment => Some(Self::Review),
            Self::Review => None,
        }
    }

    /// The preceding step, if any.
    pub fn previous(self) -> Option<Self> {
        match self {
            Self::Cart => None,
            Self::Shipping => Some(Self::Cart),
            Self::Payment => Some(Self::Shipping),
            Self::Review => Some(Self::Payment),
        }
    }
}

impl fmt::Display for CheckoutStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Cart => "cart",
            Self::Shipping => "shipping",
            Self::Payment => "payment",
            Self::Review => "review",
        })
    }
}

/// Saved delivery address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressRecord {
    /// Recipient.
    pub full_name: String,

    /// Street and number.
    pub street: String,

    /// City.
    pub city: String,

    /// State or county.
    pub state: String,

    /// Postal code.
    pub zip_code: String,

    /// Contact phone.
    pub phone: String,

    /// Preselected address.
    #[serde(default)]
    pub is_default: bool,
}

/// Pick the default address from a saved set, falling back to the first one.
pub fn default_address(addresses: &[AddressRecord]) -> Option<&AddressRecord> {
    addresses
        .iter()
        .find(|address| address.is_default)
        .or_else(|| addresses.first())
}

/// Mark `index` as the only default address.
pub fn set_default_address(addresses: &mut [AddressRecord], index: usize) {
    for (position, address) in addresses.iter_mut().enumerate() {
        address.is_default = position == index;
    }
}

/// Address and delivery speed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingSelection {
    /// Chosen address.
    pub selected_address: Option<AddressRecord>,

    /// Chosen delivery speed.
    pub delivery_option: Option<DeliveryOption>,
}

/// How the buyer entered checkout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EntryMode {
    /// From the cart.
    #[default]
    Cart,

    /// "Buy now" on a product page; the cart step is skipped.
    DirectPurchase,
}

/// Why a step can't be left yet.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GateFailure {
    /// No items to check out.
    #[error("your cart is empty")]
    EmptyCart,

    /// No address chosen.
    #[error("please select a shipping address")]
    MissingAddress,

    /// No delivery speed chosen.
    #[error("please select a delivery option")]
    MissingDeliveryOption,

    /// No payment method chosen.
    #[error("please select a payment method")]
    MissingPaymentMethod,

    /// Payment method fields incomplete.
    #[error(transparent)]
    IncompletePayment(#[from] PaymentFailure),
}

/// Errors raised by the checkout step machine.
#[derive(Debug, Error, PartialEq)]
pub enum CheckoutError {
    /// The current step isn't complete.
    #[error("cannot leave the {step} step: {failure}")]
    Gate {
        /// Step being left.
        step: CheckoutStep,
        /// What's missing.
        failure: GateFailure,
    },

    /// Already on the review step.
    #[error("already on the last step")]
    AtLastStep,

    /// Already on the cart step.
    #[error("already on the first step")]
    AtFirstStep,

    /// Direct navigation can't skip ahead.
    #[error("the {0} step hasn't been reached yet")]
    StepNotReached(CheckoutStep),

    /// The action is only available on another step.
    #[error("not available on the {0} step")]
    WrongStep(CheckoutStep),

    /// Review requires a confirmed payment.
    #[error("payment hasn't been confirmed yet")]
    PaymentPending,

    /// Totals couldn't be calculated.
    #[error(transparent)]
    Pricing(#[from] PricingError),
}

/// Snapshot handed to the order confirmation view.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderConfirmation {
    /// Items bought.
    pub items: Vec<CartItem>,

    /// Totals charged.
    pub totals: OrderTotals,

    /// Where and how it ships.
    pub shipping: ShippingSelection,

    /// How it was paid.
    pub payment_method: PaymentMethod,

    /// The order created on payment.
    pub order: Order,
}

/// Checkout session state.
#[derive(Debug, Clone, Default)]
pub struct CheckoutFlow {
    step: CheckoutStep,
    entry: EntryMode,
    shipping: ShippingSelection,
    payment: Option<PaymentSelection>,
    promo: Option<PromoApplication>,
    order: Option<Order>,
}

impl CheckoutFlow {
    /// Start at the cart step.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a "buy now" checkout on the shipping step.
    pub fn direct_purchase() -> Self {
        Self {
            step: CheckoutStep::Shipping,
            entry: EntryMode::DirectPurchase,
            ..Self::default()
        }
    }

    /// Current step.
    pub fn step(&self) -> CheckoutStep {
        self.step
    }

    /// How checkout was entered.
    pub fn entry(&self) -> EntryMode {
        self.entry
    }

    /// Shipping selection.
    pub fn shipping(&self) -> &ShippingSelection {
        &self.shipping
    }

    /// Payment selection.
    pub fn payment(&self) -> Option<&PaymentSelection> {
        self.payment.as_ref()
    }

    /// Mutable payment selection for form edits.
    pub fn payment_mut(&mut self) -> Option<&mut PaymentSelection> {
        self.payment.as_mut()
    }

    /// Current promo, if one was submitted.
    pub fn promo(&self) -> Option<&PromoApplication> {
        self.promo.as_ref()
    }

    /// Order created by a confirmed payment.
    pub fn order(&self) -> Option<&Order> {
        self.order.as_ref()
    }

    /// Choose a shipping address.
    pub fn select_address(&mut self, address: AddressRecord) {
        self.shipping.selected_address = Some(address);
    }

    /// Choose a delivery option.
    pub fn select_delivery(&mut self, option: DeliveryOption) {
        self.shipping.delivery_option = Some(option);
    }

    /// Choose a payment method, replacing any previous selection.
    pub fn select_payment(&mut self, selection: PaymentSelection) {
        self.payment = Some(selection);
    }

    /// Replace the promo state. `None` clears it.
    pub fn set_promo(&mut self, promo: Option<PromoApplication>) {
        self.promo = promo;
    }

    /// Check whether the current step may be left going forward.
    ///
    /// # Errors
    ///
    /// Returns the [`GateFailure`] for the current step.
    pub fn check_gate(&self, cart: &Cart) -> Result<(), GateFailure> {
        match self.step {
            CheckoutStep::Cart => {
                if cart.is_empty() {
                    return Err(GateFailure::EmptyCart);
                }
            }
            CheckoutStep::Shipping => {
                if self.shipping.selected_address.is_none() {
                    return Err(GateFailure::MissingAddress);
                }

                if self.shipping.delivery_option.is_none() {
                    return Err(GateFailure::MissingDeliveryOption);
                }
            }
            CheckoutStep::Payment => {
                let payment = self
                    .payment
                    .as_ref()
                    .ok_or(GateFailure::MissingPaymentMethod)?;

                payment.check_step_fields()?;
            }
            CheckoutStep::Review => {}
        }

        Ok(())
    }

    /// Advance one step.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::AtLastStep`] on review, or [`CheckoutError::Gate`] when the
    /// current step is incomplete.
    pub fn next(&mut self, cart: &Cart) -> Result<CheckoutStep, CheckoutError> {
        let next = self.step.next().ok_or(CheckoutError::AtLastStep)?;

        self.check_gate(cart).map_err(|failure| CheckoutError::Gate {
            step: self.step,
            failure,
        })?;

        self.step = next;

        Ok(next)
    }

    /// Go back one step.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::AtFirstStep`] on the cart step.
    pub fn previous(&mut self) -> Result<CheckoutStep, CheckoutError> {
        let previous = self.step.previous().ok_or(CheckoutError::AtFirstStep)?;

        self.step = previous;

        Ok(previous)
    }

    /// Jump directly to a step that has already been passed.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::StepNotReached`] for steps ahead of the current one.
    pub fn go_to(&mut self, step: CheckoutStep) -> Result<CheckoutStep, CheckoutError> {
        if step > self.step {
            return Err(CheckoutError::StepNotReached(step));
        }

        self.step = step;

        Ok(step)
    }

    /// Current totals for `cart`.
    ///
    /// # Errors
    ///
    /// Returns a [`PricingError`] if totals can't be calculated.
    pub fn totals(
        &self,
        cart: &Cart,
        currency: &'static Currency,
        rules: &PricingRules,
    ) -> Result<OrderTotals, PricingError> {
        calculate_totals(
            cart,
            currency,
            self.shipping.delivery_option,
            self.promo.as_ref(),
            rules,
        )
    }

    /// Keep the order created by a confirmed payment without leaving the current step.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::WrongStep`] outside the payment and review steps.
    pub fn attach_order(&mut self, order: Order) -> Result<(), CheckoutError> {
        if !matches!(self.step, CheckoutStep::Payment | CheckoutStep::Review) {
            return Err(CheckoutError::WrongStep(self.step));
        }

        self.order = Some(order);

        Ok(())
    }

    /// Record the order created by a confirmed payment and move on to review.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::WrongStep`] outside the payment and review steps.
    pub fn record_payment(&mut self, order: Order) -> Result<(), CheckoutError> {
        self.attach_order(order)?;
        self.step = CheckoutStep::Review;

        Ok(())
    }

    /// Place the order from the review step.
    ///
    /// Produces the confirmation snapshot and clears the transient payment selection.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::WrongStep`] off the review step,
    /// [`CheckoutError::PaymentPending`] without a confirmed payment, or a pricing error.
    pub fn place_order(
        &mut self,
        cart: &Cart,
        currency: &'static Currency,
        rules: &PricingRules,
    ) -> Result<OrderConfirmation, CheckoutError> {
        if self.step != CheckoutStep::Review {
            return Err(CheckoutError::WrongStep(self.step));
        }

        let (Some(order), Some(payment)) = (self.order.as_ref(), self.payment.as_ref()) else {
            return Err(CheckoutError::PaymentPending);
        };

        let confirmation = OrderConfirmation {
            items: cart.items().to_vec(),
            totals: self.totals(cart, currency, rules)?,
            shipping: self.shipping.clone(),
            payment_method: payment.method(),
            order: order.clone(),
        };

        self.payment = None;

        Ok(confirmation)
    }
}
