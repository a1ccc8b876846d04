//! Pricing
//!
//! Derives order totals from the cart, the chosen delivery option and the current promo.
//! All arithmetic happens in minor units; conversion to display amounts is left to callers.

use std::fmt;

use decimal_percentage::Percentage;
use rusty_money::{Money, iso::Currency};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    cart::{Cart, CartError},
    discounts::{DiscountError, percent_of_minor},
    prices::Price,
    promotions::PromoApplication,
};

/// Errors that can occur while calculating order totals.
#[derive(Debug, Error, PartialEq)]
pub enum PricingError {
    /// Cart subtotal couldn't be calculated.
    #[error(transparent)]
    Cart(#[from] CartError),

    /// Tax percentage couldn't be applied.
    #[error(transparent)]
    Discount(#[from] DiscountError),

    /// The promo was evaluated in a different currency (promo currency, cart currency).
    #[error("promo discount is in {0}, but the cart is priced in {1}")]
    CurrencyMismatch(&'static str, &'static str),

    /// Summing the totals overflowed.
    #[error("order total overflowed")]
    Overflow,
}

/// Delivery speed chosen on the shipping step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryOption {
    /// Standard delivery.
    #[default]
    Standard,

    /// Express delivery.
    Express,

    /// Overnight delivery.
    Overnight,
}

impl DeliveryOption {
    /// Every option, in display order.
    pub const ALL: [Self; 3] = [Self::Standard, Self::Express, Self::Overnight];

    /// Human readable label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Standard => "Standard Delivery",
            Self::Express => "Express Delivery",
            Self::Overnight => "Overnight Delivery",
        }
    }
}

impl fmt::Display for DeliveryOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Shipping fee table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShippingRates {
    /// Subtotals strictly above this ship free.
    pub free_shipping_threshold: Price,

    /// Fee shown on the cart summary before a delivery option has been chosen.
    pub cart_flat_fee: Price,

    /// Listed fee for [`DeliveryOption::Standard`].
    pub standard: Price,

    /// Listed fee for [`DeliveryOption::Express`].
    pub express: Price,

    /// Listed fee for [`DeliveryOption::Overnight`].
    pub overnight: Price,
}

impl Default for ShippingRates {
    fn default() -> Self {
        Self {
            free_shipping_threshold: Price::new(500_00),
            cart_flat_fee: Price::new(25_00),
            standard: Price::ZERO,
            express: Price::new(15_00),
            overnight: Price::new(35_00),
        }
    }
}

impl ShippingRates {
    /// Listed fee for a delivery option, or the flat cart fee when none is chosen yet.
    pub fn listed_fee(&self, delivery: Option<DeliveryOption>) -> Price {
        match delivery {
            None => self.cart_flat_fee,
            Some(DeliveryOption::Standard) => self.standard,
            Some(DeliveryOption::Express) => self.express,
            Some(DeliveryOption::Overnight) => self.overnight,
        }
    }

    /// Fee actually charged for a subtotal. The free shipping threshold overrides any option.
    pub fn fee_for(&self, subtotal: u64, delivery: Option<DeliveryOption>) -> Price {
        if subtotal > *self.free_shipping_threshold {
            Price::ZERO
        } else {
            self.listed_fee(delivery)
        }
    }
}

/// Pricing rules applied at checkout.
#[derive(Debug, Clone)]
pub struct PricingRules {
    /// Shipping fee table.
    pub shipping: ShippingRates,

    /// Flat sales tax rate applied to the subtotal.
    pub tax_rate: Percentage,
}

impl Default for PricingRules {
    fn default() -> Self {
        Self {
            shipping: ShippingRates::default(),
            tax_rate: Percentage::from(0.08),
        }
    }
}

/// Derived totals; never stored, always recomputed from the current cart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrderTotals {
    /// Sum of line totals.
    pub subtotal: Money<'static, Currency>,

    /// Shipping fee.
    pub shipping: Money<'static, Currency>,

    /// Sales tax.
    pub tax: Money<'static, Currency>,

    /// Promo discount actually deducted.
    pub discount: Money<'static, Currency>,

    /// `subtotal + shipping + tax - discount`.
    pub total: Money<'static, Currency>,
}

/// Calculate order totals.
///
/// The promo discount is capped at `subtotal + shipping + tax`, so the total never drops below
/// zero.
///
/// # Errors
///
/// Returns a [`PricingError`] on overflow, tax conversion failure or a currency mismatch between
/// the promo and the cart.
pub fn calculate_totals(
    cart: &Cart,
    currency: &'static Currency,
    delivery: Option<DeliveryOption>,
    promo: Option<&PromoApplication>,
    rules: &PricingRules,
) -> Result<OrderTotals, PricingError> {
    if let Some(promo) = promo
        && promo.discount.currency() != currency
    {
        return Err(PricingError::CurrencyMismatch(
            promo.discount.currency().iso_alpha_code,
            currency.iso_alpha_code,
        ));
    }

    let subtotal_minor = cart.subtotal_minor()?;
    let subtotal = i64::try_from(subtotal_minor).map_err(|_err| PricingError::Overflow)?;

    let shipping = if promo.is_some_and(|promo| promo.free_shipping) {
        0
    } else {
        rules.shipping.fee_for(subtotal_minor, delivery).to_minor_i64()
    };

    let tax = percent_of_minor(&rules.tax_rate, subtotal)?;

    let gross = subtotal
        .checked_add(shipping)
        .and_then(|sum| sum.checked_add(tax))
        .ok_or(PricingError::Overflow)?;

    let discount = promo
        .map_or(0, |promo| promo.discount.to_minor_units().max(0))
        .min(gross);

    let money = |minor: i64| Money::from_minor(minor, currency);

    Ok(OrderTotals {
        subtotal: money(subtotal),
        shipping: money(shipping),
        tax: money(tax),
        discount: money(discount),
        total: money(gross - discount),
    })
}
