//! Voltcart prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{Cart, CartError},
    checkout::{
        AddressRecord, CheckoutError, CheckoutFlow, CheckoutStep, EntryMode, GateFailure,
        OrderConfirmation, ShippingSelection,
    },
    discounts::DiscountError,
    items::{CartItem, CartProduct, ItemId, parse_quantity},
    orders::{
        CancelReason, NewOrder, Order, OrderAction, OrderId, OrderPatch, OrderStatus,
        PaymentStatus, TrackingInfo, TransitionError,
    },
    payments::{
        CardDetails, MethodKind, MobileMoneyDetails, PayPalCredentials, PaymentDetails,
        PaymentFailure, PaymentMethod, PaymentSelection,
    },
    prices::{Price, PriceError},
    pricing::{
        DeliveryOption, OrderTotals, PricingError, PricingRules, ShippingRates, calculate_totals,
    },
    promotions::{DEMO_PROMO_CODE, PromoApplication, PromoCatalogue, PromoFeedback, PromoRule},
    users::{CurrentUser, Role, UserId},
};
