//! Orders
//!
//! Order records as served by the order service, the status state machine, and role-based
//! authorisation of seller and buyer actions. Authorised actions produce an [`OrderPatch`],
//! the partial update sent to the service and applied optimistically to local state.

use std::fmt;

use jiff::Timestamp;
use rust_decimal::Decimal;
use rusty_money::{Money, iso::Currency};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    cart::Cart,
    items::CartItem,
    payments::PaymentMethod,
    pricing::OrderTotals,
    users::{Role, UserId},
};

/// Order identifier assigned by the order service.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(String);

impl OrderId {
    /// Create a new order id.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for OrderId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Order lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
    /// Awaiting seller review.
    Reviewing,

    /// Accepted for review, not yet approved.
    Pending,

    /// Approved and being prepared.
    #[serde(alias = "Approved")]
    Processing,

    /// Handed to a carrier.
    Shipped,

    /// Received by the buyer.
    Delivered,

    /// Cancelled by either party.
    Cancelled,

    /// Refunded by the seller.
    Refunded,
}

impl OrderStatus {
    /// Terminal statuses accept no further transitions.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Delivered | Self::Cancelled | Self::Refunded)
    }

    /// Statuses from which an order may still be cancelled.
    pub fn is_cancellable(self) -> bool {
        matches!(self, Self::Reviewing | Self::Pending | Self::Processing)
    }

    /// Human readable label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Reviewing => "Reviewing",
            Self::Pending => "Pending",
            Self::Processing => "Processing",
            Self::Shipped => "Shipped",
            Self::Delivered => "Delivered",
            Self::Cancelled => "Cancelled",
            Self::Refunded => "Refunded",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Payment status tracked alongside the order status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentStatus {
    /// Not yet confirmed by the seller.
    Pending,

    /// Confirmed on approval.
    Confirmed,

    /// Money returned to the buyer.
    Refunded,
}

/// Carrier tracking details.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackingInfo {
    /// Carrier tracking number.
    pub number: String,

    /// Carrier name.
    pub carrier: String,

    /// Current order status.
    pub status: OrderStatus,

    /// When the order last changed.
    pub last_update: Option<Timestamp>,
}

/// Order record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Service id.
    #[serde(alias = "_id")]
    pub id: OrderId,

    /// Human facing order number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_number: Option<String>,

    /// Product id, when the order was for a single catalogue product.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_id: Option<String>,

    /// Product name or summary of the items.
    pub product_name: String,

    /// Product image.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_image: Option<String>,

    /// Order total in major units.
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,

    /// Pre-tax price of one unit, for single-product orders.
    #[serde(
        default,
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub unit_price: Option<Decimal>,

    /// Units ordered.
    #[serde(default = "default_quantity")]
    pub quantity: u32,

    /// Lifecycle status.
    pub status: OrderStatus,

    /// Payment status.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_status: Option<PaymentStatus>,

    /// Payment method label.
    #[serde(default)]
    pub payment_method: String,

    /// Buyer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<UserId>,

    /// Seller.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seller_id: Option<UserId>,

    /// Carrier tracking number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tracking_number: Option<String>,

    /// Carrier name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub carrier: Option<String>,

    /// Free-form seller notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    /// Reason given on cancellation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cancel_reason: Option<String>,

    /// Reason given on refund.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refund_reason: Option<String>,

    /// Amount refunded, in major units.
    #[serde(
        default,
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub refund_amount: Option<Decimal>,

    /// How the refund was paid out.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refund_method: Option<String>,

    /// When the order was placed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_date: Option<Timestamp>,

    /// Estimated or actual delivery date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_date: Option<Timestamp>,

    /// When the order was delivered.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivered_at: Option<Timestamp>,

    /// Creation time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Timestamp>,

    /// Last modification time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<Timestamp>,
}

fn default_quantity() -> u32 {
    1
}

impl Order {
    /// Tracking details, once the order has a tracking number and carrier.
    pub fn tracking(&self) -> Option<TrackingInfo> {
        let number = self.tracking_number.clone()?;
        let carrier = self.carrier.clone()?;

        Some(TrackingInfo {
            number,
            carrier,
            status: self.status,
            last_update: self.updated_at.or(self.created_at),
        })
    }

    /// Apply every field present in `patch`.
    pub fn apply_patch(&mut self, patch: &OrderPatch) {
        fn set<T: Clone>(field: &mut Option<T>, value: Option<&T>) {
            if let Some(value) = value {
                *field = Some(value.clone());
            }
        }

        if let Some(status) = patch.status {
            self.status = status;
        }

        set(&mut self.payment_status, patch.payment_status.as_ref());
        set(&mut self.tracking_number, patch.tracking_number.as_ref());
        set(&mut self.carrier, patch.carrier.as_ref());
        set(&mut self.notes, patch.notes.as_ref());
        set(&mut self.cancel_reason, patch.cancel_reason.as_ref());
        set(&mut self.refund_reason, patch.refund_reason.as_ref());
        set(&mut self.refund_amount, patch.refund_amount.as_ref());
        set(&mut self.refund_method, patch.refund_method.as_ref());
        set(&mut self.delivered_at, patch.delivered_at.as_ref());
    }

    /// Check whether the buyer may still cancel this order.
    pub fn buyer_can_cancel(&self) -> bool {
        self.status.is_cancellable()
    }
}

/// Partial update sent with `PATCH /api/orders/:id`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderPatch {
    /// New status.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<OrderStatus>,

    /// Carrier tracking number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tracking_number: Option<String>,

    /// Carrier name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub carrier: Option<String>,

    /// Notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    /// Payment status.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_status: Option<PaymentStatus>,

    /// Cancellation reason.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cancel_reason: Option<String>,

    /// Refund reason.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refund_reason: Option<String>,

    /// Refund amount in major units.
    #[serde(
        default,
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub refund_amount: Option<Decimal>,

    /// Refund payout method.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refund_method: Option<String>,

    /// Delivery time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivered_at: Option<Timestamp>,
}

impl OrderPatch {
    /// A patch that only sets the status.
    pub fn status(status: OrderStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }
}

/// Reasons a buyer may give when cancelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CancelReason {
    /// Changed my mind.
    ChangedMind,

    /// Found a better price elsewhere.
    BetterPrice,

    /// Ordered by mistake.
    OrderedByMistake,

    /// Delivery takes too long.
    DeliveryTooSlow,

    /// Problem with the payment.
    PaymentIssue,

    /// Something else.
    Other,
}

impl CancelReason {
    /// Every reason, in display order.
    pub const ALL: [Self; 6] = [
        Self::ChangedMind,
        Self::BetterPrice,
        Self::OrderedByMistake,
        Self::DeliveryTooSlow,
        Self::PaymentIssue,
        Self::Other,
    ];

    /// Human readable label, stored as the cancellation reason.
    pub fn label(self) -> &'static str {
        match self {
            Self::ChangedMind => "Changed my mind",
            Self::BetterPrice => "Found a better price",
            Self::OrderedByMistake => "Ordered by mistake",
            Self::DeliveryTooSlow => "Delivery time too long",
            Self::PaymentIssue => "Payment issue",
            Self::Other => "Other",
        }
    }
}

/// Errors raised when authorising an order action.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransitionError {
    /// The acting role may not perform this action.
    #[error("a {role} cannot {action} an order")]
    Forbidden {
        /// Action attempted.
        action: &'static str,
        /// Acting role.
        role: Role,
    },

    /// The action isn't valid from the current status.
    #[error("cannot {action} an order that is {from}")]
    InvalidTransition {
        /// Action attempted.
        action: &'static str,
        /// Current status.
        from: OrderStatus,
    },

    /// A required field was blank.
    #[error("{0} is required")]
    MissingField(&'static str),

    /// Refund amount must be positive and no more than the order total.
    #[error("refund amount {0} is out of range")]
    InvalidRefundAmount(Decimal),
}

/// Actions sellers and buyers take on an order.
#[derive(Debug, Clone, PartialEq)]
pub enum OrderAction {
    /// Seller approves; payment is confirmed.
    Approve,

    /// Seller rejects the order.
    Reject {
        /// Reason shown to the buyer.
        reason: String,
    },

    /// Seller hands the order to a carrier.
    Ship {
        /// Carrier tracking number.
        tracking_number: String,
        /// Carrier name.
        carrier: String,
    },

    /// Seller marks the order delivered.
    Deliver {
        /// Delivery time.
        at: Timestamp,
    },

    /// Seller refunds the order.
    Refund {
        /// Reason shown to the buyer.
        reason: String,
        /// Amount in major units.
        amount: Decimal,
        /// Payout method.
        method: String,
    },

    /// Buyer cancels their own order.
    Cancel {
        /// Selected reason.
        reason: CancelReason,
        /// Optional free-text details.
        details: Option<String>,
    },
}

impl OrderAction {
    /// Verb used in messages.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Approve => "approve",
            Self::Reject { .. } => "reject",
            Self::Ship { .. } => "ship",
            Self::Deliver { .. } => "deliver",
            Self::Refund { .. } => "refund",
            Self::Cancel { .. } => "cancel",
        }
    }

    fn allowed_role(&self) -> Role {
        match self {
            Self::Cancel { .. } => Role::Buyer,
            _ => Role::Seller,
        }
    }

    fn allowed_from(&self, status: OrderStatus) -> bool {
        match self {
            Self::Approve => matches!(status, OrderStatus::Reviewing | OrderStatus::Pending),
            Self::Reject { .. } | Self::Cancel { .. } => status.is_cancellable(),
            Self::Ship { .. } => status == OrderStatus::Processing,
            Self::Deliver { .. } => status == OrderStatus::Shipped,
            Self::Refund { .. } => !status.is_terminal(),
        }
    }

    /// Authorise this action for `role` against the order's current state.
    ///
    /// # Errors
    ///
    /// Returns a [`TransitionError`] when the role may not act, the status doesn't allow the
    /// action, or a required field is missing.
    pub fn authorize(&self, role: Role, order: &Order) -> Result<OrderPatch, TransitionError> {
        let action = self.name();

        if role != self.allowed_role() {
            return Err(TransitionError::Forbidden { action, role });
        }

        if !self.allowed_from(order.status) {
            return Err(TransitionError::InvalidTransition {
                action,
                from: order.status,
            });
        }

        let patch = match self {
            Self::Approve => OrderPatch {
                payment_status: Some(PaymentStatus::Confirmed),
                ..OrderPatch::status(OrderStatus::Processing)
            },
            Self::Reject { reason } => OrderPatch {
                cancel_reason: Some(required("reason", reason)?),
                ..OrderPatch::status(OrderStatus::Cancelled)
            },
            Self::Ship {
                tracking_number,
                carrier,
            } => OrderPatch {
                tracking_number: Some(required("tracking number", tracking_number)?),
                carrier: Some(required("carrier", carrier)?),
                ..OrderPatch::status(OrderStatus::Shipped)
            },
            Self::Deliver { at } => OrderPatch {
                delivered_at: Some(*at),
                ..OrderPatch::status(OrderStatus::Delivered)
            },
            Self::Refund {
                reason,
                amount,
                method,
            } => {
                if *amount <= Decimal::ZERO || *amount > order.price {
                    return Err(TransitionError::InvalidRefundAmount(*amount));
                }

                OrderPatch {
                    refund_reason: Some(required("reason", reason)?),
                    refund_amount: Some(*amount),
                    refund_method: Some(required("refund method", method)?),
                    payment_status: Some(PaymentStatus::Refunded),
                    ..OrderPatch::status(OrderStatus::Refunded)
                }
            }
            Self::Cancel { reason, details } => OrderPatch {
                cancel_reason: Some(reason.label().to_string()),
                notes: details
                    .as_deref()
                    .map(str::trim)
                    .filter(|details| !details.is_empty())
                    .map(str::to_string),
                ..OrderPatch::status(OrderStatus::Cancelled)
            },
        };

        Ok(patch)
    }
}

fn required(field: &'static str, value: &str) -> Result<String, TransitionError> {
    let value = value.trim();

    if value.is_empty() {
        Err(TransitionError::MissingField(field))
    } else {
        Ok(value.to_string())
    }
}

/// Body of `POST /api/orders`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOrder {
    /// Catalogue product, set only when a single product was bought.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_id: Option<String>,

    /// Product name, or a summary when several products are bought together.
    pub product_name: String,

    /// Image of the first product.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_image: Option<String>,

    /// Order total in major units.
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,

    /// Pre-tax unit price of the single product.
    #[serde(
        default,
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub unit_price: Option<Decimal>,

    /// Payment method label.
    pub payment_method: String,

    /// Buyer.
    pub user_id: UserId,

    /// Units bought.
    pub quantity: u32,
}

impl NewOrder {
    /// Build the order-creation request for a checkout.
    pub fn for_checkout(
        cart: &Cart,
        totals: &OrderTotals,
        method: PaymentMethod,
        buyer: UserId,
    ) -> Self {
        let first = cart.items().first();
        let single = match cart.items() {
            [only] => Some(only),
            _ => None,
        };

        Self {
            product_id: single.map(|item| item.id.as_str().to_string()),
            product_name: summarize(cart.items()),
            product_image: first
                .map(|item| item.image_ref.clone())
                .filter(|image| !image.is_empty()),
            price: major(&totals.total),
            unit_price: single.map(|item| item.unit_price.to_major(totals.total.currency())),
            payment_method: method.label().to_string(),
            user_id: buyer,
            quantity: u32::try_from(cart.item_count()).unwrap_or(u32::MAX),
        }
    }
}

fn summarize(items: &[CartItem]) -> String {
    match items {
        [] => "Order".to_string(),
        [only] => only.name.clone(),
        [first, rest @ ..] => format!("{} + {} more", first.name, rest.len()),
    }
}

fn major(money: &Money<'static, Currency>) -> Decimal {
    *money.amount()
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use testresult::TestResult;

    use super::*;

    fn order(status: OrderStatus) -> Order {
        Order {
            id: OrderId::from("7"),
            order_number: Some("ORD-0007".to_string()),
            product_id: Some("panel-400w".to_string()),
            product_name: "400W Mono Panel".to_string(),
            product_image: None,
            price: Decimal::new(295_00, 2),
            unit_price: Some(Decimal::new(250_00, 2)),
            quantity: 1,
            status,
            payment_status: Some(PaymentStatus::Pending),
            payment_method: "M-Pesa".to_string(),
            user_id: Some(UserId::from("buyer-1")),
            seller_id: Some(UserId::from("seller-1")),
            tracking_number: None,
            carrier: None,
            notes: None,
            cancel_reason: None,
            refund_reason: None,
            refund_amount: None,
            refund_method: None,
            order_date: None,
            delivery_date: None,
            delivered_at: None,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn approve_moves_to_processing_and_confirms_payment() -> TestResult {
        let patch = OrderAction::Approve.authorize(Role::Seller, &order(OrderStatus::Pending))?;

        assert_eq!(patch.status, Some(OrderStatus::Processing));
        assert_eq!(patch.payment_status, Some(PaymentStatus::Confirmed));

        Ok(())
    }

    #[test]
    fn ship_requires_tracking_and_carrier() {
        let action = OrderAction::Ship {
            tracking_number: "TK1".to_string(),
            carrier: "  ".to_string(),
        };

        assert_eq!(
            action.authorize(Role::Seller, &order(OrderStatus::Processing)),
            Err(TransitionError::MissingField("carrier"))
        );
    }

    #[test]
    fn shipping_patch_populates_tracking() -> TestResult {
        let mut shipped = order(OrderStatus::Processing);
        let action = OrderAction::Ship {
            tracking_number: "TK1".to_string(),
            carrier: "DHL".to_string(),
        };

        let patch = action.authorize(Role::Seller, &shipped)?;
        shipped.apply_patch(&patch);

        let tracking = shipped.tracking();

        assert_eq!(shipped.status, OrderStatus::Shipped);
        assert_eq!(tracking.as_ref().map(|t| t.number.as_str()), Some("TK1"));
        assert_eq!(tracking.as_ref().map(|t| t.carrier.as_str()), Some("DHL"));

        Ok(())
    }

    #[test]
    fn buyer_cancel_is_blocked_once_delivered_or_cancelled() {
        let action = OrderAction::Cancel {
            reason: CancelReason::ChangedMind,
            details: None,
        };

        for status in [OrderStatus::Delivered, OrderStatus::Cancelled] {
            assert_eq!(
                action.authorize(Role::Buyer, &order(status)),
                Err(TransitionError::InvalidTransition {
                    action: "cancel",
                    from: status,
                })
            );
        }
    }

    #[test]
    fn buyer_cancel_sets_cancelled_with_reason_label() -> TestResult {
        let action = OrderAction::Cancel {
            reason: CancelReason::OrderedByMistake,
            details: Some("  wrong inverter  ".to_string()),
        };

        let patch = action.authorize(Role::Buyer, &order(OrderStatus::Processing))?;

        assert_eq!(patch.status, Some(OrderStatus::Cancelled));
        assert_eq!(patch.cancel_reason.as_deref(), Some("Ordered by mistake"));
        assert_eq!(patch.notes.as_deref(), Some("wrong inverter"));

        Ok(())
    }

    #[test]
    fn buyers_cannot_run_seller_actions() {
        assert_eq!(
            OrderAction::Approve.authorize(Role::Buyer, &order(OrderStatus::Pending)),
            Err(TransitionError::Forbidden {
                action: "approve",
                role: Role::Buyer,
            })
        );
    }

    #[test]
    fn refund_is_allowed_from_any_non_terminal_state() -> TestResult {
        let action = OrderAction::Refund {
            reason: "damaged".to_string(),
            amount: Decimal::new(100_00, 2),
            method: "M-Pesa".to_string(),
        };

        let patch = action.authorize(Role::Seller, &order(OrderStatus::Shipped))?;

        assert_eq!(patch.status, Some(OrderStatus::Refunded));
        assert_eq!(patch.payment_status, Some(PaymentStatus::Refunded));

        assert!(action
            .authorize(Role::Seller, &order(OrderStatus::Delivered))
            .is_err());

        Ok(())
    }

    #[test]
    fn refund_amount_must_fit_the_order() {
        let action = OrderAction::Refund {
            reason: "damaged".to_string(),
            amount: Decimal::new(1_000_00, 2),
            method: "M-Pesa".to_string(),
        };

        assert_eq!(
            action.authorize(Role::Seller, &order(OrderStatus::Pending)),
            Err(TransitionError::InvalidRefundAmount(Decimal::new(1_000_00, 2)))
        );
    }

    #[test]
    fn approved_deserializes_as_processing() -> Result<(), serde_json::Error> {
        let status: OrderStatus = serde_json::from_str("\"Approved\"")?;

        assert_eq!(status, OrderStatus::Processing);

        Ok(())
    }

    #[test]
    fn order_deserializes_from_service_json() -> Result<(), serde_json::Error> {
        let order: Order = serde_json::from_value(serde_json::json!({
            "_id": "65f1c0",
            "productName": "Lithium Battery 10kWh",
            "price": 4_250.5,
            "status": "Pending",
            "paymentMethod": "PayPal",
            "userId": "buyer-1",
            "createdAt": "2026-03-01T10:00:00Z"
        }))?;

        assert_eq!(order.id, OrderId::from("65f1c0"));
        assert_eq!(order.price, Decimal::new(4_250_5, 1));
        assert_eq!(order.quantity, 1);
        assert!(order.created_at.is_some());

        Ok(())
    }

    #[test]
    fn patch_serializes_only_present_fields() -> Result<(), serde_json::Error> {
        let patch = OrderPatch {
            tracking_number: Some("TK1".to_string()),
            carrier: Some("DHL".to_string()),
            ..OrderPatch::status(OrderStatus::Shipped)
        };

        assert_eq!(
            serde_json::to_value(&patch)?,
            serde_json::json!({ "status": "Shipped", "trackingNumber": "TK1", "carrier": "DHL" })
        );

        Ok(())
    }
}
