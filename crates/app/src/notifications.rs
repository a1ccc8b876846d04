//! Toast messages for action outcomes.

use std::fmt;

use crate::domain::{
    orders::{BulkOutcome, TransitionOutcome},
    payments::PaymentOutcome,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Success,
    Error,
}

/// A dismissible notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub level: ToastLevel,
    pub message: String,
}

impl Toast {
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: ToastLevel::Success,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: ToastLevel::Error,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn is_error(&self) -> bool {
        self.level == ToastLevel::Error
    }
}

impl fmt::Display for Toast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl From<&TransitionOutcome> for Toast {
    fn from(outcome: &TransitionOutcome) -> Self {
        match outcome {
            TransitionOutcome::Applied(order) => {
                Self::success(format!("Order {} is now {}", order.id, order.status))
            }
            TransitionOutcome::Reverted { order, error } => {
                Self::error(format!("Couldn't update order {}: {error}", order.id))
            }
        }
    }
}

impl From<&BulkOutcome> for Toast {
    fn from(outcome: &BulkOutcome) -> Self {
        let updated = outcome.succeeded.len();

        match outcome.failed.len() {
            0 => Self::success(format!("Updated {updated} orders")),
            failed => Self::error(format!("Updated {updated} orders, {failed} failed")),
        }
    }
}

impl From<&PaymentOutcome> for Toast {
    fn from(outcome: &PaymentOutcome) -> Self {
        match outcome {
            PaymentOutcome::Succeeded(_) => Self::success("Payment successful"),
            PaymentOutcome::Failed(failure) => Self::error(failure.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use voltcart::orders::OrderId;

    use super::*;

    #[test]
    fn partial_bulk_failure_is_an_error_toast() {
        let outcome = BulkOutcome {
            succeeded: vec![OrderId::from("a")],
            failed: vec![(OrderId::from("b"), "boom".to_string())],
        };

        let toast = Toast::from(&outcome);

        assert!(toast.is_error());
        assert_eq!(toast.message, "Updated 1 orders, 1 failed");
    }
}
