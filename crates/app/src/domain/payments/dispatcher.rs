//! Simulated payment processing and order creation.

use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    time::Duration,
};

use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{Span, info, warn};
use voltcart::{
    orders::{NewOrder, Order},
    payments::{MethodKind, PaymentFailure, PaymentSelection},
};

use crate::{domain::orders::OrdersApi, in_flight::InFlight};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PaymentError {
    #[error("a payment is already being processed")]
    InFlight,

    #[error("payment has already been confirmed")]
    AlreadyConfirmed,

    #[error("payment was cancelled")]
    Cancelled,
}

/// Simulated timings around a payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaymentDelays {
    /// Processing time before the outcome is known.
    pub processing: Duration,

    /// How long a success is shown before checkout moves on.
    pub success_display: Duration,

    /// Delay when placing the order from review.
    pub place_order: Duration,
}

impl Default for PaymentDelays {
    fn default() -> Self {
        Self {
            processing: Duration::from_millis(2_000),
            success_display: Duration::from_millis(1_500),
            place_order: Duration::from_millis(1_500),
        }
    }
}

/// What to charge and the order to create once it succeeds.
#[derive(Debug)]
pub struct PaymentRequest {
    pub selection: PaymentSelection,
    pub order: NewOrder,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PaymentOutcome {
    /// The payment went through and the order was created.
    Succeeded(Order),

    /// The payment was declined; no order was created.
    Failed(PaymentFailure),
}

/// Sleep for `duration` unless `token` is cancelled first.
///
/// # Errors
///
/// Returns [`PaymentError::Cancelled`] when the token fires first.
pub async fn pause(token: &CancellationToken, duration: Duration) -> Result<(), PaymentError> {
    tokio::select! {
        () = token.cancelled() => Err(PaymentError::Cancelled),
        () = tokio::time::sleep(duration) => Ok(()),
    }
}

/// Runs payment confirmations, creating at most one order per checkout.
pub struct PaymentDispatcher {
    api: Arc<dyn OrdersApi>,
    delays: PaymentDelays,
    running: InFlight,
    confirmed: AtomicBool,
    token: CancellationToken,
}

impl std::fmt::Debug for PaymentDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaymentDispatcher")
            .field("delays", &self.delays)
            .field("running", &self.running)
            .field("confirmed", &self.confirmed)
            .finish_non_exhaustive()
    }
}

impl PaymentDispatcher {
    #[must_use]
    pub fn new(api: Arc<dyn OrdersApi>, delays: PaymentDelays, token: CancellationToken) -> Self {
        Self {
            api,
            delays,
            running: InFlight::new(),
            confirmed: AtomicBool::new(false),
            token,
        }
    }

    #[must_use]
    pub fn delays(&self) -> PaymentDelays {
        self.delays
    }

    #[must_use]
    pub fn token(&self) -> &CancellationToken {
        &self.token
    }

    #[must_use]
    pub fn is_processing(&self) -> bool {
        self.running.is_running()
    }

    #[must_use]
    pub fn is_confirmed(&self) -> bool {
        self.confirmed.load(Ordering::Acquire)
    }

    /// Stop any running confirmation. Later calls fail with [`PaymentError::Cancelled`].
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Process a payment and create the order on success.
    ///
    /// Card, PayPal and wallet details are checked up front; mobile money details are
    /// checked after the processing delay, the way a handset prompt would fail.
    ///
    /// # Errors
    ///
    /// Returns [`PaymentError::InFlight`] while another confirmation runs,
    /// [`PaymentError::AlreadyConfirmed`] once an order exists, and
    /// [`PaymentError::Cancelled`] if the session ends mid-flight.
    #[tracing::instrument(
        name = "payments.confirm",
        skip(self, request),
        fields(method = %request.selection.method(), outcome = tracing::field::Empty),
        err
    )]
    pub async fn confirm(&self, request: PaymentRequest) -> Result<PaymentOutcome, PaymentError> {
        if self.is_confirmed() {
            return Err(PaymentError::AlreadyConfirmed);
        }

        let Some(_guard) = self.running.try_acquire() else {
            return Err(PaymentError::InFlight);
        };

        // A confirmation may have finished between the first check and the acquire.
        if self.is_confirmed() {
            return Err(PaymentError::AlreadyConfirmed);
        }

        if self.token.is_cancelled() {
            return Err(PaymentError::Cancelled);
        }

        let PaymentRequest { selection, order } = request;
        let deferred = selection.method().kind() == MethodKind::MobileMoney;

        if !deferred && let Err(failure) = selection.validate() {
            return Ok(self.declined(failure));
        }

        pause(&self.token, self.delays.processing).await?;

        if deferred && let Err(failure) = selection.validate() {
            return Ok(self.declined(failure));
        }

        drop(selection);

        let created = tokio::select! {
            () = self.token.cancelled() => return Err(PaymentError::Cancelled),
            created = self.api.create_order(order) => created,
        };

        match created {
            Ok(order) => {
                self.confirmed.store(true, Ordering::Release);

                Span::current().record("outcome", "succeeded");
                info!(order_id = %order.id, "payment confirmed");

                Ok(PaymentOutcome::Succeeded(order))
            }
            Err(error) => {
                warn!(%error, "order creation failed after payment");

                Ok(self.declined(PaymentFailure::OrderCreation(error.to_string())))
            }
        }
    }

    fn declined(&self, failure: PaymentFailure) -> PaymentOutcome {
        Span::current().record("outcome", "failed");
        info!(reason = %failure, "payment declined");

        PaymentOutcome::Failed(failure)
    }
}
