//! Order service errors.

use thiserror::Error;
use voltcart::orders::{OrderId, TransitionError};

/// Errors talking to the order service.
#[derive(Debug, Error)]
pub enum OrdersApiError {
    /// Transport failure or undecodable body.
    #[error("order service request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-2xx status.
    #[error("order service returned {status}: {body}")]
    Status { status: u16, body: String },

    /// The base URL or a derived endpoint is malformed.
    #[error("invalid order service url: {0}")]
    Url(String),
}

/// Errors from the local order board.
#[derive(Debug, Error)]
pub enum BoardError {
    #[error("order {0} not found")]
    NotFound(OrderId),

    #[error("a bulk update is already running")]
    BulkInFlight,

    #[error(transparent)]
    Transition(#[from] TransitionError),

    #[error(transparent)]
    Api(#[from] OrdersApiError),
}
