//! Cart store errors.

use thiserror::Error;
use voltcart::{orders::OrderId, prices::PriceError};

use crate::storage::StorageError;

#[derive(Debug, Error)]
pub enum CartStoreError {
    #[error("failed to persist cart")]
    Storage(#[from] StorageError),

    #[error("failed to encode cart")]
    Encode(#[from] serde_json::Error),

    #[error("order {0} covers several products and can't be reordered")]
    NotReorderable(OrderId),

    #[error("order {0} has no usable unit price")]
    Reorder(OrderId, #[source] PriceError),
}
