//! Orders

pub mod api;
pub mod board;
pub mod errors;

pub use api::*;
pub use board::*;
pub use errors::{BoardError, OrdersApiError};
