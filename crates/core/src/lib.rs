//! Voltcart
//!
//! Checkout core for an energy products marketplace: cart lines, promo codes, pricing, the
//! checkout step machine, payment method rules and the order status model. Everything here is
//! synchronous and free of I/O; persistence and the order service live in `voltcart-app`.

pub mod cart;
pub mod checkout;
pub mod discounts;
pub mod items;
pub mod orders;
pub mod payments;
pub mod prelude;
pub mod prices;
pub mod pricing;
pub mod promotions;
pub mod users;
