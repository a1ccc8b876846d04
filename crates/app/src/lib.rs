//! Storefront services: cart persistence, checkout sessions, payments and order management.

pub mod config;
pub mod contact;
pub mod context;
pub mod domain;
pub mod in_flight;
pub mod notifications;
pub mod observability;
pub mod storage;

#[cfg(test)]
mod test;
