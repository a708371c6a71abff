//! Parties domain module (customers).
//!
//! Customers are only resolved by the order pipeline, never mutated, so this
//! crate is limited to the customer record and its identifier.

pub mod customer;

pub use customer::{Customer, CustomerId};
