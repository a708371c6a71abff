//! Sales orders: order model, collaborator ports and the order creation
//! workflow.
//!
//! The workflow performs IO only through the traits in [`ports`]; validation,
//! pricing and stock arithmetic live in [`reservation`] as pure functions.

pub mod create_order;
pub mod error;
pub mod order;
pub mod ports;
pub mod reservation;

pub use create_order::CreateOrderWorkflow;
pub use error::CreateOrderError;
pub use order::{CreateOrder, Order, OrderId, OrderLineRecord, OrderLineRequest};
pub use ports::{CustomerLookup, NewOrder, OrderStore, ProductCatalog, RepositoryError};
