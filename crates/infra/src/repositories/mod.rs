//! In-memory implementations of the order workflow's collaborators.

pub mod catalog;
pub mod customers;
pub mod entity_store;
pub mod orders;

pub use catalog::InMemoryProductCatalog;
pub use customers::InMemoryCustomerDirectory;
pub use entity_store::InMemoryEntityStore;
pub use orders::InMemoryOrderStore;
