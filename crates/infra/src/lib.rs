//! Infrastructure layer: collaborator implementations for the order workflow.

pub mod repositories;


pub use repositories::{
    InMemoryCustomerDirectory, InMemoryEntityStore, InMemoryOrderStore, InMemoryProductCatalog,
};
