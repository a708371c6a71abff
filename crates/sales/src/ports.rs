//! Collaborator interfaces consumed by the order workflow.
//!
//! Implementations own persistence; the workflow only calls through these
//! traits and never assumes anything about the backend. Every method is a
//! blocking request/response call.

use std::sync::Arc;

use thiserror::Error;

use storefront_parties::{Customer, CustomerId};
use storefront_products::{CatalogProduct, ProductQuantity};

use crate::order::{Order, OrderLineRecord};

/// A collaborator call failed (as opposed to returning "not found").
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    /// The backend could not serve the request at all.
    #[error("repository unavailable: {0}")]
    Unavailable(String),

    /// The backend rejected or failed the request.
    #[error("repository failure: {0}")]
    Backend(String),
}

/// Parameters for persisting a new order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrder {
    pub customer: Customer,
    pub line_items: Vec<OrderLineRecord>,
}

pub trait CustomerLookup: Send + Sync {
    fn find_by_id(&self, id: &CustomerId) -> Result<Option<Customer>, RepositoryError>;
}

pub trait ProductCatalog: Send + Sync {
    /// Resolve every catalog entry whose id appears in `items`.
    ///
    /// `Ok(None)` means the catalog produced no result set at all, which is
    /// different from an empty one.
    fn find_all_by_id(
        &self,
        items: &[ProductQuantity],
    ) -> Result<Option<Vec<CatalogProduct>>, RepositoryError>;

    /// Overwrite stored quantities with the given absolute levels.
    fn update_quantity(&self, items: &[ProductQuantity]) -> Result<(), RepositoryError>;
}

pub trait OrderStore: Send + Sync {
    /// Persist a new order, assigning its id.
    fn create(&self, params: NewOrder) -> Result<Order, RepositoryError>;
}

impl<S> CustomerLookup for Arc<S>
where
    S: CustomerLookup + ?Sized,
{
    fn find_by_id(&self, id: &CustomerId) -> Result<Option<Customer>, RepositoryError> {
        (**self).find_by_id(id)
    }
}

impl<S> ProductCatalog for Arc<S>
where
    S: ProductCatalog + ?Sized,
{
    fn find_all_by_id(
        &self,
        items: &[ProductQuantity],
    ) -> Result<Option<Vec<CatalogProduct>>, RepositoryError> {
        (**self).find_all_by_id(items)
    }

    fn update_quantity(&self, items: &[ProductQuantity]) -> Result<(), RepositoryError> {
        (**self).update_quantity(items)
    }
}

impl<S> OrderStore for Arc<S>
where
    S: OrderStore + ?Sized,
{
    fn create(&self, params: NewOrder) -> Result<Order, RepositoryError> {
        (**self).create(params)
    }
}
