use thiserror::Error;

use storefront_core::DomainError;
use storefront_parties::CustomerId;
use storefront_products::ProductId;

use crate::ports::RepositoryError;

/// Why an order could not be created.
///
/// Variants carry the offending data so callers can branch on them and map
/// them to their own transport without parsing messages.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CreateOrderError {
    #[error("customer {0} does not exist")]
    CustomerNotFound(CustomerId),

    /// The catalog returned no result set at all.
    #[error("product catalog returned no result set")]
    ProductCatalogUnavailable,

    /// First requested product (in request order) missing from the catalog.
    #[error("could not find product {0}")]
    ProductNotFound(ProductId),

    /// First line (in request order) that exceeds available stock.
    ///
    /// `requested` is the product's running total up to and including that
    /// line, not the line's own quantity: when a product repeats across
    /// lines, availability is checked against the combined quantity. For a
    /// product that appears once the two are equal. A total that would
    /// overflow `i64` is reported as `i64::MAX`.
    #[error("the quantity {requested} is not available for product {product_id}")]
    InsufficientStock { product_id: ProductId, requested: i64 },

    #[error("invalid order request: {0}")]
    InvalidRequest(#[from] DomainError),

    /// The order store returned a line for a product that was never validated.
    #[error("order store returned a line for product {0} outside the catalog snapshot")]
    UnexpectedLineItem(ProductId),

    /// Remaining stock for a product would not fit in an `i64`.
    #[error("stock level for product {0} overflows")]
    StockOverflow(ProductId),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl CreateOrderError {
    /// Stable machine-readable code for the error kind.
    pub fn code(&self) -> &'static str {
        match self {
            CreateOrderError::CustomerNotFound(_) => "customer_not_found",
            CreateOrderError::ProductCatalogUnavailable => "product_catalog_unavailable",
            CreateOrderError::ProductNotFound(_) => "product_not_found",
            CreateOrderError::InsufficientStock { .. } => "insufficient_stock",
            CreateOrderError::InvalidRequest(_) => "invalid_request",
            CreateOrderError::UnexpectedLineItem(_) => "unexpected_line_item",
            CreateOrderError::StockOverflow(_) => "stock_overflow",
            CreateOrderError::Repository(_) => "repository_failure",
        }
    }

    /// Whether the failure was caused by the request rather than a collaborator.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            CreateOrderError::CustomerNotFound(_)
                | CreateOrderError::ProductNotFound(_)
                | CreateOrderError::InsufficientStock { .. }
                | CreateOrderError::InvalidRequest(_)
        )
    }
}
