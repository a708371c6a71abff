use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use storefront_core::{DomainError, DomainResult, Entity, EntityId, impl_entity_id_newtype};
use storefront_parties::{Customer, CustomerId};
use storefront_products::{ProductId, ProductQuantity};

/// Order identifier (assigned by the order store).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(pub EntityId);

impl_entity_id_newtype!(OrderId);

impl OrderId {
    /// Fresh time-ordered identifier, for stores that assign their own ids.
    pub fn generate() -> Self {
        Self(EntityId::generate())
    }
}

/// Requested line: product and quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLineRequest {
    pub product_id: ProductId,
    pub quantity: i64,
}

impl OrderLineRequest {
    pub fn new(product_id: ProductId, quantity: i64) -> Self {
        Self {
            product_id,
            quantity,
        }
    }
}

impl From<&OrderLineRequest> for ProductQuantity {
    fn from(line: &OrderLineRequest) -> Self {
        ProductQuantity::new(line.product_id.clone(), line.quantity)
    }
}

/// Persisted line: product, quantity and the catalog price at order time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLineRecord {
    pub product_id: ProductId,
    pub quantity: i64,
    /// Unit price snapshot; never re-read from the catalog.
    pub price: Decimal,
}

impl OrderLineRecord {
    /// `price × quantity`, or `None` if it exceeds `Decimal`'s range.
    pub fn subtotal(&self) -> Option<Decimal> {
        self.price.checked_mul(Decimal::from(self.quantity))
    }
}

/// Command: CreateOrder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateOrder {
    pub customer_id: CustomerId,
    pub lines: Vec<OrderLineRequest>,
}

impl CreateOrder {
    pub fn new(customer_id: CustomerId, lines: Vec<OrderLineRequest>) -> Self {
        Self { customer_id, lines }
    }

    /// Shape checks that need no collaborator.
    pub fn validate(&self) -> DomainResult<()> {
        if self.lines.is_empty() {
            return Err(DomainError::validation("order must contain at least one line"));
        }

        if let Some(line) = self.lines.iter().find(|l| l.quantity <= 0) {
            return Err(DomainError::validation(format!(
                "quantity must be positive (product {}, quantity {})",
                line.product_id, line.quantity
            )));
        }

        Ok(())
    }

    /// The `{id, quantity}` items handed to the catalog lookup.
    pub fn catalog_query(&self) -> Vec<ProductQuantity> {
        self.lines.iter().map(ProductQuantity::from).collect()
    }
}

/// A persisted order, as returned by the order store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub customer: Customer,
    pub line_items: Vec<OrderLineRecord>,
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// Sum of line subtotals, or `None` if any step exceeds `Decimal`'s range.
    pub fn total(&self) -> Option<Decimal> {
        self.line_items
            .iter()
            .try_fold(Decimal::ZERO, |acc, line| acc.checked_add(line.subtotal()?))
    }
}

impl Entity for Order {
    type Id = OrderId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
