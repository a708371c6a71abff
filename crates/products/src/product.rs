use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use storefront_core::{DomainError, Entity, EntityId, impl_entity_id_newtype};

/// Product identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub EntityId);

impl_entity_id_newtype!(ProductId);

/// A catalog entry: current price and units available for sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogProduct {
    id: ProductId,
    name: String,
    price: Decimal,
    /// Stock on hand. Signed: uncoordinated concurrent orders can drive it
    /// below zero.
    quantity: i64,
}

impl CatalogProduct {
    pub fn new(
        id: ProductId,
        name: impl Into<String>,
        price: Decimal,
        quantity: i64,
    ) -> Result<Self, DomainError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("product name cannot be empty"));
        }
        if price.is_sign_negative() {
            return Err(DomainError::validation("price cannot be negative"));
        }

        Ok(Self {
            id,
            name,
            price,
            quantity,
        })
    }

    pub fn id_typed(&self) -> &ProductId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> Decimal {
        self.price
    }

    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    pub fn set_price(&mut self, price: Decimal) {
        self.price = price;
    }

    pub fn set_quantity(&mut self, quantity: i64) {
        self.quantity = quantity;
    }

    /// Whether `requested` units can be taken from current stock.
    pub fn has_stock_for(&self, requested: i64) -> bool {
        requested <= self.quantity
    }
}

impl Entity for CatalogProduct {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// `{id, quantity}` pair exchanged with the catalog.
///
/// Used both to name the products to look up and to carry new stock levels
/// back for an update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductQuantity {
    pub id: ProductId,
    pub quantity: i64,
}

impl ProductQuantity {
    pub fn new(id: ProductId, quantity: i64) -> Self {
        Self { id, quantity }
    }
}
