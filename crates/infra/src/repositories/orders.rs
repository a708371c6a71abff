use chrono::Utc;
use tracing::debug;

use storefront_sales::{NewOrder, Order, OrderId, OrderStore, RepositoryError};

use super::entity_store::InMemoryEntityStore;

/// Order store backed by memory; assigns UUIDv7 ids and creation timestamps.
#[derive(Debug, Default)]
pub struct InMemoryOrderStore {
    orders: InMemoryEntityStore<Order>,
}

impl InMemoryOrderStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &OrderId) -> Result<Option<Order>, RepositoryError> {
        self.orders.get(id)
    }

    pub fn list(&self) -> Result<Vec<Order>, RepositoryError> {
        let mut orders = self.orders.list()?;
        orders.sort_by_key(|o| o.created_at);
        Ok(orders)
    }
}

impl OrderStore for InMemoryOrderStore {
    fn create(&self, params: NewOrder) -> Result<Order, RepositoryError> {
        let order = Order {
            id: OrderId::generate(),
            customer: params.customer,
            line_items: params.line_items,
            created_at: Utc::now(),
        };
        self.orders.upsert(order.clone())?;
        debug!(order_id = %order.id, "order stored");
        Ok(order)
    }
}
