//! Order creation workflow (application-level orchestration).
//!
//! ```text
//! CreateOrder
//!   ↓
//! 1. Resolve customer                      (CustomerLookup)
//!   ↓
//! 2. Check request shape
//!   ↓
//! 3. Load catalog snapshot, one batch      (ProductCatalog)
//!   ↓
//! 4. Existence, stock and pricing          (reservation, pure)
//!   ↓
//! 5. Persist order                         (OrderStore)
//!   ↓
//! 6. Write decremented stock, one batch    (ProductCatalog)
//! ```
//!
//! Every check runs before the first mutation, so a rejected request leaves
//! all collaborators untouched. Stock read (3) and write (6) are not atomic:
//! two concurrent orders for the same product can both pass validation and
//! the later write overwrites the earlier one.

use tracing::{debug, info, instrument};

use crate::error::CreateOrderError;
use crate::order::{CreateOrder, Order};
use crate::ports::{CustomerLookup, NewOrder, OrderStore, ProductCatalog};
use crate::reservation::{reserve, stock_adjustments};

/// Creates orders from customer requests, reserving stock against the catalog.
#[derive(Debug)]
pub struct CreateOrderWorkflow<C, P, O> {
    customers: C,
    catalog: P,
    orders: O,
}

impl<C, P, O> CreateOrderWorkflow<C, P, O> {
    pub fn new(customers: C, catalog: P, orders: O) -> Self {
        Self {
            customers,
            catalog,
            orders,
        }
    }
}

impl<C, P, O> CreateOrderWorkflow<C, P, O>
where
    C: CustomerLookup,
    P: ProductCatalog,
    O: OrderStore,
{
    /// Validate the request, persist the order and decrement stock.
    ///
    /// Errors are returned as soon as they are detected and are not logged
    /// here; presenting them is the caller's job.
    #[instrument(
        skip(self, command),
        fields(customer_id = %command.customer_id, lines = command.lines.len())
    )]
    pub fn execute(&self, command: CreateOrder) -> Result<Order, CreateOrderError> {
        // 1) Customer
        let customer = self
            .customers
            .find_by_id(&command.customer_id)?
            .ok_or_else(|| CreateOrderError::CustomerNotFound(command.customer_id.clone()))?;

        // 2) Shape
        command.validate()?;

        // 3) Snapshot
        let snapshot = self
            .catalog
            .find_all_by_id(&command.catalog_query())?
            .ok_or(CreateOrderError::ProductCatalogUnavailable)?;
        debug!(products = snapshot.len(), "catalog snapshot loaded");

        // 4) Validate + price
        let line_items = reserve(&snapshot, &command.lines)?;

        // 5) Persist
        let order = self.orders.create(NewOrder {
            customer,
            line_items,
        })?;
        debug!(order_id = %order.id, "order persisted");

        // 6) Stock, computed from what the store actually recorded
        let adjustments = stock_adjustments(&snapshot, &order.line_items)?;
        self.catalog.update_quantity(&adjustments)?;

        info!(
            order_id = %order.id,
            line_items = order.line_items.len(),
            total = ?order.total(),
            "order created"
        );
        Ok(order)
    }
}
