use storefront_parties::{Customer, CustomerId};
use storefront_sales::{CustomerLookup, RepositoryError};

use super::entity_store::InMemoryEntityStore;

/// Customer directory backed by memory.
#[derive(Debug, Default)]
pub struct InMemoryCustomerDirectory {
    customers: InMemoryEntityStore<Customer>,
}

impl InMemoryCustomerDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, customer: Customer) -> Result<(), RepositoryError> {
        self.customers.upsert(customer)
    }
}

impl CustomerLookup for InMemoryCustomerDirectory {
    fn find_by_id(&self, id: &CustomerId) -> Result<Option<Customer>, RepositoryError> {
        self.customers.get(id)
    }
}
