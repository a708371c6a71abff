use rust_decimal::Decimal;
use tracing::debug;

use storefront_products::{CatalogProduct, ProductId, ProductQuantity};
use storefront_sales::{ProductCatalog, RepositoryError};

use super::entity_store::InMemoryEntityStore;

/// Product catalog backed by memory.
///
/// Quantity updates are applied as one batch: if any id is unknown, nothing
/// is written.
#[derive(Debug, Default)]
pub struct InMemoryProductCatalog {
    products: InMemoryEntityStore<CatalogProduct>,
}

impl InMemoryProductCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, product: CatalogProduct) -> Result<(), RepositoryError> {
        self.products.upsert(product)
    }

    pub fn get(&self, id: &ProductId) -> Result<Option<CatalogProduct>, RepositoryError> {
        self.products.get(id)
    }

    pub fn set_price(&self, id: &ProductId, price: Decimal) -> Result<(), RepositoryError> {
        self.products.write(|map| {
            let product = map
                .get_mut(id)
                .ok_or_else(|| RepositoryError::Backend(format!("unknown product {id}")))?;
            product.set_price(price);
            Ok(())
        })
    }
}

impl ProductCatalog for InMemoryProductCatalog {
    fn find_all_by_id(
        &self,
        items: &[ProductQuantity],
    ) -> Result<Option<Vec<CatalogProduct>>, RepositoryError> {
        self.products
            .read(|map| {
                let mut found: Vec<CatalogProduct> = Vec::with_capacity(items.len());
                for item in items {
                    if found.iter().any(|p| p.id_typed() == &item.id) {
                        continue;
                    }
                    if let Some(product) = map.get(&item.id) {
                        found.push(product.clone());
                    }
                }
                found
            })
            .map(Some)
    }

    fn update_quantity(&self, items: &[ProductQuantity]) -> Result<(), RepositoryError> {
        self.products.write(|map| {
            if let Some(unknown) = items.iter().find(|i| !map.contains_key(&i.id)) {
                return Err(RepositoryError::Backend(format!("unknown product {}", unknown.id)));
            }
            for item in items {
                if let Some(product) = map.get_mut(&item.id) {
                    product.set_quantity(item.quantity);
                }
            }
            Ok(())
        })?;
        debug!(products = items.len(), "stock levels updated");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pid(s: &str) -> ProductId {
        s.parse().unwrap()
    }

    fn seeded() -> InMemoryProductCatalog {
        let catalog = InMemoryProductCatalog::new();
        for (id, qty) in [("p1", 5), ("p2", 7)] {
            catalog
                .insert(CatalogProduct::new(pid(id), id, Decimal::TEN, qty).unwrap())
                .unwrap();
        }
        catalog
    }

    #[test]
    fn find_all_by_id_returns_known_subset_once() {
        let catalog = seeded();
        let found = catalog
            .find_all_by_id(&[
                ProductQuantity::new(pid("p2"), 1),
                ProductQuantity::new(pid("p9"), 1),
                ProductQuantity::new(pid("p2"), 3),
            ])
            .unwrap()
            .unwrap();

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id_typed(), &pid("p2"));
    }

    #[test]
    fn update_quantity_is_all_or_nothing() {
        let catalog = seeded();
        let err = catalog
            .update_quantity(&[
                ProductQuantity::new(pid("p1"), 0),
                ProductQuantity::new(pid("p9"), 0),
            ])
            .unwrap_err();

        assert!(matches!(err, RepositoryError::Backend(msg) if msg.contains("p9")));
        assert_eq!(catalog.get(&pid("p1")).unwrap().unwrap().quantity(), 5);
    }

    #[test]
    fn update_quantity_overwrites_levels() {
        let catalog = seeded();
        catalog
            .update_quantity(&[
                ProductQuantity::new(pid("p1"), 2),
                ProductQuantity::new(pid("p2"), 0),
            ])
            .unwrap();

        assert_eq!(catalog.get(&pid("p1")).unwrap().unwrap().quantity(), 2);
        assert_eq!(catalog.get(&pid("p2")).unwrap().unwrap().quantity(), 0);
    }
}
