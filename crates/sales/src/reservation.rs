//! Stock reservation over a catalog snapshot.
//!
//! Pure functions: given the products fetched once from the catalog, decide
//! whether a request can be fulfilled, price its lines, and compute the stock
//! levels left once an order has been persisted. Nothing here re-reads the
//! catalog.

use std::collections::HashMap;

use storefront_products::{CatalogProduct, ProductId, ProductQuantity};

use crate::error::CreateOrderError;
use crate::order::{OrderLineRecord, OrderLineRequest};

fn index(snapshot: &[CatalogProduct]) -> HashMap<&ProductId, &CatalogProduct> {
    let mut by_id = HashMap::with_capacity(snapshot.len());
    for product in snapshot {
        by_id.entry(product.id_typed()).or_insert(product);
    }
    by_id
}

/// Validate `lines` against the snapshot and stamp each with its catalog price.
///
/// Existence is checked for every line before any stock check, so a missing
/// product wins over an earlier line with insufficient stock. Lines repeating
/// a product are checked against that product's running total.
pub fn reserve(
    snapshot: &[CatalogProduct],
    lines: &[OrderLineRequest],
) -> Result<Vec<OrderLineRecord>, CreateOrderError> {
    let catalog = index(snapshot);

    let matched = lines
        .iter()
        .map(|line| {
            catalog
                .get(&line.product_id)
                .map(|product| (line, *product))
                .ok_or_else(|| CreateOrderError::ProductNotFound(line.product_id.clone()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut reserved: HashMap<&ProductId, i64> = HashMap::new();
    for (line, product) in &matched {
        let total = reserved.entry(&line.product_id).or_insert(0);
        // A running total past i64::MAX can never be in stock.
        let next = total.checked_add(line.quantity);
        *total = next.unwrap_or(i64::MAX);
        if next.is_none() || !product.has_stock_for(*total) {
            return Err(CreateOrderError::InsufficientStock {
                product_id: line.product_id.clone(),
                requested: *total,
            });
        }
    }

    Ok(matched
        .into_iter()
        .map(|(line, product)| OrderLineRecord {
            product_id: line.product_id.clone(),
            quantity: line.quantity,
            price: product.price(),
        })
        .collect())
}

/// New stock levels after `line_items` have been taken from the snapshot.
///
/// One entry per product, in order of first appearance.
pub fn stock_adjustments(
    snapshot: &[CatalogProduct],
    line_items: &[OrderLineRecord],
) -> Result<Vec<ProductQuantity>, CreateOrderError> {
    let catalog = index(snapshot);
    let mut adjustments: Vec<ProductQuantity> = Vec::new();

    for line in line_items {
        let Some(product) = catalog.get(&line.product_id) else {
            return Err(CreateOrderError::UnexpectedLineItem(line.product_id.clone()));
        };

        let overflow = || CreateOrderError::StockOverflow(line.product_id.clone());
        match adjustments.iter_mut().find(|a| a.id == line.product_id) {
            Some(existing) => {
                existing.quantity = existing
                    .quantity
                    .checked_sub(line.quantity)
                    .ok_or_else(overflow)?;
            }
            None => {
                let remaining = product
                    .quantity()
                    .checked_sub(line.quantity)
                    .ok_or_else(overflow)?;
                adjustments.push(ProductQuantity::new(line.product_id.clone(), remaining));
            }
        }
    }

    Ok(adjustments)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn pid(s: &str) -> ProductId {
        s.parse().unwrap()
    }

    fn product(id: &str, price_cents: i64, quantity: i64) -> CatalogProduct {
        CatalogProduct::new(pid(id), format!("Product {id}"), Decimal::new(price_cents, 2), quantity)
            .unwrap()
    }

    fn line(id: &str, quantity: i64) -> OrderLineRequest {
        OrderLineRequest::new(pid(id), quantity)
    }

    #[test]
    fn reserve_prices_lines_in_request_order() {
        let snapshot = vec![product("p1", 1000, 5), product("p2", 250, 10)];
        let records = reserve(&snapshot, &[line("p2", 4), line("p1", 3)]).unwrap();

        assert_eq!(
            records,
            vec![
                OrderLineRecord {
                    product_id: pid("p2"),
                    quantity: 4,
                    price: Decimal::new(250, 2),
                },
                OrderLineRecord {
                    product_id: pid("p1"),
                    quantity: 3,
                    price: Decimal::new(1000, 2),
                },
            ]
        );
    }

    #[test]
    fn reserve_reports_first_missing_product() {
        let snapshot = vec![product("p1", 1000, 5)];
        let err = reserve(&snapshot, &[line("p1", 1), line("p3", 1), line("p2", 1)]).unwrap_err();
        assert_eq!(err, CreateOrderError::ProductNotFound(pid("p3")));
    }

    #[test]
    fn missing_product_wins_over_earlier_stock_shortage() {
        let snapshot = vec![product("p1", 1000, 5)];
        let err = reserve(&snapshot, &[line("p1", 50), line("p2", 1)]).unwrap_err();
        assert_eq!(err, CreateOrderError::ProductNotFound(pid("p2")));
    }

    #[test]
    fn reserve_reports_first_line_exceeding_stock() {
        let snapshot = vec![product("p1", 1000, 5), product("p2", 100, 1)];
        let err = reserve(&snapshot, &[line("p1", 5), line("p2", 2), line("p1", 9)]).unwrap_err();
        assert_eq!(
            err,
            CreateOrderError::InsufficientStock {
                product_id: pid("p2"),
                requested: 2,
            }
        );
    }

    #[test]
    fn repeated_product_is_checked_against_running_total() {
        let snapshot = vec![product("p1", 1000, 5)];
        let err = reserve(&snapshot, &[line("p1", 3), line("p1", 3)]).unwrap_err();
        assert_eq!(
            err,
            CreateOrderError::InsufficientStock {
                product_id: pid("p1"),
                requested: 6,
            }
        );

        assert!(reserve(&snapshot, &[line("p1", 2), line("p1", 3)]).is_ok());
    }

    #[test]
    fn running_total_past_i64_max_is_insufficient_stock() {
        let snapshot = vec![product("p1", 1000, i64::MAX)];
        let err = reserve(&snapshot, &[line("p1", i64::MAX), line("p1", 1)]).unwrap_err();
        assert_eq!(
            err,
            CreateOrderError::InsufficientStock {
                product_id: pid("p1"),
                requested: i64::MAX,
            }
        );

        assert!(reserve(&snapshot, &[line("p1", i64::MAX)]).is_ok());
    }

    #[test]
    fn stock_adjustments_report_overflow_instead_of_wrapping() {
        let snapshot = vec![product("p1", 1000, i64::MIN)];
        let record = OrderLineRecord {
            product_id: pid("p1"),
            quantity: 1,
            price: Decimal::ONE,
        };
        let err = stock_adjustments(&snapshot, &[record]).unwrap_err();
        assert_eq!(err, CreateOrderError::StockOverflow(pid("p1")));

        let snapshot = vec![product("p1", 1000, 0)];
        let big = OrderLineRecord {
            product_id: pid("p1"),
            quantity: i64::MAX,
            price: Decimal::ONE,
        };
        let err = stock_adjustments(&snapshot, &[big.clone(), big]).unwrap_err();
        assert_eq!(err, CreateOrderError::StockOverflow(pid("p1")));
    }

    #[test]
    fn stock_adjustments_merge_repeated_products() {
        let snapshot = vec![product("p1", 1000, 5), product("p2", 100, 8)];
        let records = reserve(&snapshot, &[line("p1", 2), line("p2", 8), line("p1", 3)]).unwrap();
        let adjustments = stock_adjustments(&snapshot, &records).unwrap();

        assert_eq!(
            adjustments,
            vec![
                ProductQuantity::new(pid("p1"), 0),
                ProductQuantity::new(pid("p2"), 0),
            ]
        );
    }

    #[test]
    fn stock_adjustments_reject_lines_outside_snapshot() {
        let snapshot = vec![product("p1", 1000, 5)];
        let stray = OrderLineRecord {
            product_id: pid("p9"),
            quantity: 1,
            price: Decimal::ONE,
        };
        let err = stock_adjustments(&snapshot, &[stray]).unwrap_err();
        assert_eq!(err, CreateOrderError::UnexpectedLineItem(pid("p9")));
    }
}
