//! Products domain module (catalog entries and stock levels).
//!
//! Pure data: catalog persistence is provided by implementations of the sales
//! crate's `ProductCatalog` port.

pub mod product;

pub use product::{CatalogProduct, ProductId, ProductQuantity};
