//! Product listings and the catalog-read boundary.
//!
//! Listings are owned by an external document store. This crate defines the
//! one canonical `Product` shape the rest of the storefront sees, and
//! validates raw catalog documents into it.

pub mod catalog;
pub mod product;

pub use catalog::{
    CatalogError, InMemoryCatalog, JsonFileCatalog, ProductSource, find_product, parse_catalog,
};
pub use product::{Product, ProductDraft, ProductRecord};
