//! Catalog-read boundary.
//!
//! The store contract is "return everything currently stored", with no
//! pagination. A source either returns a list or a [`CatalogError`]; callers
//! must cope with an empty list.

use std::path::{Path, PathBuf};

use serde_json::Value;
use thiserror::Error;

use thriftup_core::ProductId;

use crate::product::{Product, ProductRecord};

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("catalog is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("catalog must be a JSON array of products")]
    NotAList,
}

/// Anything that can list the current products.
pub trait ProductSource {
    fn list_products(&self) -> Result<Vec<Product>, CatalogError>;
}

/// Parse a catalog document into validated products.
///
/// `null` and `[]` both yield an empty list. Records that fail validation are
/// skipped with a warning rather than failing the whole catalog.
pub fn parse_catalog(json: &str) -> Result<Vec<Product>, CatalogError> {
    let document: Value = serde_json::from_str(json)?;
    let records = match document {
        Value::Null => return Ok(Vec::new()),
        Value::Array(records) => records,
        _ => return Err(CatalogError::NotAList),
    };

    let total = records.len();
    let mut products = Vec::with_capacity(total);
    for (index, value) in records.into_iter().enumerate() {
        let record: ProductRecord = match serde_json::from_value(value) {
            Ok(record) => record,
            Err(e) => {
                tracing::warn!(index, error = %e, "skipping malformed catalog record");
                continue;
            }
        };
        match Product::try_from(record) {
            Ok(product) => products.push(product),
            Err(e) => tracing::warn!(index, error = %e, "skipping invalid catalog record"),
        }
    }

    tracing::debug!(total, accepted = products.len(), "catalog parsed");
    Ok(products)
}

pub fn find_product<'a>(products: &'a [Product], id: &ProductId) -> Option<&'a Product> {
    products.iter().find(|p| &p.id == id)
}

/// Vector-backed catalog. Later inserts are treated as newer listings and are
/// returned first, matching the store's newest-first ordering.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    products: Vec<Product>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a listing by id.
    pub fn upsert(&mut self, product: Product) {
        match self.products.iter_mut().find(|p| p.id == product.id) {
            Some(existing) => *existing = product,
            None => self.products.push(product),
        }
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl FromIterator<Product> for InMemoryCatalog {
    fn from_iter<T: IntoIterator<Item = Product>>(iter: T) -> Self {
        let mut catalog = InMemoryCatalog::new();
        for product in iter {
            catalog.upsert(product);
        }
        catalog
    }
}

impl ProductSource for InMemoryCatalog {
    fn list_products(&self) -> Result<Vec<Product>, CatalogError> {
        Ok(self.products.iter().rev().cloned().collect())
    }
}

/// Catalog exported to a JSON file (an array of store documents).
#[derive(Debug, Clone)]
pub struct JsonFileCatalog {
    path: PathBuf,
}

impl JsonFileCatalog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ProductSource for JsonFileCatalog {
    fn list_products(&self) -> Result<Vec<Product>, CatalogError> {
        let json = std::fs::read_to_string(&self.path).map_err(|source| CatalogError::Io {
            path: self.path.clone(),
            source,
        })?;
        let products = parse_catalog(&json)?;
        tracing::info!(path = %self.path.display(), count = products.len(), "catalog loaded");
        Ok(products)
    }
}
