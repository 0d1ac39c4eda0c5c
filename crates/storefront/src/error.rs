use thiserror::Error;

use thriftup_core::DomainError;
use thriftup_products::CatalogError;

use crate::config::ConfigError;

#[derive(Debug, Error)]
pub enum StorefrontError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl StorefrontError {
    /// True for failures the shopper can fix by correcting the form.
    pub fn is_validation(&self) -> bool {
        matches!(self, StorefrontError::Domain(e) if e.is_validation())
    }
}
