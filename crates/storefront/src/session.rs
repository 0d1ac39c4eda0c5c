use thriftup_cart::Cart;
use thriftup_checkout::{BuyerInfo, CheckoutMessage, compose_message};
use thriftup_core::{DomainError, ProductId, SessionId};
use thriftup_products::{Product, ProductSource, find_product};

use crate::config::StorefrontConfig;
use crate::error::StorefrontError;

/// One shopper's browsing session.
pub struct Session<S> {
    source: S,
    products: Vec<Product>,
    cart: Cart,
    config: StorefrontConfig,
}

impl<S: ProductSource> Session<S> {
    /// Start a session with an empty cart and no products loaded yet.
    pub fn new(source: S, config: StorefrontConfig) -> Self {
        Self::with_id(SessionId::new(), source, config)
    }

    /// Start a session configured from the `THRIFTUP_*` environment.
    pub fn from_env(source: S) -> Result<Self, StorefrontError> {
        Self::from_lookup(source, |key| std::env::var(key).ok())
    }

    /// Start a session configured from an arbitrary key lookup.
    pub fn from_lookup<F>(source: S, lookup: F) -> Result<Self, StorefrontError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = StorefrontConfig::from_lookup(lookup)?;
        Ok(Self::new(source, config))
    }

    pub fn with_id(id: SessionId, source: S, config: StorefrontConfig) -> Self {
        Self {
            source,
            products: Vec::new(),
            cart: Cart::with_policy(id, config.stock_policy),
            config,
        }
    }

    pub fn id(&self) -> SessionId {
        self.cart.session_id()
    }

    pub fn config(&self) -> &StorefrontConfig {
        &self.config
    }

    /// Reload listings from the source.
    ///
    /// On failure the session is left with an empty product list and the
    /// error is returned; the cart is untouched either way.
    pub fn refresh_catalog(&mut self) -> Result<&[Product], StorefrontError> {
        match self.source.list_products() {
            Ok(products) => {
                tracing::info!(session = %self.id(), count = products.len(), "catalog refreshed");
                self.products = products;
                Ok(&self.products)
            }
            Err(e) => {
                tracing::warn!(session = %self.id(), error = %e, "catalog refresh failed");
                self.products.clear();
                Err(e.into())
            }
        }
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Add one unit of a listed product.
    pub fn add(&mut self, product_id: &ProductId) -> Result<(), StorefrontError> {
        let product = find_product(&self.products, product_id)
            .cloned()
            .ok_or_else(DomainError::not_found)?;
        self.cart.add_to_cart(product)?;
        Ok(())
    }

    pub fn remove(&mut self, product_id: &ProductId) -> Result<(), StorefrontError> {
        self.cart.remove_from_cart(product_id)?;
        Ok(())
    }

    pub fn clear(&mut self) -> Result<(), StorefrontError> {
        self.cart.clear_cart()?;
        Ok(())
    }

    /// Compose the order message and hand off.
    ///
    /// The cart is cleared only when a message was produced. Nothing confirms
    /// that the message is ever sent.
    pub fn checkout(&mut self, buyer: &BuyerInfo) -> Result<CheckoutMessage, StorefrontError> {
        let message = compose_message(
            self.cart.lines(),
            buyer,
            &self.config.fee,
            &self.config.channel,
        )?;
        self.cart.clear_cart()?;
        tracing::info!(
            session = %self.id(),
            grand_total = message.grand_total.amount(),
            "checkout handed off"
        );
        Ok(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use thriftup_cart::{CartState, StockPolicy};
    use thriftup_checkout::{FeePolicy, WhatsAppLink};
    use thriftup_core::Money;
    use thriftup_products::{CatalogError, InMemoryCatalog};

    struct FailingSource;

    impl ProductSource for FailingSource {
        fn list_products(&self) -> Result<Vec<Product>, CatalogError> {
            Err(CatalogError::NotAList)
        }
    }

    fn config(stock_policy: StockPolicy) -> StorefrontConfig {
        StorefrontConfig {
            channel: WhatsAppLink::with_default_base("6281234567890").unwrap(),
            fee: FeePolicy::default(),
            stock_policy,
        }
    }

    fn pid(s: &str) -> ProductId {
        ProductId::new(s).unwrap()
    }

    fn catalog() -> InMemoryCatalog {
        vec![
            Product::new(pid("jaket"), "Jaket", Money::new(150_000)).with_stock(1),
            Product::new(pid("sepatu"), "Sepatu", Money::new(200_000)).with_stock(5),
        ]
        .into_iter()
        .collect()
    }

    fn buyer() -> BuyerInfo {
        BuyerInfo::new("Sari", "081234567890", "Jl. Merdeka 1")
    }

    #[test]
    fn add_requires_a_loaded_product() {
        let mut session = Session::new(catalog(), config(StockPolicy::Unchecked));
        let err = session.add(&pid("jaket")).unwrap_err();
        assert!(matches!(err, StorefrontError::Domain(DomainError::NotFound)));

        session.refresh_catalog().unwrap();
        session.add(&pid("jaket")).unwrap();
        assert_eq!(session.cart().quantity_of(&pid("jaket")), 1);
    }

    #[test]
    fn failed_refresh_leaves_empty_catalog_and_cart_intact() {
        let mut session = Session::new(FailingSource, config(StockPolicy::Unchecked));
        assert!(session.refresh_catalog().is_err());
        assert!(session.products().is_empty());
        assert_eq!(session.cart().state(), CartState::Empty);
    }

    #[test]
    fn enforce_policy_from_config_reaches_the_cart() {
        let mut session = Session::new(catalog(), config(StockPolicy::Enforce));
        assert_eq!(session.cart().stock_policy(), StockPolicy::Enforce);
        session.refresh_catalog().unwrap();
        session.add(&pid("jaket")).unwrap();
        assert!(session.add(&pid("jaket")).is_err());
    }

    #[test]
    fn session_from_lookup_applies_config() {
        let session = Session::from_lookup(catalog(), |key| match key {
            "THRIFTUP_STOCK_POLICY" => Some("enforce".to_string()),
            "THRIFTUP_SERVICE_FEE" => Some("none".to_string()),
            _ => None,
        })
        .unwrap();

        assert_eq!(session.cart().stock_policy(), StockPolicy::Enforce);
        assert_eq!(session.config().fee, FeePolicy::None);
    }

    #[test]
    fn invalid_config_is_a_config_error() {
        let result = Session::from_lookup(catalog(), |key| {
            (key == "THRIFTUP_SERVICE_FEE").then(|| "lots".to_string())
        });

        match result {
            Err(StorefrontError::Config(e)) => assert_eq!(e.var, "THRIFTUP_SERVICE_FEE"),
            Err(other) => panic!("Expected Config error, got {other:?}"),
            Ok(_) => panic!("Expected Config error, got a session"),
        }
    }

    #[test]
    fn checkout_clears_cart_only_on_success() {
        let mut session = Session::new(catalog(), config(StockPolicy::Unchecked));
        session.refresh_catalog().unwrap();
        session.add(&pid("jaket")).unwrap();

        let err = session.checkout(&BuyerInfo::new("Sari", "", "")).unwrap_err();
        assert!(err.is_validation());
        assert_eq!(session.cart().state(), CartState::NonEmpty);

        let message = session.checkout(&buyer()).unwrap();
        assert_eq!(message.grand_total, Money::new(165_000));
        assert_eq!(session.cart().state(), CartState::Empty);
    }
}
