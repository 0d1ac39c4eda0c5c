//! Storefront session: catalog, cart and checkout wired together per shopper.
//!
//! A `Session` is the explicit handle UI code holds instead of reaching for a
//! global cart. All cart mutation goes through it.

pub mod config;
pub mod error;
pub mod session;

pub use config::{ConfigError, StorefrontConfig};
pub use error::StorefrontError;
pub use session::Session;
