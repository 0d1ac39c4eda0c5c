//! `thriftup-core`: storefront domain building blocks.
//!
//! Pure domain primitives shared by the catalog, cart and checkout crates
//! (no IO, no configuration, no logging setup).

pub mod aggregate;
pub mod entity;
pub mod error;
pub mod id;
pub mod money;
pub mod value_object;

pub use aggregate::{Aggregate, AggregateRoot};
pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::{ProductId, SessionId};
pub use money::Money;
pub use value_object::ValueObject;
