//! Shopping cart (event-sourced, session-local).
//!
//! Deterministic domain logic only: the cart has no persistence and lives as
//! long as the browsing session that owns it.

pub mod cart;

pub use cart::{
    AddToCart, Cart, CartCleared, CartCommand, CartEvent, CartLine, CartSnapshot, CartState,
    ClearCart, LineAdded, LineRemoved, QuantityChanged, RemoveFromCart, StockPolicy,
};
