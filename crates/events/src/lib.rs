//! Event contract shared by the storefront aggregates.

mod event;

pub use event::Event;
