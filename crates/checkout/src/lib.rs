//! Checkout hand-off.
//!
//! Renders a cart and the buyer's details into a WhatsApp message and deep
//! link. Fulfilment happens between humans after that; nothing here waits
//! for or observes delivery.

pub mod buyer;
pub mod fee;
pub mod link;
pub mod message;

pub use buyer::{BuyerField, BuyerInfo};
pub use fee::FeePolicy;
pub use link::{WhatsAppLink, encode_uri_component};
pub use message::{CheckoutMessage, MessageLine, compose_message};
