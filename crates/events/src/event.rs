use chrono::{DateTime, Utc};

/// A fact recorded by an aggregate.
///
/// Cart events are never persisted, but naming and timestamping them keeps
/// the cart's history inspectable in logs and lets a session be replayed.
pub trait Event: Clone + core::fmt::Debug + Send + Sync + 'static {
    /// Stable event name (e.g. "cart.line_added").
    fn event_type(&self) -> &'static str;

    /// Schema version for this event type.
    fn version(&self) -> u32;

    /// When the shopper's action happened.
    fn occurred_at(&self) -> DateTime<Utc>;
}
