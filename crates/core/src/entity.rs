//! Entity trait: records identified by id rather than by value.

/// A record whose identity survives changes to its other fields.
///
/// Two products with the same id are the same listing even if the price or
/// stock differs between snapshots.
pub trait Entity {
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    fn id(&self) -> &Self::Id;
}
