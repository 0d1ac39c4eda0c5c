//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// `Money` and `BuyerInfo` are value objects: two amounts of `Rp 10.000` are
/// interchangeable, and a buyer form carries no identity of its own.
/// Products are not (see [`crate::Entity`]).
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
