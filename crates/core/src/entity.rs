//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// Asset records are entities: two snapshots may report the same `item_id`
/// with a different quantity, and they still describe one physical stack.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}
