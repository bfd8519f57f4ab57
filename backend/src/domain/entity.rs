//! Base contract shared by persisted domain entities.

use std::fmt::Display;
use std::hash::Hash;

/// A persisted domain object with store-assigned identity.
///
/// Identifiers are assigned exactly once, at construction, and never change
/// afterwards; repositories key rows by [`Entity::Id`].
pub trait Entity: Clone + Send + Sync + 'static {
    /// Identifier type used to key this entity in the store.
    type Id: Clone + Eq + Hash + Display + Send + Sync;

    /// Stable identifier assigned at construction.
    fn id(&self) -> &Self::Id;
}
