//! Generic persistence port.

use async_trait::async_trait;

use super::store::StoreError;
use crate::domain::entity::Entity;
use crate::domain::specification::Specification;

/// Generic persistence operations over one entity type.
///
/// Contract:
/// - `add` stages an insert in the surrounding unit-of-work scope; nothing
///   becomes visible to reads until the transaction flushes and commits.
/// - Reads see committed rows only, in insertion order where the store
///   preserves one.
/// - A missing row is `Ok(None)`, never an `Err`; errors are reserved for
///   store faults.
#[async_trait]
pub trait Repository<E: Entity>: Send + Sync {
    /// Stage `entity` for insertion in the current unit-of-work scope.
    async fn add(&self, entity: E) -> Result<(), StoreError>;

    /// Every committed entity of this type.
    async fn get_all(&self) -> Result<Vec<E>, StoreError>;

    /// Point lookup by identifier.
    async fn get_by_id(&self, id: &E::Id) -> Result<Option<E>, StoreError>;

    /// All committed entities satisfying `specification`.
    async fn find_by_specification(
        &self,
        specification: &dyn Specification<E>,
    ) -> Result<Vec<E>, StoreError>;
}
