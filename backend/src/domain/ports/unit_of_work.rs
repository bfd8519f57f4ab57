//! Transaction boundary port.

use async_trait::async_trait;

use super::store::StoreError;

/// Atomic scope over every repository sharing the same store session.
///
/// State machine: Idle -> InTransaction -> (Committed | RolledBack) -> Idle.
///
/// Contract:
/// - `begin_transaction` while a transaction is already open is a misuse
///   fault; this doubles as the guard that one unit of work serves one
///   operation at a time.
/// - `save` flushes staged mutations as one batch and reports how many
///   records it touched; store constraints are checked here.
/// - `commit_transaction` and `rollback_transaction` tolerate an idle
///   state as no-ops.
/// - Between begin and commit, either every staged mutation across every
///   repository sharing this unit of work becomes visible, or none does.
/// - Implementations discard any transaction still open when dropped, so
///   an abandoned operation cannot leak staged writes into later reads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    /// Open a transaction scope.
    async fn begin_transaction(&self) -> Result<(), StoreError>;

    /// Flush staged mutations; returns the affected-record count.
    async fn save(&self) -> Result<usize, StoreError>;

    /// Durably apply the flushed batch. No-op when idle.
    async fn commit_transaction(&self) -> Result<(), StoreError>;

    /// Discard staged and flushed mutations. No-op when idle.
    async fn rollback_transaction(&self) -> Result<(), StoreError>;
}
