//! In-memory store adapter.
//!
//! Rows live in three sets per table: staged (added, not yet flushed),
//! flushed (written by `save`, not yet durable), and committed (visible to
//! reads). The unit of work moves rows between the sets; repositories stage
//! inserts and read committed rows only. Store constraints, currently the
//! unique user email, are checked when staged rows flush, which is where a
//! relational store would raise them too.
//!
//! All repositories and units of work handed out by one [`MemoryStore`]
//! share the same state behind one mutex, so they behave like sessions on
//! one database.

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use crate::domain::entity::Entity;
use crate::domain::forecast::Forecast;
use crate::domain::ports::{
    ForecastRepository, Repository, StoreError, UnitOfWork, UserRepository,
};
use crate::domain::specification::{
    EmailEqualsSpecification, Specification, TemperatureRangeSpecification,
    UpcomingWeekSpecification,
};
use crate::domain::user::User;

/// Rows of one entity type across the three lifecycle sets.
struct Rows<E> {
    committed: Vec<E>,
    staged: Vec<E>,
    flushed: Vec<E>,
}

impl<E> Rows<E> {
    fn commit(&mut self) {
        self.committed.append(&mut self.flushed);
    }

    fn rollback(&mut self) {
        self.staged.clear();
        self.flushed.clear();
    }
}

// Manual impl: the derive would bound `E: Default`.
impl<E> Default for Rows<E> {
    fn default() -> Self {
        Self {
            committed: Vec::new(),
            staged: Vec::new(),
            flushed: Vec::new(),
        }
    }
}

/// Both tables plus the transaction flag, guarded by one mutex.
#[derive(Default)]
struct StoreState {
    users: Rows<User>,
    forecasts: Rows<Forecast>,
    in_transaction: bool,
}

impl StoreState {
    /// Move staged rows to flushed, enforcing store constraints first.
    fn flush_staged(&mut self) -> Result<usize, StoreError> {
        self.check_unique_emails()?;
        let affected = self.users.staged.len() + self.forecasts.staged.len();
        self.users.flushed.append(&mut self.users.staged);
        self.forecasts.flushed.append(&mut self.forecasts.staged);
        Ok(affected)
    }

    /// Emails compare ordinally, against every row the flush would join.
    fn check_unique_emails(&self) -> Result<(), StoreError> {
        for (index, staged) in self.users.staged.iter().enumerate() {
            let duplicated = self
                .users
                .committed
                .iter()
                .chain(&self.users.flushed)
                .chain(self.users.staged.iter().take(index))
                .any(|existing| existing.email() == staged.email());
            if duplicated {
                warn!(email = staged.email(), "unique email constraint violated");
                return Err(StoreError::constraint(format!(
                    "duplicate user email: {}",
                    staged.email()
                )));
            }
        }
        Ok(())
    }

    fn commit(&mut self) {
        self.users.commit();
        self.forecasts.commit();
        self.in_transaction = false;
    }

    fn rollback(&mut self) {
        self.users.rollback();
        self.forecasts.rollback();
        self.in_transaction = false;
    }
}

fn lock(state: &Mutex<StoreState>) -> Result<MutexGuard<'_, StoreState>, StoreError> {
    state
        .lock()
        .map_err(|_| StoreError::connection("store mutex poisoned"))
}

/// Shared in-memory store.
///
/// Cloning is cheap and every clone shares the same state, as do the
/// repositories and units of work the accessors hand out.
#[derive(Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<StoreState>>,
}

impl MemoryStore {
    /// An empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A user repository over this store.
    #[must_use]
    pub fn user_repository(&self) -> MemoryUserRepository {
        MemoryRepository {
            state: Arc::clone(&self.state),
            select: |state| &state.users,
            select_mut: |state| &mut state.users,
        }
    }

    /// A forecast repository over this store.
    #[must_use]
    pub fn forecast_repository(&self) -> MemoryForecastRepository {
        MemoryRepository {
            state: Arc::clone(&self.state),
            select: |state| &state.forecasts,
            select_mut: |state| &mut state.forecasts,
        }
    }

    /// A unit of work over this store.
    #[must_use]
    pub fn unit_of_work(&self) -> MemoryUnitOfWork {
        MemoryUnitOfWork {
            state: Arc::clone(&self.state),
        }
    }
}

/// Repository over one table of the shared store.
pub struct MemoryRepository<E: Entity> {
    state: Arc<Mutex<StoreState>>,
    select: fn(&StoreState) -> &Rows<E>,
    select_mut: fn(&mut StoreState) -> &mut Rows<E>,
}

/// User repository over the shared store.
pub type MemoryUserRepository = MemoryRepository<User>;
/// Forecast repository over the shared store.
pub type MemoryForecastRepository = MemoryRepository<Forecast>;

impl<E: Entity> Clone for MemoryRepository<E> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            select: self.select,
            select_mut: self.select_mut,
        }
    }
}

#[async_trait]
impl<E: Entity> Repository<E> for MemoryRepository<E> {
    async fn add(&self, entity: E) -> Result<(), StoreError> {
        let mut state = lock(&self.state)?;
        (self.select_mut)(&mut state).staged.push(entity);
        Ok(())
    }

    async fn get_all(&self) -> Result<Vec<E>, StoreError> {
        let state = lock(&self.state)?;
        Ok((self.select)(&state).committed.clone())
    }

    async fn get_by_id(&self, id: &E::Id) -> Result<Option<E>, StoreError> {
        let state = lock(&self.state)?;
        Ok((self.select)(&state)
            .committed
            .iter()
            .find(|entity| entity.id() == id)
            .cloned())
    }

    async fn find_by_specification(
        &self,
        specification: &dyn Specification<E>,
    ) -> Result<Vec<E>, StoreError> {
        let state = lock(&self.state)?;
        Ok((self.select)(&state)
            .committed
            .iter()
            .filter(|entity| specification.is_satisfied_by(entity))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl UserRepository for MemoryRepository<User> {
    async fn get_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let specification = EmailEqualsSpecification::new(email);
        Ok(self
            .find_by_specification(&specification)
            .await?
            .into_iter()
            .next())
    }
}

#[async_trait]
impl ForecastRepository for MemoryRepository<Forecast> {
    async fn get_upcoming_week(&self, today: DateTime<Utc>) -> Result<Vec<Forecast>, StoreError> {
        self.find_by_specification(&UpcomingWeekSpecification::starting(today))
            .await
    }

    async fn get_by_temperature_range(
        &self,
        min: i32,
        max: i32,
    ) -> Result<Vec<Forecast>, StoreError> {
        self.find_by_specification(&TemperatureRangeSpecification::new(min, max))
            .await
    }
}

/// Unit of work over the shared store.
///
/// The transaction flag lives in the shared state, like a transaction on a
/// shared database session: any unit of work over the same store operates
/// on the one open transaction. Dropping a unit of work while a transaction
/// is open rolls it back, so an abandoned operation cannot leak staged
/// writes into later reads.
pub struct MemoryUnitOfWork {
    state: Arc<Mutex<StoreState>>,
}

#[async_trait]
impl UnitOfWork for MemoryUnitOfWork {
    async fn begin_transaction(&self) -> Result<(), StoreError> {
        let mut state = lock(&self.state)?;
        if state.in_transaction {
            return Err(StoreError::transaction(
                "a transaction is already in progress",
            ));
        }
        state.in_transaction = true;
        debug!("transaction opened");
        Ok(())
    }

    async fn save(&self) -> Result<usize, StoreError> {
        let mut state = lock(&self.state)?;
        if !state.in_transaction {
            return Err(StoreError::transaction("save requires an open transaction"));
        }
        let affected = state.flush_staged()?;
        debug!(affected, "staged changes flushed");
        Ok(affected)
    }

    async fn commit_transaction(&self) -> Result<(), StoreError> {
        let mut state = lock(&self.state)?;
        if !state.in_transaction {
            return Ok(());
        }
        state.commit();
        debug!("transaction committed");
        Ok(())
    }

    async fn rollback_transaction(&self) -> Result<(), StoreError> {
        let mut state = lock(&self.state)?;
        if !state.in_transaction {
            return Ok(());
        }
        state.rollback();
        debug!("transaction rolled back");
        Ok(())
    }
}

impl Drop for MemoryUnitOfWork {
    fn drop(&mut self) {
        let Ok(mut state) = self.state.lock() else {
            return;
        };
        if state.in_transaction {
            warn!("unit of work dropped with an open transaction; rolling back");
            state.rollback();
        }
    }
}

#[cfg(test)]
#[path = "memory_tests.rs"]
mod tests;
