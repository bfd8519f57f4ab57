//! Store fault classification shared by the persistence ports.

use thiserror::Error;

/// Fault raised by the persistence store.
///
/// Store faults are fatal to the operation that encounters them: write
/// paths roll back their transaction and re-raise the fault unchanged.
/// Not-found lookups are not faults; they surface as `Ok(None)`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The store could not be reached or its session is unusable.
    #[error("store connection failed: {message}")]
    Connection {
        /// Human-readable connection failure details.
        message: String,
    },
    /// A data constraint rejected a staged write.
    #[error("store constraint violated: {message}")]
    Constraint {
        /// Which constraint was violated, and by what.
        message: String,
    },
    /// The unit-of-work state machine was misused.
    #[error("transaction misuse: {message}")]
    Transaction {
        /// What was attempted and why it is invalid.
        message: String,
    },
}

impl StoreError {
    /// Build a [`StoreError::Connection`] from any printable message.
    #[must_use]
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Build a [`StoreError::Constraint`] from any printable message.
    #[must_use]
    pub fn constraint(message: impl Into<String>) -> Self {
        Self::Constraint {
            message: message.into(),
        }
    }

    /// Build a [`StoreError::Transaction`] from any printable message.
    #[must_use]
    pub fn transaction(message: impl Into<String>) -> Self {
        Self::Transaction {
            message: message.into(),
        }
    }
}
