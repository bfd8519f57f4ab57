//! Store adapters.

pub mod memory;

pub use self::memory::{
    MemoryForecastRepository, MemoryRepository, MemoryStore, MemoryUnitOfWork,
    MemoryUserRepository,
};
