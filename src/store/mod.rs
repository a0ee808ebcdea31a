//! Persistence: the store gateway, units of work, and an in-memory store.

mod gateway;
mod memory;
mod unit;

pub use gateway::{GameStore, StoreError};
pub use memory::InMemoryStore;
pub use unit::UnitOfWork;
