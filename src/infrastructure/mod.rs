//! Infrastructure layer - external concerns

pub mod storage;

pub use storage::{EntityGuard, InMemoryStorage, LockManager, Storage};
