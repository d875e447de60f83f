//! Storage traits and implementations

mod locks;
mod memory;
mod traits;

pub use locks::{EntityGuard, LockManager};
pub use memory::InMemoryStorage;
pub use traits::Storage;
