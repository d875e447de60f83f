//! Notifications module
//!
//! Pub/sub event bus carrying booking, payment and facility events.
//! Subscribers decide delivery (UI feeds, push, email).

pub mod event_bus;
pub mod events;

pub use event_bus::{create_event_bus, EventBus, EventSubscriber, SharedEventBus};
pub use events::*;
