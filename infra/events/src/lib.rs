//! # Event Bus
//!
//! Type-keyed broadcast channels that let feature slices react to each
//! other without direct dependencies. The groups slice publishes membership
//! and seeding events here; the server subscribes and logs them.
//!
//! Channels are created lazily on first subscribe or publish and are keyed
//! by the event's Rust type.

mod bus;
mod error;
mod receiver;

pub use bus::{Event, EventBus};
pub use error::{EventBusError, EventBusErrorExt};
pub use receiver::EventReceiverExt;
