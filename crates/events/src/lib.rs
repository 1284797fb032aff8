//! Domain events and the publishing seam the application layer talks to.

pub mod bus;
pub mod event;
pub mod in_memory_bus;
pub mod recording;

pub use bus::{EventPublisher, Subscription};
pub use event::Event;
pub use in_memory_bus::{InMemoryBusError, InMemoryEventBus};
pub use recording::{RecordingError, RecordingPublisher};
