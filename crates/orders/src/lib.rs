//! Orders domain module.
//!
//! Order values, the accepted event, and the lookup ports the application layer
//! reads orders through. Pure domain logic: no IO, no storage.

pub mod event;
pub mod lookup;
pub mod order;

pub use event::OrderAcceptedEvent;
pub use lookup::{OrderLookup, PickupCodeService};
pub use order::{Order, OrderStatus};
