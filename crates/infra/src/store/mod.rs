//! Order store adapters.

pub mod in_memory;
pub mod stub;

pub use in_memory::{InMemoryOrderStore, StoreError, TransitionError};
pub use stub::{StubOrderLookup, StubPickupCodeService};
