//! Infrastructure layer: in-memory adapters and the application workflows that
//! compose them.

pub mod accept_order;
pub mod projection;
pub mod store;

pub use accept_order::{AcceptError, AcceptOrderWorkflow, AcceptOutcome, OutcomeKind};
pub use projection::OrderStatusProjection;
pub use store::{
    InMemoryOrderStore, StoreError, StubOrderLookup, StubPickupCodeService, TransitionError,
};
