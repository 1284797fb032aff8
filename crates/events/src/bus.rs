//! Event publishing abstraction (mechanics only).
//!
//! The application layer hands finished events to an [`EventPublisher`] and keeps no
//! reference to them afterwards. What happens next (fan-out to subscribers, applying
//! to a read model, recording for a test) is the publisher's business.
//!
//! Publication is synchronous. There is no queueing or backpressure; a publisher
//! that cannot accept a message says so through its `Error` type and the caller
//! decides what to do with it.

use std::sync::Arc;
use std::sync::mpsc::{Receiver, TryRecvError};

/// A subscription to messages published on an in-process bus.
///
/// Each subscription gets its own copy of every message published after it was
/// created (broadcast semantics). Publishing is synchronous, so a consumer on the
/// publishing thread drains what is queued after each publish:
///
/// ```ignore
/// let bus = InMemoryEventBus::new();
/// let subscription = bus.subscribe();
///
/// workflow.accept_by_order_id(&order_id)?;
/// for event in subscription.drain() {
///     projection.apply(&event)?;
/// }
/// ```
#[derive(Debug)]
pub struct Subscription<M> {
    receiver: Receiver<M>,
}

impl<M> Subscription<M> {
    pub fn new(receiver: Receiver<M>) -> Self {
        Self { receiver }
    }

    /// Try to receive a message without blocking.
    pub fn try_recv(&self) -> Result<M, TryRecvError> {
        self.receiver.try_recv()
    }

    /// Take every message that is already queued, without blocking.
    pub fn drain(&self) -> Vec<M> {
        self.receiver.try_iter().collect()
    }
}

/// Hands a message off to zero or more consumers.
///
/// `publish` takes ownership of the message. Failures are surfaced to the caller and
/// must never be swallowed by the implementation.
///
/// The trait requires `Send + Sync` so one publisher can be shared by every caller
/// in the process.
pub trait EventPublisher<M>: Send + Sync {
    type Error: core::fmt::Debug + Send + Sync + 'static;

    fn publish(&self, message: M) -> Result<(), Self::Error>;
}

impl<M, P> EventPublisher<M> for Arc<P>
where
    P: EventPublisher<M> + ?Sized,
{
    type Error = P::Error;

    fn publish(&self, message: M) -> Result<(), Self::Error> {
        (**self).publish(message)
    }
}

impl<M, P> EventPublisher<M> for &P
where
    P: EventPublisher<M> + ?Sized,
{
    type Error = P::Error;

    fn publish(&self, message: M) -> Result<(), Self::Error> {
        (**self).publish(message)
    }
}
