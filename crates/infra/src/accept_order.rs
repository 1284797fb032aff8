//! Order acceptance (application-level orchestration).
//!
//! `AcceptOrderWorkflow` drives the single transition `PENDING -> ACCEPTED`:
//!
//! ```text
//! order id
//!   ↓
//! 1. Look the order up (absent → NOT_FOUND)
//!   ↓
//! 2. Check it is pending (otherwise → INVALID_STATE)
//!   ↓
//! 3. Derive the accepted copy and publish OrderAcceptedEvent
//!   ↓
//! 4. Log the outcome
//! ```
//!
//! Collaborators are passed in explicitly: an [`OrderLookup`] to read through, an
//! [`EventPublisher`] to write through, and a [`Logger`] to report outcomes to. The
//! workflow holds no locks and mutates no shared state itself; whether two
//! concurrent acceptances of the same order can both succeed is decided by the
//! collaborators (see `InMemoryOrderStore::transition`).
//!
//! Business rejections (not found, not pending) are `Ok` outcomes. Collaborator
//! failures come back as [`AcceptError`] so callers can tell "no such order" from
//! "could not reach the order store". Nothing is retried here.

use chrono::Utc;
use thiserror::Error;

use orderflow_core::{DomainError, OrderId, PickupCode};
use orderflow_events::{Event, EventPublisher};
use orderflow_observability::Logger;
use orderflow_orders::{Order, OrderAcceptedEvent, OrderLookup, OrderStatus, PickupCodeService};

/// Technical failure while accepting an order.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AcceptError {
    /// The order lookup itself failed (as opposed to finding nothing).
    #[error("order lookup failed: {0}")]
    Lookup(String),
    /// The pickup code could not be resolved to an order id.
    #[error("pickup code resolution failed: {0}")]
    PickupCode(String),
    /// The accepted event could not be handed to the publisher.
    #[error("event publication failed: {0}")]
    Publish(String),
    /// A domain invariant refused the transition.
    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// Result of a completed acceptance attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AcceptOutcome {
    /// The order was pending and is now accepted.
    Accepted(Order),
    /// No order exists for the id.
    NotFound(OrderId),
    /// The order exists but was not pending.
    InvalidState { order_id: OrderId, status: OrderStatus },
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum OutcomeKind {
    Accepted,
    NotFound,
    InvalidState,
}

impl AcceptOutcome {
    pub fn kind(&self) -> OutcomeKind {
        match self {
            AcceptOutcome::Accepted(_) => OutcomeKind::Accepted,
            AcceptOutcome::NotFound(_) => OutcomeKind::NotFound,
            AcceptOutcome::InvalidState { .. } => OutcomeKind::InvalidState,
        }
    }

    pub fn order_id(&self) -> &OrderId {
        match self {
            AcceptOutcome::Accepted(order) => order.id(),
            AcceptOutcome::NotFound(order_id) => order_id,
            AcceptOutcome::InvalidState { order_id, .. } => order_id,
        }
    }

    pub fn accepted_order(&self) -> Option<&Order> {
        match self {
            AcceptOutcome::Accepted(order) => Some(order),
            _ => None,
        }
    }
}

impl core::fmt::Display for OutcomeKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(match self {
            OutcomeKind::Accepted => "ACCEPTED",
            OutcomeKind::NotFound => "NOT_FOUND",
            OutcomeKind::InvalidState => "INVALID_STATE",
        })
    }
}

/// Accepts pending orders.
///
/// ## Generic Parameters
///
/// - `L`: where orders are read from
/// - `P`: where `OrderAcceptedEvent`s go
/// - `G`: where outcome lines go
#[derive(Debug)]
pub struct AcceptOrderWorkflow<L, P, G> {
    lookup: L,
    publisher: P,
    logger: G,
}

impl<L, P, G> AcceptOrderWorkflow<L, P, G> {
    pub fn new(lookup: L, publisher: P, logger: G) -> Self {
        Self {
            lookup,
            publisher,
            logger,
        }
    }
}

impl<L, P, G> AcceptOrderWorkflow<L, P, G>
where
    L: OrderLookup,
    P: EventPublisher<OrderAcceptedEvent>,
    G: Logger,
{
    /// Accept the order identified by `order_id`.
    ///
    /// Publishes exactly one `OrderAcceptedEvent` when the outcome is
    /// `Accepted`, and none otherwise. Rejections are logged on the error channel,
    /// a successful acceptance on the info channel. Technical failures are returned
    /// without logging through the `Logger`.
    pub fn accept_by_order_id(&self, order_id: &OrderId) -> Result<AcceptOutcome, AcceptError> {
        // 1) Look up
        let found = self
            .lookup
            .find_by_id(order_id)
            .map_err(|e| AcceptError::Lookup(format!("{e:?}")))?;

        let Some(order) = found else {
            self.logger.error(&format!("Order not found: {order_id}"));
            return Ok(AcceptOutcome::NotFound(order_id.clone()));
        };

        // 2) Validate state
        if !order.is_pending() {
            self.logger.error(&format!("Order is not pending: {order_id}"));
            return Ok(AcceptOutcome::InvalidState {
                order_id: order_id.clone(),
                status: order.status(),
            });
        }

        // 3) Derive + publish
        let event = OrderAcceptedEvent::for_pending(&order, Utc::now())?;
        let updated = event.order().clone();
        tracing::debug!(
            event_type = event.event_type(),
            event_id = %event.event_id(),
            order_id = %order_id,
            "publishing"
        );
        self.publisher
            .publish(event)
            .map_err(|e| AcceptError::Publish(format!("{e:?}")))?;

        // 4) Report
        self.logger.info(&format!("Order accepted: {updated}"));
        Ok(AcceptOutcome::Accepted(updated))
    }

    /// Resolve `pickup_code` through `codes`, then accept that order.
    pub fn accept_by_pickup_code<C>(
        &self,
        codes: &C,
        pickup_code: &PickupCode,
    ) -> Result<AcceptOutcome, AcceptError>
    where
        C: PickupCodeService + ?Sized,
    {
        let order_id = codes
            .find_order_id(pickup_code)
            .map_err(|e| AcceptError::PickupCode(format!("{e:?}")))?;

        tracing::debug!(pickup_code = %pickup_code, order_id = %order_id, "pickup code resolved");
        self.accept_by_order_id(&order_id)
    }
}
