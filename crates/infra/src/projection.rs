//! Keeps the order store in step with published acceptances.

use std::sync::Arc;

use orderflow_events::{Event, EventPublisher};
use orderflow_orders::{Order, OrderAcceptedEvent};

use crate::store::{InMemoryOrderStore, TransitionError};

/// Applies `OrderAcceptedEvent`s to an [`InMemoryOrderStore`].
///
/// Used as (or alongside) the workflow's publisher, it makes the store persist each
/// acceptance, so a second acceptance of the same order sees `Accepted`. The write
/// is a compare-and-set from `Pending`; replaying an already-applied event yields a
/// conflict instead of silently succeeding.
#[derive(Debug, Clone)]
pub struct OrderStatusProjection {
    store: Arc<InMemoryOrderStore>,
}

impl OrderStatusProjection {
    pub fn new(store: Arc<InMemoryOrderStore>) -> Self {
        Self { store }
    }

    pub fn apply(&self, event: &OrderAcceptedEvent) -> Result<Order, TransitionError> {
        let order = event.order();
        let stored = self
            .store
            .transition(order.id(), event.previous_status(), order.status())?;

        tracing::debug!(
            event_type = event.event_type(),
            event_id = %event.event_id(),
            order_id = %stored.id(),
            "applied to order store"
        );
        Ok(stored)
    }
}

impl EventPublisher<OrderAcceptedEvent> for OrderStatusProjection {
    type Error = TransitionError;

    fn publish(&self, message: OrderAcceptedEvent) -> Result<(), Self::Error> {
        self.apply(&message).map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use orderflow_core::{DomainError, OrderId};
    use orderflow_orders::{OrderLookup, OrderStatus};

    fn seeded(status: OrderStatus) -> Arc<InMemoryOrderStore> {
        let order = Order::new(OrderId::new("o1").unwrap(), status);
        Arc::new(InMemoryOrderStore::with_orders([order]).unwrap())
    }

    #[test]
    fn publishing_an_acceptance_updates_the_store() {
        let store = seeded(OrderStatus::Pending);
        let projection = OrderStatusProjection::new(Arc::clone(&store));
        let pending = store.find_by_id(&OrderId::new("o1").unwrap()).unwrap().unwrap();

        let event = OrderAcceptedEvent::for_pending(&pending, Utc::now()).unwrap();
        projection.publish(event).unwrap();

        let stored = store.find_by_id(pending.id()).unwrap().unwrap();
        assert_eq!(stored.status(), OrderStatus::Accepted);
    }

    #[test]
    fn replaying_an_acceptance_conflicts() {
        let store = seeded(OrderStatus::Pending);
        let projection = OrderStatusProjection::new(Arc::clone(&store));
        let pending = store.find_by_id(&OrderId::new("o1").unwrap()).unwrap().unwrap();
        let event = OrderAcceptedEvent::for_pending(&pending, Utc::now()).unwrap();

        projection.apply(&event).unwrap();
        let err = projection.apply(&event).unwrap_err();

        assert!(matches!(err, TransitionError::Domain(DomainError::Conflict(_))));
    }
}
