use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use orderflow_core::{DomainError, DomainResult};
use orderflow_events::Event;

use crate::order::{Order, OrderStatus};

/// Event: an order moved from `Pending` to `Accepted`.
///
/// Can only be built from a pending order; the payload always carries the accepted
/// copy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderAcceptedEvent {
    event_id: Uuid,
    order: Order,
    occurred_at: DateTime<Utc>,
}

impl OrderAcceptedEvent {
    pub const EVENT_TYPE: &'static str = "orders.order.accepted";

    /// Accept `order` and wrap the accepted copy.
    pub fn for_pending(order: &Order, occurred_at: DateTime<Utc>) -> DomainResult<Self> {
        if !order.is_pending() {
            return Err(DomainError::invariant(format!(
                "only pending orders can be accepted (order {} is {})",
                order.id(),
                order.status()
            )));
        }

        Ok(Self {
            event_id: Uuid::now_v7(),
            order: order.accepted(),
            occurred_at,
        })
    }

    pub fn event_id(&self) -> Uuid {
        self.event_id
    }

    pub fn order(&self) -> &Order {
        &self.order
    }

    /// Status the order had before acceptance.
    pub fn previous_status(&self) -> OrderStatus {
        OrderStatus::Pending
    }
}

impl Event for OrderAcceptedEvent {
    fn event_type(&self) -> &'static str {
        Self::EVENT_TYPE
    }

    fn version(&self) -> u32 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orderflow_core::OrderId;

    fn order(status: OrderStatus) -> Order {
        Order::new(OrderId::new("o1").unwrap(), status)
    }

    #[test]
    fn pending_order_yields_accepted_payload() {
        let now = Utc::now();
        let event = OrderAcceptedEvent::for_pending(&order(OrderStatus::Pending), now).unwrap();

        assert_eq!(event.order().status(), OrderStatus::Accepted);
        assert_eq!(event.order().id().as_str(), "o1");
        assert_eq!(event.previous_status(), OrderStatus::Pending);
        assert_eq!(event.occurred_at(), now);
        assert_eq!(event.event_type(), "orders.order.accepted");
        assert_eq!(event.version(), 1);
    }

    #[test]
    fn non_pending_orders_are_refused() {
        for status in OrderStatus::ALL.into_iter().filter(|s| *s != OrderStatus::Pending) {
            let err = OrderAcceptedEvent::for_pending(&order(status), Utc::now()).unwrap_err();
            match err {
                DomainError::InvariantViolation(msg) => assert!(msg.contains(status.as_str())),
                other => panic!("expected InvariantViolation, got {other:?}"),
            }
        }
    }

    #[test]
    fn each_event_gets_its_own_id() {
        let pending = order(OrderStatus::Pending);
        let a = OrderAcceptedEvent::for_pending(&pending, Utc::now()).unwrap();
        let b = OrderAcceptedEvent::for_pending(&pending, Utc::now()).unwrap();
        assert_ne!(a.event_id(), b.event_id());
    }

    #[test]
    fn serializes_with_order_payload() {
        let event = OrderAcceptedEvent::for_pending(&order(OrderStatus::Pending), Utc::now()).unwrap();
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["order"]["id"], "o1");
        assert_eq!(json["order"]["status"], "ACCEPTED");
    }
}
