//! Canned collaborators for demos and smoke runs.

use core::convert::Infallible;

use orderflow_core::{OrderId, PickupCode};
use orderflow_orders::{Order, OrderLookup, OrderStatus, PickupCodeService};

/// Lookup that finds a pending order for any id it is asked about.
#[derive(Debug, Clone)]
pub struct StubOrderLookup {
    pickup_code: PickupCode,
}

impl StubOrderLookup {
    pub fn new(pickup_code: PickupCode) -> Self {
        Self { pickup_code }
    }
}

impl OrderLookup for StubOrderLookup {
    type Error = Infallible;

    fn find_by_id(&self, id: &OrderId) -> Result<Option<Order>, Self::Error> {
        Ok(Some(
            Order::new(id.clone(), OrderStatus::Pending).with_pickup_code(self.pickup_code.clone()),
        ))
    }
}

/// Resolver that maps every pickup code to the same order id.
#[derive(Debug, Clone)]
pub struct StubPickupCodeService {
    order_id: OrderId,
}

impl StubPickupCodeService {
    pub fn new(order_id: OrderId) -> Self {
        Self { order_id }
    }
}

impl PickupCodeService for StubPickupCodeService {
    type Error = Infallible;

    fn find_order_id(&self, _pickup_code: &PickupCode) -> Result<OrderId, Self::Error> {
        Ok(self.order_id.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stub_lookup_always_returns_pending() {
        let lookup = StubOrderLookup::new(PickupCode::new("pickupCode").unwrap());
        let id = OrderId::new("anything").unwrap();

        let Ok(Some(order)) = lookup.find_by_id(&id) else {
            panic!("stub lookup must always find an order");
        };
        assert_eq!(order.id(), &id);
        assert!(order.is_pending());
        assert_eq!(order.pickup_code().map(PickupCode::as_str), Some("pickupCode"));
    }

    #[test]
    fn stub_resolver_ignores_the_code() {
        let resolver = StubPickupCodeService::new(OrderId::new("orderId").unwrap());
        for raw in ["a", "b"] {
            let resolved = resolver.find_order_id(&PickupCode::new(raw).unwrap());
            assert_eq!(resolved, Ok(OrderId::new("orderId").unwrap()));
        }
    }
}
